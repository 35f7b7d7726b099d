use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use web_sys::{window, HtmlInputElement, HtmlSelectElement};
use wheel_core::{Cadence, Prize, SpinRecord};
use wheel_widget::{PrizeWheel, WheelTheme};
use yew::prelude::*;

const SETTINGS_KEY: &str = "wheel_demo_settings_v1";
const DEMO_USER_ID: &str = "demo-user-123";

struct ThemePreset {
    name: &'static str,
    size: u32,
    spin_up_ms: u32,
    spin_down_ms: u32,
    accent_color: &'static str,
    text_color: &'static str,
}

const THEME_PRESETS: [ThemePreset; 4] = [
    ThemePreset {
        name: "Default",
        size: 240,
        spin_up_ms: 200,
        spin_down_ms: 1100,
        accent_color: "#6d28d9",
        text_color: "#ffffff",
    },
    ThemePreset {
        name: "Compact",
        size: 200,
        spin_up_ms: 150,
        spin_down_ms: 900,
        accent_color: "#0ea5e9",
        text_color: "#ffffff",
    },
    ThemePreset {
        name: "Bold",
        size: 280,
        spin_up_ms: 220,
        spin_down_ms: 1300,
        accent_color: "#ef4444",
        text_color: "#ffffff",
    },
    ThemePreset {
        name: "Slow",
        size: 260,
        spin_up_ms: 400,
        spin_down_ms: 2200,
        accent_color: "#22c55e",
        text_color: "#111827",
    },
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct DemoSettings {
    cadence: Cadence,
    auto_spin: bool,
    show_result_modal: bool,
    allow_reset: bool,
    preset: String,
    size: u32,
    spin_up_ms: u32,
    spin_down_ms: u32,
    accent_color: String,
    text_color: String,
    prizes: Vec<Prize>,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            cadence: Cadence::Hourly,
            auto_spin: false,
            show_result_modal: true,
            allow_reset: true,
            preset: "Default".to_string(),
            size: 240,
            spin_up_ms: 200,
            spin_down_ms: 1100,
            accent_color: "#6d28d9".to_string(),
            text_color: "#ffffff".to_string(),
            prizes: vec![
                Prize {
                    id: "p1".into(),
                    label: "10 Credits".into(),
                    weight: Some(2.0),
                    color: Some("#6d28d9".into()),
                    icon: None,
                },
                Prize {
                    id: "p2".into(),
                    label: "Try Again".into(),
                    weight: Some(3.0),
                    color: Some("#8b5cf6".into()),
                    icon: None,
                },
                Prize {
                    id: "p3".into(),
                    label: "25 Credits".into(),
                    weight: Some(1.0),
                    color: Some("#d946ef".into()),
                    icon: None,
                },
                Prize {
                    id: "p4".into(),
                    label: "5 Credits".into(),
                    weight: Some(4.0),
                    color: Some("#22c55e".into()),
                    icon: None,
                },
            ],
        }
    }
}

fn load_settings() -> DemoSettings {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(SETTINGS_KEY).ok().flatten())
        .and_then(|raw| serde_json::from_str(&raw).ok())
        .unwrap_or_default()
}

fn save_settings(settings: &DemoSettings) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        if let Ok(json) = serde_json::to_string(settings) {
            let _ = storage.set_item(SETTINGS_KEY, &json);
        }
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let settings = use_state(load_settings);
    let wins = use_state(Vec::<SpinRecord>::new);

    {
        let current = (*settings).clone();
        use_effect_with(current, |settings| {
            save_settings(settings);
            || ()
        });
    }

    let on_win = {
        let wins = wins.clone();
        Callback::from(move |record: SpinRecord| {
            log::info!("WIN: {} ({})", record.label, record.prize_id);
            let mut list = (*wins).clone();
            list.insert(0, record);
            list.truncate(8);
            wins.set(list);
        })
    };

    let update = {
        let settings = settings.clone();
        move |apply: Box<dyn Fn(&mut DemoSettings)>| {
            let settings = settings.clone();
            Callback::from(move |_: Event| {
                let mut next = (*settings).clone();
                apply(&mut next);
                settings.set(next);
            })
        }
    };

    let on_cadence_change = {
        let settings = settings.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                if let Ok(cadence) = select.value().parse::<Cadence>() {
                    let mut next = (*settings).clone();
                    next.cadence = cadence;
                    settings.set(next);
                }
            }
        })
    };

    let on_preset_change = {
        let settings = settings.clone();
        Callback::from(move |event: Event| {
            if let Some(select) = event.target_dyn_into::<HtmlSelectElement>() {
                let name = select.value();
                if let Some(preset) = THEME_PRESETS.iter().find(|p| p.name == name) {
                    let mut next = (*settings).clone();
                    next.preset = preset.name.to_string();
                    next.size = preset.size;
                    next.spin_up_ms = preset.spin_up_ms;
                    next.spin_down_ms = preset.spin_down_ms;
                    next.accent_color = preset.accent_color.to_string();
                    next.text_color = preset.text_color.to_string();
                    settings.set(next);
                }
            }
        })
    };

    let toggle = |field: fn(&mut DemoSettings)| update(Box::new(field));
    let on_auto_spin = toggle(|s| s.auto_spin = !s.auto_spin);
    let on_result_modal = toggle(|s| s.show_result_modal = !s.show_result_modal);
    let on_allow_reset = toggle(|s| s.allow_reset = !s.allow_reset);

    let on_prize_field = {
        let settings = settings.clone();
        move |index: usize, field: fn(&mut Prize, String)| {
            let settings = settings.clone();
            Callback::from(move |event: Event| {
                if let Some(input) = event.target_dyn_into::<HtmlInputElement>() {
                    let mut next = (*settings).clone();
                    if let Some(prize) = next.prizes.get_mut(index) {
                        field(prize, input.value());
                        settings.set(next);
                    }
                }
            })
        }
    };

    let on_add_prize = {
        let settings = settings.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = (*settings).clone();
            let id = format!("p{}", next.prizes.len() + 1);
            next.prizes.push(Prize::new(id, "New Prize").with_weight(1.0));
            settings.set(next);
        })
    };

    let on_remove_prize = {
        let settings = settings.clone();
        move |index: usize| {
            let settings = settings.clone();
            Callback::from(move |_: MouseEvent| {
                let mut next = (*settings).clone();
                next.prizes.remove(index);
                settings.set(next);
            })
        }
    };

    let theme = WheelTheme {
        size: settings.size,
        spin_up_ms: settings.spin_up_ms,
        spin_down_ms: settings.spin_down_ms,
        accent_color: settings.accent_color.clone(),
        text_color: settings.text_color.clone(),
    };

    html! {
        <div class="container mx-auto px-4 py-8">
            <h1 class="text-3xl font-bold mb-6 text-center text-gray-900 dark:text-white">
                { "Prize Wheel Demo" }
            </h1>

            <div class="flex flex-col lg:flex-row gap-8 justify-center">
                <div class="bg-white dark:bg-gray-800 p-6 rounded-2xl shadow-xl">
                    <PrizeWheel
                        prizes={settings.prizes.clone()}
                        cadence={settings.cadence}
                        user_id={DEMO_USER_ID}
                        on_win={on_win}
                        auto_spin={settings.auto_spin}
                        show_result_modal={settings.show_result_modal}
                        allow_reset={settings.allow_reset}
                        theme={theme}
                    />
                </div>

                <div class="bg-white dark:bg-gray-800 p-6 rounded-2xl shadow-xl max-w-md w-full">
                    <h2 class="text-lg font-semibold mb-4 text-gray-900 dark:text-white">{ "Settings" }</h2>

                    <label class="block mb-3 text-sm text-gray-700 dark:text-gray-300">
                        { "Cadence" }
                        <select class="block mt-1 w-full rounded border-gray-300 dark:bg-gray-700"
                                onchange={on_cadence_change}>
                            {
                                Cadence::iter().map(|cadence| {
                                    let value = cadence.to_string();
                                    html! {
                                        <option value={value.clone()}
                                                selected={cadence == settings.cadence}>
                                            { value }
                                        </option>
                                    }
                                }).collect::<Html>()
                            }
                        </select>
                    </label>

                    <label class="block mb-3 text-sm text-gray-700 dark:text-gray-300">
                        { "Theme preset" }
                        <select class="block mt-1 w-full rounded border-gray-300 dark:bg-gray-700"
                                onchange={on_preset_change}>
                            {
                                THEME_PRESETS.iter().map(|preset| {
                                    html! {
                                        <option value={preset.name}
                                                selected={preset.name == settings.preset}>
                                            { preset.name }
                                        </option>
                                    }
                                }).collect::<Html>()
                            }
                        </select>
                    </label>

                    <label class="flex items-center gap-2 mb-2 text-sm text-gray-700 dark:text-gray-300">
                        <input type="checkbox" checked={settings.auto_spin} onchange={on_auto_spin} />
                        { "Auto spin when eligible" }
                    </label>
                    <label class="flex items-center gap-2 mb-2 text-sm text-gray-700 dark:text-gray-300">
                        <input type="checkbox" checked={settings.show_result_modal} onchange={on_result_modal} />
                        { "Show result modal" }
                    </label>
                    <label class="flex items-center gap-2 mb-4 text-sm text-gray-700 dark:text-gray-300">
                        <input type="checkbox" checked={settings.allow_reset} onchange={on_allow_reset} />
                        { "Allow admin reset" }
                    </label>

                    <h3 class="font-semibold mb-2 text-gray-900 dark:text-white">{ "Prizes" }</h3>
                    {
                        settings.prizes.iter().enumerate().map(|(i, prize)| {
                            html! {
                                <div key={prize.id.clone()} class="flex items-center gap-2 mb-2">
                                    <input
                                        class="flex-1 rounded border-gray-300 dark:bg-gray-700 text-sm"
                                        value={prize.label.clone()}
                                        onchange={on_prize_field(i, |p, v| p.label = v)}
                                    />
                                    <input
                                        class="w-16 rounded border-gray-300 dark:bg-gray-700 text-sm"
                                        type="number" min="1"
                                        value={prize.weight.map(|w| w.to_string()).unwrap_or_default()}
                                        onchange={on_prize_field(i, |p, v| p.weight = v.parse().ok())}
                                    />
                                    <input
                                        class="w-10 h-8"
                                        type="color"
                                        value={prize.color.clone().unwrap_or_else(|| "#6d28d9".into())}
                                        onchange={on_prize_field(i, |p, v| p.color = Some(v))}
                                    />
                                    <button
                                        type="button"
                                        class="text-red-500 text-sm"
                                        onclick={on_remove_prize(i)}
                                    >
                                        { "✕" }
                                    </button>
                                </div>
                            }
                        }).collect::<Html>()
                    }
                    <button
                        type="button"
                        class="mt-2 px-3 py-1 rounded border border-gray-300 dark:border-gray-600 text-sm text-gray-700 dark:text-gray-300"
                        onclick={on_add_prize}
                    >
                        { "Add prize" }
                    </button>

                    <h3 class="font-semibold mt-6 mb-2 text-gray-900 dark:text-white">{ "Recent wins" }</h3>
                    {
                        if wins.is_empty() {
                            html! { <p class="text-sm text-gray-500">{ "No spins yet." }</p> }
                        } else {
                            wins.iter().map(|record| {
                                html! {
                                    <div class="text-sm text-gray-700 dark:text-gray-300">
                                        { format!("{} - {}", record.label, record.at.format("%H:%M:%S")) }
                                    </div>
                                }
                            }).collect::<Html>()
                        }
                    }
                </div>
            </div>
        </div>
    }
}
