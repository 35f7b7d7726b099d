use crate::components::{ResultModal, WheelControls, WheelCountdown, WheelSvg};
use crate::components::wheel_svg::Segment;
use crate::scheduler::TimeoutScheduler;
use crate::storage::LocalStorageAdapter;
use crate::theme::{segment_color, WheelTheme};
use chrono::Utc;
use gloo_timers::callback::{Interval, Timeout};
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use wheel_core::{
    validate_prizes, watchdog_ms, AnimationDriver, Cadence, PersistenceAdapter, Prize,
    SpinAnimation, SpinEngine, SpinRecord,
};
use yew::prelude::*;

/// Host-injected persistence capability. Compared by identity so swapping
/// the adapter rebuilds the engine.
#[derive(Clone)]
pub struct AdapterRef(pub Rc<dyn PersistenceAdapter>);

impl PartialEq for AdapterRef {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

type WidgetEngine = SpinEngine<Rc<dyn PersistenceAdapter>>;

#[derive(Default)]
struct SpinTimers {
    animation: Option<SpinAnimation<Timeout>>,
    watchdog: Option<Timeout>,
    popup_delay: Option<Timeout>,
}

#[derive(Properties, PartialEq)]
pub struct PrizeWheelProps {
    pub prizes: Vec<Prize>,
    pub cadence: Cadence,
    pub user_id: AttrValue,
    #[prop_or_default]
    pub on_win: Callback<SpinRecord>,
    #[prop_or(AttrValue::Static("prize-wheel"))]
    pub storage_key_base: AttrValue,
    #[prop_or_default]
    pub disabled: bool,
    #[prop_or(true)]
    pub show_countdown: bool,
    #[prop_or_default]
    pub auto_spin: bool,
    #[prop_or_default]
    pub show_result_modal: bool,
    /// Spins the wheel inside a modal instead of inline; the popup stays
    /// open after the spin so the user can read the result.
    #[prop_or_default]
    pub show_wheel_popup: bool,
    /// Enables the administrative reset control (testing/support flows).
    #[prop_or_default]
    pub allow_reset: bool,
    #[prop_or_default]
    pub persistence: Option<AdapterRef>,
    #[prop_or_default]
    pub theme: WheelTheme,
    #[prop_or(AttrValue::Static("Spin the prize wheel"))]
    pub aria_label: AttrValue,
    #[prop_or_default]
    pub class: Classes,
}

/// The embeddable prize wheel. Owns the spin engine, the countdown tick,
/// and the animation/watchdog timers; everything is torn down on unmount.
#[function_component(PrizeWheel)]
pub fn prize_wheel(props: &PrizeWheelProps) -> Html {
    // Everything that determines engine identity; the hydrate effect below
    // keys on the same tuple so every fresh engine gets hydrated.
    let engine_deps = (
        props.prizes.clone(),
        props.cadence,
        props.user_id.clone(),
        props.storage_key_base.clone(),
        props.persistence.clone(),
    );
    let engine: Rc<WidgetEngine> = (*use_memo(
        engine_deps.clone(),
        |(prizes, cadence, user_id, key_base, persistence)| {
            let adapter: Rc<dyn PersistenceAdapter> = match persistence {
                Some(injected) => injected.0.clone(),
                None => Rc::new(LocalStorageAdapter::new(key_base.to_string())),
            };
            Rc::new(SpinEngine::new(prizes, *cadence, user_id.to_string(), adapter))
        },
    ))
    .clone();

    let now = use_state(Utc::now);
    let rotation = use_state(|| 0.0_f64);
    let duration_ms = use_state(|| 0_u32);
    let spinning = use_state(|| false);
    let hydrated = use_state(|| false);
    let modal_result = use_state(|| None::<SpinRecord>);
    let popup_open = use_state(|| false);
    let timers = use_mut_ref(SpinTimers::default);
    let auto_spin_fired = use_mut_ref(|| false);

    engine.set_disabled(props.disabled);

    // Surface prize-list problems to the host console without refusing to
    // render; a bad list simply cannot spin.
    {
        let prizes = props.prizes.clone();
        use_effect_with(props.prizes.clone(), move |_| {
            if let Err(err) = validate_prizes(&prizes) {
                log::warn!("prize list failed validation: {err}");
            }
            || ()
        });
    }

    // One awaited hydrate per engine identity.
    {
        let engine = engine.clone();
        let hydrated = hydrated.clone();
        let now = now.clone();
        use_effect_with(engine_deps, move |_| {
            hydrated.set(false);
            spawn_local(async move {
                engine.hydrate().await;
                now.set(Utc::now());
                hydrated.set(true);
            });
            || ()
        });
    }

    // 1s tick driving the countdown and lock recomputation.
    {
        let now = now.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(1000, move || now.set(Utc::now()));
            move || drop(interval)
        });
    }

    let begin_spin = {
        let engine = engine.clone();
        let rotation = rotation.clone();
        let duration_ms = duration_ms.clone();
        let spinning = spinning.clone();
        let now = now.clone();
        let modal_result = modal_result.clone();
        let timers = timers.clone();
        let on_win = props.on_win.clone();
        let show_result_modal = props.show_result_modal;
        let show_wheel_popup = props.show_wheel_popup;
        let theme = props.theme.clone();

        Callback::from(move |_: ()| {
            let Some(plan) = engine.trigger(Utc::now()) else {
                return;
            };

            let config = theme.animation();
            let driver = AnimationDriver::new(TimeoutScheduler, config.clone());

            let on_complete: Box<dyn FnOnce()> = {
                let engine = engine.clone();
                let spinning = spinning.clone();
                let now = now.clone();
                let modal_result = modal_result.clone();
                let on_win = on_win.clone();
                Box::new(move || {
                    let completed_at = Utc::now();
                    if let Some(record) = engine.complete(completed_at) {
                        on_win.emit(record.clone());
                        if show_result_modal || show_wheel_popup {
                            modal_result.set(Some(record.clone()));
                        }
                        let engine = engine.clone();
                        spawn_local(async move {
                            engine.persist(&record).await;
                        });
                    }
                    spinning.set(false);
                    now.set(completed_at);
                })
            };

            let animation = driver.begin(plan.index, plan.segment_count, on_complete);

            // The target angle is absolute; re-base it on the current
            // resting angle so consecutive spins always move forward.
            let resting = *rotation - (*rotation % 360.0);
            rotation.set(resting + animation.target.rotation_degrees);
            duration_ms.set(animation.target.duration_ms);
            spinning.set(true);

            let watchdog = {
                let engine = engine.clone();
                let spinning = spinning.clone();
                Timeout::new(watchdog_ms(&config), move || {
                    engine.expire_watchdog();
                    spinning.set(false);
                })
            };

            *timers.borrow_mut() = SpinTimers {
                animation: Some(animation),
                watchdog: Some(watchdog),
                popup_delay: None,
            };
        })
    };

    // In popup mode the modal wheel has to mount at rest before the
    // rotation changes, otherwise the CSS transition never runs.
    let trigger = {
        let engine = engine.clone();
        let begin_spin = begin_spin.clone();
        let popup_open = popup_open.clone();
        let timers = timers.clone();
        let show_wheel_popup = props.show_wheel_popup;
        Callback::from(move |_: ()| {
            if engine.spin_block(Utc::now()).is_some() {
                return;
            }
            if show_wheel_popup && !*popup_open {
                popup_open.set(true);
                let begin_spin = begin_spin.clone();
                timers.borrow_mut().popup_delay =
                    Some(Timeout::new(50, move || begin_spin.emit(())));
            } else {
                begin_spin.emit(());
            }
        })
    };

    // Single-shot auto spin per mount, once hydrated and unlocked.
    {
        let trigger = trigger.clone();
        let auto_spin_fired = auto_spin_fired.clone();
        let locked = engine.is_locked(*now);
        let ready = props.auto_spin && *hydrated && !locked && !*spinning;
        use_effect_with(ready, move |ready| {
            let handle = if *ready && !*auto_spin_fired.borrow() {
                *auto_spin_fired.borrow_mut() = true;
                Some(Timeout::new(150, move || trigger.emit(())))
            } else {
                None
            };
            move || drop(handle)
        });
    }

    let on_reset = props.allow_reset.then(|| {
        let engine = engine.clone();
        let spinning = spinning.clone();
        let now = now.clone();
        let modal_result = modal_result.clone();
        let timers = timers.clone();
        Callback::from(move |_: MouseEvent| {
            *timers.borrow_mut() = SpinTimers::default();
            spinning.set(false);
            modal_result.set(None);
            let engine = engine.clone();
            let now = now.clone();
            spawn_local(async move {
                engine.reset().await;
                now.set(Utc::now());
            });
        })
    });

    let locked = engine.is_locked(*now);
    let block = engine.spin_block(Utc::now());
    let controls_disabled = block.is_some();
    let disabled_reason = block.map(|b| b.to_string());

    let countdown_message = (props.show_countdown && locked)
        .then(|| {
            engine.next_eligible_at().map(|next| {
                let remaining_ms = (next - *now).num_milliseconds();
                format!(
                    "Available in {}",
                    wheel_core::format_countdown_compact(remaining_ms)
                )
            })
        })
        .flatten();

    let segments: Vec<Segment> = engine
        .outcome()
        .iter()
        .enumerate()
        .map(|(i, prize)| Segment {
            label: prize.label.clone(),
            color: segment_color(prize, i),
            icon: prize.icon.clone(),
        })
        .collect();

    let dim = props.disabled || locked || *spinning;
    let on_spin_click = {
        let trigger = trigger.clone();
        Callback::from(move |_: MouseEvent| trigger.emit(()))
    };
    let on_modal_close = {
        let modal_result = modal_result.clone();
        Callback::from(move |_: MouseEvent| modal_result.set(None))
    };
    let on_popup_close = {
        let popup_open = popup_open.clone();
        let modal_result = modal_result.clone();
        Callback::from(move |_: MouseEvent| {
            popup_open.set(false);
            modal_result.set(None);
        })
    };

    html! {
        <div class={classes!("flex", "flex-col", "items-center", "gap-3", props.class.clone())}>
            <WheelCountdown message={countdown_message} />
            <div
                aria-label={props.aria_label.clone()}
                style={if dim { "position: relative; opacity: 0.85;" } else { "position: relative;" }}
            >
                <WheelSvg
                    segments={segments.clone()}
                    rotation={*rotation}
                    duration_ms={*duration_ms}
                    spinning={*spinning}
                    on_spin={on_spin_click.clone()}
                    size={props.theme.size}
                    accent_color={props.theme.accent_color.clone()}
                    text_color={props.theme.text_color.clone()}
                />
            </div>
            <WheelControls
                on_spin={on_spin_click.clone()}
                on_reset={on_reset}
                disabled={controls_disabled}
            />
            {
                if let Some(reason) = disabled_reason.filter(|_| controls_disabled) {
                    html! {
                        <p class="text-xs text-gray-500 dark:text-gray-400">
                            { format!("Spin disabled: {reason}") }
                        </p>
                    }
                } else {
                    html! {}
                }
            }
            {
                if props.show_wheel_popup && *popup_open {
                    html! {
                        <div class="fixed inset-0 z-50 flex items-center justify-center">
                            <div
                                class="absolute inset-0 bg-black/60 backdrop-blur-sm"
                                onclick={on_popup_close.clone()}
                            />
                            <div class="relative z-10 flex flex-col items-center gap-3 rounded-lg border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 p-4 shadow-xl">
                                <WheelSvg
                                    segments={segments}
                                    rotation={*rotation}
                                    duration_ms={*duration_ms}
                                    spinning={*spinning}
                                    on_spin={on_spin_click}
                                    size={props.theme.size + 40}
                                    accent_color={props.theme.accent_color.clone()}
                                    text_color={props.theme.text_color.clone()}
                                />
                                {
                                    if let Some(record) = (*modal_result).clone() {
                                        html! {
                                            <p class="mt-1 text-center text-sm text-gray-900 dark:text-white">
                                                { "You won: " }<strong>{ record.label }</strong>
                                            </p>
                                        }
                                    } else {
                                        html! {}
                                    }
                                }
                                <div class="flex w-full justify-end">
                                    <button
                                        type="button"
                                        class="px-3 py-1 rounded border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-200"
                                        onclick={on_popup_close}
                                    >
                                        { "Close" }
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                } else if let Some(record) = (*modal_result).clone() {
                    html! { <ResultModal {record} on_close={on_modal_close} /> }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
