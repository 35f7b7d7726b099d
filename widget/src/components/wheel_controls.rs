use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelControlsProps {
    pub on_spin: Callback<MouseEvent>,
    #[prop_or_default]
    pub on_reset: Option<Callback<MouseEvent>>,
    #[prop_or_default]
    pub disabled: bool,
}

/// Spin button plus the administrative reset, which only renders when the
/// host explicitly enables it.
#[function_component(WheelControls)]
pub fn wheel_controls(props: &WheelControlsProps) -> Html {
    let spin_class = if props.disabled {
        "px-4 py-2 rounded-full font-bold text-white bg-gradient-to-r from-gray-400 to-gray-500 opacity-75 cursor-not-allowed"
    } else {
        "px-4 py-2 rounded-full font-bold text-white bg-gradient-to-r from-yellow-400 to-orange-500 hover:from-yellow-500 hover:to-orange-600 shadow-lg"
    };

    html! {
        <div class="flex items-center gap-2">
            <button
                type="button"
                class={spin_class}
                onclick={props.on_spin.clone()}
                disabled={props.disabled}
            >
                { "Spin Now" }
            </button>
            {
                if let Some(on_reset) = &props.on_reset {
                    html! {
                        <button
                            type="button"
                            class="px-4 py-2 rounded-full border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-300"
                            onclick={on_reset.clone()}
                        >
                            { "Reset" }
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}
