use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelCountdownProps {
    pub message: Option<String>,
}

/// Announces the time until the next eligible spin. Rendered even when
/// empty so the aria-live region exists before the lock engages.
#[function_component(WheelCountdown)]
pub fn wheel_countdown(props: &WheelCountdownProps) -> Html {
    html! {
        <div aria-live="polite" class="text-sm text-gray-600 dark:text-gray-300">
            { props.message.clone().unwrap_or_default() }
        </div>
    }
}
