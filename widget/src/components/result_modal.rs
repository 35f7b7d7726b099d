use chrono::Local;
use wheel_core::SpinRecord;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ResultModalProps {
    pub record: SpinRecord,
    pub on_close: Callback<MouseEvent>,
}

#[function_component(ResultModal)]
pub fn result_modal(props: &ResultModalProps) -> Html {
    let won_at = props
        .record
        .at
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    html! {
        <div class="fixed inset-0 z-50 flex items-center justify-center">
            <div
                class="absolute inset-0 bg-black/60 backdrop-blur-sm"
                onclick={props.on_close.clone()}
            />
            <div class="relative z-10 w-[340px] rounded-lg border border-gray-200 dark:border-gray-700 bg-white dark:bg-gray-800 p-4 shadow-xl">
                <h3 class="mb-2 text-lg font-semibold text-gray-900 dark:text-white">{ "You won!" }</h3>
                <p class="mb-4 text-sm text-gray-600 dark:text-gray-300">
                    { "Prize: " }<strong>{ &props.record.label }</strong>
                    <br />
                    { format!("Time: {won_at}") }
                </p>
                <div class="flex justify-end">
                    <button
                        type="button"
                        class="px-3 py-1 rounded border border-gray-300 dark:border-gray-600 text-gray-700 dark:text-gray-200"
                        onclick={props.on_close.clone()}
                    >
                        { "Close" }
                    </button>
                </div>
            </div>
        </div>
    }
}
