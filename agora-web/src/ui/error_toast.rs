use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ErrorToastProps {
    pub message: Option<String>,
    pub on_dismiss: Callback<()>,
}

#[function_component(ErrorToast)]
pub fn error_toast(p: &ErrorToastProps) -> Html {
    let shown = p.message.is_some();
    html! {
        <div
            class={ classes!(
                "toast", shown.then(|| "show"),
                "position-fixed", "bottom-0", "end-0", "m-3", "text-bg-danger"
            ) }
            role="alert"
            aria-hidden={ if shown { "false" } else { "true" } }
        >
            <div class="d-flex">
                <div class="toast-body">{ p.message.clone().unwrap_or_default() }</div>
                <button
                    type="button"
                    class="btn-close btn-close-white me-2 m-auto"
                    aria-label="Close"
                    onclick={ p.on_dismiss.reform(|_| ()) }
                >
                </button>
            </div>
        </div>
    }
}
