use yew::prelude::*;

#[derive(Clone, PartialEq, Properties)]
pub struct ComposerProps {
    pub draft: String,
    pub placeholder: &'static str,
    pub submit_label: &'static str,
    pub on_input: Callback<String>,
    pub on_submit: Callback<()>,
    #[prop_or_default]
    pub on_cancel: Option<Callback<()>>,
}

/// Text area with submit and cancel buttons
///
/// Ctrl+Enter submits, Escape cancels. Blank drafts can be submitted: the
/// owner of the composer state is what rejects them.
#[function_component(Composer)]
pub fn composer(p: &ComposerProps) -> Html {
    let on_input = p.on_input.reform(|e: InputEvent| {
        let area: web_sys::HtmlTextAreaElement = e.target_unchecked_into();
        area.value()
    });
    let on_keydown = {
        let on_submit = p.on_submit.clone();
        let on_cancel = p.on_cancel.clone();
        Callback::from(move |e: KeyboardEvent| match &e.key() as &str {
            "Enter" if e.ctrl_key() || e.meta_key() => {
                e.prevent_default();
                on_submit.emit(());
            }
            "Escape" => {
                if let Some(on_cancel) = &on_cancel {
                    on_cancel.emit(());
                }
            }
            _ => (),
        })
    };
    let cancel_button = p.on_cancel.as_ref().map(|on_cancel| {
        html! {
            <button
                type="button"
                class="btn btn-sm btn-outline-secondary"
                onclick={ on_cancel.reform(|_| ()) }
            >
                { "Cancel" }
            </button>
        }
    });
    html! {
        <div class="composer my-2">
            <textarea
                class="form-control mb-2"
                rows="3"
                placeholder={ p.placeholder }
                aria-label={ p.placeholder }
                value={ p.draft.clone() }
                oninput={ on_input }
                onkeydown={ on_keydown }
            />
            <div class="d-flex gap-2 justify-content-end">
                { for cancel_button }
                <button
                    type="button"
                    class="btn btn-sm btn-primary"
                    disabled={ p.draft.trim().is_empty() }
                    onclick={ p.on_submit.reform(|_| ()) }
                >
                    { p.submit_label }
                </button>
            </div>
        </div>
    }
}
