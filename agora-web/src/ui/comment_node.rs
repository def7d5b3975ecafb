use std::rc::Rc;

use agora_client::{
    api::Comment, prelude::*, role_class, ActiveEditor, BodyView, CommentRow, Intent, MenuItem,
};
use yew::prelude::*;

use crate::ui::{self, CommentCallbacks};

#[derive(Clone, PartialEq, Properties)]
pub struct CommentNodeProps {
    pub row: CommentRow,
    pub comments: Rc<Vec<Comment>>,
    pub editor: UseStateHandle<ActiveEditor>,
    pub callbacks: CommentCallbacks,
}

#[function_component(CommentNode)]
pub fn comment_node(p: &CommentNodeProps) -> Html {
    let row = &p.row;
    html! {
        <div class={ classes!("comment", "d-flex", "gap-2", "mt-3", row.is_solution.then(|| "comment-solution")) }>
            { avatar(row) }
            <div class="flex-fill">
                { header(row) }
                { body(p) }
                { actions(p) }
                { for row.reply_draft.as_ref().map(|draft| html! {
                    <ui::Composer
                        draft={ draft.clone() }
                        placeholder="Write a reply"
                        submit_label="Reply"
                        on_input={ on_input(&p.editor) }
                        on_submit={ on_submit(&p.editor, &p.callbacks) }
                        on_cancel={ on_cancel(&p.editor) }
                    />
                }) }
                if !row.children.is_empty() {
                    <div class="comment-replies border-start ps-3">
                        { for row.children.iter().map(|child| html! {
                            <CommentNode
                                key={ child.id.0.to_string() }
                                row={ child.clone() }
                                comments={ p.comments.clone() }
                                editor={ p.editor.clone() }
                                callbacks={ p.callbacks.clone() }
                            />
                        }) }
                    </div>
                }
            </div>
        </div>
    }
}

fn avatar(row: &CommentRow) -> Html {
    match &row.avatar_url {
        Some(url) => html! {
            <img class="avatar rounded-circle" src={ url.clone() } alt={ row.author_name.clone() } />
        },
        None => html! {
            <div class="avatar rounded-circle bg-secondary text-white d-flex align-items-center justify-content-center">
                { row.initial() }
            </div>
        },
    }
}

fn header(row: &CommentRow) -> Html {
    html! {
        <div class="d-flex align-items-center gap-2 small">
            <span class="fw-semibold">{ &row.author_name }</span>
            <span class={ classes!("badge", role_class(row.author_role)) }>
                { row.author_role.label() }
            </span>
            { for row.reputation_badge.map(|r| html! {
                <span class="badge text-bg-warning" title="Reputation">
                    <span class="bi-star-fill me-1" aria-hidden="true"></span>
                    { r }
                </span>
            }) }
            if row.is_solution {
                <span class="badge text-bg-success">
                    <span class="bi-check-circle-fill me-1" aria-hidden="true"></span>
                    { "Solution" }
                </span>
            }
            <span class="text-body-secondary">{ &row.timestamp }</span>
        </div>
    }
}

fn body(p: &CommentNodeProps) -> Html {
    match &p.row.body {
        BodyView::Formatted(blocks) => ui::render_blocks(blocks),
        BodyView::Editing { draft } => html! {
            <ui::Composer
                draft={ draft.clone() }
                placeholder="Edit your comment"
                submit_label="Save"
                on_input={ on_input(&p.editor) }
                on_submit={ on_submit(&p.editor, &p.callbacks) }
                on_cancel={ on_cancel(&p.editor) }
            />
        },
    }
}

fn actions(p: &CommentNodeProps) -> Html {
    let row = &p.row;
    let caps = row.capabilities;
    let id = row.id;
    let on_like = {
        let callbacks = p.callbacks.clone();
        Callback::from(move |_| Intent::Like(id).dispatch(&callbacks))
    };
    let on_reply = {
        let editor = p.editor.clone();
        Callback::from(move |_| {
            let mut next = (*editor).clone();
            next.toggle_reply(id);
            editor.set(next);
        })
    };
    let on_mark_solution = {
        let callbacks = p.callbacks.clone();
        Callback::from(move |_| Intent::MarkSolution(id).dispatch(&callbacks))
    };
    let solution_label = match row.is_solution {
        true => "Unmark solution",
        false => "Mark as solution",
    };
    html! {
        <div class="comment-actions d-flex align-items-center gap-1">
            if caps.can_like {
                <button
                    type="button"
                    class="btn btn-sm btn-link text-decoration-none"
                    aria-label="Like"
                    onclick={ on_like }
                >
                    <span class="bi-hand-thumbs-up me-1" aria-hidden="true"></span>
                    { row.like_count }
                </button>
            }
            if caps.can_reply {
                <button type="button" class="btn btn-sm btn-link text-decoration-none" onclick={ on_reply }>
                    { "Reply" }
                </button>
            }
            if caps.can_mark_solution {
                <button type="button" class="btn btn-sm btn-link text-decoration-none" onclick={ on_mark_solution }>
                    { solution_label }
                </button>
            }
            { menu(p) }
        </div>
    }
}

fn menu(p: &CommentNodeProps) -> Html {
    let items = p.row.capabilities.menu_items();
    if items.is_empty() {
        return html! {};
    }
    html! {
        <div class="dropdown ms-auto">
            <button
                type="button"
                class="btn btn-sm btn-link bi-btn bi-three-dots"
                title="More"
                data-bs-toggle="dropdown"
            >
            </button>
            <ul class="dropdown-menu dropdown-menu-end">
                { for items.into_iter().map(|i| menu_item(p, i)) }
            </ul>
        </div>
    }
}

fn menu_item(p: &CommentNodeProps, item: MenuItem) -> Html {
    let id = p.row.id;
    let (icon, label, onclick) = match item {
        MenuItem::Edit => {
            let editor = p.editor.clone();
            let comments = p.comments.clone();
            let cb = Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                match comments.find_comment(&id) {
                    Some(c) => {
                        let mut next = (*editor).clone();
                        next.open_edit(c);
                        editor.set(next);
                    }
                    None => tracing::warn!(comment=?id, "editing a comment that is no longer in the thread"),
                }
            });
            ("bi-pencil", "Edit", cb)
        }
        MenuItem::Delete => {
            let callbacks = p.callbacks.clone();
            let cb = Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                if confirm("Delete this comment and all its replies?") {
                    Intent::Delete(id).dispatch(&callbacks);
                }
            });
            ("bi-trash", "Delete", cb)
        }
        MenuItem::Report => {
            let cb = Callback::from(move |e: MouseEvent| {
                e.prevent_default();
                tracing::info!(comment=?id, "comment reported");
            });
            ("bi-flag", "Report", cb)
        }
    };
    html! {
        <li><a class="dropdown-item" href="#" { onclick }>
            <span class={ classes!(icon, "me-2") } aria-hidden="true"></span>
            { label }
        </a></li>
    }
}

fn confirm(message: &str) -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    match window.confirm_with_message(message) {
        Ok(res) => res,
        Err(err) => {
            tracing::error!(?err, "failed showing confirmation dialog");
            false
        }
    }
}

fn on_input(editor: &UseStateHandle<ActiveEditor>) -> Callback<String> {
    let editor = editor.clone();
    Callback::from(move |text| {
        let mut next = (*editor).clone();
        next.set_draft(text);
        editor.set(next);
    })
}

fn on_submit(editor: &UseStateHandle<ActiveEditor>, callbacks: &CommentCallbacks) -> Callback<()> {
    let editor = editor.clone();
    let callbacks = callbacks.clone();
    Callback::from(move |()| {
        let mut next = (*editor).clone();
        match next.submit() {
            Ok(intent) => {
                editor.set(next);
                intent.dispatch(&callbacks);
            }
            Err(err) => tracing::debug!(%err, "not submitting comment"),
        }
    })
}

fn on_cancel(editor: &UseStateHandle<ActiveEditor>) -> Callback<()> {
    let editor = editor.clone();
    Callback::from(move |()| {
        let mut next = (*editor).clone();
        next.cancel();
        editor.set(next);
    })
}
