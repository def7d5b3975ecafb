use std::rc::Rc;

use agora_client::{
    api::{Comment, CommentId, Viewer},
    ActiveEditor, CommentHandler, ThreadConfig, ThreadView,
};
use yew::prelude::*;

use crate::ui;

/// The five callbacks of a thread, handed down unchanged to every level
#[derive(Clone, PartialEq)]
pub struct CommentCallbacks {
    pub on_reply: Callback<(CommentId, String)>,
    pub on_edit: Callback<(CommentId, String)>,
    pub on_delete: Callback<CommentId>,
    pub on_like: Callback<CommentId>,
    pub on_mark_solution: Callback<CommentId>,
}

impl CommentHandler for CommentCallbacks {
    fn on_reply(&self, parent_id: CommentId, content: String) {
        self.on_reply.emit((parent_id, content))
    }

    fn on_edit(&self, comment_id: CommentId, content: String) {
        self.on_edit.emit((comment_id, content))
    }

    fn on_delete(&self, comment_id: CommentId) {
        self.on_delete.emit(comment_id)
    }

    fn on_like(&self, comment_id: CommentId) {
        self.on_like.emit(comment_id)
    }

    fn on_mark_solution(&self, comment_id: CommentId) {
        self.on_mark_solution.emit(comment_id)
    }
}

#[derive(Clone, PartialEq, Properties)]
pub struct CommentThreadProps {
    pub comments: Rc<Vec<Comment>>,
    pub viewer: Viewer,
    #[prop_or_default]
    pub level: usize,
    #[prop_or_default]
    pub config: ThreadConfig,
    pub on_reply: Callback<(CommentId, String)>,
    pub on_edit: Callback<(CommentId, String)>,
    pub on_delete: Callback<CommentId>,
    pub on_like: Callback<CommentId>,
    pub on_mark_solution: Callback<CommentId>,
}

/// A forest of comments, with the single composer state shared by all its levels
#[function_component(CommentThread)]
pub fn comment_thread(p: &CommentThreadProps) -> Html {
    let editor = use_state(ActiveEditor::default);
    let view = ThreadView::build(
        &p.comments,
        &p.viewer,
        &editor,
        &p.config,
        p.level,
        &chrono::Utc::now(),
    );
    let callbacks = CommentCallbacks {
        on_reply: p.on_reply.clone(),
        on_edit: p.on_edit.clone(),
        on_delete: p.on_delete.clone(),
        on_like: p.on_like.clone(),
        on_mark_solution: p.on_mark_solution.clone(),
    };
    html! {
        <div class="comment-thread">
            { for view.rows.into_iter().map(|row| html! {
                <ui::CommentNode
                    key={ row.id.0.to_string() }
                    { row }
                    comments={ p.comments.clone() }
                    editor={ editor.clone() }
                    callbacks={ callbacks.clone() }
                />
            }) }
        </div>
    }
}
