use crate::api::CommentId;

/// The five things a comment thread asks its host to do
///
/// Calls are fire-and-forget: the thread neither waits for nor inspects the
/// outcome, the host is expected to report failures and re-supply the forest.
pub trait CommentHandler {
    fn on_reply(&self, parent_id: CommentId, content: String);
    fn on_edit(&self, comment_id: CommentId, content: String);
    fn on_delete(&self, comment_id: CommentId);
    fn on_like(&self, comment_id: CommentId);
    fn on_mark_solution(&self, comment_id: CommentId);
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Intent {
    Reply { parent_id: CommentId, content: String },
    Edit { comment_id: CommentId, content: String },
    Delete(CommentId),
    Like(CommentId),
    MarkSolution(CommentId),
}

impl Intent {
    pub fn dispatch<H: CommentHandler + ?Sized>(self, handler: &H) {
        tracing::debug!(intent=?self, "dispatching comment intent");
        match self {
            Intent::Reply { parent_id, content } => handler.on_reply(parent_id, content),
            Intent::Edit { comment_id, content } => handler.on_edit(comment_id, content),
            Intent::Delete(id) => handler.on_delete(id),
            Intent::Like(id) => handler.on_like(id),
            Intent::MarkSolution(id) => handler.on_mark_solution(id),
        }
    }
}
