use uuid::Uuid;

use crate::{Author, Comment, CommentId, Time};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DiscussionId(pub Uuid);

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Discussion {
    pub id: DiscussionId,
    pub title: String,
    pub body: String,
    pub author: Author,
    pub created_at: Time,

    /// Either already nested, or flat with parent_id links; agora_client::build_forest handles both
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewComment {
    pub content: String,
    pub parent_id: Option<CommentId>,
}

#[derive(Clone, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct EditComment {
    pub content: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct NewReaction {
    pub kind: ReactionKind,
}
