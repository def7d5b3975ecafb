use uuid::Uuid;

use crate::{Author, Time, STUB_UUID};

#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct CommentId(#[generator(bolero::gen_arbitrary())] pub Uuid);

impl CommentId {
    pub fn stub() -> CommentId {
        CommentId(STUB_UUID)
    }
}

#[derive(
    Clone,
    Debug,
    Eq,
    PartialEq,
    arbitrary::Arbitrary,
    bolero::generator::TypeGenerator,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct Comment {
    pub id: CommentId,

    /// None for comments attached directly to the discussion
    pub parent_id: Option<CommentId>,

    pub author: Author,

    /// Lightweight markup, see agora_client::markup
    #[generator(bolero::gen_with::<String>().len(0..200usize))]
    pub body: String,

    pub like_count: u32,
    pub is_solution: bool,

    #[generator(bolero::gen_arbitrary())]
    pub created_at: Time,

    /// Replies, in reply order
    // TODO: use TypeGenerator once bolero's handling of recursive structs no longer overflows the stack
    #[generator(bolero::gen_arbitrary())]
    #[serde(default)]
    pub children: Vec<Comment>,
}
