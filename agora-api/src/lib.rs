use chrono::Utc;

pub use uuid::{uuid, Uuid};
pub type Time = chrono::DateTime<Utc>;

pub const STUB_UUID: Uuid = uuid!("ffffffff-ffff-ffff-ffff-ffffffffffff");

mod comment;
pub use comment::{Comment, CommentId};

mod discussion;
pub use discussion::{Discussion, DiscussionId, EditComment, NewComment, NewReaction, ReactionKind};

mod error;
pub use error::Error;

mod user;
pub use user::{Author, Role, UserId, Viewer};

/// Checks user-submitted comment text before it leaves the client.
///
/// Returns the trimmed text, which is what the collaborator receives.
pub fn validate_content(s: &str) -> Result<&str, Error> {
    validate_string(s)?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyContent);
    }
    Ok(trimmed)
}

/// Rejects null bytes, which have no meaning in comment text and end strings early in many text APIs
pub fn validate_string(s: &str) -> Result<(), Error> {
    if s.contains('\0') {
        return Err(Error::NullByteInString(String::from(s)));
    }
    Ok(())
}
