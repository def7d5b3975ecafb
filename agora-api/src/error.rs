use std::str::FromStr;

use anyhow::{anyhow, Context};
use uuid::Uuid;

use crate::CommentId;

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Unknown error: {0}")]
    Unknown(String),

    #[error("Permission denied")]
    PermissionDenied,

    #[error("Comment not found {0:?}")]
    CommentNotFound(CommentId),

    #[error("Comment content is empty")]
    EmptyContent,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}

impl Error {
    /// Parses an error body as returned by the discussion collaborator
    pub fn parse(body: &[u8]) -> anyhow::Result<Error> {
        let data: serde_json::Value =
            serde_json::from_slice(body).context("parsing error contents")?;
        Ok(
            match data
                .get("type")
                .and_then(|t| t.as_str())
                .ok_or_else(|| anyhow!("error type is not a string"))?
            {
                "unknown" => Error::Unknown(String::from(
                    data.get("message")
                        .and_then(|msg| msg.as_str())
                        .unwrap_or(""),
                )),
                "permission-denied" => Error::PermissionDenied,
                "comment-not-found" => Error::CommentNotFound(CommentId(
                    data.get("id")
                        .and_then(|id| id.as_str())
                        .and_then(|id| Uuid::from_str(id).ok())
                        .ok_or_else(|| anyhow!("error is a missing comment without a proper id"))?,
                )),
                "empty-content" => Error::EmptyContent,
                "null-byte" => Error::NullByteInString(String::from(
                    data.get("string").and_then(|s| s.as_str()).ok_or_else(|| {
                        anyhow!("error is a null-byte-in-string without a string")
                    })?,
                )),
                _ => return Err(anyhow!("error contents has unknown type")),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_errors() {
        assert_eq!(
            Error::parse(br#"{"type":"permission-denied","message":"permission denied"}"#).unwrap(),
            Error::PermissionDenied,
        );
        assert_eq!(
            Error::parse(br#"{"type":"unknown","message":"db is down"}"#).unwrap(),
            Error::Unknown(String::from("db is down")),
        );
        assert_eq!(
            Error::parse(br#"{"type":"unknown"}"#).unwrap(),
            Error::Unknown(String::new()),
        );
        assert_eq!(
            Error::parse(br#"{"type":"empty-content"}"#).unwrap(),
            Error::EmptyContent,
        );
        assert_eq!(
            Error::parse(
                br#"{"type":"comment-not-found","id":"ffffffff-ffff-ffff-ffff-ffffffffffff"}"#
            )
            .unwrap(),
            Error::CommentNotFound(CommentId::stub()),
        );
    }

    #[test]
    fn parse_malformed_errors() {
        assert!(Error::parse(b"not json").is_err());
        assert!(Error::parse(br#"{"message":"no type"}"#).is_err());
        assert!(Error::parse(br#"{"type":"teapot"}"#).is_err());
        assert!(Error::parse(br#"{"type":"comment-not-found","id":"nope"}"#).is_err());
        assert!(Error::parse(br#"{"type":"null-byte"}"#).is_err());
    }
}
