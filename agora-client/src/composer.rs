use crate::{
    api::{self, Comment, CommentId},
    Intent,
};

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ComposerError {
    #[error("No composer is open")]
    NothingOpen,

    #[error(transparent)]
    Invalid(#[from] api::Error),
}

/// The one composer that may be open in a comment thread
///
/// A whole thread shares a single value of this, so opening a composer
/// anywhere closes whichever one was open before.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum ActiveEditor {
    #[default]
    Idle,
    Reply {
        target: CommentId,
        draft: String,
    },
    Edit {
        target: CommentId,
        draft: String,
    },
}

impl ActiveEditor {
    /// Clicking Reply on the comment that is already being replied to closes the composer
    pub fn toggle_reply(&mut self, target: CommentId) {
        *self = match self {
            ActiveEditor::Reply { target: t, .. } if *t == target => ActiveEditor::Idle,
            _ => ActiveEditor::Reply {
                target,
                draft: String::new(),
            },
        };
    }

    pub fn open_edit(&mut self, c: &Comment) {
        *self = ActiveEditor::Edit {
            target: c.id,
            draft: c.body.clone(),
        };
    }

    pub fn set_draft(&mut self, text: String) {
        match self {
            ActiveEditor::Idle => tracing::warn!("draft update with no open composer"),
            ActiveEditor::Reply { draft, .. } | ActiveEditor::Edit { draft, .. } => *draft = text,
        }
    }

    pub fn cancel(&mut self) {
        *self = ActiveEditor::Idle;
    }

    pub fn replying_to(&self) -> Option<CommentId> {
        match self {
            ActiveEditor::Reply { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn editing(&self) -> Option<CommentId> {
        match self {
            ActiveEditor::Edit { target, .. } => Some(*target),
            _ => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            ActiveEditor::Idle => None,
            ActiveEditor::Reply { draft, .. } | ActiveEditor::Edit { draft, .. } => Some(draft),
        }
    }

    /// Turns the open composer into an intent and closes it
    ///
    /// On error the composer stays open with its draft untouched.
    pub fn submit(&mut self) -> Result<Intent, ComposerError> {
        let intent = match self {
            ActiveEditor::Idle => return Err(ComposerError::NothingOpen),
            ActiveEditor::Reply { target, draft } => Intent::Reply {
                parent_id: *target,
                content: String::from(api::validate_content(draft)?),
            },
            ActiveEditor::Edit { target, draft } => Intent::Edit {
                comment_id: *target,
                content: String::from(api::validate_content(draft)?),
            },
        };
        *self = ActiveEditor::Idle;
        Ok(intent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::tests::{comment, id};

    #[test]
    fn reply_submit_trims_and_closes() {
        let mut e = ActiveEditor::default();
        e.toggle_reply(id(1));
        e.set_draft(String::from("  Thanks!  "));
        assert_eq!(
            e.submit(),
            Ok(Intent::Reply {
                parent_id: id(1),
                content: String::from("Thanks!"),
            }),
        );
        assert_eq!(e, ActiveEditor::Idle);
    }

    #[test]
    fn blank_submit_is_rejected_and_keeps_draft() {
        for draft in ["", "   ", "\n\t "] {
            let mut e = ActiveEditor::default();
            e.toggle_reply(id(1));
            e.set_draft(String::from(draft));
            assert_eq!(e.submit(), Err(ComposerError::Invalid(api::Error::EmptyContent)));
            assert_eq!(e.replying_to(), Some(id(1)));
            assert_eq!(e.draft(), Some(draft));

            let mut e = ActiveEditor::default();
            e.open_edit(&comment(2, 10, vec![]));
            e.set_draft(String::from(draft));
            assert_eq!(e.submit(), Err(ComposerError::Invalid(api::Error::EmptyContent)));
            assert_eq!(e.editing(), Some(id(2)));
        }
        assert_eq!(ActiveEditor::Idle.submit(), Err(ComposerError::NothingOpen));
    }

    #[test]
    fn only_one_composer_is_open() {
        let c = comment(2, 10, vec![]);
        let mut e = ActiveEditor::default();
        e.toggle_reply(id(1));
        e.set_draft(String::from("unsent"));
        e.open_edit(&c);
        assert_eq!(e.replying_to(), None);
        assert_eq!(e.editing(), Some(id(2)));
        assert_eq!(e.draft(), Some("comment 2"));

        e.toggle_reply(id(3));
        assert_eq!(e.editing(), None);
        assert_eq!(e.replying_to(), Some(id(3)));
        assert_eq!(e.draft(), Some(""));
    }

    #[test]
    fn reply_toggles_and_cancel_discards() {
        let mut e = ActiveEditor::default();
        e.toggle_reply(id(1));
        e.toggle_reply(id(1));
        assert_eq!(e, ActiveEditor::Idle);

        e.toggle_reply(id(1));
        e.set_draft(String::from("never sent"));
        e.cancel();
        assert_eq!(e, ActiveEditor::Idle);
        assert_eq!(e.draft(), None);
    }

    #[test]
    fn edit_submit() {
        let mut e = ActiveEditor::default();
        e.open_edit(&comment(2, 10, vec![]));
        e.set_draft(String::from("better wording\n"));
        assert_eq!(
            e.submit(),
            Ok(Intent::Edit {
                comment_id: id(2),
                content: String::from("better wording"),
            }),
        );
    }
}
