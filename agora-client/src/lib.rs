mod capability;
pub use capability::{Capabilities, MenuItem};

mod comment;
pub use comment::{build_forest, ForestExt};

mod composer;
pub use composer::{ActiveEditor, ComposerError};

mod config;
pub use config::ThreadConfig;

mod handler;
pub use handler::{CommentHandler, Intent};

pub mod markup;

mod time;
pub use time::relative_time;

mod view;
pub use view::{role_class, BodyView, CommentRow, ThreadView};

pub mod api {
    pub use agora_api::*;
}

pub mod prelude {
    pub use crate::{CommentHandler, ForestExt};
}
