mod app;
pub use app::App;

mod comment_node;
pub use comment_node::CommentNode;

mod comment_thread;
pub use comment_thread::{CommentCallbacks, CommentThread};

mod composer;
pub use composer::Composer;

mod error_toast;
pub use error_toast::ErrorToast;

mod markup_view;
pub use markup_view::render_blocks;
