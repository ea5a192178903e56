//! Domain entities - the core business objects.

mod comment;
mod post;

pub use comment::{Comment, CommentUpdate, NewComment};
pub use post::{BlogPost, MediaRef, NewPost, PostUpdate};
