//! SeaORM entities.

pub mod comment;
pub mod post;
pub mod post_bookmark;
pub mod post_tag;
