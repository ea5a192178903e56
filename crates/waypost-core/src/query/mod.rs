//! Blog listing query pipeline: normalize, filter, sort, paginate.

mod engine;
mod filter;
mod list_query;
mod pagination;
mod sort;
pub mod synonyms;

pub use engine::{CommentPage, ListResult, QueryEngine};
pub use filter::PostFilter;
pub use list_query::{DEFAULT_LIMIT, DEFAULT_MAX_LIMIT, ListQuery, RawListQuery};
pub use pagination::{Pagination, Window};
pub use sort::SortBy;
