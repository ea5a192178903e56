//! # Waypost Core
//!
//! The domain layer of the Waypost travel blog.
//! This crate holds the blog entities, the listing query engine and the
//! ports that storage must implement. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod query;

pub use error::DomainError;
pub use query::{ListQuery, ListResult, QueryEngine};
