//! Media store implementations.

mod local;

pub use local::LocalMediaStore;
