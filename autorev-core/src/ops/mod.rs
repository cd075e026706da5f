//! High-level operations.

mod resolve;

pub use resolve::{resolve, resolve_with_env};
