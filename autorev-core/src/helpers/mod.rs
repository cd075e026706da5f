//! Low-level helper utilities.

pub mod bundle;
pub mod date;
pub mod source;
