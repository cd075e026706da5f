//! autorev Test Kit - fixtures and temporary bundles.
//!
//! This crate deliberately does not depend on `autorev-core`: it only deals
//! in raw JSON values and files, so the decoder under test is never used to
//! build its own inputs.
//!
//! # Key Types
//!
//! - [`fixtures`]: Complete and minimal `VCS_*` mappings per backend
//! - [`TestBundle`]: Temp directory with metadata and config files
//!
//! # Example
//!
//! ```no_run
//! use autorev_testkit::{fixtures, TestBundle};
//!
//! let bundle = TestBundle::new().unwrap();
//! bundle.write_metadata("autorevision.json", &fixtures::git()).unwrap();
//! assert!(bundle.path("autorevision.json").exists());
//! ```

pub mod fixtures;
mod bundle;

pub use bundle::{TestBundle, TestBundleError};
