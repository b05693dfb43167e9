//! Observers that turn a [`UsageSnapshot`](crate::snapshot::UsageSnapshot)
//! into output.
//!
//! - [`text`] - the plain-text usage summary printed at shutdown
//! - [`json`] - serialize the snapshot with serde (feature `json`)
//! - [`table`] - pretty-print counts as a table (feature `table`)
//!
//! All observers share the [`ReportError`] type.
//!
//! # Feature Flags
//!
//! - `json` - Enables the [`json`] module
//! - `table` - Enables the [`table`] module
//! - `full` - Enables all observer modules

mod error;

pub use error::{ReportError, Result};

pub mod text;

#[cfg(feature = "table")]
pub mod table;

#[cfg(feature = "json")]
pub mod json;
