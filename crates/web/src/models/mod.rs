//! Data models for the web crate.
//!
//! Domain types (locations, IDs, validated values) live in `wherebuy-core`;
//! this module holds the web-only models layered on top of them.

pub mod session;

pub use session::{session_keys, CurrentUser};
