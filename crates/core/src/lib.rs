//! Wherebuy Core - Shared domain types.
//!
//! This crate provides the common types used across all Wherebuy components:
//! - `web` - Server-rendered web application
//! - `cli` - Command-line tools for provisioning the remote schema
//!
//! # Architecture
//!
//! The core crate contains only types and validation - no I/O, no HTTP
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, currencies, and
//!   contact classifications
//! - [`location`] - The shopping-location entity, its input forms, and the
//!   field limits shared with the remote collection schema

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod location;
pub mod types;

pub use location::{Location, LocationDraft, LocationPatch, ValidationError, limits};
pub use types::*;
