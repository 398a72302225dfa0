//! Wherebuy web library.
//!
//! This crate provides the web app functionality as a library, allowing it
//! to be tested and reused. The binary in `main.rs` wires these modules
//! into a running server; the provisioning CLI reuses the config and
//! platform client.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod appwrite;
pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod search;
pub mod services;
pub mod state;
