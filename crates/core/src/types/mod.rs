//! Core types for Wherebuy.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod currency;
pub mod email;
pub mod id;

pub use contact::ContactType;
pub use currency::{Currency, CurrencyError};
pub use email::{Email, EmailError};
pub use id::*;
