//! Business logic services.
//!
//! Services sit between the route handlers and the platform client. They
//! own error classification (platform wire errors in, domain errors out)
//! and every rule that is not pure validation, such as creator checks and
//! timestamp stamping.

pub mod auth;
pub mod locations;

pub use auth::{AuthError, AuthService, Login};
pub use locations::{LocationError, LocationService};
