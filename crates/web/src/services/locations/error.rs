//! Location service error types.

use thiserror::Error;

use crate::appwrite::AppwriteError;

/// Errors that can occur when reading or writing locations.
#[derive(Debug, Error)]
pub enum LocationError {
    /// No location with the requested ID.
    #[error("location not found")]
    NotFound,

    /// A write was attempted by someone other than the creator.
    #[error("only the creator can modify this location")]
    NotCreator,

    /// The platform rejected the caller's credentials for this operation.
    #[error("not authorized for this operation")]
    PermissionDenied,

    /// The platform failed in a way we do not classify.
    #[error("location store error: {0}")]
    Platform(AppwriteError),
}

/// Maps a platform error onto the service taxonomy.
pub(super) fn classify(err: AppwriteError) -> LocationError {
    match &err {
        AppwriteError::Api { status: 404, .. } => LocationError::NotFound,
        AppwriteError::Api {
            status: 401 | 403, ..
        } => LocationError::PermissionDenied,
        _ => LocationError::Platform(err),
    }
}
