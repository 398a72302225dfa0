//! Session-scoped user state.

use serde::{Deserialize, Serialize};
use wherebuy_core::{Email, UserId};

/// Keys under which values are stored in the session.
pub mod session_keys {
    /// The authenticated user, as [`super::CurrentUser`].
    pub const CURRENT_USER: &str = "current_user";
    /// The platform session secret backing the login, as a `String`.
    pub const PLATFORM_SESSION: &str = "platform_session";
}

/// The authenticated user, as stored in the session after login.
///
/// This is a snapshot of the account at login time. The platform session
/// secret is stored separately under [`session_keys::PLATFORM_SESSION`] so
/// that handlers which never write remotely do not touch the credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Server-assigned user ID.
    pub id: UserId,
    /// Registered email address.
    pub email: Email,
    /// Display name shown in the navbar and stamped onto created locations.
    pub name: String,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_current_user_round_trips_through_session_storage() {
        let user = CurrentUser {
            id: UserId::from("u1"),
            email: "alice@example.com".parse().unwrap(),
            name: "Alice".to_string(),
        };

        // tower-sessions stores values as serde_json.
        let value = serde_json::to_value(&user).unwrap();
        let restored: CurrentUser = serde_json::from_value(value).unwrap();
        assert_eq!(restored, user);
    }
}
