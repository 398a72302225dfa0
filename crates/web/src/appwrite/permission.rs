//! Builders for collection permission strings.
//!
//! Collections are created with a permission list such as
//! `["read(\"any\")", "create(\"users\")"]`. Role strings and the
//! permission wrappers around them follow the official SDK naming.

/// Factory for role strings.
pub struct Role;

impl Role {
    /// Anyone, authenticated or not.
    #[must_use]
    pub fn any() -> String {
        "any".to_string()
    }

    /// Any authenticated user.
    #[must_use]
    pub fn users() -> String {
        "users".to_string()
    }

    /// A single user by ID.
    #[must_use]
    pub fn user(id: &str) -> String {
        format!("user:{id}")
    }
}

/// Factory for permission strings.
pub struct Permission;

impl Permission {
    /// Grants read access to `role`.
    #[must_use]
    pub fn read(role: &str) -> String {
        format!("read(\"{role}\")")
    }

    /// Grants document creation to `role`.
    #[must_use]
    pub fn create(role: &str) -> String {
        format!("create(\"{role}\")")
    }

    /// Grants updates to `role`.
    #[must_use]
    pub fn update(role: &str) -> String {
        format!("update(\"{role}\")")
    }

    /// Grants deletion to `role`.
    #[must_use]
    pub fn delete(role: &str) -> String {
        format!("delete(\"{role}\")")
    }
}
