//! Contact classification for a shared location.

use serde::{Deserialize, Serialize};

/// How a location's product can be obtained.
///
/// Stored in the document as one of `online`, `offline`, or `both`.
/// Map navigation is only offered when the place can actually be visited,
/// so `online` suppresses the navigate action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContactType {
    /// Order remotely; there is no storefront to visit.
    Online,
    /// Physical storefront only.
    Offline,
    /// Physical storefront that also takes remote orders.
    #[default]
    Both,
}

impl ContactType {
    /// Whether a map-navigation action should be offered for this location.
    #[must_use]
    pub const fn offers_navigation(self) -> bool {
        matches!(self, Self::Offline | Self::Both)
    }

    /// The wire/storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Offline => "offline",
            Self::Both => "both",
        }
    }
}

impl std::fmt::Display for ContactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContactType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "online" => Ok(Self::Online),
            "offline" => Ok(Self::Offline),
            "both" => Ok(Self::Both),
            _ => Err(format!("invalid contact type: {s}")),
        }
    }
}
