//! Status enums for stores.

use serde::{Deserialize, Serialize};

/// Store verification status, set by an administrator.
///
/// Stored as `"Unverified"` / `"Verified"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum VerificationStatus {
    #[default]
    Unverified,
    Verified,
}

impl VerificationStatus {
    /// Lowercase form used for status tags.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Unverified => "unverified",
            Self::Verified => "verified",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unverified => write!(f, "Unverified"),
            Self::Verified => write!(f, "Verified"),
        }
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "unverified" => Ok(Self::Unverified),
            "verified" => Ok(Self::Verified),
            _ => Err(format!("invalid verification status: {s}")),
        }
    }
}
