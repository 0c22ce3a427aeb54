//! Registered store accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{CurrencyCode, Email, StoreId, VerificationStatus};

/// A store registered on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub email: Email,
    pub url: String,
    /// Native currency the store reports purchases in.
    pub currency: CurrencyCode,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: VerificationStatus,
}

impl Store {
    /// Create a freshly registered, unverified store.
    #[must_use]
    pub fn register(new: NewStore, created_at: DateTime<Utc>) -> Self {
        Self {
            id: new.id,
            name: new.name,
            email: new.email,
            url: new.url,
            currency: new.currency,
            created_at,
            status: VerificationStatus::Unverified,
        }
    }

    /// Apply an admin edit. Fields left as `None` are kept.
    pub fn apply(&mut self, update: StoreUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(url) = update.url {
            self.url = url;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(currency) = update.currency {
            self.currency = currency;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }

    /// The store URL without scheme or trailing slash, for display.
    #[must_use]
    pub fn display_url(&self) -> &str {
        let url = self
            .url
            .strip_prefix("https://")
            .or_else(|| self.url.strip_prefix("http://"))
            .unwrap_or(self.url.as_str());
        url.strip_suffix('/').unwrap_or(url)
    }
}

/// Registration form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStore {
    pub id: StoreId,
    pub name: String,
    pub email: Email,
    pub url: String,
    pub currency: CurrencyCode,
}

/// Partial update applied from the admin edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreUpdate {
    pub name: Option<String>,
    pub url: Option<String>,
    pub email: Option<Email>,
    pub currency: Option<CurrencyCode>,
    pub status: Option<VerificationStatus>,
}

impl StoreUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.url.is_none()
            && self.email.is_none()
            && self.currency.is_none()
            && self.status.is_none()
    }
}
