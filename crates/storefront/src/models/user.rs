//! User domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use velora_core::{Email, UserId};

/// A storefront user account.
///
/// The password digest is deliberately not part of this type; it only ever
/// travels through `UserRepository::get_password_hash`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// Optional display name.
    pub name: Option<String>,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
