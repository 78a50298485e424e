//! Session domain types.

use chrono::{DateTime, Utc};

use velora_core::{SessionToken, UserId};

/// A login session row.
///
/// One user may hold any number of concurrent sessions. A session is valid
/// iff its row exists and `expires_at` is in the future; expired rows are
/// ignored rather than swept.
#[derive(Debug, Clone)]
pub struct Session {
    /// Unguessable random token, also the primary key.
    pub token: SessionToken,
    /// User this session authenticates.
    pub user_id: UserId,
    /// Hard expiry: creation time plus the fixed session TTL.
    pub expires_at: DateTime<Utc>,
}
