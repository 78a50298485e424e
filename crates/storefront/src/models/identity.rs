//! Per-request identity.
//!
//! Every cart/wishlist request resolves to exactly one of: an authenticated
//! user, an anonymous guest with a client-minted identifier, or neither. The
//! enum makes the at-most-one invariant structural instead of a pair of
//! nullable fields.

use velora_core::{GuestId, UserId};

/// The identity a request acts as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Valid session cookie resolved to this user.
    User(UserId),
    /// No session; the client presented a guest identifier.
    Guest(GuestId),
    /// Neither a session nor a guest identifier. Only reachable before the
    /// client has minted a guest id.
    Anonymous,
}

impl Identity {
    /// The owning key for cart/wishlist state, if any.
    #[must_use]
    pub fn owner(&self) -> Option<OwnerKey> {
        match self {
            Self::User(id) => Some(OwnerKey::User(id.clone())),
            Self::Guest(id) => Some(OwnerKey::Guest(id.clone())),
            Self::Anonymous => None,
        }
    }

    /// The authenticated user id, if any.
    #[must_use]
    pub const fn user_id(&self) -> Option<&UserId> {
        match self {
            Self::User(id) => Some(id),
            _ => None,
        }
    }
}

/// The owning key of a cart/wishlist aggregate: user XOR guest.
///
/// Rows are owned by exactly one key for their entire lifetime; there is no
/// transfer between keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnerKey {
    User(UserId),
    Guest(GuestId),
}
