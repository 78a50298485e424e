//! Guest identity provider.
//!
//! The client-runtime side of guest identity: a browser session mints one
//! random identifier on first use and presents it on every request via the
//! `x-guest-id` header. The server never persists the identifier on its own;
//! it only appears as the owner key of cart/wishlist rows.
//!
//! Modeled as a single-owner, session-scoped value initialized once - not a
//! process global. The HTTP test client holds one provider per simulated
//! browser session.

use std::sync::OnceLock;

use velora_core::GuestId;

/// Request header carrying the client-minted guest identifier.
pub const GUEST_ID_HEADER: &str = "x-guest-id";

/// Per-client-session guest identifier cache.
#[derive(Debug)]
pub struct GuestIdProvider {
    cached: OnceLock<GuestId>,
    interactive: bool,
}

impl GuestIdProvider {
    /// A provider for an interactive client session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cached: OnceLock::new(),
            interactive: true,
        }
    }

    /// A provider for a context without client capabilities (e.g. a
    /// non-interactive render). It never yields an identity.
    #[must_use]
    pub const fn detached() -> Self {
        Self {
            cached: OnceLock::new(),
            interactive: false,
        }
    }

    /// The stable guest identifier for this client session, minted on first
    /// call.
    ///
    /// `None` means no guest identity is available yet; callers treat that as
    /// "not a guest", never as an error.
    #[must_use]
    pub fn get_or_create(&self) -> Option<GuestId> {
        if !self.interactive {
            return None;
        }

        Some(self.cached.get_or_init(GuestId::random).clone())
    }

    /// The `x-guest-id` header pair for this session, if an identity exists.
    #[must_use]
    pub fn header(&self) -> Option<(&'static str, String)> {
        self.get_or_create()
            .map(|guest_id| (GUEST_ID_HEADER, guest_id.into_inner()))
    }
}

impl Default for GuestIdProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_is_stable_per_provider() {
        let provider = GuestIdProvider::new();
        let first = provider.get_or_create();
        let second = provider.get_or_create();
        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn test_separate_providers_mint_separate_ids() {
        let one = GuestIdProvider::new();
        let two = GuestIdProvider::new();
        assert_ne!(one.get_or_create(), two.get_or_create());
    }

    #[test]
    fn test_detached_provider_yields_nothing() {
        let provider = GuestIdProvider::detached();
        assert_eq!(provider.get_or_create(), None);
        assert!(provider.header().is_none());
    }

    #[test]
    fn test_header_carries_the_cached_id() {
        let provider = GuestIdProvider::new();
        let id = provider.get_or_create().expect("interactive provider");
        let (name, value) = provider.header().expect("header");
        assert_eq!(name, GUEST_ID_HEADER);
        assert_eq!(value, id.into_inner());
    }
}
