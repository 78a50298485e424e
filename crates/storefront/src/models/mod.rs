//! Domain models.
//!
//! These types are validated domain objects, separate from raw database rows.
//! The storefront is a JSON API, so read-side models also carry their wire
//! shape (`Serialize`, camelCase fields); mutation inputs live with the
//! routes.

pub mod cart;
pub mod identity;
pub mod product;
pub mod session;
pub mod user;
pub mod wishlist;

pub use cart::{Cart, CartItem, CartItemWithProduct, CartWithItems};
pub use identity::{Identity, OwnerKey};
pub use product::{NewProduct, Product};
pub use session::Session;
pub use user::User;
pub use wishlist::{WishlistItem, WishlistItemWithProduct};
