//! Business services over the repositories.
//!
//! Services own the request-level semantics (identity requirements, toggle
//! outcomes, credential checks); the repositories under [`crate::db`] own the
//! SQL.

pub mod auth;
pub mod cart;
pub mod session;
pub mod wishlist;
