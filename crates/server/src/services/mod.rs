//! Business logic services.
//!
//! - `auth` - Account registration and password sign-in

pub mod auth;
