//! Shopdesk Core - shared domain types.
//!
//! Used by the `server` binary and the `cli` tools. The crate holds only
//! types: no I/O, no database access, no HTTP.
//!
//! # Modules
//!
//! - [`types`] - Typed ids, email addresses and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
