//! Domain models for the catalog, accounts and orders.

pub mod account;
pub mod order;
pub mod product;

pub use account::Account;
pub use order::{CustomerDetails, NewOrder, Order};
pub use product::{Product, ProductFields};
