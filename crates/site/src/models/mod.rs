//! Domain models for the site.

pub mod session;

pub use session::{Cart, CartItem};
