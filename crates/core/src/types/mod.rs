//! Core types for Wayfarer.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod kind;
pub mod price;

pub use email::{Email, EmailError};
pub use id::*;
pub use kind::{ProductKind, SubscriptionSource};
pub use price::{Currency, Price};
