//! Wayfarer Core - Shared types library.
//!
//! This crate provides common types used across all Wayfarer components:
//! - `site` - Public-facing blog and shop
//! - `cli` - Command-line tools for content status and subscriber export
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and emails,
//!   plus the shop/subscription enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
