//! Wayfarer site library.
//!
//! This crate provides the site functionality as a library, allowing it to
//! be tested and driven from the CLI as well as the server binary.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod engagement;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod nav;
pub mod resolver;
pub mod routes;
pub mod seo;
pub mod shop;
pub mod state;
pub mod subscribers;
pub mod travel;
pub mod wordpress;
