//! Integration tests for Wayfarer.
//!
//! Two kinds of tests live under `tests/`:
//!
//! - In-process tests that exercise the public library surface of
//!   `wayfarer-site` (resolver planning, engagement wire shapes). These run
//!   with a plain `cargo test`.
//! - Live tests that drive a running server over HTTP. These are `#[ignore]`d
//!   so the default test run never needs a server or a WordPress install.
//!
//! # Running the live tests
//!
//! ```bash
//! # Start the site against a WordPress install
//! WORDPRESS_API_URL=https://cms.example.com/wp-json/wp/v2 \
//!   SITE_BASE_URL=http://localhost:3000 \
//!   cargo run -p wayfarer-site
//!
//! # Run everything, including the ignored live tests
//! SITE_BASE_URL=http://localhost:3000 \
//!   cargo test -p wayfarer-integration-tests -- --include-ignored
//! ```
//!
//! The admin tests also read `ADMIN_TOKEN`; when it is unset they only
//! assert the unauthenticated behavior.
//!
//! # Test Categories
//!
//! - `site_pages` - Public pages, health endpoints, static assets
//! - `resolver_plans` - Slug cascade planning, no server needed
//! - `cart_flow` - Session cart over HTTP
//! - `engagement_beacon` - Beacon wire contract and popup gating
//! - `admin_newsletter` - Newsletter forms, contact form, admin token gate
