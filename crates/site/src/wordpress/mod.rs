//! WordPress REST API client.
//!
//! # Architecture
//!
//! - Plain REST over `reqwest` against `{site}/wp-json/wp/v2`
//! - The CMS is the source of truth - NO local sync, direct API calls
//! - `_embed` expansion inlines featured media, taxonomy terms, and authors
//! - In-memory caching via `moka` for taxonomy and menu responses (60 second
//!   TTL); content lookups are never cached
//!
//! # Layers
//!
//! - [`records`] - tolerant wire shapes (string-or-`{rendered}` fields)
//! - [`transform`] - wire shapes to flat display models, with fallbacks
//! - [`types`] - the display models and query arguments
//! - [`client`] - the HTTP client itself
//!
//! # Example
//!
//! ```rust,ignore
//! use wayfarer_site::wordpress::{PostQuery, WpClient};
//!
//! let client = WpClient::new(&config.wordpress)?;
//!
//! // Fetch a post
//! let post = client.get_post_by_slug("budget-travel-guide").await?;
//!
//! // Full-text search
//! let results = client.get_posts(&PostQuery::search("budget travel", 12)).await?;
//! ```

mod cache;
mod client;
pub mod records;
pub mod transform;
pub mod types;

pub use client::WpClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the CMS.
#[derive(Debug, Error)]
pub enum WpError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The CMS answered with an unexpected status code.
    #[error("CMS returned HTTP {0}")]
    Status(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wp_error_display() {
        let err = WpError::NotFound("post: budget-travel-guide".to_string());
        assert_eq!(err.to_string(), "Not found: post: budget-travel-guide");
    }

    #[test]
    fn test_status_error_display() {
        let err = WpError::Status(503);
        assert_eq!(err.to_string(), "CMS returned HTTP 503");
    }

    #[test]
    fn test_parse_error_wraps_serde() {
        let parse_err =
            serde_json::from_str::<Vec<records::RawPost>>("not json").expect_err("must fail");
        let err = WpError::from(parse_err);
        assert!(err.to_string().starts_with("JSON parse error:"));
    }
}
