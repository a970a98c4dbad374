//! CMS content inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # Check connectivity and print published totals
//! wf-cli content status
//!
//! # Print a navigation menu
//! wf-cli content menu main-navigation
//! ```
//!
//! # Environment Variables
//!
//! - `WORDPRESS_API_URL` - WordPress REST base, e.g. `https://cms.example.com/wp-json/wp/v2`
//! - `WORDPRESS_AUTH_USERNAME` / `WORDPRESS_AUTH_PASSWORD` - optional credentials

use thiserror::Error;

use wayfarer_site::config::{ConfigError, WordPressConfig};
use wayfarer_site::wordpress::{MenuItem, WpClient, WpError};

/// Errors that can occur during content commands.
#[derive(Debug, Error)]
pub enum ContentError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The CMS request failed.
    #[error("CMS error: {0}")]
    Cms(#[from] WpError),
}

/// Check CMS connectivity and print published totals.
pub async fn status() -> Result<(), ContentError> {
    dotenvy::dotenv().ok();

    let config = WordPressConfig::from_env()?;
    let client = WpClient::new(&config)?;

    tracing::info!("Querying {}", config.api_url);
    let totals = client.content_totals().await?;

    let auth = if config.credentials().is_some() {
        "configured"
    } else {
        "read-only"
    };

    #[allow(clippy::print_stdout)]
    {
        println!("CMS: {}", config.api_url);
        println!("  auth:       {auth}");
        println!("  posts:      {}", totals.posts);
        println!("  pages:      {}", totals.pages);
        println!("  categories: {}", totals.categories);
        println!("  tags:       {}", totals.tags);
        println!("  media:      {}", totals.media);
    }

    Ok(())
}

/// Print a navigation menu by slug.
pub async fn menu(slug: &str) -> Result<(), ContentError> {
    dotenvy::dotenv().ok();

    let config = WordPressConfig::from_env()?;
    let client = WpClient::new(&config)?;

    let menu = client.get_menu(slug).await?;

    #[allow(clippy::print_stdout)]
    {
        println!("menu '{slug}' ({} top-level items)", menu.items.len());
    }
    for item in &menu.items {
        print_item(item, 1);
    }

    Ok(())
}

fn print_item(item: &MenuItem, depth: usize) {
    #[allow(clippy::print_stdout)]
    {
        println!("{}- {} -> {}", "  ".repeat(depth), item.title, item.url);
    }
    for child in &item.children {
        print_item(child, depth + 1);
    }
}
