//! Resolver planning command.
//!
//! Prints the ordered CMS lookups the server would run for a path. The
//! default mode works offline from the plan alone; `--live` runs the plan
//! against the configured CMS and reports what actually resolved. Useful
//! when a production path resolves to something unexpected.
//!
//! # Usage
//!
//! ```bash
//! wf-cli resolve /stories/solo-travel
//! wf-cli resolve /archive --category travel-adventures
//! wf-cli resolve /travel/patagonia --live
//! ```

use thiserror::Error;

use wayfarer_site::config::{ConfigError, WordPressConfig};
use wayfarer_site::resolver::strategy::{self, Step};
use wayfarer_site::resolver::{self, Resolution};
use wayfarer_site::wordpress::{WpClient, WpError};

/// Errors that can occur while running a live resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The CMS client could not be constructed.
    #[error("CMS error: {0}")]
    Cms(#[from] WpError),
}

/// Print the lookup plan for a path.
pub fn print_plan(path: &str, category: Option<&str>) {
    let steps = strategy::plan(path, category);

    #[allow(clippy::print_stdout)]
    {
        if steps.is_empty() {
            println!("{path}: no lookups planned");
            return;
        }

        println!("{path}: {} step(s)", steps.len());
        for (index, step) in steps.iter().enumerate() {
            println!("  {}. {}", index + 1, describe(step));
        }
    }
}

/// Run the plan against the configured CMS and print what resolved.
pub async fn run_live(path: &str, category: Option<&str>) -> Result<(), ResolveError> {
    dotenvy::dotenv().ok();

    let config = WordPressConfig::from_env()?;
    let client = WpClient::new(&config)?;

    print_plan(path, category);
    tracing::info!("Running the plan against {}", config.api_url);

    let outcome = resolver::resolve(&client, path, category).await;

    #[allow(clippy::print_stdout)]
    {
        match outcome {
            Some(resolution) => println!("resolved: {}", describe_resolution(&resolution)),
            None => println!("resolved: nothing (the server would answer 404)"),
        }
    }

    Ok(())
}

fn describe(step: &Step) -> String {
    match step {
        Step::Pinned(pinned) => format!("pinned category '{}'", pinned.slug),
        Step::Section(section) => format!(
            "section '{}' (page '{}', then search '{}', never 404s)",
            section.content_type, section.page_slug, section.preset.query
        ),
        Step::Post { slug } => format!("post '{slug}' (a miss here is final)"),
        Step::Page { slug } => format!("page '{slug}'"),
        Step::Redirect { target } => format!("redirect to {target}"),
        Step::Category { slug } => format!("category '{slug}'"),
        Step::TravelSearch { preset } => format!("travel search '{}'", preset.query),
    }
}

fn describe_resolution(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Page(page) => format!("page '{}' ({})", page.slug, page.title),
        Resolution::Post(post) => format!("post '{}' ({})", post.slug, post.title),
        Resolution::Category { category, posts, .. } => format!(
            "category '{}' ({}, {} posts)",
            category.slug,
            category.name,
            posts.len()
        ),
        Resolution::Listing(listing) => {
            format!("listing '{}' ({} posts)", listing.title, listing.posts.len())
        }
        Resolution::Placeholder { title, .. } => {
            format!("placeholder '{title}' (no matching content yet)")
        }
        Resolution::Redirect(target) => format!("redirect to {target}"),
    }
}
