//! Subscriber list management commands.
//!
//! # Usage
//!
//! ```bash
//! # Export the full list as CSV
//! wf-cli subscribers export -o subscribers.csv
//!
//! # Add a signup collected outside the site
//! wf-cli subscribers add -e reader@example.com -n "A Reader" -s conference
//! ```
//!
//! # Environment Variables
//!
//! - `SUBSCRIBERS_FILE` - Subscriber mirror file (default: data/subscribers.json)

use std::path::Path;

use thiserror::Error;

use wayfarer_core::{Email, EmailError, SubscriptionSource};
use wayfarer_site::subscribers::{SubscriberError, SubscriberStore};

/// Errors that can occur during subscriber commands.
#[derive(Debug, Error)]
pub enum SubscribersError {
    /// The email address failed validation.
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    /// The store rejected the mutation.
    #[error("Subscriber store error: {0}")]
    Store(#[from] SubscriberError),

    /// Writing the output file failed.
    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Export the subscriber list as CSV, to stdout or a file.
pub async fn export(output: Option<&Path>) -> Result<(), SubscribersError> {
    let store = open_store();
    let count = store.count().await;
    let csv = store.export_csv().await;

    match output {
        Some(path) => {
            tokio::fs::write(path, csv).await?;
            tracing::info!("Wrote {count} subscribers to {}", path.display());
        }
        None => {
            #[allow(clippy::print_stdout)]
            {
                print!("{csv}");
            }
        }
    }

    Ok(())
}

/// Add a subscriber collected outside the site.
///
/// Re-adding an existing email unions the tag sets instead of duplicating
/// the record, same as the site's signup forms.
pub async fn add(
    email: &str,
    name: Option<String>,
    source: &str,
    tags: Vec<String>,
) -> Result<(), SubscribersError> {
    let store = open_store();

    let email = Email::parse(email)?;
    let source = SubscriptionSource::from(source.to_owned());
    tracing::info!("Subscribing {} (source: {source})", email.as_str());

    store.subscribe(email, name, source, tags).await?;
    tracing::info!("Done. List now holds {} subscribers", store.count().await);

    Ok(())
}

fn open_store() -> SubscriberStore {
    dotenvy::dotenv().ok();
    let path = std::env::var("SUBSCRIBERS_FILE")
        .unwrap_or_else(|_| "data/subscribers.json".to_owned());
    SubscriberStore::load(path)
}
