//! Email subscription store.
//!
//! An in-process list mirrored to a JSON file. This explicitly simulates a
//! subscriber database that does not exist in this codebase; the file mirror
//! keeps the admin export useful across restarts, nothing more.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

use wayfarer_core::{Email, SubscriptionSource};

/// Errors from the subscriber store.
#[derive(Debug, Error)]
pub enum SubscriberError {
    /// Writing the mirror file failed.
    #[error("failed to write subscriber file: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the list failed.
    #[error("failed to serialize subscribers: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// One subscription record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSubscription {
    /// Subscriber address, validated at the form boundary.
    pub email: Email,
    /// Optional display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Where the subscription was collected.
    pub source: SubscriptionSource,
    /// When the subscription was first created.
    pub timestamp: DateTime<Utc>,
    /// Interest tags, deduplicated, in first-seen order.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Sort field for the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriberSort {
    Email,
    #[default]
    Date,
}

/// Sort direction for the admin listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// The subscriber store.
///
/// Cheap to clone; one list guarded by an async `RwLock`, persisted whole on
/// every mutation.
#[derive(Clone)]
pub struct SubscriberStore {
    path: Arc<PathBuf>,
    subscribers: Arc<RwLock<Vec<EmailSubscription>>>,
}

impl SubscriberStore {
    /// Load the store from its mirror file.
    ///
    /// A missing file starts an empty list; a malformed file is logged and
    /// discarded rather than blocking startup.
    #[must_use]
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let subscribers = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(list) => list,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "Discarding malformed subscriber file: {e}");
                    Vec::new()
                }
            },
            Err(_) => Vec::new(),
        };

        Self {
            path: Arc::new(path),
            subscribers: Arc::new(RwLock::new(subscribers)),
        }
    }

    /// Record a subscription.
    ///
    /// An email already on the list gets its tag set unioned with the new
    /// tags instead of a duplicate record; a new email appends a record
    /// stamped now.
    ///
    /// # Errors
    ///
    /// Returns an error if the mirror file cannot be written.
    pub async fn subscribe(
        &self,
        email: Email,
        name: Option<String>,
        source: SubscriptionSource,
        tags: Vec<String>,
    ) -> Result<(), SubscriberError> {
        let json = {
            let mut subscribers = self.subscribers.write().await;

            if let Some(existing) = subscribers.iter_mut().find(|sub| sub.email == email) {
                for tag in tags {
                    if !existing.tags.contains(&tag) {
                        existing.tags.push(tag);
                    }
                }
            } else {
                let subscription = EmailSubscription {
                    email,
                    name,
                    source,
                    timestamp: Utc::now(),
                    tags,
                };
                // Stands in for the admin notification mail of a real setup
                tracing::info!(
                    email = %subscription.email,
                    source = %subscription.source,
                    "New subscriber"
                );
                subscribers.push(subscription);
            }

            serde_json::to_string_pretty(&*subscribers)?
        };

        self.write_mirror(&json).await
    }

    /// Every subscription, unsorted.
    pub async fn all(&self) -> Vec<EmailSubscription> {
        self.subscribers.read().await.clone()
    }

    /// Number of subscriptions on the list.
    pub async fn count(&self) -> usize {
        self.subscribers.read().await.len()
    }

    /// Subscriptions matching a substring filter, sorted for the admin
    /// listing.
    ///
    /// The filter matches case-insensitively against email, name, source,
    /// and tags; an empty filter matches everything.
    pub async fn filtered(
        &self,
        filter: &str,
        sort: SubscriberSort,
        direction: SortDirection,
    ) -> Vec<EmailSubscription> {
        let mut list = self.subscribers.read().await.clone();

        if !filter.is_empty() {
            let needle = filter.to_lowercase();
            list.retain(|sub| {
                sub.email.as_str().to_lowercase().contains(&needle)
                    || sub
                        .name
                        .as_deref()
                        .is_some_and(|name| name.to_lowercase().contains(&needle))
                    || sub.source.as_str().to_lowercase().contains(&needle)
                    || sub.tags.iter().any(|tag| tag.to_lowercase().contains(&needle))
            });
        }

        match (sort, direction) {
            (SubscriberSort::Email, SortDirection::Asc) => {
                list.sort_by(|a, b| a.email.as_str().cmp(b.email.as_str()));
            }
            (SubscriberSort::Email, SortDirection::Desc) => {
                list.sort_by(|a, b| b.email.as_str().cmp(a.email.as_str()));
            }
            (SubscriberSort::Date, SortDirection::Asc) => {
                list.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
            }
            (SubscriberSort::Date, SortDirection::Desc) => {
                list.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
            }
        }

        list
    }

    /// Serialize the full list as CSV for marketing-platform import.
    ///
    /// Every field is double-quoted; tags are joined with `;`.
    pub async fn export_csv(&self) -> String {
        let subscribers = self.subscribers.read().await;

        let mut csv = String::from("Email,Name,Source,Date Subscribed,Tags\n");
        for sub in subscribers.iter() {
            csv.push_str(&csv_row(sub));
            csv.push('\n');
        }
        csv
    }

    async fn write_mirror(&self, json: &str) -> Result<(), SubscriberError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(self.path.as_path(), json).await?;
        Ok(())
    }

    /// Path of the mirror file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.path.as_path()
    }
}

/// One CSV row, every field quoted.
fn csv_row(sub: &EmailSubscription) -> String {
    [
        sub.email.as_str().to_string(),
        sub.name.clone().unwrap_or_default(),
        sub.source.as_str().to_string(),
        sub.timestamp.format("%-m/%-d/%Y").to_string(),
        sub.tags.join(";"),
    ]
    .map(|field| format!("\"{}\"", field.replace('"', "\"\"")))
    .join(",")
}
