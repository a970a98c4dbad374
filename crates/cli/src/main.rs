//! Wayfarer CLI - content checks and subscriber management.
//!
//! # Usage
//!
//! ```bash
//! # Check CMS connectivity and print published totals
//! wf-cli content status
//!
//! # Print a CMS navigation menu
//! wf-cli content menu main-navigation
//!
//! # Show the lookup plan the resolver would run for a path
//! wf-cli resolve /stories/solo-travel
//!
//! # Run the plan against the live CMS and report the outcome
//! wf-cli resolve /travel/patagonia --live
//!
//! # Export the subscriber list as CSV
//! wf-cli subscribers export -o subscribers.csv
//!
//! # Add a signup collected outside the site
//! wf-cli subscribers add -e reader@example.com -n "A Reader" -s conference
//! ```
//!
//! # Commands
//!
//! - `content status` - CMS connectivity check and published totals
//! - `content menu` - Print a navigation menu by slug
//! - `resolve` - Show the resolver's lookup plan for a path
//! - `subscribers export` - CSV export of the subscriber list
//! - `subscribers add` - Add one subscriber by hand

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "wf-cli")]
#[command(author, version, about = "Wayfarer CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect CMS content
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Show the resolver's lookup plan for a path
    Resolve {
        /// Request path, e.g. /stories/solo-travel
        path: String,

        /// Value of the ?category= query parameter, if any
        #[arg(short, long)]
        category: Option<String>,

        /// Run the plan against the configured CMS and report the outcome
        #[arg(long)]
        live: bool,
    },
    /// Manage the subscriber list
    Subscribers {
        #[command(subcommand)]
        action: SubscribersAction,
    },
}

#[derive(Subcommand)]
enum ContentAction {
    /// Check CMS connectivity and print published totals
    Status,
    /// Print a navigation menu by slug
    Menu {
        /// Menu slug, e.g. main-navigation
        slug: String,
    },
}

#[derive(Subcommand)]
enum SubscribersAction {
    /// Export the subscriber list as CSV
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Add a subscriber collected outside the site
    Add {
        /// Subscriber email address
        #[arg(short, long)]
        email: String,

        /// Subscriber display name
        #[arg(short, long)]
        name: Option<String>,

        /// Source recorded with the subscription
        #[arg(short, long, default_value = "manual-import")]
        source: String,

        /// Extra tag (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Content { action } => match action {
            ContentAction::Status => commands::content::status().await?,
            ContentAction::Menu { slug } => commands::content::menu(&slug).await?,
        },
        Commands::Resolve {
            path,
            category,
            live,
        } => {
            if live {
                commands::resolve::run_live(&path, category.as_deref()).await?;
            } else {
                commands::resolve::print_plan(&path, category.as_deref());
            }
        }
        Commands::Subscribers { action } => match action {
            SubscribersAction::Export { output } => {
                commands::subscribers::export(output.as_deref()).await?;
            }
            SubscribersAction::Add {
                email,
                name,
                source,
                tag,
            } => {
                commands::subscribers::add(&email, name, &source, tag).await?;
            }
        },
    }
    Ok(())
}
