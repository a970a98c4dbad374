//! Content resolution for paths without a dedicated route.
//!
//! WordPress editors create pages and categories at arbitrary paths, so any
//! path the router does not claim is resolved against the CMS through an
//! ordered list of lookups: pinned categories, virtual sections, posts,
//! pages under several slug spellings, categories, and finally a travel
//! search. The first hit wins.
//!
//! Planning is pure (see [`strategy::plan`]); only the runner talks to the
//! CMS. A failed lookup is logged and treated as a miss so one slow or
//! broken endpoint cannot 404 a path a later lookup would have resolved.

pub mod section;
pub mod strategy;

use tracing::{debug, instrument};

use wayfarer_core::CategoryId;

use crate::wordpress::{Category, Page, Post, PostQuery, WpClient, WpError};

use section::{placeholder_html, SectionType};
use strategy::{PinnedCategory, PinnedMiss, SectionPlan, Step, SyntheticListing};

/// How many posts a category listing shows.
const CATEGORY_PAGE_SIZE: u32 = 10;

/// How many posts a section search fetches.
const SECTION_PAGE_SIZE: u32 = 12;

/// How many posts the travel search fallback fetches.
const TRAVEL_PAGE_SIZE: u32 = 10;

/// What a path resolved to.
#[derive(Debug, Clone)]
pub enum Resolution {
    /// A CMS page.
    Page(Box<Page>),
    /// A single post.
    Post(Box<Post>),
    /// A category with its posts, real or synthesized from a search.
    Category {
        category: Category,
        posts: Vec<Post>,
        keywords: Vec<String>,
    },
    /// A search-backed section or travel listing.
    Listing(Listing),
    /// A section that has no matching content yet.
    Placeholder {
        title: String,
        description: String,
        html: String,
    },
    /// The path moved; send the client to the target.
    Redirect(String),
}

/// A resolved listing page.
#[derive(Debug, Clone)]
pub struct Listing {
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
    /// Set for section listings; `None` for the travel search.
    pub section: Option<SectionType>,
    pub posts: Vec<Post>,
}

/// Resolve a path against the CMS.
///
/// Returns `None` when every lookup misses or when a post path names a
/// post that does not exist.
#[instrument(skip(wp))]
pub async fn resolve(
    wp: &WpClient,
    path: &str,
    category_param: Option<&str>,
) -> Option<Resolution> {
    for step in strategy::plan(path, category_param) {
        match execute(wp, step).await {
            Outcome::Resolved(resolution) => return Some(resolution),
            Outcome::Miss => {}
            Outcome::Halt => return None,
        }
    }

    debug!("No lookup resolved the path");
    None
}

enum Outcome {
    Resolved(Resolution),
    Miss,
    /// A terminal miss; later steps must not run.
    Halt,
}

async fn execute(wp: &WpClient, step: Step) -> Outcome {
    match step {
        Step::Pinned(pinned) => execute_pinned(wp, pinned).await,
        Step::Section(plan) => execute_section(wp, plan).await,
        Step::Post { slug } => match wp.get_post_by_slug(&slug).await {
            Ok(post) => Outcome::Resolved(Resolution::Post(Box::new(post))),
            Err(e) => {
                debug!(slug = %slug, "Post lookup missed, ending resolution: {e}");
                Outcome::Halt
            }
        },
        Step::Page { slug } => hit(wp.get_page_by_slug(&slug).await, "page").map_or(
            Outcome::Miss,
            |page| Outcome::Resolved(Resolution::Page(Box::new(page))),
        ),
        Step::Redirect { target } => Outcome::Resolved(Resolution::Redirect(target)),
        Step::Category { slug } => {
            match hit(
                wp.get_posts_by_category(&slug, 1, CATEGORY_PAGE_SIZE).await,
                "category",
            ) {
                Some((category, paged)) => {
                    let category = with_browse_fallback(category);
                    let keywords = category_keywords(&category.name);
                    Outcome::Resolved(Resolution::Category {
                        category,
                        posts: paged.items,
                        keywords,
                    })
                }
                None => Outcome::Miss,
            }
        }
        Step::TravelSearch { preset } => {
            let posts = search_posts(wp, &preset.query, TRAVEL_PAGE_SIZE).await;
            if posts.is_empty() {
                Outcome::Miss
            } else {
                Outcome::Resolved(Resolution::Listing(Listing {
                    keywords: listing_keywords("travel", &preset.query),
                    title: preset.title,
                    description: preset.description,
                    section: None,
                    posts,
                }))
            }
        }
    }
}

/// Pinned categories render the category when it exists; what happens on a
/// miss is part of the pin.
async fn execute_pinned(wp: &WpClient, pinned: PinnedCategory) -> Outcome {
    let lookup = hit(
        wp.get_posts_by_category(pinned.slug, 1, CATEGORY_PAGE_SIZE).await,
        "pinned category",
    );

    match lookup {
        Some((category, paged)) => Outcome::Resolved(Resolution::Category {
            category: with_fallbacks(category, pinned.name_fallback, pinned.description_fallback),
            posts: paged.items,
            keywords: owned(pinned.keywords),
        }),
        None => match pinned.miss {
            PinnedMiss::FallThrough => Outcome::Miss,
            PinnedMiss::Synthetic(listing) => {
                let posts = search_posts(wp, listing.query, SECTION_PAGE_SIZE).await;
                Outcome::Resolved(Resolution::Category {
                    category: synthetic_category(pinned.slug, listing),
                    posts,
                    keywords: owned(listing.keywords),
                })
            }
        },
    }
}

/// Section paths always resolve: a matching page, then a search-backed
/// listing, then a placeholder.
async fn execute_section(wp: &WpClient, plan: SectionPlan) -> Outcome {
    if let Some(page) = hit(wp.get_page_by_slug(&plan.page_slug).await, "section page") {
        return Outcome::Resolved(Resolution::Page(Box::new(page)));
    }

    let posts = search_posts(wp, &plan.preset.query, SECTION_PAGE_SIZE).await;
    if posts.is_empty() {
        return Outcome::Resolved(Resolution::Placeholder {
            html: placeholder_html(&plan.preset.description),
            title: plan.preset.title,
            description: plan.preset.description,
        });
    }

    Outcome::Resolved(Resolution::Listing(Listing {
        keywords: listing_keywords(&plan.content_type, &plan.preset.query),
        title: plan.preset.title,
        description: plan.preset.description,
        section: Some(plan.section),
        posts,
    }))
}

/// Run a posts search, treating any failure as an empty result.
async fn search_posts(wp: &WpClient, query: &str, per_page: u32) -> Vec<Post> {
    hit(wp.get_posts(&PostQuery::search(query, per_page)).await, "search")
        .map_or_else(Vec::new, |paged| paged.items)
}

/// Collapse a lookup result to an `Option`, logging anything other than a
/// plain miss.
fn hit<T>(result: Result<T, WpError>, what: &str) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(WpError::NotFound(_)) => None,
        Err(e) => {
            debug!("Treating failed {what} lookup as a miss: {e}");
            None
        }
    }
}

fn with_fallbacks(mut category: Category, name: &str, description: &str) -> Category {
    if category.name.is_empty() {
        category.name = name.to_owned();
    }
    if category.description.is_empty() {
        category.description = description.to_owned();
    }
    category
}

fn with_browse_fallback(mut category: Category) -> Category {
    if category.description.is_empty() {
        category.description = format!("Browse all posts in {}", category.name);
    }
    category
}

fn synthetic_category(slug: &str, listing: SyntheticListing) -> Category {
    Category {
        id: CategoryId::new(0),
        name: listing.name.to_owned(),
        slug: slug.to_owned(),
        description: listing.description.to_owned(),
        count: 0,
    }
}

fn category_keywords(name: &str) -> Vec<String> {
    vec![
        name.to_lowercase(),
        "blog".to_owned(),
        "articles".to_owned(),
        "posts".to_owned(),
    ]
}

fn listing_keywords(content_type: &str, query: &str) -> Vec<String> {
    vec![
        content_type.to_owned(),
        query.to_owned(),
        "wayfarer".to_owned(),
        "blog".to_owned(),
    ]
}

fn owned(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| (*k).to_owned()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, description: &str) -> Category {
        Category {
            id: CategoryId::new(7),
            name: name.to_owned(),
            slug: "test".to_owned(),
            description: description.to_owned(),
            count: 3,
        }
    }

    #[test]
    fn test_fallbacks_fill_empty_fields_only() {
        let filled = with_fallbacks(category("", ""), "Motivation Stories", "Read stories.");
        assert_eq!(filled.name, "Motivation Stories");
        assert_eq!(filled.description, "Read stories.");

        let kept = with_fallbacks(category("Real Name", "Real blurb"), "Fallback", "Fallback");
        assert_eq!(kept.name, "Real Name");
        assert_eq!(kept.description, "Real blurb");
    }

    #[test]
    fn test_browse_fallback_uses_category_name() {
        let filled = with_browse_fallback(category("Travel Adventures", ""));
        assert_eq!(filled.description, "Browse all posts in Travel Adventures");

        let kept = with_browse_fallback(category("Travel Adventures", "Own blurb"));
        assert_eq!(kept.description, "Own blurb");
    }

    #[test]
    fn test_synthetic_category_shape() {
        let listing = SyntheticListing {
            query: "overcoming challenges",
            name: "Overcoming Challenges",
            description: "Stories about overcoming obstacles.",
            keywords: &[],
        };
        let synthetic = synthetic_category("overcoming-challenges", listing);

        assert_eq!(synthetic.name, "Overcoming Challenges");
        assert_eq!(synthetic.slug, "overcoming-challenges");
        assert_eq!(synthetic.description, "Stories about overcoming obstacles.");
        assert_eq!(synthetic.count, 0);
    }

    #[test]
    fn test_keyword_builders() {
        assert_eq!(
            category_keywords("Travel Adventures"),
            vec!["travel adventures", "blog", "articles", "posts"]
        );
        assert_eq!(
            listing_keywords("stories", "solo-travel"),
            vec!["stories", "solo-travel", "wayfarer", "blog"]
        );
    }
}
