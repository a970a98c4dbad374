//! Lookup planning for the path resolver.
//!
//! `plan` turns a request path into an ordered list of CMS lookups without
//! touching the network, so the resolution order is testable on its own.
//! The runner in the parent module walks the list and stops at the first
//! hit.

use std::collections::HashSet;

use super::section::{travel_preset, SectionPreset, SectionType};

/// One lookup the resolver will attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// One of the hand-routed category paths.
    Pinned(PinnedCategory),
    /// A section path; resolves internally via page, then search, then a
    /// placeholder, and never falls through.
    Section(SectionPlan),
    /// A single post by slug. A miss here is final.
    Post { slug: String },
    /// A CMS page by slug, which may contain slashes.
    Page { slug: String },
    /// A permanent redirect, used for legacy travel-tips paths.
    Redirect { target: String },
    /// A category with its posts.
    Category { slug: String },
    /// Last resort for travel paths: a posts search.
    TravelSearch { preset: SectionPreset },
}

/// A category path with hand-tuned fallbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PinnedCategory {
    pub slug: &'static str,
    /// Used when the CMS category has an empty name.
    pub name_fallback: &'static str,
    /// Used when the CMS category has an empty description.
    pub description_fallback: &'static str,
    /// Meta keywords for the rendered listing.
    pub keywords: &'static [&'static str],
    pub miss: PinnedMiss,
}

/// What happens when a pinned category does not exist in the CMS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinnedMiss {
    /// Continue with the rest of the plan.
    FallThrough,
    /// Build the listing from a search instead; always resolves.
    Synthetic(SyntheticListing),
}

/// A search-backed stand-in for a missing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticListing {
    pub query: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
}

/// Plan for a section path: which page to try before falling back to
/// search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPlan {
    pub section: SectionType,
    /// First path segment as typed; kept for listing keywords.
    pub content_type: String,
    /// Page slug tried before the search, e.g. `stories/solo-travel`.
    pub page_slug: String,
    pub preset: SectionPreset,
}

const MOTIVATION_STORIES: PinnedCategory = PinnedCategory {
    slug: "motivation-stories",
    name_fallback: "Motivation Stories",
    description_fallback: "Read inspiring motivation stories.",
    keywords: &["motivation", "stories", "inspiration", "personal development"],
    miss: PinnedMiss::FallThrough,
};

const OVERCOMING_CHALLENGES: PinnedCategory = PinnedCategory {
    slug: "overcoming-challenges",
    name_fallback: "Overcoming Challenges",
    description_fallback: "Read stories about overcoming challenges.",
    keywords: &["overcoming challenges", "motivation", "stories"],
    miss: PinnedMiss::Synthetic(SyntheticListing {
        query: "overcoming challenges",
        name: "Overcoming Challenges",
        description: "Stories about overcoming obstacles.",
        keywords: &["overcoming challenges", "motivation"],
    }),
};

/// Build the lookup plan for a path.
///
/// `category_param` carries a `?category=` query override for the category
/// step. Identical page lookups are planned once even where the order
/// would revisit them.
#[must_use]
pub fn plan(path: &str, category_param: Option<&str>) -> Vec<Step> {
    let trimmed = path.trim_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();

    let mut steps = Vec::new();
    let mut planned_pages = HashSet::new();
    let mut push_page = |steps: &mut Vec<Step>, slug: String| {
        if planned_pages.insert(slug.clone()) {
            steps.push(Step::Page { slug });
        }
    };

    match trimmed {
        "category/motivation-stories" => steps.push(Step::Pinned(MOTIVATION_STORIES)),
        "category/motivation-stories/overcoming-challenges" => {
            // Terminal either way; nothing after this step can run.
            steps.push(Step::Pinned(OVERCOMING_CHALLENGES));
            return steps;
        }
        _ => {}
    }

    let first = segments.first().copied();
    let last = segments.last().copied();
    let sub_slug = if segments.len() >= 2 { last } else { None };

    if let Some(first_seg) = first {
        // Section paths resolve internally and never fall through.
        if let Some(section) = SectionType::parse(first_seg) {
            let page_slug = sub_slug.map_or_else(
                || first_seg.to_owned(),
                |slug| format!("{first_seg}/{slug}"),
            );
            steps.push(Step::Section(SectionPlan {
                section,
                content_type: first_seg.to_owned(),
                page_slug,
                preset: SectionPreset::derive(section, sub_slug),
            }));
            return steps;
        }

        // A post path is final: either the post renders or the path 404s.
        if first_seg == "post"
            && let Some(slug) = sub_slug
        {
            steps.push(Step::Post {
                slug: slug.to_owned(),
            });
            return steps;
        }
    }

    if segments.len() >= 2 {
        push_page(&mut steps, trimmed.to_owned());
        push_page(&mut steps, segments.join("-"));

        // Legacy travel-tips paths redirect into the travel hub.
        if segments.first() == Some(&"travel")
            && matches!(segments.get(1), Some(&"tips") | Some(&"budget-tips"))
        {
            let tip = segments.get(2).copied().unwrap_or_else(|| {
                if segments.get(1) == Some(&"budget-tips") {
                    "budget"
                } else {
                    ""
                }
            });
            let target = if tip.is_empty() {
                "/travel/tips/general".to_owned()
            } else {
                format!("/travel/tips/{tip}")
            };
            steps.push(Step::Redirect { target });
            return steps;
        }
    }

    if let Some(last_seg) = last {
        push_page(&mut steps, last_seg.to_owned());
        if let Some(first_seg) = first
            && first_seg != last_seg
        {
            push_page(&mut steps, format!("{first_seg}/{last_seg}"));
        }
        push_page(&mut steps, trimmed.to_owned());
    }

    if let Some(category) = category_param.or(last) {
        steps.push(Step::Category {
            slug: category.to_owned(),
        });
    }

    if first == Some("travel") {
        steps.push(Step::TravelSearch {
            preset: travel_preset(sub_slug),
        });
    }

    steps
}
