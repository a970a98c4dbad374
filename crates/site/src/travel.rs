//! Curated travel data: destinations, hub cards, and tip categories.
//!
//! Like the shop catalog, this content is editorial rather than CMS-driven.
//! Articles shown next to it still come from the CMS.

// =============================================================================
// Destinations
// =============================================================================

/// A featured destination in the carousel on the travel pages.
#[derive(Debug, Clone, Copy)]
pub struct Destination {
    pub name: &'static str,
    pub description: &'static str,
    pub image: &'static str,
    pub slug: &'static str,
    /// Travel card slugs this destination belongs to.
    pub categories: &'static [&'static str],
}

/// The destination carousel, in display order.
pub const DESTINATIONS: &[Destination] = &[
    Destination {
        name: "Swiss Alps",
        description: "Experience breathtaking mountain vistas",
        image: "https://images.unsplash.com/photo-1469474968028-56623f02e42e",
        slug: "swiss-alps",
        categories: &["mountain-getaways"],
    },
    Destination {
        name: "Bali Beaches",
        description: "Relax on stunning tropical shores",
        image: "https://images.unsplash.com/photo-1500375592092-40eb2168fd21",
        slug: "bali-beaches",
        categories: &["beach-destinations"],
    },
    Destination {
        name: "Norwegian Fjords",
        description: "Discover stunning natural landscapes",
        image: "https://images.unsplash.com/photo-1482938289607-e9573fc25ebb",
        slug: "norwegian-fjords",
        categories: &["mountain-getaways", "adventure-travel"],
    },
    Destination {
        name: "Santorini, Greece",
        description: "Enjoy breathtaking island views",
        image: "https://images.unsplash.com/photo-1503152394-c571994fd383",
        slug: "santorini-greece",
        categories: &["beach-destinations", "city-exploration"],
    },
    Destination {
        name: "Kyoto, Japan",
        description: "Immerse in traditional culture",
        image: "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e",
        slug: "kyoto-japan",
        categories: &["city-exploration"],
    },
];

/// Look up a destination by slug.
#[must_use]
pub fn destination_by_slug(slug: &str) -> Option<&'static Destination> {
    DESTINATIONS.iter().find(|dest| dest.slug == slug)
}

/// Destinations belonging to a travel card category.
#[must_use]
pub fn destinations_by_category(category: &str) -> Vec<&'static Destination> {
    DESTINATIONS
        .iter()
        .filter(|dest| dest.categories.contains(&category))
        .collect()
}

// =============================================================================
// Travel Cards
// =============================================================================

/// One of the four category cards in the travel hub hero.
#[derive(Debug, Clone, Copy)]
pub struct TravelCard {
    pub name: &'static str,
    pub description: &'static str,
    pub slug: &'static str,
}

impl TravelCard {
    /// Emoji stand-in for the card icon.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self.slug.as_bytes() {
            b"mountain-getaways" => "\u{26f0}\u{fe0f}",
            b"beach-destinations" => "\u{1f3dd}\u{fe0f}",
            b"adventure-travel" => "\u{1f9ed}",
            _ => "\u{1f4cd}",
        }
    }
}

/// The travel hub category cards, in display order.
pub const TRAVEL_CARDS: &[TravelCard] = &[
    TravelCard {
        name: "Mountain Getaways",
        description: "Explore majestic peaks and hiking trails",
        slug: "mountain-getaways",
    },
    TravelCard {
        name: "Beach Destinations",
        description: "Discover pristine shores and coastal retreats",
        slug: "beach-destinations",
    },
    TravelCard {
        name: "Adventure Travel",
        description: "Thrilling experiences for the bold traveler",
        slug: "adventure-travel",
    },
    TravelCard {
        name: "City Exploration",
        description: "Urban adventures and cultural experiences",
        slug: "city-exploration",
    },
];

// =============================================================================
// Tip Categories
// =============================================================================

/// An editorially curated travel tips category.
#[derive(Debug, Clone, Copy)]
pub struct TipCategory {
    pub slug: &'static str,
    pub name: &'static str,
    /// Heading of the info box above the article grid.
    pub box_title: &'static str,
    /// Body of the info box.
    pub box_blurb: &'static str,
}

/// The known tip categories; unknown slugs get generic search terms.
pub const TIP_CATEGORIES: &[TipCategory] = &[
    TipCategory {
        slug: "budget",
        name: "Budget",
        box_title: "Budget Travel Essentials",
        box_blurb: "Traveling on a budget doesn't mean sacrificing experiences. \
                    Discover smart ways to save money while making the most of your adventures, \
                    from finding affordable accommodations to eating like a local.",
    },
    TipCategory {
        slug: "luxury",
        name: "Luxury",
        box_title: "Luxury Travel Experiences",
        box_blurb: "Indulge in premium travel experiences with our luxury travel tips. \
                    Find the best high-end destinations, accommodations, exclusive activities, \
                    and learn how to maximize loyalty programs for upgrades.",
    },
    TipCategory {
        slug: "family",
        name: "Family",
        box_title: "Family-Friendly Adventures",
        box_blurb: "Family travel should be fun for everyone! Learn how to keep kids entertained \
                    while creating memorable experiences the whole family will cherish. \
                    Get tips on kid-friendly destinations and activities.",
    },
    TipCategory {
        slug: "adventure",
        name: "Adventure",
        box_title: "Thrilling Adventures",
        box_blurb: "Push your limits with exciting adventure travel. From trekking remote mountains \
                    to diving deep seas, find inspiration for your next thrilling experience. \
                    Learn about safety precautions and gear essentials.",
    },
    TipCategory {
        slug: "solo",
        name: "Solo",
        box_title: "Solo Travel Freedom",
        box_blurb: "Embarking on a journey alone can be transformative. Discover safety tips, \
                    social opportunities, and how to make the most of your solo adventures. \
                    Find destinations particularly welcoming to solo travelers.",
    },
];

/// Look up a known tip category by slug.
#[must_use]
pub fn tip_category_by_slug(slug: &str) -> Option<&'static TipCategory> {
    TIP_CATEGORIES.iter().find(|cat| cat.slug == slug)
}

/// Display name for a tips slug, first letter capitalized.
#[must_use]
pub fn tips_display_name(slug: &str) -> String {
    let mut chars = slug.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

/// CMS search terms for a tips category, most specific first.
///
/// Known categories carry a hand-tuned list; anything else gets generic
/// phrases derived from the slug.
#[must_use]
pub fn tips_search_terms(category: &str) -> Vec<String> {
    let fixed: Option<&[&str]> = match category {
        "budget" => Some(&[
            "budget travel",
            "budget tips",
            "cheap travel",
            "affordable travel",
            "travel on a budget",
            "money saving travel",
            "backpacking budget",
            "frugal travel",
            "budget destinations",
        ]),
        "luxury" => Some(&[
            "luxury travel",
            "premium travel",
            "high-end travel",
            "exclusive travel",
            "luxury destinations",
            "luxury hotels",
            "luxury experiences",
        ]),
        "family" => Some(&[
            "family travel",
            "travel with kids",
            "family-friendly travel",
            "family vacation tips",
            "traveling with children",
            "family destinations",
            "child-friendly travel",
        ]),
        "adventure" => Some(&[
            "adventure travel",
            "extreme travel",
            "outdoor adventures",
            "action travel",
            "adventure tourism",
            "hiking adventures",
            "adventure destinations",
        ]),
        "solo" => Some(&[
            "solo travel",
            "traveling alone",
            "solo traveler",
            "independent travel",
            "solo adventures",
            "solo safety",
            "solo travel tips",
        ]),
        _ => None,
    };

    fixed.map_or_else(
        || {
            vec![
                format!("{category} travel"),
                format!("{category} tips"),
                format!("{category} guide"),
                "travel tips".to_string(),
            ]
        },
        |terms| terms.iter().map(ToString::to_string).collect(),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn test_destination_lookup() {
        let dest = destination_by_slug("swiss-alps").unwrap();
        assert_eq!(dest.name, "Swiss Alps");
        assert!(destination_by_slug("atlantis").is_none());
    }

    #[test]
    fn test_destinations_by_category() {
        let beaches = destinations_by_category("beach-destinations");
        let names: Vec<&str> = beaches.iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Bali Beaches", "Santorini, Greece"]);
    }

    #[test]
    fn test_destinations_can_belong_to_several_cards() {
        let fjords = destination_by_slug("norwegian-fjords").unwrap();
        assert_eq!(fjords.categories.len(), 2);
    }

    #[test]
    fn test_tip_category_lookup() {
        let budget = tip_category_by_slug("budget").unwrap();
        assert_eq!(budget.box_title, "Budget Travel Essentials");
        assert!(tip_category_by_slug("underwater").is_none());
    }

    #[test]
    fn test_tips_search_terms_known_category() {
        let terms = tips_search_terms("budget");
        assert_eq!(terms.len(), 9);
        assert_eq!(terms[..3], ["budget travel", "budget tips", "cheap travel"]);
    }

    #[test]
    fn test_tips_search_terms_unknown_category() {
        let terms = tips_search_terms("winter");
        assert_eq!(
            terms,
            vec!["winter travel", "winter tips", "winter guide", "travel tips"]
        );
    }

    #[test]
    fn test_tips_display_name_capitalizes() {
        assert_eq!(tips_display_name("budget"), "Budget");
        assert_eq!(tips_display_name(""), "");
    }
}
