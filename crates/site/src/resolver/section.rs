//! Section presets for the path resolver.
//!
//! Paths like `/stories/overlanding` have no CMS object of their own; the
//! first segment picks a section and the rest seeds a title, a search
//! query, and a description. Everything here is pure string derivation.

/// The virtual content sections the resolver recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionType {
    Stories,
    Affiliate,
    Recommendations,
    Resources,
}

impl SectionType {
    /// Match a path segment, accepting singular and plural forms.
    #[must_use]
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "stories" | "story" => Some(Self::Stories),
            "affiliate" => Some(Self::Affiliate),
            "recommendations" | "recommendation" => Some(Self::Recommendations),
            "resources" | "resource" => Some(Self::Resources),
            _ => None,
        }
    }

    /// Decorative icon for the section header.
    #[must_use]
    pub const fn icon(&self) -> &'static str {
        match self {
            Self::Stories => "\u{1f4d6}",
            Self::Affiliate => "\u{1f517}",
            Self::Recommendations => "\u{1f44d}",
            Self::Resources => "\u{1f6e0}\u{fe0f}",
        }
    }
}

/// Derived display strings for a section page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionPreset {
    /// Page heading.
    pub title: String,
    /// Search term sent to the CMS, hyphens intact.
    pub query: String,
    /// Page subheading and meta description.
    pub description: String,
}

impl SectionPreset {
    /// Derive the preset for a section, optionally narrowed by a slug.
    ///
    /// Slugs keep their raw form in the query but read as spaced words in
    /// titles and descriptions.
    #[must_use]
    pub fn derive(section: SectionType, slug: Option<&str>) -> Self {
        let spaced = slug.map(|s| s.replace('-', " "));

        match section {
            SectionType::Stories => Self {
                title: spaced
                    .as_deref()
                    .map_or_else(|| "Personal Stories".to_owned(), |s| format!("{s} Stories")),
                query: slug.unwrap_or("story").to_owned(),
                description: spaced.as_deref().map_or_else(
                    || "Discover personal stories.".to_owned(),
                    |s| format!("Discover {s} personal stories."),
                ),
            },
            SectionType::Affiliate => Self {
                title: spaced.as_deref().map_or_else(
                    || "Affiliate Resources".to_owned(),
                    |s| format!("{s} Resources"),
                ),
                query: slug.unwrap_or("affiliate").to_owned(),
                description: "Recommended products and services.".to_owned(),
            },
            SectionType::Recommendations => Self {
                title: spaced.as_deref().map_or_else(
                    || "Recommendations".to_owned(),
                    |s| format!("{s} Recommendations"),
                ),
                query: slug.unwrap_or("recommendation").to_owned(),
                description: "Top recommendations and reviews.".to_owned(),
            },
            SectionType::Resources => Self {
                title: spaced
                    .as_deref()
                    .map_or_else(|| "Resources".to_owned(), |s| format!("{s} Resources")),
                query: slug.unwrap_or("resource").to_owned(),
                description: "Resources and tools to help you succeed.".to_owned(),
            },
        }
    }
}

/// Preset for the travel search fallback, the last lookup before a 404.
#[must_use]
pub fn travel_preset(slug: Option<&str>) -> SectionPreset {
    let spaced = slug.map(|s| s.replace('-', " "));

    SectionPreset {
        title: spaced
            .as_deref()
            .map_or_else(|| "Travel".to_owned(), |s| format!("{s} Travel")),
        query: slug.map_or_else(|| "travel".to_owned(), |s| format!("{s} travel")),
        description: spaced.as_deref().map_or_else(
            || "Travel advice, tips, and stories.".to_owned(),
            |s| format!("Travel {s} advice, tips, and stories."),
        ),
    }
}

/// Body shown when a section has no matching posts yet.
#[must_use]
pub fn placeholder_html(description: &str) -> String {
    format!("<p>{description}</p><p>Content coming soon.</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_forms() {
        assert_eq!(SectionType::parse("stories"), Some(SectionType::Stories));
        assert_eq!(SectionType::parse("story"), Some(SectionType::Stories));
        assert_eq!(
            SectionType::parse("recommendation"),
            Some(SectionType::Recommendations)
        );
        assert_eq!(SectionType::parse("guides"), None);
        assert_eq!(SectionType::parse("travel"), None);
    }

    #[test]
    fn test_stories_preset_with_slug() {
        let preset = SectionPreset::derive(SectionType::Stories, Some("solo-travel"));
        assert_eq!(preset.title, "solo travel Stories");
        assert_eq!(preset.query, "solo-travel");
        assert_eq!(preset.description, "Discover solo travel personal stories.");
    }

    #[test]
    fn test_stories_preset_bare() {
        let preset = SectionPreset::derive(SectionType::Stories, None);
        assert_eq!(preset.title, "Personal Stories");
        assert_eq!(preset.query, "story");
        assert_eq!(preset.description, "Discover personal stories.");
    }

    #[test]
    fn test_affiliate_description_is_fixed() {
        let bare = SectionPreset::derive(SectionType::Affiliate, None);
        assert_eq!(bare.title, "Affiliate Resources");
        assert_eq!(bare.description, "Recommended products and services.");

        let narrowed = SectionPreset::derive(SectionType::Affiliate, Some("travel-gear"));
        assert_eq!(narrowed.title, "travel gear Resources");
        assert_eq!(narrowed.query, "travel-gear");
        assert_eq!(narrowed.description, "Recommended products and services.");
    }

    #[test]
    fn test_resources_and_recommendations_presets() {
        let resources = SectionPreset::derive(SectionType::Resources, None);
        assert_eq!(resources.title, "Resources");
        assert_eq!(resources.query, "resource");
        assert_eq!(
            resources.description,
            "Resources and tools to help you succeed."
        );

        let recs = SectionPreset::derive(SectionType::Recommendations, Some("gear"));
        assert_eq!(recs.title, "gear Recommendations");
        assert_eq!(recs.description, "Top recommendations and reviews.");
    }

    #[test]
    fn test_travel_preset() {
        let bare = travel_preset(None);
        assert_eq!(bare.title, "Travel");
        assert_eq!(bare.query, "travel");
        assert_eq!(bare.description, "Travel advice, tips, and stories.");

        let narrowed = travel_preset(Some("south-america"));
        assert_eq!(narrowed.title, "south america Travel");
        assert_eq!(narrowed.query, "south-america travel");
        assert_eq!(
            narrowed.description,
            "Travel south america advice, tips, and stories."
        );
    }

    #[test]
    fn test_placeholder_body() {
        assert_eq!(
            placeholder_html("Top recommendations and reviews."),
            "<p>Top recommendations and reviews.</p><p>Content coming soon.</p>"
        );
    }
}
