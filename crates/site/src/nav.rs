//! Site navigation data.
//!
//! The header and footer are static; only the curated category list points
//! into CMS taxonomy. Slugs here must match real WordPress categories or
//! their links fall through to the path resolver.

/// One top-level navigation link.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

/// One curated topic category, shown in the header dropdown and footer.
#[derive(Debug, Clone, Copy)]
pub struct MainCategory {
    pub name: &'static str,
    pub slug: &'static str,
    pub description: &'static str,
}

impl MainCategory {
    /// Browse path for this category.
    #[must_use]
    pub fn path(&self) -> String {
        format!("/category/{}", self.slug)
    }
}

/// Header links, in display order.
pub const NAV_LINKS: &[NavLink] = &[
    NavLink { name: "Home", path: "/" },
    NavLink { name: "Travel", path: "/travel" },
    NavLink { name: "Blog", path: "/blog" },
    NavLink { name: "About", path: "/about" },
    NavLink { name: "Contact", path: "/contact" },
];

/// The curated categories, in display order.
pub const MAIN_CATEGORIES: &[MainCategory] = &[
    MainCategory {
        name: "Lifestyle & Growth",
        slug: "lifestyle-growth",
        description: "Productivity hacks, healthy habits, mindfulness",
    },
    MainCategory {
        name: "Travel Adventures",
        slug: "travel-adventures",
        description: "Travel hacks, adventure spots, budget-friendly trips",
    },
    MainCategory {
        name: "Product Reviews",
        slug: "product-reviews",
        description: "Tech for travelers, home fitness, growth tools",
    },
    MainCategory {
        name: "How-To Guides",
        slug: "how-to-guides",
        description: "Blogging tips, productivity tricks, remote work guide",
    },
    MainCategory {
        name: "Motivation & Stories",
        slug: "motivation-stories",
        description: "Personal growth, travel lessons, blogging journey",
    },
];
