//! The built-in shop catalog.
//!
//! Products live in the binary rather than the CMS; the catalog is a short
//! curated list, not merchandise at scale. Affiliate items link out to the
//! seller, digital items carry a download, physical items ship.

use wayfarer_core::{Currency, Price, ProductKind};

use crate::models::CartItem;

/// A shop browsing category.
#[derive(Debug, Clone, Copy)]
pub struct ShopCategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Download details for a digital product.
#[derive(Debug, Clone, Copy)]
pub struct Download {
    pub url: &'static str,
    pub file_type: &'static str,
    pub file_size: &'static str,
}

/// One catalog product.
#[derive(Debug, Clone)]
pub struct Product {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub price: Price,
    /// Pre-sale price, shown struck through when present.
    pub original_price: Option<Price>,
    pub image: &'static str,
    /// Product page on the seller's site.
    pub url: &'static str,
    /// Card ribbon such as "Best Seller" or "Sale".
    pub badge: Option<&'static str>,
    pub category_id: &'static str,
    /// ISO date the product was added; sorts lexicographically.
    pub date: &'static str,
    pub featured: bool,
    pub kind: ProductKind,
    /// Set for digital products only.
    pub download: Option<Download>,
}

impl Product {
    /// Build the cart line for this product.
    #[must_use]
    pub fn cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            id: self.id.to_owned(),
            name: self.name.to_owned(),
            price: self.price,
            image: self.image.to_owned(),
            quantity,
            kind: self.kind,
            download_url: self.download.map(|download| download.url.to_owned()),
        }
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<ShopCategory>,
    products: Vec<Product>,
}

impl Catalog {
    /// Build the catalog from the built-in data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: categories(),
            products: products(),
        }
    }

    /// All browsing categories, in display order.
    #[must_use]
    pub fn categories(&self) -> &[ShopCategory] {
        &self.categories
    }

    /// All products, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Look up a category by id.
    #[must_use]
    pub fn category(&self, id: &str) -> Option<&ShopCategory> {
        self.categories.iter().find(|category| category.id == id)
    }

    /// Display name for a category id, empty when unknown.
    #[must_use]
    pub fn category_name(&self, id: &str) -> &'static str {
        self.category(id).map_or("", |category| category.name)
    }

    /// Products in one category, in catalog order.
    #[must_use]
    pub fn by_category(&self, id: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.category_id == id)
            .collect()
    }

    /// Products flagged for the featured row.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.products.iter().filter(|product| product.featured).collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

fn categories() -> Vec<ShopCategory> {
    vec![
        ShopCategory {
            id: "lifestyle",
            name: "Lifestyle & Productivity",
            description: "Products to improve your daily routine and boost productivity",
        },
        ShopCategory {
            id: "travel",
            name: "Travel Essentials",
            description: "Must-have items for travelers and adventurers",
        },
        ShopCategory {
            id: "tech",
            name: "Tech & Gadgets",
            description: "Technology that makes a difference in work and life",
        },
        ShopCategory {
            id: "books",
            name: "Books & Resources",
            description: "Knowledge resources for personal and professional growth",
        },
    ]
}

fn usd(cents: i64) -> Price {
    Price::from_cents(cents, Currency::USD)
}

#[allow(clippy::too_many_lines)]
fn products() -> Vec<Product> {
    vec![
        Product {
            id: "prod_01",
            name: "Travel Backpack Pro",
            description: "Lightweight, water-resistant backpack with multiple compartments \
                          and laptop sleeve. Perfect for travel and daily use.",
            price: usd(8999),
            original_price: None,
            image: "https://images.unsplash.com/photo-1622560480605-d83c853bc5c3",
            url: "https://example.com/product",
            badge: Some("Best Seller"),
            category_id: "travel",
            date: "2024-01-15",
            featured: true,
            kind: ProductKind::Affiliate,
            download: None,
        },
        Product {
            id: "prod_02",
            name: "Noise-Canceling Headphones",
            description: "Premium wireless headphones with active noise cancellation, \
                          perfect for focus work or travel.",
            price: usd(19999),
            original_price: Some(usd(24999)),
            image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e",
            url: "https://example.com/product",
            badge: None,
            category_id: "tech",
            date: "2024-02-10",
            featured: true,
            kind: ProductKind::Affiliate,
            download: None,
        },
        Product {
            id: "prod_03",
            name: "Productivity Planner",
            description: "Daily planner designed to boost productivity with time-blocking, \
                          goal setting, and reflection prompts.",
            price: usd(2499),
            original_price: None,
            image: "https://images.unsplash.com/photo-1517842645767-c639042777db",
            url: "https://example.com/product",
            badge: None,
            category_id: "lifestyle",
            date: "2024-01-20",
            featured: false,
            kind: ProductKind::Physical,
            download: None,
        },
        Product {
            id: "prod_04",
            name: "Portable Espresso Maker",
            description: "Hand-powered espresso maker for great coffee anywhere. Perfect \
                          for travelers and campers.",
            price: usd(6499),
            original_price: None,
            image: "https://images.unsplash.com/photo-1495474472287-4d71bcdd2085",
            url: "https://example.com/product",
            badge: None,
            category_id: "travel",
            date: "2024-03-05",
            featured: false,
            kind: ProductKind::Affiliate,
            download: None,
        },
        Product {
            id: "prod_05",
            name: "Ultralight Packing Cubes (Set of 5)",
            description: "Organize your luggage with these lightweight packing cubes. \
                          Includes different sizes for efficient packing.",
            price: usd(2999),
            original_price: Some(usd(3999)),
            image: "https://images.unsplash.com/photo-1581553680321-4fffae59fcfa",
            url: "https://example.com/product",
            badge: Some("Sale"),
            category_id: "travel",
            date: "2024-02-15",
            featured: false,
            kind: ProductKind::Affiliate,
            download: None,
        },
        Product {
            id: "prod_06",
            name: "Atomic Habits",
            description: "James Clear's guide to building good habits and breaking bad \
                          ones with practical strategies.",
            price: usd(1699),
            original_price: None,
            image: "https://images.unsplash.com/photo-1544947950-fa07a98d237f",
            url: "https://example.com/product",
            badge: None,
            category_id: "books",
            date: "2024-01-10",
            featured: true,
            kind: ProductKind::Digital,
            download: Some(Download {
                url: "https://example.com/download/atomic-habits.pdf",
                file_type: "PDF",
                file_size: "12.5 MB",
            }),
        },
        Product {
            id: "prod_07",
            name: "Portable Phone Charger",
            description: "High-capacity power bank that can charge a phone multiple \
                          times. Compact design with dual USB ports.",
            price: usd(3999),
            original_price: None,
            image: "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5",
            url: "https://example.com/product",
            badge: None,
            category_id: "tech",
            date: "2024-03-20",
            featured: false,
            kind: ProductKind::Affiliate,
            download: None,
        },
        Product {
            id: "prod_08",
            name: "Meditation Cushion Set",
            description: "Comfortable cushion and mat for meditation practice. Ideal for \
                          building a daily mindfulness habit.",
            price: usd(4999),
            original_price: None,
            image: "https://images.unsplash.com/photo-1545205597-3d9d02c29597",
            url: "https://example.com/product",
            badge: None,
            category_id: "lifestyle",
            date: "2024-02-25",
            featured: false,
            kind: ProductKind::Physical,
            download: None,
        },
        Product {
            id: "prod_09",
            name: "Digital Minimalism",
            description: "Cal Newport's guide to focusing in a noisy world and reclaiming \
                          time from digital distractions.",
            price: usd(1599),
            original_price: None,
            image: "https://images.unsplash.com/photo-1532012197267-da84d127e765",
            url: "https://example.com/product",
            badge: None,
            category_id: "books",
            date: "2024-03-10",
            featured: false,
            kind: ProductKind::Digital,
            download: Some(Download {
                url: "https://example.com/download/digital-minimalism.pdf",
                file_type: "PDF",
                file_size: "10.2 MB",
            }),
        },
    ]
}
