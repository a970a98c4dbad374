//! Cache types for WordPress REST API responses.

use super::types::{Category, Menu};

/// Cached value types.
///
/// Only taxonomy and menu responses are cached. Page, post, and search
/// lookups always hit the CMS so the resolver's lookup order stays
/// observable.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Categories(Vec<Category>),
    Menu(Box<Menu>),
}
