//! Shop route handler.
//!
//! The catalog lives in the binary (see [`crate::shop`]); this page is pure
//! presentation with query-string filtering and sorting.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use wayfarer_core::ProductKind;

use crate::filters;
use crate::seo::PageMeta;
use crate::shop::{Product, ShopCategory};
use crate::state::AppState;

use super::Shell;

const SHOP_DESCRIPTION: &str = "Browse our selection of recommended products for lifestyle \
     improvement, travel essentials, and more.";

#[derive(Template, WebTemplate)]
#[template(path = "shop/index.html")]
struct ShopTemplate {
    shell: Shell,
    categories: Vec<ShopCategory>,
    products: Vec<Product>,
    active_category: String,
    sort: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ShopParams {
    category: Option<String>,
    sort: Option<String>,
    product: Option<String>,
}

/// GET /shop - The product catalog with filters.
///
/// `?product=` narrows the grid to one product and activates its category;
/// `?category=` filters; `?sort=` orders by price or date. Unknown values
/// fall back to the full grid in catalog order.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ShopParams>,
    session: Session,
) -> impl IntoResponse {
    let catalog = state.catalog();
    let sort = params.sort.unwrap_or_else(|| "featured".to_owned());

    let (mut products, active_category) = select_products(&state, params.product.as_deref(), params.category.as_deref());
    sort_products(&mut products, &sort);

    let meta = PageMeta::website(
        "Shop",
        SHOP_DESCRIPTION,
        "/shop",
        &state.config().base_url,
    );

    ShopTemplate {
        shell: Shell::build(&session, meta).await,
        categories: catalog.categories().to_vec(),
        products,
        active_category,
        sort,
    }
}

/// Pick the product set and the active category id.
fn select_products(
    state: &AppState,
    product_id: Option<&str>,
    category_id: Option<&str>,
) -> (Vec<Product>, String) {
    let catalog = state.catalog();

    // A product link from an article or the home page wins over filters.
    if let Some(product) = product_id.and_then(|id| catalog.product(id)) {
        return (vec![product.clone()], product.category_id.to_owned());
    }

    match category_id {
        Some(id) if catalog.category(id).is_some() => {
            let products = catalog.by_category(id).into_iter().cloned().collect();
            (products, id.to_owned())
        }
        _ => (catalog.products().to_vec(), "all".to_owned()),
    }
}

/// Order the grid in place; `featured` keeps catalog order.
fn sort_products(products: &mut [Product], sort: &str) {
    match sort {
        "price-low" => products.sort_by(|a, b| a.price.amount().cmp(&b.price.amount())),
        "price-high" => products.sort_by(|a, b| b.price.amount().cmp(&a.price.amount())),
        // ISO dates sort lexicographically
        "newest" => products.sort_by(|a, b| b.date.cmp(a.date)),
        _ => {}
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::shop::Catalog;

    #[test]
    fn test_sort_price_low_to_high() {
        let mut products = Catalog::new().products().to_vec();
        sort_products(&mut products, "price-low");
        assert_eq!(products[0].id, "prod_09");

        let prices: Vec<_> = products.iter().map(|p| p.price.amount()).collect();
        let mut sorted = prices.clone();
        sorted.sort();
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_sort_newest_leads_with_latest_date() {
        let mut products = Catalog::new().products().to_vec();
        sort_products(&mut products, "newest");
        assert_eq!(products[0].date, "2024-03-20");
    }

    #[test]
    fn test_unknown_sort_keeps_catalog_order() {
        let catalog = Catalog::new();
        let mut products = catalog.products().to_vec();
        sort_products(&mut products, "upside-down");

        let ids: Vec<&str> = products.iter().map(|p| p.id).collect();
        let original: Vec<&str> = catalog.products().iter().map(|p| p.id).collect();
        assert_eq!(ids, original);
    }
}
