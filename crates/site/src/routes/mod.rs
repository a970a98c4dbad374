//! HTTP route handlers for the site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Blog
//! GET  /blog                   - All posts, paginated
//! GET  /post/{slug}            - Single post
//! GET  /category/{slug}        - Category listing
//!
//! # Travel
//! GET  /travel                 - Travel hub
//! GET  /explore-travel         - Destination explorer
//! GET  /travel/tips            - Travel tips (budget by default)
//! GET  /travel/tips/{category} - Travel tips for one category
//!
//! # Shop & Cart (HTMX fragments)
//! GET  /shop                   - Product catalog
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns empty, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! POST /cart/clear             - Empty the cart (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//! POST /cart/checkout          - Placeholder acknowledgement (fragment)
//!
//! # Newsletter & Popups
//! POST /newsletter/subscribe   - Subscribe (CTA, footer, popup forms)
//! POST /newsletter/ebook       - Ebook lead magnet signup
//! POST /popups/dismiss         - Mark a popup as seen for this session
//!
//! # Engagement
//! POST /engagement             - Client beacon (time, scroll, interactions)
//!
//! # Site pages
//! GET  /contact                - Contact page
//! POST /contact                - Contact form submission
//! GET  /about                  - About page
//! GET  /privacy-policy         - Privacy policy
//! GET  /terms-of-service       - Terms of service
//! POST /theme/toggle           - Flip light/dark theme
//!
//! # Admin (bearer token required)
//! GET  /admin/subscribers         - Subscriber list with filter/sort
//! GET  /admin/subscribers/export  - CSV download
//! GET  /admin/content             - CMS content status
//!
//! # Fallback
//! GET  /{*path}                - CMS resolver (pages, categories, sections)
//! ```

pub mod admin;
pub mod blog;
pub mod cart;
pub mod contact;
pub mod dynamic;
pub mod engagement;
pub mod home;
pub mod newsletter;
pub mod pages;
pub mod shop;
pub mod travel;

use axum::{
    Router,
    routing::{get, post},
};
use tower_sessions::Session;

use crate::middleware::{api_rate_limiter, form_rate_limiter, require_admin};
use crate::models::{Cart, session::keys};
use crate::nav::{MainCategory, NavLink, MAIN_CATEGORIES, NAV_LINKS};
use crate::seo::PageMeta;
use crate::state::AppState;

/// Chrome shared by every full page template.
///
/// Carries what the base layout renders around the page body: meta tags,
/// the cart badge, the theme class, and the header/footer link sets.
pub struct Shell {
    pub meta: PageMeta,
    pub cart_count: u32,
    /// "light" or "dark"; becomes a class on `<body>`.
    pub theme: String,
    pub nav_links: &'static [NavLink],
    pub categories: &'static [MainCategory],
}

impl Shell {
    /// Assemble the shell for one page render.
    pub async fn build(session: &Session, meta: PageMeta) -> Self {
        Self {
            meta,
            cart_count: load_cart(session).await.count(),
            theme: current_theme(session).await,
            nav_links: NAV_LINKS,
            categories: MAIN_CATEGORIES,
        }
    }
}

/// Read the cart from the session, treating anything unreadable as empty.
pub(crate) async fn load_cart(session: &Session) -> Cart {
    session.get(keys::CART).await.ok().flatten().unwrap_or_default()
}

/// Write the cart back to the session.
pub(crate) async fn save_cart(
    session: &Session,
    cart: &Cart,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART, cart).await
}

/// The visitor's theme preference, defaulting to light.
pub(crate) async fn current_theme(session: &Session) -> String {
    session
        .get::<String>(keys::THEME)
        .await
        .ok()
        .flatten()
        .unwrap_or_else(|| "light".to_owned())
}

/// Create the blog routes router.
pub fn blog_routes() -> Router<AppState> {
    Router::new()
        .route("/blog", get(blog::index))
        .route("/post/{slug}", get(blog::show))
        .route("/category/{slug}", get(blog::category))
}

/// Create the travel routes router.
pub fn travel_routes() -> Router<AppState> {
    Router::new()
        .route("/travel", get(travel::hub))
        .route("/explore-travel", get(travel::explore))
        .route("/travel/tips", get(travel::tips_index))
        .route("/travel/tips/{category}", get(travel::tips))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the form submission router (strict rate limit).
pub fn form_routes() -> Router<AppState> {
    Router::new()
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/newsletter/ebook", post(newsletter::ebook))
        .route("/contact", post(contact::submit))
        .layer(form_rate_limiter())
}

/// Create the beacon router (relaxed rate limit).
pub fn beacon_routes() -> Router<AppState> {
    Router::new()
        .route("/engagement", post(engagement::beacon))
        .layer(api_rate_limiter())
}

/// Create the admin router, guarded by the bearer token middleware.
pub fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/subscribers", get(admin::subscribers))
        .route("/subscribers/export", get(admin::export_subscribers))
        .route("/content", get(admin::content))
        .layer(axum::middleware::from_fn_with_state(state, require_admin))
}

/// Create all routes for the site.
pub fn routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Blog routes
        .merge(blog_routes())
        // Travel routes
        .merge(travel_routes())
        // Shop
        .route("/shop", get(shop::index))
        // Cart routes
        .nest("/cart", cart_routes())
        // Rate-limited form submissions
        .merge(form_routes())
        // Engagement beacon
        .merge(beacon_routes())
        // Popup dismissal
        .route("/popups/dismiss", post(newsletter::dismiss_popup))
        // Site pages
        .route("/contact", get(contact::show))
        .route("/about", get(pages::about))
        .route("/privacy-policy", get(pages::privacy_policy))
        .route("/terms-of-service", get(pages::terms_of_service))
        .route("/theme/toggle", post(pages::toggle_theme))
        // Admin routes
        .nest("/admin", admin_routes(state))
        // Anything else goes to the CMS resolver
        .fallback(get(dynamic::fallback))
}
