//! Cart route handlers (HTMX fragments).
//!
//! Mutations return the cart-items fragment plus an `HX-Trigger` header so
//! the count badge elsewhere on the page can refresh itself. The cart lives
//! in the session and nowhere else; see [`crate::models::session`].

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    response::{AppendHeaders, IntoResponse},
    Form,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::{instrument, warn};

use wayfarer_core::ProductKind;

use crate::error::Result;
use crate::filters;
use crate::models::Cart;
use crate::seo::PageMeta;
use crate::state::AppState;

use super::{load_cart, save_cart, Shell};

/// Header sent with every mutation so badge listeners refresh.
const CART_UPDATED: [(&str, &str); 1] = [("HX-Trigger", "cart-updated")];

#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
struct CartTemplate {
    shell: Shell,
    cart: Cart,
}

/// The item list and order summary, swapped in on every mutation.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
struct CartItemsTemplate {
    cart: Cart,
}

/// The header badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
struct CartCountTemplate {
    count: u32,
}

/// The checkout acknowledgement notice.
#[derive(Template, WebTemplate)]
#[template(path = "partials/checkout_notice.html")]
struct CheckoutNoticeTemplate;

#[derive(Debug, Deserialize)]
pub struct AddForm {
    product_id: String,
    quantity: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateForm {
    product_id: String,
    quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    product_id: String,
}

/// GET /cart - The cart page.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    let meta = PageMeta::website(
        "Your Cart",
        "Review the products in your cart.",
        "/cart",
        &state.config().base_url,
    );

    CartTemplate {
        shell: Shell::build(&session, meta).await,
        cart: load_cart(&session).await,
    }
}

/// POST /cart/add - Add a catalog product to the cart.
///
/// Returns an empty body with the trigger header; the grid button stays in
/// place and only the badge updates. An unknown product id is logged and
/// ignored rather than surfaced, since it only occurs from stale markup or
/// hand-built requests.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddForm>,
) -> Result<impl IntoResponse> {
    let Some(product) = state.catalog().product(&form.product_id) else {
        warn!(product_id = %form.product_id, "Add-to-cart for unknown product");
        return Ok((AppendHeaders(CART_UPDATED), ()));
    };

    let quantity = form.quantity.unwrap_or(1).max(1);
    let mut cart = load_cart(&session).await;
    cart.add(product.cart_item(quantity));
    save_cart(&session, &cart).await?;

    Ok((AppendHeaders(CART_UPDATED), ()))
}

/// POST /cart/update - Set a line quantity.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Form(form): Form<UpdateForm>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await;
    cart.update_quantity(&form.product_id, form.quantity);
    save_cart(&session, &cart).await?;

    Ok((AppendHeaders(CART_UPDATED), CartItemsTemplate { cart }))
}

/// POST /cart/remove - Remove a line.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Form(form): Form<RemoveForm>,
) -> Result<impl IntoResponse> {
    let mut cart = load_cart(&session).await;
    cart.remove(&form.product_id);
    save_cart(&session, &cart).await?;

    Ok((AppendHeaders(CART_UPDATED), CartItemsTemplate { cart }))
}

/// POST /cart/clear - Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<impl IntoResponse> {
    let cart = Cart::default();
    save_cart(&session, &cart).await?;

    Ok((AppendHeaders(CART_UPDATED), CartItemsTemplate { cart }))
}

/// GET /cart/count - The badge fragment.
#[instrument(skip(session))]
pub async fn count(session: Session) -> impl IntoResponse {
    CartCountTemplate {
        count: load_cart(&session).await.count(),
    }
}

/// POST /cart/checkout - Placeholder acknowledgement.
///
/// There is no payment integration; the button exists so the page reads
/// like a complete shop.
#[instrument]
pub async fn checkout() -> impl IntoResponse {
    CheckoutNoticeTemplate
}
