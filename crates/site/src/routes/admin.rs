//! Admin route handlers.
//!
//! Reachable only through the bearer-token middleware (see
//! [`crate::middleware::admin`]); without a configured token the whole
//! group answers 404.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;
use crate::subscribers::{EmailSubscription, SortDirection, SubscriberSort};
use crate::wordpress::ContentTotals;

#[derive(Template, WebTemplate)]
#[template(path = "admin/subscribers.html")]
struct SubscribersTemplate {
    subscribers: Vec<EmailSubscription>,
    total: usize,
    filter: String,
    sort: &'static str,
    dir: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin/content.html")]
struct ContentTemplate {
    totals: ContentTotals,
    subscriber_count: usize,
    api_url: String,
    auth_configured: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct SubscribersQuery {
    #[serde(default)]
    q: String,
    #[serde(default)]
    sort: SubscriberSort,
    #[serde(default)]
    dir: SortDirection,
}

/// GET /admin/subscribers - The subscriber list.
#[instrument(skip(state))]
pub async fn subscribers(
    State(state): State<AppState>,
    Query(query): Query<SubscribersQuery>,
) -> impl IntoResponse {
    let store = state.subscribers();
    let total = store.count().await;
    let subscribers = store.filtered(&query.q, query.sort, query.dir).await;

    SubscribersTemplate {
        subscribers,
        total,
        filter: query.q,
        sort: sort_str(query.sort),
        dir: dir_str(query.dir),
    }
}

/// GET /admin/subscribers/export - CSV download of the full list.
#[instrument(skip(state))]
pub async fn export_subscribers(State(state): State<AppState>) -> impl IntoResponse {
    let csv = state.subscribers().export_csv().await;
    let filename = format!(
        "wayfarer-subscribers-{}.csv",
        chrono::Utc::now().format("%Y-%m-%d")
    );

    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_owned()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    )
}

/// GET /admin/content - CMS content status.
///
/// Counts come from the CMS paging headers, so this page doubles as a
/// connectivity check.
#[instrument(skip(state))]
pub async fn content(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let totals = state.wp().content_totals().await?;
    let subscriber_count = state.subscribers().count().await;

    Ok(ContentTemplate {
        totals,
        subscriber_count,
        api_url: state.config().wordpress.api_url.clone(),
        auth_configured: state.config().wordpress.credentials().is_some(),
    })
}

const fn sort_str(sort: SubscriberSort) -> &'static str {
    match sort {
        SubscriberSort::Email => "email",
        SubscriberSort::Date => "date",
    }
}

const fn dir_str(dir: SortDirection) -> &'static str {
    match dir {
        SortDirection::Asc => "asc",
        SortDirection::Desc => "desc",
    }
}
