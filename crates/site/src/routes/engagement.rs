//! Engagement beacon route handler.
//!
//! The client script reports time on page, scroll depth, and interaction
//! counts (see `static/js/engagement.js`). The reply tells the script
//! whether the visitor has crossed the engagement thresholds and which
//! popup, if any, the page should reveal.

use axum::{response::IntoResponse, Json};
use serde::Serialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::engagement::{self, EngagementBeacon};
use crate::error::Result;

#[derive(Debug, Serialize)]
struct BeaconResponse {
    engaged: bool,
    /// `newsletter`, `ebook`, or absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    popup: Option<&'static str>,
}

/// POST /engagement - Merge one beacon report into the session.
#[instrument(skip(session, beacon))]
pub async fn beacon(
    session: Session,
    Json(beacon): Json<EngagementBeacon>,
) -> Result<impl IntoResponse> {
    let mut metrics = engagement::load(&session).await;
    metrics.absorb(beacon);
    engagement::save(&session, metrics).await?;

    let flags = engagement::popup_flags(&session).await;
    let popup = if flags.newsletter {
        Some("newsletter")
    } else if flags.ebook {
        Some("ebook")
    } else {
        None
    };

    Ok(Json(BeaconResponse {
        engaged: metrics.is_engaged(),
        popup,
    }))
}
