//! Integration tests for the engagement beacon and popup gating.
//!
//! The wire-shape tests run in-process; the flow tests drive a running
//! server (cargo run -p wayfarer-site) and are ignored by default.
//!
//! Run with: SITE_BASE_URL=http://localhost:3000 cargo test -- --include-ignored

use std::sync::atomic::{AtomicU8, Ordering};

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::json;

use wayfarer_site::engagement::{EngagementBeacon, EngagementMetrics};

/// What the beacon endpoint answers with.
#[derive(Debug, Deserialize)]
struct BeaconReply {
    engaged: bool,
    #[serde(default)]
    popup: Option<String>,
}

/// Base URL for the site (configurable via environment).
fn base_url() -> String {
    std::env::var("SITE_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

static NEXT_CLIENT_IP: AtomicU8 = AtomicU8::new(1);

/// A client with its own cookie jar and its own forged client IP.
///
/// The beacon endpoint rate-limits on the proxy-supplied client IP, so each
/// test presents a distinct TEST-NET-3 address the way Cloudflare would.
fn session_client() -> Client {
    let octet = NEXT_CLIENT_IP.fetch_add(1, Ordering::Relaxed);
    let mut headers = HeaderMap::new();
    headers.insert(
        "x-forwarded-for",
        HeaderValue::from_str(&format!("203.0.113.{octet}")).expect("valid header value"),
    );

    Client::builder()
        .default_headers(headers)
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Send one beacon report and parse the reply.
async fn report(client: &Client, time: u64, scroll: u8, interactions: u32) -> BeaconReply {
    client
        .post(format!("{}/engagement", base_url()))
        .json(&json!({
            "time_on_page": time,
            "scroll_percentage": scroll,
            "interactions": interactions,
        }))
        .send()
        .await
        .expect("Failed to post beacon")
        .json()
        .await
        .expect("Beacon reply should be JSON")
}

// =============================================================================
// Wire Shape Tests (in-process)
// =============================================================================

#[test]
fn test_beacon_fields_default_when_absent() {
    let beacon: EngagementBeacon =
        serde_json::from_value(json!({"time_on_page": 12})).expect("partial report should parse");

    assert_eq!(beacon.time_on_page, 12);
    assert_eq!(beacon.scroll_percentage, 0);
    assert_eq!(beacon.interactions, 0);
}

#[test]
fn test_beacon_tolerates_unknown_fields() {
    // An older server must keep accepting reports from a newer script.
    let beacon: EngagementBeacon = serde_json::from_value(json!({
        "time_on_page": 5,
        "scroll_percentage": 40,
        "interactions": 1,
        "page": "/blog",
    }))
    .expect("extra fields should be ignored");

    assert_eq!(beacon.scroll_percentage, 40);
}

#[test]
fn test_reports_fold_into_session_peaks() {
    let mut metrics = EngagementMetrics::default();

    for (time, scroll, clicks) in [(8, 30, 1), (18, 75, 0), (3, 10, 1)] {
        metrics.absorb(
            serde_json::from_value(json!({
                "time_on_page": time,
                "scroll_percentage": scroll,
                "interactions": clicks,
            }))
            .expect("report should parse"),
        );
    }

    assert_eq!(metrics.time_on_page, 18);
    assert_eq!(metrics.scroll_percentage, 75);
    assert_eq!(metrics.interaction_count, 2);
}

// =============================================================================
// Live Flow Tests
// =============================================================================

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_drive_by_visit_is_not_engaged() {
    let client = session_client();
    let reply = report(&client, 5, 10, 0).await;

    assert!(!reply.engaged);
    assert_eq!(reply.popup, None, "No popup for a drive-by visitor");
}

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_time_threshold_offers_newsletter_first() {
    let client = session_client();
    let reply = report(&client, 45, 10, 0).await;

    assert!(reply.engaged);
    assert_eq!(reply.popup.as_deref(), Some("newsletter"));
}

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_section_view_counts_toward_engagement() {
    let client = session_client();

    // Visiting a tracked section root engages on its own.
    let resp = client
        .get(format!("{}/stories", base_url()))
        .send()
        .await
        .expect("Failed to visit section");
    assert!(resp.status().is_success());

    let reply = report(&client, 0, 0, 0).await;
    assert!(reply.engaged, "A section view should engage by itself");
}

#[tokio::test]
#[ignore = "Requires a running site server"]
async fn test_dismissal_walks_from_newsletter_to_ebook_to_quiet() {
    let client = session_client();
    let base = base_url();

    let first = report(&client, 60, 90, 5).await;
    assert_eq!(first.popup.as_deref(), Some("newsletter"));

    let resp = client
        .post(format!("{base}/popups/dismiss"))
        .form(&[("popup", "newsletter")])
        .send()
        .await
        .expect("Failed to dismiss newsletter popup");
    assert!(resp.status().is_success());

    // The ebook offer waits its turn rather than stacking.
    let second = report(&client, 60, 90, 0).await;
    assert_eq!(second.popup.as_deref(), Some("ebook"));

    let resp = client
        .post(format!("{base}/popups/dismiss"))
        .form(&[("popup", "ebook")])
        .send()
        .await
        .expect("Failed to dismiss ebook popup");
    assert!(resp.status().is_success());

    let third = report(&client, 60, 90, 0).await;
    assert!(third.engaged);
    assert_eq!(third.popup, None, "Both popups dismissed; session stays quiet");
}
