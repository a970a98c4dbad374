//! Visitor engagement metrics.
//!
//! A small per-session record fed by a client beacon and by section page
//! views. Promotional popups are gated on it so drive-by visitors never see
//! a modal.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session::keys;

/// Seconds on site before a visitor counts as engaged.
pub const TIME_THRESHOLD_SECS: u64 = 30;

/// Scroll depth before a visitor counts as engaged.
pub const SCROLL_THRESHOLD_PERCENT: u8 = 50;

/// Interactions before a visitor counts as engaged.
pub const INTERACTION_THRESHOLD: u32 = 3;

/// View counts for the tracked content sections.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionViews {
    pub stories: u32,
    pub affiliate: u32,
    pub recommendations: u32,
    pub resources: u32,
}

impl SectionViews {
    /// Views across all sections.
    #[must_use]
    pub const fn total(&self) -> u32 {
        self.stories + self.affiliate + self.recommendations + self.resources
    }

    /// Whether any section has been viewed.
    #[must_use]
    pub const fn any(&self) -> bool {
        self.total() > 0
    }
}

/// Engagement state for one session.
///
/// Every field defaults to zero, so records written by older builds load
/// without error.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementMetrics {
    /// Seconds spent on the site, peak reported value.
    pub time_on_page: u64,
    /// Deepest scroll position reached, 0 to 100.
    pub scroll_percentage: u8,
    /// Clicks and key presses, accumulated across pages.
    pub interaction_count: u32,
    /// Per-section view counts.
    pub section_views: SectionViews,
}

impl EngagementMetrics {
    /// Fold one beacon report into the session record.
    ///
    /// Time and scroll arrive as page-level absolutes, so repeated beacons
    /// from the same page never double-count; interactions arrive as a
    /// delta since the last beacon and accumulate.
    pub fn absorb(&mut self, beacon: EngagementBeacon) {
        self.time_on_page = self.time_on_page.max(beacon.time_on_page);
        self.scroll_percentage = self.scroll_percentage.max(beacon.scroll_percentage.min(100));
        self.interaction_count = self.interaction_count.saturating_add(beacon.interactions);
    }

    /// Count a view of a tracked section.
    pub const fn record_section_view(&mut self, section: SectionKind) {
        match section {
            SectionKind::Stories => self.section_views.stories += 1,
            SectionKind::Affiliate => self.section_views.affiliate += 1,
            SectionKind::Recommendations => self.section_views.recommendations += 1,
            SectionKind::Resources => self.section_views.resources += 1,
        }
    }

    /// Whether this visitor has shown enough interest for a popup.
    #[must_use]
    pub const fn is_engaged(&self) -> bool {
        self.time_on_page >= TIME_THRESHOLD_SECS
            || self.scroll_percentage >= SCROLL_THRESHOLD_PERCENT
            || self.interaction_count >= INTERACTION_THRESHOLD
            || self.section_views.any()
    }
}

/// One report from the client-side beacon.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct EngagementBeacon {
    /// Seconds on the current page.
    pub time_on_page: u64,
    /// Deepest scroll position on the current page, 0 to 100.
    pub scroll_percentage: u8,
    /// Interactions since the last report.
    pub interactions: u32,
}

/// The content sections with view tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Stories,
    Affiliate,
    Recommendations,
    Resources,
}

impl SectionKind {
    /// Match a request path against the tracked sections.
    ///
    /// Only a bare section root counts as a section view; subpages such as
    /// `/stories/morning-routine` do not.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        path.trim_matches('/').parse().ok()
    }
}

impl std::str::FromStr for SectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "stories" => Ok(Self::Stories),
            "affiliate" => Ok(Self::Affiliate),
            "recommendations" => Ok(Self::Recommendations),
            "resources" => Ok(Self::Resources),
            _ => Err(format!("not a tracked section: {s}")),
        }
    }
}

/// Which promotional popup, if any, the next page should carry.
///
/// At most one is set; the newsletter popup goes first and the ebook offer
/// waits for a later page view so the two never stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopupFlags {
    pub newsletter: bool,
    pub ebook: bool,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Read the engagement record from the session.
///
/// Missing or unreadable state starts a fresh record rather than failing
/// the request.
pub async fn load(session: &Session) -> EngagementMetrics {
    match session.get(keys::ENGAGEMENT).await {
        Ok(Some(metrics)) => metrics,
        Ok(None) => EngagementMetrics::default(),
        Err(e) => {
            tracing::debug!("Discarding unreadable engagement state: {e}");
            EngagementMetrics::default()
        }
    }
}

/// Write the engagement record back to the session.
pub async fn save(
    session: &Session,
    metrics: EngagementMetrics,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::ENGAGEMENT, metrics).await
}

/// Decide which popup the current page should carry.
pub async fn popup_flags(session: &Session) -> PopupFlags {
    let metrics = load(session).await;
    if !metrics.is_engaged() {
        return PopupFlags::default();
    }

    let newsletter_shown = flag(session, keys::NEWSLETTER_POPUP_SHOWN).await;
    let ebook_shown = flag(session, keys::EBOOK_POPUP_SHOWN).await;

    let newsletter = !newsletter_shown;
    PopupFlags {
        newsletter,
        ebook: !ebook_shown && !newsletter,
    }
}

async fn flag(session: &Session, key: &str) -> bool {
    session.get(key).await.ok().flatten().unwrap_or(false)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session_is_not_engaged() {
        assert!(!EngagementMetrics::default().is_engaged());
    }

    #[test]
    fn test_each_threshold_engages() {
        let time = EngagementMetrics {
            time_on_page: TIME_THRESHOLD_SECS,
            ..Default::default()
        };
        assert!(time.is_engaged());

        let scroll = EngagementMetrics {
            scroll_percentage: SCROLL_THRESHOLD_PERCENT,
            ..Default::default()
        };
        assert!(scroll.is_engaged());

        let clicks = EngagementMetrics {
            interaction_count: INTERACTION_THRESHOLD,
            ..Default::default()
        };
        assert!(clicks.is_engaged());

        let mut sections = EngagementMetrics::default();
        sections.record_section_view(SectionKind::Resources);
        assert!(sections.is_engaged());
    }

    #[test]
    fn test_below_every_threshold_is_not_engaged() {
        let metrics = EngagementMetrics {
            time_on_page: TIME_THRESHOLD_SECS - 1,
            scroll_percentage: SCROLL_THRESHOLD_PERCENT - 1,
            interaction_count: INTERACTION_THRESHOLD - 1,
            section_views: SectionViews::default(),
        };
        assert!(!metrics.is_engaged());
    }

    #[test]
    fn test_absorb_keeps_peaks_and_accumulates_interactions() {
        let mut metrics = EngagementMetrics::default();
        metrics.absorb(EngagementBeacon {
            time_on_page: 10,
            scroll_percentage: 40,
            interactions: 2,
        });
        metrics.absorb(EngagementBeacon {
            time_on_page: 5,
            scroll_percentage: 25,
            interactions: 1,
        });

        assert_eq!(metrics.time_on_page, 10);
        assert_eq!(metrics.scroll_percentage, 40);
        assert_eq!(metrics.interaction_count, 3);
    }

    #[test]
    fn test_absorb_clamps_scroll_to_100() {
        let mut metrics = EngagementMetrics::default();
        metrics.absorb(EngagementBeacon {
            scroll_percentage: 250,
            ..Default::default()
        });
        assert_eq!(metrics.scroll_percentage, 100);
    }

    #[test]
    fn test_section_view_increments_one_counter() {
        let mut metrics = EngagementMetrics::default();
        metrics.record_section_view(SectionKind::Affiliate);
        metrics.record_section_view(SectionKind::Affiliate);
        metrics.record_section_view(SectionKind::Stories);

        assert_eq!(metrics.section_views.affiliate, 2);
        assert_eq!(metrics.section_views.stories, 1);
        assert_eq!(metrics.section_views.total(), 3);
    }

    #[test]
    fn test_section_from_path_requires_bare_root() {
        assert_eq!(SectionKind::from_path("/stories"), Some(SectionKind::Stories));
        assert_eq!(
            SectionKind::from_path("/recommendations/"),
            Some(SectionKind::Recommendations)
        );
        assert_eq!(SectionKind::from_path("/stories/morning-routine"), None);
        assert_eq!(SectionKind::from_path("/blog"), None);
    }

    #[test]
    fn test_section_names_are_exact() {
        assert!("Stories".parse::<SectionKind>().is_err());
        assert!("affiliates".parse::<SectionKind>().is_err());
        assert_eq!(
            "affiliate".parse::<SectionKind>().unwrap(),
            SectionKind::Affiliate
        );
    }

    #[test]
    fn test_metrics_tolerate_missing_fields() {
        let metrics: EngagementMetrics =
            serde_json::from_str(r#"{"time_on_page": 42}"#).unwrap();
        assert_eq!(metrics.time_on_page, 42);
        assert_eq!(metrics.scroll_percentage, 0);
        assert_eq!(metrics.section_views.total(), 0);
    }
}
