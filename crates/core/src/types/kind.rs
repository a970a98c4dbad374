//! Shop and subscription enums.

use serde::{Deserialize, Serialize};

/// How a shop product is fulfilled.
///
/// Affiliate products link out to an external seller, digital products are
/// downloads, physical products ship. The kind decides which cart controls a
/// line item gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductKind {
    Affiliate,
    Digital,
    Physical,
}

impl ProductKind {
    /// Human-readable badge label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Affiliate => "Affiliate",
            Self::Digital => "Digital",
            Self::Physical => "Physical",
        }
    }
}

impl std::fmt::Display for ProductKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Affiliate => write!(f, "affiliate"),
            Self::Digital => write!(f, "digital"),
            Self::Physical => write!(f, "physical"),
        }
    }
}

impl std::str::FromStr for ProductKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "affiliate" => Ok(Self::Affiliate),
            "digital" => Ok(Self::Digital),
            "physical" => Ok(Self::Physical),
            _ => Err(format!("invalid product kind: {s}")),
        }
    }
}

/// Where a subscription was collected.
///
/// Serialized as the raw source string so the subscriber file and CSV export
/// keep the original wire form; unrecognized sources round-trip through
/// `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SubscriptionSource {
    NewsletterForm,
    NewsletterPopup,
    EbookDownload,
    Footer,
    Other(String),
}

impl SubscriptionSource {
    /// The wire form stored in the subscriber file and CSV export.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::NewsletterForm => "newsletter-form",
            Self::NewsletterPopup => "newsletter-popup",
            Self::EbookDownload => "ebook-download",
            Self::Footer => "footer",
            Self::Other(s) => s,
        }
    }
}

impl std::fmt::Display for SubscriptionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<String> for SubscriptionSource {
    fn from(s: String) -> Self {
        match s.as_str() {
            "newsletter-form" => Self::NewsletterForm,
            "newsletter-popup" => Self::NewsletterPopup,
            "ebook-download" => Self::EbookDownload,
            "footer" => Self::Footer,
            _ => Self::Other(s),
        }
    }
}

impl From<SubscriptionSource> for String {
    fn from(source: SubscriptionSource) -> Self {
        source.as_str().to_owned()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_product_kind_wire_form() {
        let json = serde_json::to_string(&ProductKind::Affiliate).unwrap();
        assert_eq!(json, "\"affiliate\"");

        let parsed: ProductKind = serde_json::from_str("\"digital\"").unwrap();
        assert_eq!(parsed, ProductKind::Digital);
    }

    #[test]
    fn test_product_kind_from_str() {
        assert_eq!(
            ProductKind::from_str("physical").unwrap(),
            ProductKind::Physical
        );
        assert!(ProductKind::from_str("rental").is_err());
    }

    #[test]
    fn test_product_kind_label() {
        assert_eq!(ProductKind::Digital.label(), "Digital");
    }

    #[test]
    fn test_subscription_source_known_values() {
        let source = SubscriptionSource::from("newsletter-popup".to_owned());
        assert_eq!(source, SubscriptionSource::NewsletterPopup);
        assert_eq!(source.as_str(), "newsletter-popup");
    }

    #[test]
    fn test_subscription_source_other_roundtrip() {
        let source = SubscriptionSource::from("sidebar-widget".to_owned());
        assert_eq!(source, SubscriptionSource::Other("sidebar-widget".into()));

        let json = serde_json::to_string(&source).unwrap();
        assert_eq!(json, "\"sidebar-widget\"");

        let back: SubscriptionSource = serde_json::from_str(&json).unwrap();
        assert_eq!(back, source);
    }
}
