//! Renderable entities produced by normalization.
//!
//! These are the strict counterparts of the loose shapes in [`crate::raw`]:
//! every entity handed to a caller satisfies the invariants the rendering
//! layer relies on (at least one image with an original URL, a non-empty
//! path, a category name). Entities are built fresh per fetch, never mutated
//! afterwards, and never cached by this layer.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One promotional catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntity {
    /// Opaque stable identifier from the backend.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Ordered, non-empty image set.
    pub images: Vec<ImageVariant>,
    /// Display name of the store category.
    pub category: String,
    /// Promotion start, backend-native date string, verbatim.
    pub start_date: String,
    /// Promotion end, backend-native date string, verbatim. Drives lifecycle
    /// display but is never validated against `start_date`.
    pub end_date: String,
    /// Canonical route, unique across the full collection.
    pub path: String,
    /// Rendered HTML body, present only on detail fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl CatalogEntity {
    /// Whether the promotion has ended as of `now`.
    ///
    /// An unparseable or missing `end_date` reads as still active; date
    /// hygiene is the backend's problem, display must not crash over it.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        parse_backend_date(&self.end_date).is_some_and(|end| end < now)
    }

    /// Time remaining until the promotion ends, `None` once expired or when
    /// the end date cannot be parsed.
    #[must_use]
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        let end = parse_backend_date(&self.end_date)?;
        (end >= now).then(|| end - now)
    }
}

/// Parses the backend's date strings: RFC 3339 timestamps or bare dates.
/// Bare dates resolve to midnight UTC, matching how the site's JS rendered
/// them.
fn parse_backend_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

/// One image attached to a catalog entity, with a URL per size class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// Alt text; falls back to the entity title when the editor left it blank.
    pub alt_text: String,
    /// Absolute URL per size class.
    pub urls: ImageUrls,
}

/// Absolute URLs per size class. `original` is the only URL guaranteed to
/// exist upstream; the others are filled with it when the backend did not
/// precompute the style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    /// Small listing thumbnail.
    pub thumbnail: String,
    /// Medium card image.
    pub medium: String,
    /// Large detail image.
    pub large: String,
    /// Wide banner crop.
    pub wide: String,
    /// The unscaled source image.
    pub original: String,
}

/// A store-category logo card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoEntity {
    /// Record identifier.
    pub id: String,
    /// Absolute logo image URL.
    pub image_url: String,
    /// Alt text, falling back to the record title.
    pub alt_text: String,
    /// The category name this logo was fetched under.
    pub category: String,
}

/// Sentinel link target meaning "this slide links nowhere".
pub const NO_LINK: &str = "#";

/// A promotional banner slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideEntity {
    /// Record identifier.
    pub id: String,
    /// Absolute banner image URL.
    pub image_url: String,
    /// Alt text for the banner image.
    pub alt_text: String,
    /// Display title.
    pub title: String,
    /// Absolute or relative URL; [`NO_LINK`] when the slide has no target.
    pub link_target: String,
}

/// Site-wide metadata singleton. When the backend holds several records the
/// first is authoritative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteMetadata {
    /// Site title.
    pub title: String,
    /// Meta description.
    pub description: String,
    /// Meta keywords.
    pub keywords: String,
}

/// One entry of the main navigation menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Menu link identifier.
    pub id: String,
    /// Link label.
    pub title: String,
    /// Link target.
    pub url: String,
}
