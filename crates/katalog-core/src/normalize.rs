//! Normalization of raw backend records into renderable entities.
//!
//! One bad record must never abort a batch: every data-quality problem here
//! resolves to `None` (logged with the record id) and the caller filters it
//! out. Errors are reserved for transport and decode failures upstream.
//!
//! Category resolution deliberately differs per mode. Listing rejects a
//! record whose category cannot be matched, because category filtering is the
//! selection mechanism there; detail falls back to [`DEFAULT_CATEGORY`]. The
//! asymmetry mirrors the production behavior and awaits product confirmation
//! before being unified either way.

use crate::entity::{
    CatalogEntity, ImageUrls, ImageVariant, LogoEntity, MenuItem, SiteMetadata, SlideEntity,
    NO_LINK,
};
use crate::raw::{RawImage, RawMenuItem, RawRecord};
use tracing::warn;

/// Category display name used when a detail record has no matchable term.
pub const DEFAULT_CATEGORY: &str = "Minimarket";

/// Site title used when the site-info record does not carry one.
pub const DEFAULT_SITE_TITLE: &str = "Sharediskon";
/// Meta description fallback.
pub const DEFAULT_SITE_DESCRIPTION: &str = "Temukan promo dan diskon terbaru.";
/// Meta keywords fallback.
pub const DEFAULT_SITE_KEYWORDS: &str = "promo, diskon, hemat, belanja";

/// Which call site a catalog record is being normalized for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Summary cards on listing pages; body omitted, unmatched category rejects.
    Listing,
    /// Detail pages; body included, unmatched category falls back.
    Detail,
}

/// Normalizes one catalog record, or rejects it for data-quality reasons.
///
/// Rejection reasons: no image with a resolvable original URL, no matchable
/// category term (listing mode only), or a missing/empty path alias. All are
/// logged with the record id and none aborts the surrounding batch.
#[must_use]
pub fn normalize_catalog(
    record: &RawRecord,
    mode: NormalizeMode,
    media_base: &str,
) -> Option<CatalogEntity> {
    let title = record.title.clone().unwrap_or_default();

    let raw_images: Vec<&RawImage> = record
        .catalog_images
        .as_ref()
        .map(|rel| rel.as_slice().iter().collect())
        .unwrap_or_default();
    let images: Vec<ImageVariant> = raw_images
        .iter()
        .filter_map(|img| resolve_image(img, &title, media_base))
        .collect();
    if images.is_empty() {
        warn!(record = %record.id, "skipping catalog record: no image with a usable URL");
        return None;
    }

    let terms = record.store_categories.as_deref().unwrap_or(&[]);
    // The primary category is the first listed reference, matched back into
    // the term set by identifier.
    let matched = terms
        .first()
        .and_then(|primary| terms.iter().find(|term| term.id == primary.id));
    let category = match matched {
        Some(term) => term
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        None if mode == NormalizeMode::Listing => {
            warn!(record = %record.id, "skipping catalog record: no matchable category term");
            return None;
        },
        None => DEFAULT_CATEGORY.to_string(),
    };

    let Some(path) = record
        .path
        .as_ref()
        .and_then(|p| p.alias.clone())
        .filter(|alias| !alias.is_empty())
    else {
        warn!(record = %record.id, "skipping catalog record: missing path alias");
        return None;
    };

    let body = match mode {
        NormalizeMode::Listing => None,
        NormalizeMode::Detail => Some(
            record
                .body
                .as_ref()
                .and_then(|b| b.processed.clone())
                .unwrap_or_default(),
        ),
    };

    Some(CatalogEntity {
        id: record.id.clone(),
        title,
        images,
        category,
        start_date: record.start_date.clone().unwrap_or_default(),
        end_date: record.end_date.clone().unwrap_or_default(),
        path,
        body,
    })
}

/// Resolves one raw image into a variant with a URL per size class.
///
/// The backend-precomputed style URL wins per class; classes the backend did
/// not render fall back to the absolute original, built from the configured
/// media base and the relative file URI. No original URL means no variant.
fn resolve_image(img: &RawImage, fallback_alt: &str, media_base: &str) -> Option<ImageVariant> {
    let original = img
        .uri
        .as_ref()
        .and_then(|uri| uri.url.as_deref())
        .filter(|url| !url.is_empty())
        .map(|url| format!("{media_base}{url}"))?;

    let styles = img.image_style_uri.clone().unwrap_or_default();
    let alt_text = img
        .alt
        .clone()
        .filter(|alt| !alt.is_empty())
        .unwrap_or_else(|| fallback_alt.to_string());

    Some(ImageVariant {
        alt_text,
        urls: ImageUrls {
            thumbnail: styles.thumbnail.unwrap_or_else(|| original.clone()),
            medium: styles.medium.unwrap_or_else(|| original.clone()),
            large: styles.large.unwrap_or_else(|| original.clone()),
            wide: styles.wide.unwrap_or_else(|| original.clone()),
            original,
        },
    })
}

/// Normalizes a landing-page record into a logo card.
///
/// The `logo` style is preferred; otherwise the absolute original is used.
/// A record with neither is rejected.
#[must_use]
pub fn normalize_logo(
    record: &RawRecord,
    category_name: &str,
    media_base: &str,
) -> Option<LogoEntity> {
    let Some(image) = record.logo_image.as_ref() else {
        warn!(record = %record.id, "skipping logo card: no image relation");
        return None;
    };

    let styled = image
        .image_style_uri
        .as_ref()
        .and_then(|styles| styles.logo.clone())
        .filter(|url| !url.is_empty());
    let original = image
        .uri
        .as_ref()
        .and_then(|uri| uri.url.as_deref())
        .filter(|url| !url.is_empty())
        .map(|url| format!("{media_base}{url}"));

    let Some(image_url) = styled.or(original) else {
        warn!(record = %record.id, "skipping logo card: no usable image URL");
        return None;
    };

    Some(LogoEntity {
        id: record.id.clone(),
        image_url,
        alt_text: image
            .alt
            .clone()
            .filter(|alt| !alt.is_empty())
            .or_else(|| record.title.clone())
            .unwrap_or_default(),
        category: category_name.to_string(),
    })
}

/// Normalizes a slideshow record into a banner slide.
///
/// The banner image is mandatory; a missing link degrades to the [`NO_LINK`]
/// sentinel rather than rejecting the slide.
#[must_use]
pub fn normalize_slide(record: &RawRecord, media_base: &str) -> Option<SlideEntity> {
    let Some(image) = record.slide_image.as_ref() else {
        warn!(record = %record.id, "skipping slide: no image relation");
        return None;
    };
    let Some(image_url) = image
        .uri
        .as_ref()
        .and_then(|uri| uri.url.as_deref())
        .filter(|url| !url.is_empty())
        .map(|url| format!("{media_base}{url}"))
    else {
        warn!(record = %record.id, "skipping slide: no usable image URL");
        return None;
    };

    // Slideshow images carry alt text on the relation metadata.
    let alt_text = image
        .meta
        .as_ref()
        .and_then(|meta| meta.alt.clone())
        .filter(|alt| !alt.is_empty())
        .or_else(|| record.title.clone())
        .unwrap_or_default();

    Some(SlideEntity {
        id: record.id.clone(),
        image_url,
        title: alt_text.clone(),
        alt_text,
        link_target: record
            .link
            .as_ref()
            .and_then(|link| link.uri.clone())
            .filter(|uri| !uri.is_empty())
            .unwrap_or_else(|| NO_LINK.to_string()),
    })
}

/// Normalizes a site-info record, filling site defaults for absent fields.
/// Never rejects: a sparse record still yields usable metadata.
#[must_use]
pub fn normalize_site_metadata(record: &RawRecord) -> SiteMetadata {
    SiteMetadata {
        title: record
            .site_title
            .clone()
            .or_else(|| record.site_name.clone())
            .filter(|title| !title.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_TITLE.to_string()),
        description: record
            .body
            .as_ref()
            .and_then(|body| body.value.clone())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_DESCRIPTION.to_string()),
        keywords: record
            .keywords
            .clone()
            .filter(|keywords| !keywords.is_empty())
            .unwrap_or_else(|| DEFAULT_SITE_KEYWORDS.to_string()),
    }
}

/// Filters disabled menu items, orders by weight (stable), and maps to
/// [`MenuItem`].
#[must_use]
pub fn normalize_menu(items: Vec<RawMenuItem>) -> Vec<MenuItem> {
    let mut enabled: Vec<RawMenuItem> = items
        .into_iter()
        .filter(|item| item.attributes.enabled)
        .collect();
    enabled.sort_by_key(|item| item.attributes.weight);
    enabled
        .into_iter()
        .map(|item| MenuItem {
            id: item.id,
            title: item.attributes.title.unwrap_or_default(),
            url: item.attributes.url.unwrap_or_default(),
        })
        .collect()
}
