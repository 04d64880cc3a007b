//! Catalog collection service: the operations the rendering layer calls.
//!
//! Every operation degrades instead of crashing the page: listings and other
//! collection fetches come back empty on transport failure, detail lookups
//! come back `None`. Failures and per-record rejections are logged with
//! enough context to diagnose; nothing propagates as an uncaught fault.

use crate::client::{Query, Transport};
use crate::config::BackendConfig;
use crate::entity::{CatalogEntity, LogoEntity, MenuItem, SiteMetadata, SlideEntity};
use crate::normalize::{self, NormalizeMode};
use crate::retry::{self, RetryPolicy};
use tracing::{debug, warn};

/// Resource type of promotional catalog records.
pub const CATALOG_RESOURCE: &str = "node--katalog_promosi";
/// Resource type of landing-page records carrying store logos.
pub const LOGO_RESOURCE: &str = "node--landing_page";
/// Resource type of slideshow banner records.
pub const SLIDESHOW_RESOURCE: &str = "node--slideshow";
/// Resource type of the site-info singleton.
pub const SITE_INFO_RESOURCE: &str = "node--site_info";

/// Relations embedded with catalog fetches.
const CATALOG_INCLUDES: &str = "field_gambar_katalog,field_kategori_toko";
/// Logos shown per category page.
const LOGO_PAGE_LIMIT: u32 = 6;

/// High-level access to normalized catalog content.
///
/// Holds the injected transport, the read-only backend configuration, and the
/// retry policy every transport call runs under. Cheap to share across
/// concurrent independent calls; nothing here mutates after construction and
/// no results are cached.
pub struct CatalogService<T: Transport> {
    transport: T,
    config: BackendConfig,
    retry: RetryPolicy,
}

impl<T: Transport> CatalogService<T> {
    /// Creates a service over the given transport and configuration.
    pub fn new(transport: T, config: BackendConfig, retry: RetryPolicy) -> Self {
        Self {
            transport,
            config,
            retry,
        }
    }

    /// Summary cards for one store category, newest first.
    ///
    /// Records are filtered to those whose category term set contains
    /// `category_id` and which carry a path alias, then normalized in listing
    /// mode. Transport failure degrades to an empty list: a broken backend
    /// shows "no promotions", never a crashed page.
    pub async fn list_by_category(&self, category_id: &str) -> Vec<CatalogEntity> {
        let query = Query::new().include(CATALOG_INCLUDES).sort("-created");
        let document = retry::execute(self.retry, || {
            self.transport.fetch_collection(CATALOG_RESOURCE, &query)
        })
        .await;

        let document = match document {
            Ok(document) => document,
            Err(err) => {
                warn!(category = category_id, error = %err, "catalog listing fetch failed, returning empty");
                return Vec::new();
            },
        };

        let media_base = self.config.media_base();
        let entities: Vec<CatalogEntity> = document
            .data
            .iter()
            .filter(|record| {
                record
                    .store_categories
                    .as_deref()
                    .unwrap_or(&[])
                    .iter()
                    .any(|term| term.id == category_id)
                    && record
                        .path
                        .as_ref()
                        .and_then(|p| p.alias.as_deref())
                        .is_some_and(|alias| !alias.is_empty())
            })
            .filter_map(|record| {
                normalize::normalize_catalog(record, NormalizeMode::Listing, media_base)
            })
            .collect();

        debug!(
            category = category_id,
            fetched = document.data.len(),
            kept = entities.len(),
            "catalog listing normalized"
        );
        entities
    }

    /// Detail entity behind one canonical path, body included.
    ///
    /// A leading separator on `path` is tolerated and stripped. Any fetch
    /// failure or normalization rejection yields `None`, logged with the
    /// reason; callers translate that into a "not found" response.
    pub async fn get_by_path(&self, path: &str) -> Option<CatalogEntity> {
        let clean = path.strip_prefix('/').unwrap_or(path);
        let query = Query::new().include(CATALOG_INCLUDES);
        let record = retry::execute(self.retry, || self.transport.fetch_by_path(clean, &query)).await;

        match record {
            Ok(record) => {
                normalize::normalize_catalog(&record, NormalizeMode::Detail, self.config.media_base())
            },
            Err(err) => {
                warn!(path, error = %err, "catalog detail fetch failed");
                None
            },
        }
    }

    /// Store-logo cards for a category name, at most [`LOGO_PAGE_LIMIT`].
    /// Degrades to empty on transport failure.
    pub async fn logo_cards(&self, category_name: &str) -> Vec<LogoEntity> {
        let query = Query::new()
            .include("field_logo_card")
            .filter("field_kategori.name", category_name)
            .page_limit(LOGO_PAGE_LIMIT);
        let document = retry::execute(self.retry, || {
            self.transport.fetch_collection(LOGO_RESOURCE, &query)
        })
        .await;

        match document {
            Ok(document) => {
                if document.data.is_empty() {
                    debug!(category = category_name, "no logo cards found");
                }
                let media_base = self.config.media_base();
                document
                    .data
                    .iter()
                    .filter_map(|record| {
                        normalize::normalize_logo(record, category_name, media_base)
                    })
                    .collect()
            },
            Err(err) => {
                warn!(category = category_name, error = %err, "logo card fetch failed, returning empty");
                Vec::new()
            },
        }
    }

    /// Promotional banner slides, newest first. Degrades to empty on failure.
    pub async fn slides(&self) -> Vec<SlideEntity> {
        let query = Query::new().include("field_slideshow").sort("-created");
        let document = retry::execute(self.retry, || {
            self.transport.fetch_collection(SLIDESHOW_RESOURCE, &query)
        })
        .await;

        match document {
            Ok(document) => {
                let media_base = self.config.media_base();
                document
                    .data
                    .iter()
                    .filter_map(|record| normalize::normalize_slide(record, media_base))
                    .collect()
            },
            Err(err) => {
                warn!(error = %err, "slideshow fetch failed, returning empty");
                Vec::new()
            },
        }
    }

    /// The site-metadata singleton. If the backend holds several published
    /// records the first is authoritative; `None` only on fetch failure or a
    /// truly empty collection.
    pub async fn site_metadata(&self) -> Option<SiteMetadata> {
        let query = Query::new().filter("status", "1").page_limit(1);
        let document = retry::execute(self.retry, || {
            self.transport.fetch_collection(SITE_INFO_RESOURCE, &query)
        })
        .await;

        match document {
            Ok(document) => {
                let Some(record) = document.data.first() else {
                    warn!("no site-info record published");
                    return None;
                };
                Some(normalize::normalize_site_metadata(record))
            },
            Err(err) => {
                warn!(error = %err, "site-info fetch failed");
                None
            },
        }
    }

    /// Items of the main navigation menu, enabled only, ordered by weight.
    /// Degrades to empty on failure.
    pub async fn main_menu(&self) -> Vec<MenuItem> {
        let items = retry::execute(self.retry, || self.transport.fetch_menu("main")).await;
        match items {
            Ok(items) => normalize::normalize_menu(items),
            Err(err) => {
                warn!(error = %err, "menu fetch failed, returning empty");
                Vec::new()
            },
        }
    }
}
