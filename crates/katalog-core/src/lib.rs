//! # katalog-core
//!
//! Content sync and normalization layer for the Sharediskon promo-catalog
//! site. The backend is a headless CMS reachable only over its HTTP resource
//! API; this crate fetches its paginated collections, retries transient
//! failures with exponential backoff, follows pagination cursors to
//! exhaustion, and normalizes the loosely-typed resource graph into the small
//! set of strict entities the rendering layer consumes.
//!
//! ## Architecture
//!
//! Leaf first:
//!
//! - [`retry`] — the one backoff executor every transport call runs under
//! - [`paginate`] — cursor-following page collection with cycle detection
//! - [`client`] — the [`Transport`] seam and its reqwest implementation
//! - [`raw`] / [`entity`] — loose wire shapes vs. strict renderable entities
//! - [`normalize`] — per-record mapping, rejecting what cannot be rendered
//! - [`catalog`] — listing/detail/logo/slide/site/menu operations
//! - [`routes`] — exhaustive static detail-route enumeration
//!
//! ## Failure philosophy
//!
//! Two different things go wrong here and they are kept apart. Transport
//! failures are [`Error`]s, retried and then surfaced; each public operation
//! defines how it degrades (empty list, `None`, empty route set) so no fault
//! ever reaches the rendering layer uncaught. Data-quality problems in a
//! single record are not errors at all: normalization rejects the record as
//! `None`, logs its id, and the batch continues.
//!
//! ## Example
//!
//! ```rust,no_run
//! use katalog_core::{CatalogService, Config, HttpTransport, Result};
//!
//! # async fn run() -> Result<()> {
//! let config = Config::load()?;
//! let transport = HttpTransport::new(&config.backend)?;
//! let service = CatalogService::new(transport, config.backend.clone(), config.retry.policy());
//!
//! let cards = service.list_by_category("cat1").await;
//! println!("{} promotions", cards.len());
//! # Ok(())
//! # }
//! ```

/// Catalog collection service and resource type names
pub mod catalog;
/// Backend transport trait and reqwest implementation
pub mod client;
/// Backend connection and retry configuration
pub mod config;
/// Strict renderable entities
pub mod entity;
/// Error types and result alias
pub mod error;
/// Raw record to entity normalization
pub mod normalize;
/// Cursor-following pagination
pub mod paginate;
/// Loosely-typed wire shapes
pub mod raw;
/// Shared retry executor with exponential backoff
pub mod retry;
/// Static detail-route enumeration
pub mod routes;

// Re-export commonly used types
pub use catalog::CatalogService;
pub use client::{HttpTransport, Query, Transport};
pub use config::{BackendConfig, BasicAuth, Config, RetrySettings};
pub use entity::{
    CatalogEntity, ImageUrls, ImageVariant, LogoEntity, MenuItem, SiteMetadata, SlideEntity,
};
pub use error::{Error, Result};
pub use normalize::NormalizeMode;
pub use retry::RetryPolicy;
pub use routes::{RoutePath, StaticPathEnumerator};
