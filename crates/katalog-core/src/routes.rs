//! Static detail-route enumeration over the full published collection.
//!
//! Route generation needs completeness, not speed: a page missed here is a
//! live content item with no statically generated route. The enumerator
//! therefore walks every collection page through [`crate::paginate`], not a
//! single bounded fetch.
//!
//! On unrecoverable transport failure the enumerator returns an *empty* route
//! set and logs at error level, rather than a silently partial one. A
//! stale-but-serving site was judged preferable to a failed deploy; routes
//! missing from the static set are covered by the router's on-demand
//! fallback ([`ALLOW_ON_DEMAND_FALLBACK`]).

use crate::catalog::CATALOG_RESOURCE;
use crate::client::{Query, Transport};
use crate::config::BackendConfig;
use crate::paginate::{self, Page};
use crate::retry::RetryPolicy;
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, error, warn};

/// Routing collaborators should generate pages on demand for paths missing
/// from the enumerated set.
pub const ALLOW_ON_DEMAND_FALLBACK: bool = true;

/// One addressable detail route, as the segment sequence the router consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutePath {
    /// Path segments, in order, without separators.
    pub segments: Vec<String>,
}

impl RoutePath {
    /// Splits a canonical alias into segments after stripping the leading
    /// separator.
    #[must_use]
    pub fn from_alias(alias: &str) -> Self {
        Self {
            segments: alias
                .trim_start_matches('/')
                .split('/')
                .map(str::to_string)
                .collect(),
        }
    }

    /// The route as a single path string with a leading separator.
    #[must_use]
    pub fn as_route(&self) -> String {
        format!("/{}", self.segments.join("/"))
    }
}

/// Enumerates every addressable detail path ahead of traffic.
pub struct StaticPathEnumerator<T: Transport> {
    transport: T,
    config: BackendConfig,
    retry: RetryPolicy,
}

impl<T: Transport> StaticPathEnumerator<T> {
    /// Creates an enumerator over the given transport and configuration.
    pub fn new(transport: T, config: BackendConfig, retry: RetryPolicy) -> Self {
        Self {
            transport,
            config,
            retry,
        }
    }

    /// Collects the full set of detail routes across all collection pages.
    ///
    /// Records without a path alias are skipped. Duplicate aliases (a backend
    /// data error) keep their first occurrence so no route is generated
    /// twice; order is otherwise the backend's.
    pub async fn enumerate_all(&self) -> Vec<RoutePath> {
        let query = Query::new()
            .fields(CATALOG_RESOURCE, "path")
            .filter("status", "1")
            .page_limit(self.config.page_limit);

        let collected = paginate::collect_all(self.retry, |cursor| {
            let query = &query;
            async move {
                let document = match cursor {
                    None => {
                        self.transport
                            .fetch_collection(CATALOG_RESOURCE, query)
                            .await?
                    },
                    Some(href) => self.transport.fetch_collection_url(&href).await?,
                };
                Ok(Page {
                    next_cursor: document.next_href().map(str::to_string),
                    items: document.data,
                })
            }
        })
        .await;

        let records = match collected {
            Ok(records) => records,
            Err(err) => {
                // Deliberately empty, not partial: see module docs.
                error!(error = %err, "route enumeration failed, emitting no static routes");
                return Vec::new();
            },
        };

        let mut seen: HashSet<String> = HashSet::new();
        let mut routes = Vec::new();
        for record in &records {
            let Some(alias) = record
                .path
                .as_ref()
                .and_then(|p| p.alias.as_deref())
                .filter(|alias| !alias.is_empty())
            else {
                debug!(record = %record.id, "skipping record without path alias");
                continue;
            };
            if !seen.insert(alias.to_string()) {
                warn!(record = %record.id, alias, "duplicate path alias, keeping first occurrence");
                continue;
            }
            routes.push(RoutePath::from_alias(alias));
        }

        debug!(
            records = records.len(),
            routes = routes.len(),
            "static route enumeration complete"
        );
        routes
    }
}
