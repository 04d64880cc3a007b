//! HTTP transport for the backend's JSON resource API.
//!
//! [`Transport`] is the seam between the sync layer and the wire: services
//! depend on the trait, production code uses [`HttpTransport`] (reqwest with
//! a static basic-auth credential, as the site's original fetcher did), and
//! tests substitute a scripted fake or a mock server.
//!
//! The transport is read-only after construction and safe to share across
//! concurrent calls; it holds no mutable state beyond reqwest's own pool.

use crate::config::BackendConfig;
use crate::raw::{CollectionDocument, RawMenuItem, RawRecord, ResourceDocument};
use crate::{Error, Result};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Query parameters for a resource request.
///
/// Thin ordered builder over the backend's bracketed parameter dialect
/// (`filter[...]`, `page[limit]`, `fields[...]`).
#[derive(Debug, Clone, Default)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    /// Empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Comma-separated relation include list.
    #[must_use]
    pub fn include(mut self, relations: &str) -> Self {
        self.params.push(("include".to_string(), relations.to_string()));
        self
    }

    /// Sort directive, e.g. `-created` for newest first.
    #[must_use]
    pub fn sort(mut self, directive: &str) -> Self {
        self.params.push(("sort".to_string(), directive.to_string()));
        self
    }

    /// Page-size limit.
    #[must_use]
    pub fn page_limit(mut self, limit: u32) -> Self {
        self.params
            .push(("page[limit]".to_string(), limit.to_string()));
        self
    }

    /// Equality filter on an attribute or nested relation attribute.
    #[must_use]
    pub fn filter(mut self, field: &str, value: &str) -> Self {
        self.params
            .push((format!("filter[{field}]"), value.to_string()));
        self
    }

    /// Sparse fieldset for one resource type.
    #[must_use]
    pub fn fields(mut self, resource_type: &str, fields: &str) -> Self {
        self.params
            .push((format!("fields[{resource_type}]"), fields.to_string()));
        self
    }

    /// Accumulated parameter pairs, in insertion order.
    #[must_use]
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }
}

/// Backend transport operations needed by the sync layer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetches the first page of a resource collection.
    async fn fetch_collection(
        &self,
        resource_type: &str,
        query: &Query,
    ) -> Result<CollectionDocument>;

    /// Fetches a subsequent collection page by its cursor URL.
    async fn fetch_collection_url(&self, url: &str) -> Result<CollectionDocument>;

    /// Resolves a path alias to its record via the backend's path lookup.
    async fn fetch_by_path(&self, path: &str, query: &Query) -> Result<RawRecord>;

    /// Fetches the raw items of a named menu.
    async fn fetch_menu(&self, menu: &str) -> Result<Vec<RawMenuItem>>;
}

/// Answer of the backend's path-translation endpoint.
#[derive(Debug, Deserialize)]
struct TranslatedPath {
    jsonapi: TranslatedPathLinks,
}

#[derive(Debug, Deserialize)]
struct TranslatedPathLinks {
    /// Canonical URL of the individual resource behind the alias.
    individual: String,
}

/// Production [`Transport`] over reqwest.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport from the backend configuration.
    ///
    /// The basic-auth header, when credentials are configured, is attached to
    /// every request the client makes.
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if let Some(auth) = &config.auth {
            let token = STANDARD.encode(format!("{}:{}", auth.username, auth.password));
            let mut value = HeaderValue::from_str(&format!("Basic {token}"))
                .map_err(|e| Error::Config(format!("auth credentials: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("sharediskon-katalog/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .default_headers(headers)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Maps a resource type name (`node--katalog_promosi`) onto its
    /// collection endpoint (`/jsonapi/node/katalog_promosi`).
    fn collection_endpoint(&self, resource_type: &str) -> String {
        match resource_type.split_once("--") {
            Some((entity, bundle)) => format!("{}/jsonapi/{entity}/{bundle}", self.base_url),
            None => format!("{}/jsonapi/{resource_type}", self.base_url),
        }
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let mut request = self.client.get(url);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                url: response.url().to_string(),
            });
        }
        let body = response.text().await?;
        debug!(url, bytes = body.len(), "fetched document");
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_collection(
        &self,
        resource_type: &str,
        query: &Query,
    ) -> Result<CollectionDocument> {
        let url = self.collection_endpoint(resource_type);
        self.get_json(&url, query.params()).await
    }

    async fn fetch_collection_url(&self, url: &str) -> Result<CollectionDocument> {
        // Cursor URLs from the backend are already fully formed.
        self.get_json(url, &[]).await
    }

    async fn fetch_by_path(&self, path: &str, query: &Query) -> Result<RawRecord> {
        let alias = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };
        let translate_url = format!("{}/router/translate-path", self.base_url);
        let translated: TranslatedPath = self
            .get_json(
                &translate_url,
                &[("path".to_string(), alias), ("_format".to_string(), "json".to_string())],
            )
            .await?;

        let document: ResourceDocument = self
            .get_json(&translated.jsonapi.individual, query.params())
            .await?;
        Ok(document.data)
    }

    async fn fetch_menu(&self, menu: &str) -> Result<Vec<RawMenuItem>> {
        let url = format!("{}/jsonapi/menu_items/{menu}", self.base_url);
        let document: crate::raw::MenuDocument = self.get_json(&url, &[]).await?;
        Ok(document.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_preserves_order_and_brackets() {
        let query = Query::new()
            .include("field_gambar_katalog,field_kategori_toko")
            .sort("-created")
            .filter("status", "1")
            .page_limit(100)
            .fields("node--katalog_promosi", "path");

        let params = query.params();
        assert_eq!(params[0].0, "include");
        assert_eq!(params[1], ("sort".to_string(), "-created".to_string()));
        assert_eq!(params[2], ("filter[status]".to_string(), "1".to_string()));
        assert_eq!(params[3], ("page[limit]".to_string(), "100".to_string()));
        assert_eq!(
            params[4],
            (
                "fields[node--katalog_promosi]".to_string(),
                "path".to_string()
            )
        );
    }

    #[test]
    fn collection_endpoint_splits_type_and_bundle() {
        let transport = HttpTransport::new(&BackendConfig {
            base_url: "https://cms.example/".to_string(),
            ..BackendConfig::default()
        })
        .unwrap();
        assert_eq!(
            transport.collection_endpoint("node--katalog_promosi"),
            "https://cms.example/jsonapi/node/katalog_promosi"
        );
        assert_eq!(
            transport.collection_endpoint("menu_items"),
            "https://cms.example/jsonapi/menu_items"
        );
    }
}
