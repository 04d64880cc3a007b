#![allow(missing_docs)]

//! End-to-end tests of the sync layer against a mock backend.

use katalog_core::{
    BackendConfig, CatalogService, HttpTransport, RetryPolicy, RoutePath, StaticPathEnumerator,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MEDIA_BASE: &str = "https://cdn.example";

fn config_for(server: &MockServer) -> BackendConfig {
    BackendConfig {
        base_url: server.uri(),
        media_base_url: MEDIA_BASE.to_string(),
        ..BackendConfig::default()
    }
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        initial_delay: Duration::from_millis(1),
        max_delay: None,
    }
}

fn service(server: &MockServer, max_retries: u32) -> CatalogService<HttpTransport> {
    let config = config_for(server);
    let transport = HttpTransport::new(&config).unwrap();
    CatalogService::new(transport, config, fast_retry(max_retries))
}

fn catalog_record(id: &str, alias: &str, category_id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": format!("Promo {id}"),
        "path": {"alias": alias},
        "field_tanggal_mulai": "2025-08-01",
        "field_tanggal_berakhir": "2025-08-31",
        "field_gambar_katalog": [{"alt": "", "uri": {"url": format!("/f/{id}.jpg")}}],
        "field_kategori_toko": [{"id": category_id, "name": "Minimarket"}]
    })
}

#[tokio::test]
async fn list_by_category_keeps_only_matching_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .and(query_param("sort", "-created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                catalog_record("n1", "/promo-a", "cat1"),
                catalog_record("n2", "/promo-b", "cat2"),
            ]
        })))
        .mount(&server)
        .await;

    let cards = service(&server, 0).list_by_category("cat1").await;

    assert_eq!(cards.len(), 1);
    let card = &cards[0];
    assert_eq!(card.id, "n1");
    assert_eq!(card.title, "Promo n1");
    assert_eq!(card.path, "/promo-a");
    assert_eq!(card.category, "Minimarket");
    assert_eq!(card.images[0].urls.original, "https://cdn.example/f/n1.jpg");
    // Absent styles fall back to the original URL.
    assert_eq!(card.images[0].urls.thumbnail, "https://cdn.example/f/n1.jpg");
    // Blank alt text falls back to the record title.
    assert_eq!(card.images[0].alt_text, "Promo n1");
    assert!(card.body.is_none());
}

#[tokio::test]
async fn list_by_category_degrades_to_empty_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let cards = service(&server, 1).list_by_category("cat1").await;
    assert!(cards.is_empty());
}

#[tokio::test]
async fn listing_fetch_is_retried_through_transient_errors() {
    let server = MockServer::start().await;
    // First attempt fails, the retry succeeds.
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [catalog_record("n1", "/promo-a", "cat1")]
        })))
        .mount(&server)
        .await;

    let cards = service(&server, 2).list_by_category("cat1").await;
    assert_eq!(cards.len(), 1);
}

#[tokio::test]
async fn get_by_path_resolves_and_includes_body() {
    let server = MockServer::start().await;
    let individual = format!("{}/jsonapi/node/katalog_promosi/n1", server.uri());

    Mock::given(method("GET"))
        .and(path("/router/translate-path"))
        .and(query_param("path", "/promo-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "jsonapi": {"individual": individual}
        })))
        .mount(&server)
        .await;

    let mut record = catalog_record("n1", "/promo-a", "cat1");
    record["body"] = json!({"value": "*raw*", "processed": "<p>Detail promo</p>"});
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi/n1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": record})))
        .mount(&server)
        .await;

    let entity = service(&server, 0).get_by_path("/promo-a").await.unwrap();
    assert_eq!(entity.id, "n1");
    assert_eq!(entity.path, "/promo-a");
    assert_eq!(entity.body.as_deref(), Some("<p>Detail promo</p>"));
}

#[tokio::test]
async fn get_by_path_returns_none_when_every_attempt_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/router/translate-path"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let entity = service(&server, 2).get_by_path("/missing").await;
    assert!(entity.is_none());
}

#[tokio::test]
async fn get_by_path_returns_none_for_unknown_alias() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/router/translate-path"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let entity = service(&server, 0).get_by_path("does-not-exist").await;
    assert!(entity.is_none());
}

#[tokio::test]
async fn logo_cards_prefer_logo_style() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/landing_page"))
        .and(query_param("filter[field_kategori.name]", "Minimarket"))
        .and(query_param("page[limit]", "6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": "l1",
                    "title": "Indomaret",
                    "field_logo_card": {
                        "alt": "Indomaret",
                        "uri": {"url": "/f/indo.png"},
                        "image_style_uri": {"logo": "https://cdn.example/styles/logo/indo.png"}
                    }
                },
                {"id": "l2", "title": "No image"}
            ]
        })))
        .mount(&server)
        .await;

    let logos = service(&server, 0).logo_cards("Minimarket").await;
    assert_eq!(logos.len(), 1);
    assert_eq!(logos[0].image_url, "https://cdn.example/styles/logo/indo.png");
    assert_eq!(logos[0].category, "Minimarket");
}

#[tokio::test]
async fn slides_are_normalized_with_link_sentinel() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/slideshow"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": "s1",
                    "title": "Slide",
                    "field_slideshow": {
                        "uri": {"url": "/f/banner.jpg"},
                        "meta": {"alt": "Gajian Sale"}
                    },
                    "field_link": {"uri": "/promo-gajian"}
                },
                {
                    "id": "s2",
                    "title": "Linkless",
                    "field_slideshow": {"uri": {"url": "/f/b.jpg"}}
                }
            ]
        })))
        .mount(&server)
        .await;

    let slides = service(&server, 0).slides().await;
    assert_eq!(slides.len(), 2);
    assert_eq!(slides[0].title, "Gajian Sale");
    assert_eq!(slides[0].link_target, "/promo-gajian");
    assert_eq!(slides[1].link_target, "#");
}

#[tokio::test]
async fn site_metadata_takes_first_record_and_fills_defaults() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/site_info"))
        .and(query_param("filter[status]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "si1", "field_site_title": "Sharediskon", "body": {"value": "Promo terbaru"}},
                {"id": "si2", "field_site_title": "Ignored duplicate"}
            ]
        })))
        .mount(&server)
        .await;

    let meta = service(&server, 0).site_metadata().await.unwrap();
    assert_eq!(meta.title, "Sharediskon");
    assert_eq!(meta.description, "Promo terbaru");
    assert_eq!(meta.keywords, "promo, diskon, hemat, belanja");
}

#[tokio::test]
async fn main_menu_filters_and_sorts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/menu_items/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "m2", "attributes": {"title": "Promo", "url": "/promo", "enabled": true, "weight": 5}},
                {"id": "m3", "attributes": {"title": "Draft", "url": "/draft", "enabled": false, "weight": 1}},
                {"id": "m1", "attributes": {"title": "Beranda", "url": "/", "enabled": true, "weight": 0}}
            ]
        })))
        .mount(&server)
        .await;

    let menu = service(&server, 0).main_menu().await;
    let titles: Vec<&str> = menu.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, vec!["Beranda", "Promo"]);
}

#[tokio::test]
async fn route_enumeration_follows_pagination_and_dedupes() {
    let server = MockServer::start().await;
    let page2 = format!(
        "{}/jsonapi/node/katalog_promosi?page%5Boffset%5D=2",
        server.uri()
    );

    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .and(query_param("filter[status]", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "n1", "path": {"alias": "/promo-a"}},
                {"id": "n2", "path": {"alias": "/promo/b"}},
                {"id": "n3"}
            ],
            "links": {"next": {"href": page2}}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .and(query_param("page[offset]", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": "n4", "path": {"alias": "/promo-a"}},
                {"id": "n5", "path": {"alias": "/promo-c"}}
            ]
        })))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();
    let enumerator = StaticPathEnumerator::new(transport, config, fast_retry(0));

    let routes = enumerator.enumerate_all().await;
    let rendered: Vec<String> = routes.iter().map(RoutePath::as_route).collect();
    // n3 has no alias and n4 duplicates n1's alias; first occurrence wins.
    assert_eq!(rendered, vec!["/promo-a", "/promo/b", "/promo-c"]);
    assert_eq!(routes[1].segments, vec!["promo", "b"]);
}

#[tokio::test]
async fn route_enumeration_returns_empty_on_unrecoverable_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jsonapi/node/katalog_promosi"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = config_for(&server);
    let transport = HttpTransport::new(&config).unwrap();
    let enumerator = StaticPathEnumerator::new(transport, config, fast_retry(1));

    let routes = enumerator.enumerate_all().await;
    assert!(routes.is_empty());
}
