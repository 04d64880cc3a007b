//! Command implementations.
//!
//! Each command runs one library operation and prints the result in the
//! requested format. Collection commands inherit the library's degradation
//! behavior: a failing backend prints an empty result and exits zero. Only
//! `show` treats absence as a failure, since its callers probe for a route.

use crate::cli::OutputFormat;
use anyhow::{bail, Result};
use chrono::Utc;
use katalog_core::{CatalogService, StaticPathEnumerator, Transport};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// `katalog list <category-id>`
pub async fn list<T: Transport>(
    service: &CatalogService<T>,
    category_id: &str,
    format: OutputFormat,
) -> Result<()> {
    let cards = service.list_by_category(category_id).await;
    match format {
        OutputFormat::Json => print_json(&cards),
        OutputFormat::Text => {
            if cards.is_empty() {
                println!("no promotions for category {category_id}");
                return Ok(());
            }
            let now = Utc::now();
            for card in &cards {
                let status = if card.is_expired(now) { "ended" } else { "active" };
                println!(
                    "{}  {}  [{}] {} ({} images, until {})",
                    card.id, card.path, card.category, card.title,
                    card.images.len(),
                    if card.end_date.is_empty() { "?" } else { card.end_date.as_str() },
                );
                println!("    status: {status}");
            }
            Ok(())
        },
    }
}

/// `katalog show <path>`
pub async fn show<T: Transport>(
    service: &CatalogService<T>,
    path: &str,
    format: OutputFormat,
) -> Result<()> {
    let Some(entity) = service.get_by_path(path).await else {
        bail!("no catalog entry found for path '{path}'");
    };
    match format {
        OutputFormat::Json => print_json(&entity),
        OutputFormat::Text => {
            println!("{}  {}", entity.id, entity.title);
            println!("path:     {}", entity.path);
            println!("category: {}", entity.category);
            println!("runs:     {} .. {}", entity.start_date, entity.end_date);
            println!(
                "status:   {}",
                if entity.is_expired(Utc::now()) { "ended" } else { "active" }
            );
            for image in &entity.images {
                println!("image:    {} ({})", image.urls.original, image.alt_text);
            }
            if let Some(body) = &entity.body {
                println!("---\n{body}");
            }
            Ok(())
        },
    }
}

/// `katalog routes`
pub async fn routes<T: Transport>(
    enumerator: &StaticPathEnumerator<T>,
    format: OutputFormat,
) -> Result<()> {
    let routes = enumerator.enumerate_all().await;
    match format {
        OutputFormat::Json => print_json(&routes),
        OutputFormat::Text => {
            for route in &routes {
                println!("{}", route.as_route());
            }
            Ok(())
        },
    }
}

/// `katalog site`
pub async fn site<T: Transport>(service: &CatalogService<T>, format: OutputFormat) -> Result<()> {
    let Some(meta) = service.site_metadata().await else {
        bail!("no site metadata available");
    };
    match format {
        OutputFormat::Json => print_json(&meta),
        OutputFormat::Text => {
            println!("title:       {}", meta.title);
            println!("description: {}", meta.description);
            println!("keywords:    {}", meta.keywords);
            Ok(())
        },
    }
}

/// `katalog menu`
pub async fn menu<T: Transport>(service: &CatalogService<T>, format: OutputFormat) -> Result<()> {
    let items = service.main_menu().await;
    match format {
        OutputFormat::Json => print_json(&items),
        OutputFormat::Text => {
            for item in &items {
                println!("{}  {}", item.url, item.title);
            }
            Ok(())
        },
    }
}

/// `katalog slides`
pub async fn slides<T: Transport>(service: &CatalogService<T>, format: OutputFormat) -> Result<()> {
    let slides = service.slides().await;
    match format {
        OutputFormat::Json => print_json(&slides),
        OutputFormat::Text => {
            for slide in &slides {
                println!("{}  {}  -> {}", slide.id, slide.title, slide.link_target);
            }
            Ok(())
        },
    }
}

/// `katalog logos <category-name>`
pub async fn logos<T: Transport>(
    service: &CatalogService<T>,
    category_name: &str,
    format: OutputFormat,
) -> Result<()> {
    let logos = service.logo_cards(category_name).await;
    match format {
        OutputFormat::Json => print_json(&logos),
        OutputFormat::Text => {
            if logos.is_empty() {
                println!("no logo cards for category {category_name}");
                return Ok(());
            }
            for logo in &logos {
                println!("{}  {}  ({})", logo.id, logo.image_url, logo.alt_text);
            }
            Ok(())
        },
    }
}
