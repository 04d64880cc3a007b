//! Loosely-typed serde model of backend resource documents.
//!
//! The backend (a Drupal-style JSON resource API, consumed denormalized with
//! relations embedded inline) makes almost no guarantees beyond a record `id`.
//! Everything else is optional here; strictness is applied one layer up by
//! [`crate::normalize`], which turns these shapes into renderable entities or
//! rejects them.
//!
//! Field names on the wire are the backend's Indonesian machine names
//! (`field_gambar_katalog`, `field_kategori_toko`, ...); the Rust side keeps
//! descriptive names and maps via serde renames.

use serde::{Deserialize, Serialize};

/// A relation that the backend serializes either as a single embedded object
/// or as an array of them, depending on field cardinality.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    /// Single embedded object.
    One(T),
    /// Array of embedded objects.
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    /// Flattens into a vector, preserving order.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Self::One(item) => vec![item],
            Self::Many(items) => items,
        }
    }

    /// Borrowing view of the contained items.
    pub fn as_slice(&self) -> &[T] {
        match self {
            Self::One(item) => std::slice::from_ref(item),
            Self::Many(items) => items,
        }
    }
}

/// One raw resource record as returned by the backend, relations embedded.
///
/// Shared across resource types (catalog, logo, slideshow, site info); each
/// type populates its own subset of fields and the rest deserialize to `None`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawRecord {
    /// Opaque stable identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Canonical path alias container.
    #[serde(default)]
    pub path: Option<PathAlias>,
    /// Promotion start date, backend-native format.
    #[serde(default, rename = "field_tanggal_mulai")]
    pub start_date: Option<String>,
    /// Promotion end date, backend-native format.
    #[serde(default, rename = "field_tanggal_berakhir")]
    pub end_date: Option<String>,
    /// Rich-text body.
    #[serde(default)]
    pub body: Option<RichText>,
    /// Catalog image relation; single object or array depending on cardinality.
    #[serde(default, rename = "field_gambar_katalog")]
    pub catalog_images: Option<OneOrMany<RawImage>>,
    /// Store-category taxonomy terms.
    #[serde(default, rename = "field_kategori_toko")]
    pub store_categories: Option<Vec<TaxonomyTerm>>,
    /// Logo image relation (landing-page records).
    #[serde(default, rename = "field_logo_card")]
    pub logo_image: Option<RawImage>,
    /// Banner image relation (slideshow records).
    #[serde(default, rename = "field_slideshow")]
    pub slide_image: Option<RawImage>,
    /// Link target (slideshow records).
    #[serde(default, rename = "field_link")]
    pub link: Option<RawLink>,
    /// Site title (site-info records).
    #[serde(default, rename = "field_site_title")]
    pub site_title: Option<String>,
    /// Legacy site name, used when `field_site_title` is absent.
    #[serde(default, rename = "field_nama_site")]
    pub site_name: Option<String>,
    /// Meta keywords (site-info records).
    #[serde(default, rename = "field_keyword")]
    pub keywords: Option<String>,
}

/// Canonical path alias for a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathAlias {
    /// Alias string, e.g. `/promo-minggu-ini`.
    #[serde(default)]
    pub alias: Option<String>,
}

/// Rich-text field with the backend's raw/processed split.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichText {
    /// Raw source value.
    #[serde(default)]
    pub value: Option<String>,
    /// Server-rendered HTML.
    #[serde(default)]
    pub processed: Option<String>,
}

/// Embedded image relation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawImage {
    /// Alt text, when editors filled it in.
    #[serde(default)]
    pub alt: Option<String>,
    /// Relative file URI.
    #[serde(default)]
    pub uri: Option<FileUri>,
    /// Precomputed style URLs keyed by style name. Already absolute.
    #[serde(default)]
    pub image_style_uri: Option<ImageStyleUris>,
    /// Relation metadata; slideshow images carry alt text here instead.
    #[serde(default)]
    pub meta: Option<ImageMeta>,
}

/// Relative file location of an image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileUri {
    /// Root-relative URL, e.g. `/sites/default/files/promo.jpg`.
    #[serde(default)]
    pub url: Option<String>,
}

/// Backend-precomputed image style URLs. Any of these may be missing when the
/// style is not configured for the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageStyleUris {
    /// Small listing thumbnail.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Medium card image.
    #[serde(default)]
    pub medium: Option<String>,
    /// Large detail image.
    #[serde(default)]
    pub large: Option<String>,
    /// Wide banner crop.
    #[serde(default)]
    pub wide: Option<String>,
    /// Square logo crop (landing-page records).
    #[serde(default)]
    pub logo: Option<String>,
}

/// Per-relation metadata attached to an embedded image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageMeta {
    /// Alt text from the relation rather than the file entity.
    #[serde(default)]
    pub alt: Option<String>,
}

/// Link field value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLink {
    /// Target URL, absolute or relative.
    #[serde(default)]
    pub uri: Option<String>,
}

/// Embedded taxonomy term.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyTerm {
    /// Term identifier.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// A page of a resource collection, with the cursor to the next page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionDocument {
    /// Records on this page, in backend sort order.
    #[serde(default)]
    pub data: Vec<RawRecord>,
    /// Pagination links.
    #[serde(default)]
    pub links: Option<CollectionLinks>,
}

impl CollectionDocument {
    /// URL of the next page, if the backend reported one.
    #[must_use]
    pub fn next_href(&self) -> Option<&str> {
        self.links
            .as_ref()
            .and_then(|links| links.next.as_ref())
            .map(|link| link.href.as_str())
    }
}

/// Pagination link block of a collection document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionLinks {
    /// Next page, absent on the last page.
    #[serde(default)]
    pub next: Option<Href>,
}

/// A single link object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Href {
    /// Absolute URL.
    pub href: String,
}

/// Document wrapping a single record (detail fetches).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceDocument {
    /// The record itself.
    pub data: RawRecord,
}

/// One raw menu item from the menu-items endpoint. Unlike content records,
/// menu items keep their payload under `attributes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawMenuItem {
    /// Menu link identifier.
    pub id: String,
    /// Menu link payload.
    #[serde(default)]
    pub attributes: MenuItemAttributes,
}

/// Attributes of a raw menu item.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemAttributes {
    /// Link label.
    #[serde(default)]
    pub title: Option<String>,
    /// Link target.
    #[serde(default)]
    pub url: Option<String>,
    /// Disabled items are hidden from rendering.
    #[serde(default)]
    pub enabled: bool,
    /// Sort weight, lower first.
    #[serde(default)]
    pub weight: i64,
}

/// Document wrapping a menu-items listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuDocument {
    /// Menu links in backend order.
    #[serde(default)]
    pub data: Vec<RawMenuItem>,
}
