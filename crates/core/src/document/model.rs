use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Category assigned to gallery items that arrive without one.
pub const DEFAULT_GALLERY_CATEGORY: &str = "General";

/// Free-form product specification sheet. Keys keep the order they were written in.
pub type Specs = Map<String, Value>;

/// Product line a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryType {
    Windows,
    Doors,
}

impl CategoryType {
    pub const ALL: [CategoryType; 2] = [CategoryType::Windows, CategoryType::Doors];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryType::Windows => "windows",
            CategoryType::Doors => "doors",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Product embedded in a category. Not addressable on its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub specs: Specs,
}

/// Persisted body of a category document, keyed by its business `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContent {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: CategoryType,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// Category document as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(flatten)]
    pub content: CategoryContent,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Promotional banner fields. Every field is optional, which also makes this the
/// shape of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highlight_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button_link: Option<String>,
}

impl PromoContent {
    /// Banner shown while nothing has been saved yet.
    pub fn fallback() -> Self {
        Self {
            tag_text: Some("Special Offer".to_string()),
            title: Some("Already have a quote?".to_string()),
            description: Some(
                "We aim to beat any comparable written quotes by up to".to_string(),
            ),
            highlight_text: Some("15%".to_string()),
            button_text: Some("Learn More".to_string()),
            button_link: Some("#contact".to_string()),
        }
    }
}

/// The promo banner. Timestamps are absent on the unsaved fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Promo {
    #[serde(flatten)]
    pub content: PromoContent,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Promo {
    pub fn fallback() -> Self {
        Self {
            content: PromoContent::fallback(),
            created_at: None,
            updated_at: None,
        }
    }
}

/// Persisted body of a gallery item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryContent {
    pub url: String,
    pub title: String,
    pub location: String,
    pub category: String,
}

/// Gallery item as returned to clients. `_id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[serde(flatten)]
    pub content: GalleryContent,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}
