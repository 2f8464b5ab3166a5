//! Request-side shapes for writes: drafts that have not been validated yet and
//! bulk replace payloads.
use serde::{Deserialize, Serialize};

use crate::document::{CategoryContent, PromoContent, Specs};

/// A product as submitted by a client. Validated into [`crate::document::Product`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specs: Option<Specs>,
}

/// A full or partial category as submitted by a client.
///
/// `type` is kept as a raw string so an unknown value is reported as a
/// validation failure instead of a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub products: Option<Vec<ProductDraft>>,
}

impl From<CategoryContent> for CategoryDraft {
    fn from(content: CategoryContent) -> Self {
        Self {
            id: Some(content.id),
            kind: Some(content.kind.as_str().to_string()),
            title: Some(content.title),
            description: content.description,
            image: content.image,
            products: Some(
                content
                    .products
                    .into_iter()
                    .map(|product| ProductDraft {
                        id: product.id,
                        title: Some(product.title),
                        description: product.description,
                        long_description: product.long_description,
                        image: product.image,
                        specs: Some(product.specs),
                    })
                    .collect(),
            ),
        }
    }
}

/// Partial promo update. Present fields overwrite, absent fields are kept.
pub type PromoPatch = PromoContent;

/// A gallery item as submitted by a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItemDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Body of a full category replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncCategories {
    pub categories: Vec<CategoryDraft>,
}

/// Body of a full gallery replace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncGallery {
    pub items: Vec<GalleryItemDraft>,
}
