//! Turning drafts into stored content: validation, defaults and merge rules.
//!
//! Both store implementations go through these functions so they agree on what
//! a write produces.

use std::collections::HashSet;

use crate::document::validate::required_field;
use crate::document::{
    CategoryContent, CategoryType, GalleryContent, Product, PromoContent, ValidationError,
    DEFAULT_GALLERY_CATEGORY,
};

use super::types::{CategoryDraft, GalleryItemDraft, ProductDraft, PromoPatch};

impl ProductDraft {
    pub fn validate(self) -> Result<Product, ValidationError> {
        Ok(Product {
            id: self.id,
            title: required_field("title", self.title)?,
            description: self.description,
            long_description: self.long_description,
            image: self.image,
            specs: self.specs.unwrap_or_default(),
        })
    }
}

impl CategoryDraft {
    pub fn validate(self) -> Result<CategoryContent, ValidationError> {
        let id = required_field("id", self.id)?;
        let kind = required_field("type", self.kind)?;
        let kind =
            CategoryType::parse(&kind).ok_or(ValidationError::InvalidCategoryType(kind))?;
        let title = required_field("title", self.title)?;

        let products = self
            .products
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(index, product)| {
                product
                    .validate()
                    .map_err(|e| e.at(format!("products[{index}]")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CategoryContent {
            id,
            kind,
            title,
            description: self.description,
            image: self.image,
            products,
        })
    }

    /// Lay `patch` over `self`: every field present in the patch wins.
    pub fn overlay(self, patch: CategoryDraft) -> CategoryDraft {
        CategoryDraft {
            id: patch.id.or(self.id),
            kind: patch.kind.or(self.kind),
            title: patch.title.or(self.title),
            description: patch.description.or(self.description),
            image: patch.image.or(self.image),
            products: patch.products.or(self.products),
        }
    }
}

impl GalleryItemDraft {
    pub fn validate(self) -> Result<GalleryContent, ValidationError> {
        let category = self
            .category
            .filter(|category| !category.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GALLERY_CATEGORY.to_string());

        Ok(GalleryContent {
            url: required_field("url", self.url)?,
            title: required_field("title", self.title)?,
            location: required_field("location", self.location)?,
            category,
        })
    }
}

impl PromoContent {
    /// Overwrite the fields present in `patch`.
    pub fn merge(&mut self, patch: PromoPatch) {
        fn take(slot: &mut Option<String>, value: Option<String>) {
            if value.is_some() {
                *slot = value;
            }
        }

        take(&mut self.tag_text, patch.tag_text);
        take(&mut self.title, patch.title);
        take(&mut self.description, patch.description);
        take(&mut self.highlight_text, patch.highlight_text);
        take(&mut self.button_text, patch.button_text);
        take(&mut self.button_link, patch.button_link);
    }
}

/// Compute the document an upsert on `id` should store.
///
/// The key in the path is authoritative; an `id` inside the patch is ignored.
pub fn upsert_category_content(
    id: &str,
    existing: Option<CategoryContent>,
    patch: CategoryDraft,
) -> Result<CategoryContent, ValidationError> {
    let base = existing.map(CategoryDraft::from).unwrap_or_default();
    let mut merged = base.overlay(patch);
    merged.id = Some(id.to_string());
    merged.validate()
}

/// Validate a full category replace. Nothing is written unless every element passes.
pub fn validate_category_sync(
    drafts: Vec<CategoryDraft>,
) -> Result<Vec<CategoryContent>, ValidationError> {
    let mut seen = HashSet::with_capacity(drafts.len());
    let mut contents = Vec::with_capacity(drafts.len());

    for (index, draft) in drafts.into_iter().enumerate() {
        let content = draft
            .validate()
            .map_err(|e| e.at(format!("categories[{index}]")))?;
        if !seen.insert(content.id.clone()) {
            return Err(ValidationError::DuplicateCategoryId(content.id));
        }
        contents.push(content);
    }

    Ok(contents)
}

/// Validate a full gallery replace.
pub fn validate_gallery_sync(
    drafts: Vec<GalleryItemDraft>,
) -> Result<Vec<GalleryContent>, ValidationError> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| draft.validate().map_err(|e| e.at(format!("items[{index}]"))))
        .collect()
}
