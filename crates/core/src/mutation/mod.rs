pub mod apply;
pub mod types;

pub use apply::{upsert_category_content, validate_category_sync, validate_gallery_sync};
pub use types::{
    CategoryDraft, GalleryItemDraft, ProductDraft, PromoPatch, SyncCategories, SyncGallery,
};
