//! Persistence port for the three document collections.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::document::{Category, CategoryContent, GalleryContent, GalleryItem, Promo};
use crate::error::StoreResult;
use crate::mutation::{CategoryDraft, PromoPatch};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;

/// Whether the store currently answers requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connected,
    Disconnected,
}

impl ConnectionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
        }
    }
}

/// Operations the HTTP layer needs from the document store.
///
/// Contents handed to `create_*` and `replace_*` are already validated. Upserts
/// take the raw patch because the merged document can only be validated once
/// the stored one has been read.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All categories in insertion order.
    async fn list_categories(&self) -> StoreResult<Vec<Category>>;

    /// Insert a new category. Fails with `DuplicateKey` if the id is taken.
    async fn create_category(&self, content: CategoryContent) -> StoreResult<Category>;

    /// Replace every category with `contents`, atomically. Returns the new count.
    async fn replace_categories(&self, contents: Vec<CategoryContent>) -> StoreResult<usize>;

    /// Merge `patch` into the category keyed by `id`, creating it if absent.
    async fn upsert_category(&self, id: &str, patch: CategoryDraft) -> StoreResult<Category>;

    /// Remove the category keyed by `id`. Returns whether one existed.
    async fn delete_category(&self, id: &str) -> StoreResult<bool>;

    /// The saved promo, if one was ever written.
    async fn current_promo(&self) -> StoreResult<Option<Promo>>;

    /// Merge `patch` into the singleton promo, creating it if absent.
    async fn upsert_promo(&self, patch: PromoPatch) -> StoreResult<Promo>;

    /// All gallery items, newest first.
    async fn list_gallery(&self) -> StoreResult<Vec<GalleryItem>>;

    async fn create_gallery_item(&self, content: GalleryContent) -> StoreResult<GalleryItem>;

    /// Replace every gallery item with `contents`, atomically. Returns the new count.
    async fn replace_gallery(&self, contents: Vec<GalleryContent>) -> StoreResult<usize>;

    /// Remove a gallery item by its store id. Returns whether one existed.
    async fn delete_gallery_item(&self, id: Uuid) -> StoreResult<bool>;

    /// Probe connectivity. Never fails; an unreachable store reports `Disconnected`.
    async fn connection_state(&self) -> ConnectionState;
}
