use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::document::{Category, CategoryContent, GalleryContent, GalleryItem, Promo};
use crate::error::{StoreError, StoreResult};
use crate::mutation::{upsert_category_content, CategoryDraft, PromoPatch};

use super::{ConnectionState, DocumentStore};

/// In-process [`DocumentStore`] with the same semantics as the PostgreSQL one.
///
/// Every operation holds the lock for its whole duration, so replaces and upserts
/// are atomic with respect to each other.
#[derive(Debug)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    connected: AtomicBool,
}

#[derive(Debug, Default)]
struct MemoryState {
    categories: Vec<Category>,
    promo: Option<Promo>,
    gallery: Vec<GalleryEntry>,
    next_seq: u64,
    last_tick: Option<DateTime<Utc>>,
}

#[derive(Debug)]
struct GalleryEntry {
    seq: u64,
    item: GalleryItem,
}

impl MemoryState {
    /// Strictly increasing timestamps at microsecond precision, like `timestamptz`.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let now = match self.last_tick {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_tick = Some(now);
        now
    }

    fn push_gallery(&mut self, content: GalleryContent, at: DateTime<Utc>) -> GalleryItem {
        let item = GalleryItem {
            id: Uuid::now_v7(),
            content,
            created_at: at,
            updated_at: at,
        };
        self.next_seq += 1;
        self.gallery.push(GalleryEntry {
            seq: self.next_seq,
            item: item.clone(),
        });
        item
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(MemoryState::default()),
            connected: AtomicBool::new(true),
        }
    }

    /// Simulate losing or regaining the store connection.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        Ok(self.state.read().await.categories.clone())
    }

    async fn create_category(&self, content: CategoryContent) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        if state.categories.iter().any(|c| c.content.id == content.id) {
            return Err(StoreError::DuplicateKey(content.id));
        }

        let now = state.tick();
        let category = Category {
            content,
            created_at: now,
            updated_at: now,
        };
        state.categories.push(category.clone());
        Ok(category)
    }

    async fn replace_categories(&self, contents: Vec<CategoryContent>) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        let now = state.tick();
        state.categories = contents
            .into_iter()
            .map(|content| Category {
                content,
                created_at: now,
                updated_at: now,
            })
            .collect();
        Ok(state.categories.len())
    }

    async fn upsert_category(&self, id: &str, patch: CategoryDraft) -> StoreResult<Category> {
        let mut state = self.state.write().await;
        let position = state.categories.iter().position(|c| c.content.id == id);
        let existing = position.map(|i| state.categories[i].content.clone());

        let content = upsert_category_content(id, existing, patch)?;
        let now = state.tick();

        let category = match position {
            Some(i) => {
                let slot = &mut state.categories[i];
                slot.content = content;
                slot.updated_at = now;
                slot.clone()
            }
            None => {
                let category = Category {
                    content,
                    created_at: now,
                    updated_at: now,
                };
                state.categories.push(category.clone());
                category
            }
        };
        Ok(category)
    }

    async fn delete_category(&self, id: &str) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.categories.len();
        state.categories.retain(|c| c.content.id != id);
        Ok(state.categories.len() != before)
    }

    async fn current_promo(&self) -> StoreResult<Option<Promo>> {
        Ok(self.state.read().await.promo.clone())
    }

    async fn upsert_promo(&self, patch: PromoPatch) -> StoreResult<Promo> {
        let mut state = self.state.write().await;
        let now = state.tick();

        let promo = match state.promo.as_mut() {
            Some(promo) => {
                promo.content.merge(patch);
                promo.updated_at = Some(now);
                promo.clone()
            }
            None => {
                let promo = Promo {
                    content: patch,
                    created_at: Some(now),
                    updated_at: Some(now),
                };
                state.promo = Some(promo.clone());
                promo
            }
        };
        Ok(promo)
    }

    async fn list_gallery(&self) -> StoreResult<Vec<GalleryItem>> {
        let state = self.state.read().await;
        let mut entries: Vec<&GalleryEntry> = state.gallery.iter().collect();
        entries.sort_by(|a, b| {
            b.item
                .created_at
                .cmp(&a.item.created_at)
                .then(a.seq.cmp(&b.seq))
        });
        Ok(entries.into_iter().map(|e| e.item.clone()).collect())
    }

    async fn create_gallery_item(&self, content: GalleryContent) -> StoreResult<GalleryItem> {
        let mut state = self.state.write().await;
        let now = state.tick();
        Ok(state.push_gallery(content, now))
    }

    async fn replace_gallery(&self, contents: Vec<GalleryContent>) -> StoreResult<usize> {
        let mut state = self.state.write().await;
        // One timestamp for the batch, as within a single database transaction.
        let now = state.tick();
        state.gallery.clear();
        for content in contents {
            state.push_gallery(content, now);
        }
        Ok(state.gallery.len())
    }

    async fn delete_gallery_item(&self, id: Uuid) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        let before = state.gallery.len();
        state.gallery.retain(|e| e.item.id != id);
        Ok(state.gallery.len() != before)
    }

    async fn connection_state(&self) -> ConnectionState {
        if self.connected.load(Ordering::SeqCst) {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{CategoryType, PromoContent};
    use crate::mutation::GalleryItemDraft;
    use serde_json::json;

    fn category(id: &str, title: &str) -> CategoryContent {
        CategoryContent {
            id: id.into(),
            kind: CategoryType::Windows,
            title: title.into(),
            description: None,
            image: None,
            products: Vec::new(),
        }
    }

    fn gallery(title: &str) -> GalleryContent {
        GalleryItemDraft {
            url: Some(format!("https://cdn.example/{title}.jpg")),
            title: Some(title.into()),
            location: Some("Hull".into()),
            category: None,
        }
        .validate()
        .unwrap()
    }

    #[tokio::test]
    async fn create_rejects_taken_id() {
        let store = MemoryStore::new();
        store.create_category(category("a", "A")).await.unwrap();
        let err = store.create_category(category("a", "B")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateKey(id) if id == "a"));
        assert_eq!(store.list_categories().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn upsert_updates_in_place_and_keeps_created_at() {
        let store = MemoryStore::new();
        let created = store.create_category(category("a", "A")).await.unwrap();
        store.create_category(category("b", "B")).await.unwrap();

        let patch: CategoryDraft = serde_json::from_value(json!({ "title": "A2" })).unwrap();
        let updated = store.upsert_category("a", patch).await.unwrap();

        assert_eq!(updated.content.title, "A2");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let ids: Vec<_> = store
            .list_categories()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.content.id)
            .collect();
        assert_eq!(ids, ["a", "b"]);
    }

    #[tokio::test]
    async fn upsert_validation_failure_leaves_store_untouched() {
        let store = MemoryStore::new();
        let patch: CategoryDraft = serde_json::from_value(json!({ "title": "x" })).unwrap();
        let err = store.upsert_category("ghost", patch).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_was_removed() {
        let store = MemoryStore::new();
        store.create_category(category("a", "A")).await.unwrap();
        assert!(!store.delete_category("zzz").await.unwrap());
        assert!(store.delete_category("a").await.unwrap());
        assert!(store.list_categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn promo_upsert_keeps_a_single_record() {
        let store = MemoryStore::new();
        assert!(store.current_promo().await.unwrap().is_none());

        store
            .upsert_promo(PromoContent {
                title: Some("First".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        let promo = store
            .upsert_promo(PromoContent {
                button_text: Some("Go".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(promo.content.title.as_deref(), Some("First"));
        assert_eq!(promo.content.button_text.as_deref(), Some("Go"));
        assert_eq!(store.current_promo().await.unwrap(), Some(promo));
    }

    #[tokio::test]
    async fn gallery_lists_newest_first_and_batches_in_order() {
        let store = MemoryStore::new();
        for title in ["one", "two", "three"] {
            store.create_gallery_item(gallery(title)).await.unwrap();
        }
        let titles: Vec<_> = store
            .list_gallery()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.content.title)
            .collect();
        assert_eq!(titles, ["three", "two", "one"]);

        let count = store
            .replace_gallery(vec![gallery("x"), gallery("y")])
            .await
            .unwrap();
        assert_eq!(count, 2);
        let titles: Vec<_> = store
            .list_gallery()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.content.title)
            .collect();
        assert_eq!(titles, ["x", "y"]);
    }

    #[tokio::test]
    async fn connection_state_follows_toggle() {
        let store = MemoryStore::new();
        assert_eq!(store.connection_state().await, ConnectionState::Connected);
        store.set_connected(false);
        assert_eq!(store.connection_state().await, ConnectionState::Disconnected);
    }
}
