//! Data model, validation and persistence for the showroom catalogue:
//! product categories, the promo banner and the project gallery.

pub mod document;
pub mod error;
pub mod mutation;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{ConnectionState, DocumentStore, MemoryStore, PgDocumentStore};
