pub mod model;
pub mod validate;

pub use model::{
    Category, CategoryContent, CategoryType, GalleryContent, GalleryItem, Product, Promo,
    PromoContent, Specs, DEFAULT_GALLERY_CATEGORY,
};
pub use validate::ValidationError;
