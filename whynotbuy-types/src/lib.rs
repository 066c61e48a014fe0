//! Wire types for the WhyNotBuy REST API, shared between the browser crate
//! and anything else that talks to the same endpoints.

pub mod catalog;
pub mod favorites;
pub mod orders;
pub mod reviews;

pub use catalog::{Menu, MenuSort, Store, StoreSort};
pub use favorites::{FavoriteMenu, FavoriteStore};
pub use orders::{MyReview, Order};
pub use reviews::{Review, ReviewMenu, ReviewOrder, ReviewTarget};

/// Items requested per page by every list in the app.
pub const PAGE_SIZE: usize = 10;

/// localStorage key for the ids of liked menus.
pub const MENU_LIKES_KEY: &str = "likes_menu";
/// localStorage key for the ids of liked stores.
pub const STORE_LIKES_KEY: &str = "likes_store";
