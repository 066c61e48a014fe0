//! Client-side state for server-paginated collections.
//!
//! Two pieces, always used together by the app's list pages:
//! 1. [`PagedList`] walks a collection forward with an opaque server cursor, one
//!    request at a time, appending each page to a local copy (infinite scroll).
//! 2. [`ToggleSet`] holds the ids a user has liked/favorited. Clicks flip it
//!    immediately, the server is told afterwards, and failures are rolled back.
//!
//! Everything is single-threaded: state sits in `RefCell`s and no borrow is
//! held across an `.await`, so concurrent calls interleave safely on one event
//! loop.

pub mod error;
pub mod model;
pub mod paged;
pub mod storage;
pub mod toggle;
pub mod wire;

pub use error::{FetchError, ListError, StorageError, ToggleError};
pub use model::{Cursor, ItemId, Page, PageItem, Searchable, last_item_cursor};
pub use paged::{
    ListState, LoadOutcome, PageSource, PagedList, SCROLL_THRESHOLD_PX, ScrollPosition,
};
pub use storage::{KeyValueStore, MemoryStore};
pub use toggle::{ToggleAck, ToggleOutcome, ToggleRemote, ToggleSet};
pub use wire::{PageShape, normalize_ack, normalize_page, parse_ack, parse_body};

#[cfg(all(target_arch = "wasm32", feature = "web-storage"))]
pub use storage::BrowserStorage;
