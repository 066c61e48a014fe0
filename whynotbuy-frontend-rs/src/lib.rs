//! Browser bindings for WhyNotBuy's infinite-scroll lists and favorite
//! buttons.
//!
//! Each page script creates the feeds it shows (`MenuFeed`, `StoreFeed`,
//! `OrderHistory`, ...) and, where hearts are shown, a `Favorites` handle.
//! Feeds call the REST API page by page; `Favorites` flips hearts instantly,
//! caches them in localStorage and rolls back if the server refuses.

pub mod api;
pub mod config;
pub mod endpoints;
mod favorites;
mod feeds;
pub mod sources;
mod utils;

use std::sync::LazyLock;

use listsync::{FetchError, LoadOutcome};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

pub use config::ApiConfig;
pub use endpoints::FavoriteKind;
pub use favorites::Favorites;
pub use feeds::{
    FavoriteMenuFeed, FavoriteStoreFeed, MenuFeed, OrderHistory, ReviewFeed, StoreFeed,
};

// putting this inside LOGGER prevents us from accidentally initializing the logger more than once
static LOGGER: LazyLock<()> = LazyLock::new(|| {
    utils::set_panic_hook();

    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Logging initialized");
});

pub(crate) fn init_logging() {
    LazyLock::force(&LOGGER);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum LoadStatus {
    Appended,
    /// A page was already loading, or the list is exhausted.
    Skipped,
    /// The feed was reset while the page was on its way.
    Discarded,
    /// The scroll position was not close enough to the end.
    NotNearBottom,
}

/// What a load call did, for the page to decide whether to re-render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct LoadReport {
    pub status: LoadStatus,
    pub appended: usize,
    pub has_more: bool,
}

impl LoadReport {
    pub(crate) fn new(outcome: LoadOutcome, has_more: bool) -> Self {
        match outcome {
            LoadOutcome::Appended { count, has_more } => LoadReport {
                status: LoadStatus::Appended,
                appended: count,
                has_more,
            },
            LoadOutcome::Skipped => LoadReport {
                status: LoadStatus::Skipped,
                appended: 0,
                has_more,
            },
            LoadOutcome::Discarded => LoadReport {
                status: LoadStatus::Discarded,
                appended: 0,
                has_more,
            },
        }
    }

    pub(crate) fn not_near_bottom(has_more: bool) -> Self {
        LoadReport {
            status: LoadStatus::NotNearBottom,
            appended: 0,
            has_more,
        }
    }
}

/// Error object thrown into JS. `requiresLogin` tells the page to send the
/// user to the login screen.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct ApiFailure {
    pub message: String,
    pub requires_login: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl From<&FetchError> for ApiFailure {
    fn from(e: &FetchError) -> Self {
        let status = match e {
            FetchError::Unauthorized => Some(401),
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        };
        ApiFailure {
            message: e.to_string(),
            requires_login: e.requires_login(),
            status,
        }
    }
}

pub(crate) fn js_failure(e: &FetchError) -> JsValue {
    let failure = ApiFailure::from(e);
    serde_wasm_bindgen::to_value(&failure).unwrap_or_else(|_| JsValue::from_str(&failure.message))
}

pub(crate) fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub fn scroll_threshold_px() -> f64 {
    listsync::SCROLL_THRESHOLD_PX
}
