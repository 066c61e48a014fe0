//! Paths and query strings of every endpoint the lists and toggles use.

use listsync::{Cursor, ItemId, PageShape};
use url::Url;
use whynotbuy_types::{MenuSort, ReviewTarget, StoreSort};

use crate::config::ApiConfig;

pub const MENUS: PageShape = PageShape::new(&["menus"]);
pub const STORES: PageShape = PageShape::new(&["stores"]);
pub const ORDERS: PageShape = PageShape::new(&["orderList"]).zero_cursor_ends();
pub const REVIEWS: PageShape = PageShape::new(&["reviews"]);
pub const FAVORITE_MENUS: PageShape = PageShape::new(&["favoriteMenus", "FavoriteMenus"]);
pub const FAVORITE_STORES: PageShape = PageShape::new(&["favoriteStores", "FavoriteStores"]);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// An omitted cursor means "first page"; it is left out of the query.
    fn cursor(self, cursor: Option<&Cursor>) -> Self {
        match cursor {
            Some(cursor) => self.param("cursor", cursor),
            None => self,
        }
    }

    pub fn url(&self, config: &ApiConfig) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&config.url(&self.path))?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }
}

pub fn menus(cursor: Option<&Cursor>, size: usize, sort: MenuSort) -> Endpoint {
    Endpoint::new("/api/v1/menus")
        .cursor(cursor)
        .param("size", size)
        .param("menuSortType", sort.as_query())
}

pub fn stores(cursor: Option<&Cursor>, size: usize, sort: StoreSort) -> Endpoint {
    Endpoint::new("/api/v1/store")
        .cursor(cursor)
        .param("size", size)
        .param("type", sort.as_query())
}

pub fn orders(cursor: Option<&Cursor>, size: usize) -> Endpoint {
    Endpoint::new("/api/v1/orders")
        .cursor(cursor)
        .param("size", size)
}

/// The review API calls its page size `offset`.
pub fn reviews(
    target: ReviewTarget,
    target_id: &ItemId,
    cursor: Option<&Cursor>,
    size: usize,
) -> Endpoint {
    Endpoint::new("/api/v1/reviews")
        .param("targetType", target.as_query())
        .param("targetId", target_id)
        .param("offset", size)
        .cursor(cursor)
}

pub fn favorite_menus(cursor: Option<&Cursor>, size: usize) -> Endpoint {
    Endpoint::new("/api/v1/favorites/menus")
        .cursor(cursor)
        .param("size", size)
}

pub fn favorite_stores(cursor: Option<&Cursor>, size: usize) -> Endpoint {
    Endpoint::new("/api/v1/favorites/stores")
        .cursor(cursor)
        .param("size", size)
}

/// Which kind of thing a favorite toggle applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub enum FavoriteKind {
    Menu,
    Store,
}

impl FavoriteKind {
    /// localStorage key the ids are cached under.
    pub fn namespace(self) -> &'static str {
        match self {
            FavoriteKind::Menu => whynotbuy_types::MENU_LIKES_KEY,
            FavoriteKind::Store => whynotbuy_types::STORE_LIKES_KEY,
        }
    }
}

/// `POST` target that adds a favorite.
pub fn favorite_on(kind: FavoriteKind, id: &ItemId) -> Endpoint {
    match kind {
        FavoriteKind::Menu => Endpoint::new(format!("/api/v1/menus/{id}/favorite")),
        FavoriteKind::Store => Endpoint::new(format!("/api/v1/store/{id}/favorite")),
    }
}

/// `DELETE` target that removes a favorite.
pub fn favorite_off(kind: FavoriteKind, id: &ItemId) -> Endpoint {
    match kind {
        FavoriteKind::Menu => Endpoint::new(format!("/api/v1/favorites/menus/{id}")),
        FavoriteKind::Store => Endpoint::new(format!("/api/v1/favorites/stores/{id}")),
    }
}
