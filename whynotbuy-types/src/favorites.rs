//! Entries of the "my favorites" lists. These are keyed by the favorited
//! menu or store, but paginate by the favorite row's own id.

use listsync::{Cursor, ItemId, PageItem, Searchable};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteMenu {
    pub favorite_id: i64,
    pub menu_id: i64,
    #[serde(default)]
    pub menu_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_image: Option<String>,
}

impl PageItem for FavoriteMenu {
    fn id(&self) -> ItemId {
        ItemId::Number(self.menu_id)
    }

    fn cursor(&self) -> Option<Cursor> {
        Some(Cursor::Number(self.favorite_id))
    }
}

impl Searchable for FavoriteMenu {
    fn search_text(&self) -> String {
        match &self.store_name {
            Some(store) => format!("{} {store}", self.menu_name),
            None => self.menu_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteStore {
    pub favorite_id: i64,
    pub store_id: i64,
    #[serde(default)]
    pub store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub store_image: Option<String>,
}

impl PageItem for FavoriteStore {
    fn id(&self) -> ItemId {
        ItemId::Number(self.store_id)
    }

    fn cursor(&self) -> Option<Cursor> {
        Some(Cursor::Number(self.favorite_id))
    }
}

impl Searchable for FavoriteStore {
    fn search_text(&self) -> String {
        self.store_name.clone()
    }
}
