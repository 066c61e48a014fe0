use chrono::{DateTime, NaiveDate, NaiveDateTime};
use listsync::{Cursor, ItemId, PageItem, Searchable};

/// Whose reviews to list.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, tsify::Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReviewTarget {
    Store,
    Menu,
}

impl ReviewTarget {
    pub fn as_query(self) -> &'static str {
        match self {
            ReviewTarget::Store => "STORE",
            ReviewTarget::Menu => "MENU",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_id: Option<i64>,
    #[serde(default, alias = "createdAt", skip_serializing_if = "Option::is_none")]
    pub review_date: Option<String>,
    #[serde(default, alias = "content")]
    pub review_content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orders: Option<ReviewOrder>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ReviewOrder {
    #[serde(default)]
    pub menus: Vec<ReviewMenu>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize, tsify::Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct ReviewMenu {
    pub name: String,
    #[serde(default)]
    pub quantity: u32,
}

impl Review {
    /// `review_date` in epoch milliseconds. Accepts RFC 3339, a naive
    /// `YYYY-MM-DDTHH:MM:SS` timestamp (taken as UTC) or a bare date.
    pub fn written_at_millis(&self) -> Option<i64> {
        let raw = self.review_date.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.timestamp_millis());
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(dt.and_utc().timestamp_millis());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|dt| dt.and_utc().timestamp_millis())
    }
}

impl PageItem for Review {
    /// Owner-side payloads carry no `reviewId`; those reviews are keyed by
    /// date and content together, since one day can hold several reviews.
    fn id(&self) -> ItemId {
        match self.review_id {
            Some(id) => ItemId::Number(id),
            None => ItemId::Text(format!(
                "{}|{}",
                self.review_date.as_deref().unwrap_or_default(),
                self.review_content
            )),
        }
    }

    /// Reviews are paged by creation time.
    fn cursor(&self) -> Option<Cursor> {
        self.written_at_millis().map(Cursor::Number)
    }
}

impl Searchable for Review {
    fn search_text(&self) -> String {
        self.review_content.clone()
    }
}
