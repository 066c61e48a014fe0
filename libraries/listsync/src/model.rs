//! Items, ids, cursors and pages as the list and toggle machinery sees them.

use std::fmt;

/// Pagination cursor handed out by the server.
///
/// Never interpreted client-side: whatever came back in a page is sent back
/// verbatim with the next request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Cursor {
    Number(i64),
    Token(String),
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Number(n) => write!(f, "{n}"),
            Cursor::Token(t) => f.write_str(t),
        }
    }
}

impl From<i64> for Cursor {
    fn from(n: i64) -> Self {
        Cursor::Number(n)
    }
}

impl From<&str> for Cursor {
    fn from(t: &str) -> Self {
        Cursor::Token(t.to_string())
    }
}

impl From<ItemId> for Cursor {
    fn from(id: ItemId) -> Self {
        match id {
            ItemId::Number(n) => Cursor::Number(n),
            ItemId::Text(t) => Cursor::Token(t),
        }
    }
}

/// Server-assigned identifier, stable across pages.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(untagged)]
pub enum ItemId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Number(n) => write!(f, "{n}"),
            ItemId::Text(t) => f.write_str(t),
        }
    }
}

impl From<i64> for ItemId {
    fn from(n: i64) -> Self {
        ItemId::Number(n)
    }
}

impl From<&str> for ItemId {
    fn from(t: &str) -> Self {
        ItemId::Text(t.to_string())
    }
}

impl From<String> for ItemId {
    fn from(t: String) -> Self {
        ItemId::Text(t)
    }
}

/// Anything that can be listed page by page.
pub trait PageItem {
    fn id(&self) -> ItemId;

    /// The cursor to resume after this item when the server didn't send one.
    /// Defaults to the item's id; lists keyed by something else (favorite ids,
    /// timestamps) override it.
    fn cursor(&self) -> Option<Cursor> {
        Some(self.id().into())
    }
}

/// Text matched by the client-side search box.
pub trait Searchable {
    fn search_text(&self) -> String;
}

/// One server response to a list fetch, already normalized.
///
/// `cursor` and `has_more` are `None` when the server didn't say; the list
/// falls back to the last item's cursor and to `items.len() == page_size`.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub cursor: Option<Cursor>,
    pub has_more: Option<bool>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items,
            cursor: None,
            has_more: None,
        }
    }

    pub fn with_cursor(mut self, cursor: impl Into<Cursor>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_has_more(mut self, has_more: bool) -> Self {
        self.has_more = Some(has_more);
        self
    }
}

/// Fallback cursor: whatever the last item of the batch resumes from.
pub fn last_item_cursor<T: PageItem>(items: &[T]) -> Option<Cursor> {
    items.last().and_then(PageItem::cursor)
}
