//! Turning the API's many response shapes into `Page`s and `ToggleAck`s.
//!
//! The same information comes back under different names depending on the
//! endpoint (`menus`, `favoriteMenus`, `FavoriteMenus`, `hasData`, `hasNext`,
//! `nextData` ...), sometimes wrapped in `{ isSuccess, result }` and sometimes
//! not. All of that is absorbed here so the list code only sees `Page`.

use serde::Deserialize as _;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FetchError;
use crate::model::{Cursor, Page};
use crate::toggle::ToggleAck;

const CURSOR_KEYS: &[&str] = &["nextCursor", "cursor"];
const HAS_MORE_KEYS: &[&str] = &["hasData", "hasNext", "nextData", "hasMore"];

/// How one list endpoint lays out its page.
#[derive(Debug, Clone, Copy)]
pub struct PageShape {
    /// Keys that may hold the item array, tried in order.
    pub item_keys: &'static [&'static str],
    /// A `nextCursor` of `0` (or none at all) means the end of the list.
    pub zero_cursor_ends: bool,
}

impl PageShape {
    pub const fn new(item_keys: &'static [&'static str]) -> Self {
        Self {
            item_keys,
            zero_cursor_ends: false,
        }
    }

    pub const fn zero_cursor_ends(mut self) -> Self {
        self.zero_cursor_ends = true;
        self
    }
}

/// Parse a response body. An empty body parses as `null`.
pub fn parse_body(text: &str) -> Result<Value, FetchError> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text).map_err(|e| FetchError::MalformedResponse(format!("{e}: {text}")))
}

/// Unwrap `{ isSuccess, result }` if present.
pub fn payload(body: &Value) -> Result<&Value, FetchError> {
    if body.get("isSuccess").and_then(Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("request failed")
            .to_string();
        return Err(FetchError::Rejected { message });
    }
    match body.get("result") {
        Some(result) if result.is_object() => Ok(result),
        _ => Ok(body),
    }
}

pub fn normalize_page<T: DeserializeOwned>(
    body: &Value,
    shape: &PageShape,
) -> Result<Page<T>, FetchError> {
    let payload = payload(body)?;

    let items = match shape
        .item_keys
        .iter()
        .find_map(|key| payload.get(*key).filter(|v| v.is_array()))
    {
        Some(items) => Vec::<T>::deserialize(items)
            .map_err(|e| FetchError::MalformedResponse(format!("bad list item: {e}")))?,
        None => Vec::new(),
    };

    let mut cursor = CURSOR_KEYS
        .iter()
        .find_map(|key| payload.get(*key).filter(|v| !v.is_null()))
        .map(|v| Cursor::deserialize(v))
        .transpose()
        .map_err(|e| FetchError::MalformedResponse(format!("bad cursor: {e}")))?;

    let mut has_more = HAS_MORE_KEYS
        .iter()
        .find_map(|key| payload.get(*key).and_then(Value::as_bool));

    if shape.zero_cursor_ends {
        match cursor {
            None | Some(Cursor::Number(0)) => {
                cursor = None;
                has_more = Some(false);
            }
            Some(_) => has_more = has_more.or(Some(true)),
        }
    }

    Ok(Page {
        items,
        cursor,
        has_more,
    })
}

/// Read `favoritedStatus` from a toggle response, if there is one.
pub fn normalize_ack(body: &Value) -> Result<ToggleAck, FetchError> {
    if body.is_null() {
        return Ok(ToggleAck::default());
    }
    let payload = payload(body)?;
    Ok(ToggleAck {
        status: payload.get("favoritedStatus").and_then(Value::as_bool),
    })
}

/// Read the body of a successful toggle response. The server already applied
/// the change, so a body that isn't JSON is logged and treated as an ack
/// without status.
pub fn parse_ack(text: &str) -> Result<ToggleAck, FetchError> {
    match parse_body(text) {
        Ok(body) => normalize_ack(&body),
        Err(e) => {
            log::warn!("Toggle response is not JSON, keeping the local state: {e}");
            Ok(ToggleAck::default())
        }
    }
}
