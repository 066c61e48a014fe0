use std::rc::Rc;

use listsync::{ItemId, KeyValueStore, MemoryStore, ToggleOutcome, ToggleSet};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

use crate::api::{Api, FavoriteRemote};
use crate::config::ApiConfig;
use crate::endpoints::FavoriteKind;
use crate::feeds::item_id;
use crate::{init_logging, js_failure};

pub(crate) type FavoriteSet = ToggleSet<FavoriteRemote, Rc<dyn KeyValueStore>>;

/// localStorage when the browser gives us one, otherwise a cache that only
/// lives as long as the page.
fn local_storage() -> Rc<dyn KeyValueStore> {
    #[cfg(target_arch = "wasm32")]
    {
        match listsync::BrowserStorage::local() {
            Ok(storage) => return Rc::new(storage),
            Err(e) => log::warn!("localStorage unavailable, likes won't survive a reload: {e}"),
        }
    }
    Rc::new(MemoryStore::new())
}

/// The liked menus or liked stores of the current user.
#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
pub struct Favorites {
    set: Rc<FavoriteSet>,
}

impl Favorites {
    pub(crate) fn shared(&self) -> Rc<FavoriteSet> {
        Rc::clone(&self.set)
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl Favorites {
    /// `on_change(id, liked)` is called whenever a heart should be redrawn:
    /// right after a click, and again if the server corrects or refuses it.
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(
        kind: FavoriteKind,
        config: ApiConfig,
        on_change: Option<js_sys::Function>,
    ) -> Favorites {
        init_logging();

        let remote = FavoriteRemote::new(Api::new(config), kind);
        let mut set = ToggleSet::load(kind.namespace(), remote, local_storage());
        if let Some(on_change) = on_change {
            set = set.on_render(move |id: &ItemId, liked: bool| {
                let id = serde_wasm_bindgen::to_value(id).unwrap_or(JsValue::NULL);
                if let Err(e) = on_change.call2(&JsValue::null(), &id, &JsValue::from_bool(liked)) {
                    log::error!("Favorite change callback threw: {e:?}");
                }
            });
        }
        log::info!("Loaded {} cached {kind:?} favorites", set.len());

        Favorites { set: Rc::new(set) }
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn kind(&self) -> FavoriteKind {
        self.set.remote().kind()
    }

    /// Flip the heart for `id`. Resolves to the state the heart ended up in,
    /// or `undefined` if a toggle for `id` was already running. Rejects with
    /// an `ApiFailure` after rolling the heart back.
    pub async fn toggle(&self, id: JsValue) -> Result<Option<bool>, JsValue> {
        let id = item_id(id)?;
        match self.set.toggle(id).await {
            Ok(ToggleOutcome::Skipped) => Ok(None),
            Ok(ToggleOutcome::Confirmed(on) | ToggleOutcome::Corrected(on)) => Ok(Some(on)),
            Err(e) => Err(js_failure(e.fetch_error())),
        }
    }

    pub fn is_on(&self, id: JsValue) -> Result<bool, JsValue> {
        Ok(self.set.contains(&item_id(id)?))
    }

    pub fn is_pending(&self, id: JsValue) -> Result<bool, JsValue> {
        Ok(self.set.is_in_flight(&item_id(id)?))
    }

    pub fn ids(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.set.ids())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e:?}")))
    }
}
