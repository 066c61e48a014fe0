use std::cell::Cell;
use std::rc::Rc;

use listsync::{ItemId, PageItem as _, PagedList, SCROLL_THRESHOLD_PX, ScrollPosition};
use serde::Serialize;
use serde::de::DeserializeOwned;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;
use whynotbuy_types::{
    FavoriteMenu, FavoriteStore, Menu, MenuSort, Order, PAGE_SIZE, Review, ReviewTarget, Store,
    StoreSort,
};

use crate::api::Api;
use crate::config::ApiConfig;
use crate::endpoints::FavoriteKind;
use crate::favorites::Favorites;
use crate::sources::{self, ApiSource};
use crate::{LoadReport, init_logging, js_error, js_failure};

type Feed<T> = PagedList<ApiSource<T>>;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {e:?}")))
}

pub(crate) fn item_id(value: JsValue) -> Result<ItemId, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid id: {e:?}")))
}

fn new_feed<T: DeserializeOwned>(source: ApiSource<T>) -> Result<Feed<T>, JsValue>
where
    T: listsync::PageItem,
{
    init_logging();
    PagedList::new(source, PAGE_SIZE).map_err(js_error)
}

async fn load_next<T: DeserializeOwned + Clone>(list: &Feed<T>) -> Result<LoadReport, JsValue> {
    let outcome = list.load_next().await.map_err(|e| js_failure(&e))?;
    Ok(LoadReport::new(outcome, list.has_more()))
}

async fn on_scroll<T: DeserializeOwned + Clone>(
    list: &Feed<T>,
    position: ScrollPosition,
) -> Result<LoadReport, JsValue> {
    match list.trigger_near_bottom(position, SCROLL_THRESHOLD_PX).await {
        None => Ok(LoadReport::not_near_bottom(list.has_more())),
        Some(result) => {
            let outcome = result.map_err(|e| js_failure(&e))?;
            Ok(LoadReport::new(outcome, list.has_more()))
        }
    }
}

/// Declares a JS-facing feed over one collection, with the calls every list
/// page makes.
macro_rules! feed {
    ($(#[$meta:meta])* $name:ident => $item:ty { $($field:ident: $ty:ty),* $(,)? }) => {
        $(#[$meta])*
        #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
        pub struct $name {
            list: Feed<$item>,
            $($field: $ty,)*
        }

        #[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
        impl $name {
            /// Fetch the next page, unless one is loading or the list ended.
            pub async fn load_next(&self) -> Result<LoadReport, JsValue> {
                load_next(&self.list).await
            }

            /// Drop everything loaded so far. The next load starts over.
            pub fn reset(&self) {
                self.list.reset()
            }

            /// Call from the scroll handler with `scrollTop`, `clientHeight`
            /// and `scrollHeight` of the scrolling element.
            pub async fn on_scroll(
                &self,
                offset: f64,
                viewport: f64,
                extent: f64,
            ) -> Result<LoadReport, JsValue> {
                on_scroll(
                    &self.list,
                    ScrollPosition {
                        offset,
                        viewport,
                        extent,
                    },
                )
                .await
            }

            pub fn items(&self) -> Result<JsValue, JsValue> {
                self.list.with_items(|items| to_js(&items))
            }

            /// Loaded items matching `keyword`, ignoring case.
            pub fn search(&self, keyword: &str) -> Result<JsValue, JsValue> {
                to_js(&self.list.filtered(keyword))
            }

            #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
            pub fn has_more(&self) -> bool {
                self.list.has_more()
            }

            #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
            pub fn is_loading(&self) -> bool {
                self.list.is_loading()
            }
        }
    };
}

feed! {
    /// The home screen's menu list.
    MenuFeed => Menu { sort: Rc<Cell<MenuSort>> }
}

feed! {
    StoreFeed => Store { sort: Rc<Cell<StoreSort>> }
}

feed! {
    /// The signed-in user's purchase history.
    OrderHistory => Order {}
}

feed! {
    ReviewFeed => Review {}
}

feed! {
    /// "My favorite menus". Every loaded page also marks its menus as liked.
    FavoriteMenuFeed => FavoriteMenu {}
}

feed! {
    FavoriteStoreFeed => FavoriteStore {}
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl MenuFeed {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: ApiConfig, sort: Option<MenuSort>) -> Result<MenuFeed, JsValue> {
        let sort = Rc::new(Cell::new(sort.unwrap_or_default()));
        let list = new_feed(sources::menus(Api::new(config), sort.clone()))?;
        Ok(MenuFeed { list, sort })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn sort(&self) -> MenuSort {
        self.sort.get()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn sort_label(&self) -> String {
        self.sort.get().label().to_string()
    }

    /// Switch to the next sort order and load its first page.
    pub async fn cycle_sort(&self) -> Result<LoadReport, JsValue> {
        let sort = self.sort.get().next();
        log::info!("Menu sort changed to {}", sort.as_query());
        self.sort.set(sort);
        self.list.reset();
        load_next(&self.list).await
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl StoreFeed {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: ApiConfig, sort: Option<StoreSort>) -> Result<StoreFeed, JsValue> {
        let sort = Rc::new(Cell::new(sort.unwrap_or_default()));
        let list = new_feed(sources::stores(Api::new(config), sort.clone()))?;
        Ok(StoreFeed { list, sort })
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn sort(&self) -> StoreSort {
        self.sort.get()
    }

    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(getter))]
    pub fn sort_label(&self) -> String {
        self.sort.get().label().to_string()
    }

    pub async fn cycle_sort(&self) -> Result<LoadReport, JsValue> {
        let sort = self.sort.get().next();
        log::info!("Store sort changed to {}", sort.as_query());
        self.sort.set(sort);
        self.list.reset();
        load_next(&self.list).await
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl OrderHistory {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: ApiConfig) -> Result<OrderHistory, JsValue> {
        let list = new_feed(sources::orders(Api::new(config)))?;
        Ok(OrderHistory { list })
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl ReviewFeed {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(
        config: ApiConfig,
        target: ReviewTarget,
        target_id: JsValue,
    ) -> Result<ReviewFeed, JsValue> {
        let target_id = item_id(target_id)?;
        let list = new_feed(sources::reviews(Api::new(config), target, target_id))?;
        Ok(ReviewFeed { list })
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl FavoriteMenuFeed {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: ApiConfig, likes: &Favorites) -> Result<FavoriteMenuFeed, JsValue> {
        if likes.kind() != FavoriteKind::Menu {
            return Err(js_error("FavoriteMenuFeed needs menu favorites"));
        }
        let set = likes.shared();
        let list = new_feed(sources::favorite_menus(Api::new(config)))?
            .on_batch(move |batch: &[FavoriteMenu]| set.mark_on(batch.iter().map(|f| f.id())));
        Ok(FavoriteMenuFeed { list })
    }
}

#[cfg_attr(target_arch = "wasm32", wasm_bindgen)]
impl FavoriteStoreFeed {
    #[cfg_attr(target_arch = "wasm32", wasm_bindgen(constructor))]
    pub fn new(config: ApiConfig, likes: &Favorites) -> Result<FavoriteStoreFeed, JsValue> {
        if likes.kind() != FavoriteKind::Store {
            return Err(js_error("FavoriteStoreFeed needs store favorites"));
        }
        let set = likes.shared();
        let list = new_feed(sources::favorite_stores(Api::new(config)))?
            .on_batch(move |batch: &[FavoriteStore]| set.mark_on(batch.iter().map(|f| f.id())));
        Ok(FavoriteStoreFeed { list })
    }
}
