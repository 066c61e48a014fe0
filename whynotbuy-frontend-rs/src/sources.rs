use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use listsync::{Cursor, FetchError, ItemId, Page, PageShape, PageSource};
use serde::de::DeserializeOwned;
use whynotbuy_types::{
    FavoriteMenu, FavoriteStore, Menu, MenuSort, Order, Review, ReviewTarget, Store, StoreSort,
};

use crate::api::Api;
use crate::endpoints::{self, Endpoint};

type BuildEndpoint = Box<dyn Fn(Option<&Cursor>, usize) -> Endpoint>;

/// A collection endpoint: how to address a page, and how its response is laid out.
pub struct ApiSource<T> {
    api: Api,
    shape: PageShape,
    endpoint: BuildEndpoint,
    _item: PhantomData<T>,
}

impl<T> ApiSource<T> {
    fn new(
        api: Api,
        shape: PageShape,
        endpoint: impl Fn(Option<&Cursor>, usize) -> Endpoint + 'static,
    ) -> Self {
        Self {
            api,
            shape,
            endpoint: Box::new(endpoint),
            _item: PhantomData,
        }
    }

    pub fn endpoint(&self, cursor: Option<&Cursor>, page_size: usize) -> Endpoint {
        (self.endpoint)(cursor, page_size)
    }
}

impl<T: DeserializeOwned> PageSource for ApiSource<T> {
    type Item = T;

    async fn fetch_page(
        &self,
        cursor: Option<&Cursor>,
        page_size: usize,
    ) -> Result<Page<T>, FetchError> {
        let endpoint = self.endpoint(cursor, page_size);
        self.api.fetch_page(&endpoint, &self.shape).await
    }
}

/// Menus in the order currently held by `sort`.
pub fn menus(api: Api, sort: Rc<Cell<MenuSort>>) -> ApiSource<Menu> {
    ApiSource::new(api, endpoints::MENUS, move |cursor, size| {
        endpoints::menus(cursor, size, sort.get())
    })
}

pub fn stores(api: Api, sort: Rc<Cell<StoreSort>>) -> ApiSource<Store> {
    ApiSource::new(api, endpoints::STORES, move |cursor, size| {
        endpoints::stores(cursor, size, sort.get())
    })
}

pub fn orders(api: Api) -> ApiSource<Order> {
    ApiSource::new(api, endpoints::ORDERS, endpoints::orders)
}

pub fn reviews(api: Api, target: ReviewTarget, target_id: ItemId) -> ApiSource<Review> {
    ApiSource::new(api, endpoints::REVIEWS, move |cursor, size| {
        endpoints::reviews(target, &target_id, cursor, size)
    })
}

pub fn favorite_menus(api: Api) -> ApiSource<FavoriteMenu> {
    ApiSource::new(api, endpoints::FAVORITE_MENUS, endpoints::favorite_menus)
}

pub fn favorite_stores(api: Api) -> ApiSource<FavoriteStore> {
    ApiSource::new(api, endpoints::FAVORITE_STORES, endpoints::favorite_stores)
}
