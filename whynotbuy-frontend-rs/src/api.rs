//! The HTTP side of every list and toggle: one request in, one normalized
//! `Page` or `ToggleAck` (or a `FetchError`) out.

use std::rc::Rc;

use listsync::{FetchError, ItemId, Page, PageShape, ToggleAck, ToggleRemote};
use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
use crate::endpoints::{self, Endpoint, FavoriteKind};
use crate::utils::{RequestError, Verb, hit_api};

/// Cheap to clone; all clones share one config.
#[derive(Debug, Clone)]
pub struct Api {
    config: Rc<ApiConfig>,
}

impl Api {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Body of a 2xx response, or the error the status maps to.
    async fn send(&self, verb: Verb, endpoint: &Endpoint) -> Result<String, FetchError> {
        let response = hit_api(&self.config, verb, endpoint)
            .await
            .map_err(|e| match e {
                RequestError::Url(e) => {
                    FetchError::Network(format!("bad URL for {}: {e}", endpoint.path))
                }
                RequestError::Fetch(e) => FetchError::Network(format!("{e:?}")),
            })?;

        let ok = response.ok();
        let status = u16::from(response.status());
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("{e:?}")))?;

        if !ok {
            log::warn!("{verb:?} {} failed with status {status}", endpoint.path);
            return Err(FetchError::from_status(status, body));
        }
        Ok(body)
    }

    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        shape: &PageShape,
    ) -> Result<Page<T>, FetchError> {
        let body = self.send(Verb::Get, endpoint).await?;
        listsync::normalize_page(&listsync::parse_body(&body)?, shape)
    }
}

/// Adds and removes favorites for one [`FavoriteKind`].
#[derive(Debug, Clone)]
pub struct FavoriteRemote {
    api: Api,
    kind: FavoriteKind,
}

impl FavoriteRemote {
    pub fn new(api: Api, kind: FavoriteKind) -> Self {
        Self { api, kind }
    }

    pub fn kind(&self) -> FavoriteKind {
        self.kind
    }
}

impl ToggleRemote for FavoriteRemote {
    async fn apply_on(&self, id: &ItemId) -> Result<ToggleAck, FetchError> {
        let body = self
            .api
            .send(Verb::Post, &endpoints::favorite_on(self.kind, id))
            .await?;
        listsync::parse_ack(&body)
    }

    async fn apply_off(&self, id: &ItemId) -> Result<ToggleAck, FetchError> {
        let body = self
            .api
            .send(Verb::Delete, &endpoints::favorite_off(self.kind, id))
            .await?;
        listsync::parse_ack(&body)
    }
}
