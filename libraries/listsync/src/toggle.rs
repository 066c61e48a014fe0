//! # ToggleSet
//! A set of item ids in the "on" state (liked, favorited) that updates
//! instantly when the user clicks and catches up with the server afterwards.
//!
//! `toggle` flips the local set, persists it and renders before the request
//! goes out. If the server disagrees the set follows the server; if the
//! request fails the flip is undone. Only one toggle per id runs at a time.

use std::cell::RefCell;
use std::collections::{BTreeSet, HashSet};

use crate::error::{FetchError, StorageError, ToggleError};
use crate::model::ItemId;
use crate::storage::KeyValueStore;

/// What the server said after a toggle request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToggleAck {
    /// Authoritative state, when the server reports one.
    pub status: Option<bool>,
}

#[allow(async_fn_in_trait)]
pub trait ToggleRemote {
    async fn apply_on(&self, id: &ItemId) -> Result<ToggleAck, FetchError>;
    async fn apply_off(&self, id: &ItemId) -> Result<ToggleAck, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// A toggle for this id was already in flight.
    Skipped,
    Confirmed(bool),
    /// The server reported a different state than the one we guessed.
    Corrected(bool),
}

pub struct ToggleSet<R, K> {
    namespace: String,
    remote: R,
    storage: K,
    render: Option<Box<dyn Fn(&ItemId, bool)>>,
    on: RefCell<BTreeSet<ItemId>>,
    in_flight: RefCell<HashSet<ItemId>>,
}

impl<R: ToggleRemote, K: KeyValueStore> ToggleSet<R, K> {
    /// Build the set from whatever was persisted under `namespace`.
    pub fn load(namespace: impl Into<String>, remote: R, storage: K) -> Self {
        let namespace = namespace.into();
        let on = match storage.get(&namespace) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ItemId>>(&raw) {
                Ok(ids) => ids.into_iter().collect(),
                Err(e) => {
                    log::warn!("Ignoring unreadable {namespace} cache: {e}");
                    BTreeSet::new()
                }
            },
            Ok(None) => BTreeSet::new(),
            Err(e) => {
                log::warn!("Could not read {namespace} cache: {e}");
                BTreeSet::new()
            }
        };

        Self {
            namespace,
            remote,
            storage,
            render: None,
            on: RefCell::new(on),
            in_flight: RefCell::new(HashSet::new()),
        }
    }

    /// Called whenever an id changes state, including corrections and
    /// rollbacks.
    pub fn on_render(mut self, callback: impl Fn(&ItemId, bool) + 'static) -> Self {
        self.render = Some(Box::new(callback));
        self
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.on.borrow().contains(id)
    }

    pub fn ids(&self) -> Vec<ItemId> {
        self.on.borrow().iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.on.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.on.borrow().is_empty()
    }

    pub fn is_in_flight(&self, id: &ItemId) -> bool {
        self.in_flight.borrow().contains(id)
    }

    /// Flip `id`, tell the server, and reconcile with its answer.
    pub async fn toggle(&self, id: ItemId) -> Result<ToggleOutcome, ToggleError> {
        if !self.in_flight.borrow_mut().insert(id.clone()) {
            log::debug!("Toggle for {id} already in flight");
            return Ok(ToggleOutcome::Skipped);
        }
        let _in_flight = InFlightGuard {
            in_flight: &self.in_flight,
            id: id.clone(),
        };

        let was_on = self.contains(&id);
        let now_on = !was_on;
        let snapshot = self.snapshot();
        self.apply_locally(&id, now_on);

        let result = if now_on {
            self.remote.apply_on(&id).await
        } else {
            self.remote.apply_off(&id).await
        };

        match result {
            Ok(ToggleAck {
                status: Some(server_on),
            }) if server_on != now_on => {
                log::info!("Server reports {id} as {server_on} in {}", self.namespace);
                self.apply_locally(&id, server_on);
                Ok(ToggleOutcome::Corrected(server_on))
            }
            Ok(_) => Ok(ToggleOutcome::Confirmed(now_on)),
            Err(source) => {
                log::error!("Toggling {id} in {} failed: {source}", self.namespace);
                self.roll_back(&id, was_on, snapshot);
                Err(ToggleError::Remote {
                    id,
                    reverted_to: was_on,
                    source,
                })
            }
        }
    }

    /// Record ids the server just listed as "on", without a round-trip.
    /// Ids with a toggle in flight are left to that toggle.
    pub fn mark_on(&self, ids: impl IntoIterator<Item = ItemId>) {
        let added: Vec<ItemId> = {
            let in_flight = self.in_flight.borrow();
            let mut on = self.on.borrow_mut();
            ids.into_iter()
                .filter(|id| !in_flight.contains(id))
                .filter(|id| on.insert(id.clone()))
                .collect()
        };
        if added.is_empty() {
            return;
        }
        self.persist();
        for id in &added {
            self.render(id, true);
        }
    }

    fn apply_locally(&self, id: &ItemId, on: bool) {
        self.set_member(id, on);
        self.persist();
        self.render(id, on);
    }

    fn set_member(&self, id: &ItemId, on: bool) {
        let mut set = self.on.borrow_mut();
        if on {
            set.insert(id.clone());
        } else {
            set.remove(id);
        }
    }

    fn render(&self, id: &ItemId, on: bool) {
        if let Some(render) = &self.render {
            render(id, on);
        }
    }

    fn snapshot(&self) -> Snapshot {
        let stored = match self.storage.get(&self.namespace) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log::warn!("Could not read {} before toggling: {e}", self.namespace);
                None
            }
        };
        Snapshot {
            ids: self.on.borrow().clone(),
            stored,
        }
    }

    /// Undo a failed toggle. The stored value is put back byte for byte,
    /// unless another change landed while the request was out.
    fn roll_back(&self, id: &ItemId, was_on: bool, snapshot: Snapshot) {
        self.set_member(id, was_on);
        let untouched = *self.on.borrow() == snapshot.ids;
        match snapshot.stored {
            Some(stored) if untouched => {
                let result = match &stored {
                    Some(raw) => self.storage.set(&self.namespace, raw),
                    None => self.storage.remove(&self.namespace),
                };
                if let Err(e) = result {
                    log::error!("Failed to restore {}: {e}", self.namespace);
                }
            }
            _ => self.persist(),
        }
        self.render(id, was_on);
    }

    fn persist(&self) {
        let ids = self.ids();
        let result = serde_json::to_string(&ids)
            .map_err(StorageError::from)
            .and_then(|json| self.storage.set(&self.namespace, &json));
        if let Err(e) = result {
            log::error!("Failed to persist {}: {e}", self.namespace);
        }
    }
}

/// The set and its stored form as they were before a toggle. `stored` is
/// `None` when the store could not be read.
struct Snapshot {
    ids: BTreeSet<ItemId>,
    stored: Option<Option<String>>,
}

struct InFlightGuard<'a> {
    in_flight: &'a RefCell<HashSet<ItemId>>,
    id: ItemId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.borrow_mut().remove(&self.id);
    }
}
