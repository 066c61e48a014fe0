#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use futures::channel::oneshot;
use listsync::{Cursor, FetchError, ItemId, Page, PageItem, PageSource, ToggleAck, ToggleRemote};

#[derive(Debug, Clone, PartialEq)]
pub struct Menu {
    pub menu_id: i64,
}

impl PageItem for Menu {
    fn id(&self) -> ItemId {
        ItemId::Number(self.menu_id)
    }
}

pub fn menus(ids: std::ops::RangeInclusive<i64>) -> Vec<Menu> {
    ids.map(|menu_id| Menu { menu_id }).collect()
}

type PageReply = Result<Page<Menu>, FetchError>;

/// A page source whose responses are released by hand, so a test can look at
/// the list while a request is still outstanding.
#[derive(Default)]
pub struct GatedSource {
    requests: RefCell<Vec<Option<Cursor>>>,
    pending: RefCell<VecDeque<oneshot::Receiver<PageReply>>>,
}

impl GatedSource {
    /// Queue a response slot for the next request.
    pub fn expect(&self) -> oneshot::Sender<PageReply> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }

    pub fn requests(&self) -> Vec<Option<Cursor>> {
        self.requests.borrow().clone()
    }
}

impl PageSource for GatedSource {
    type Item = Menu;

    async fn fetch_page(&self, cursor: Option<&Cursor>, _page_size: usize) -> PageReply {
        self.requests.borrow_mut().push(cursor.cloned());
        let slot = self.pending.borrow_mut().pop_front();
        match slot {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("response dropped".to_string()))),
            None => Err(FetchError::Network("unexpected request".to_string())),
        }
    }
}

/// A page source that answers immediately from a script.
#[derive(Default)]
pub struct ScriptedSource {
    requests: RefCell<Vec<Option<Cursor>>>,
    replies: RefCell<VecDeque<PageReply>>,
}

impl ScriptedSource {
    pub fn new(replies: impl IntoIterator<Item = PageReply>) -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            replies: RefCell::new(replies.into_iter().collect()),
        }
    }

    pub fn requests(&self) -> Vec<Option<Cursor>> {
        self.requests.borrow().clone()
    }
}

impl PageSource for ScriptedSource {
    type Item = Menu;

    async fn fetch_page(&self, cursor: Option<&Cursor>, _page_size: usize) -> PageReply {
        self.requests.borrow_mut().push(cursor.cloned());
        let reply = self.replies.borrow_mut().pop_front();
        reply.unwrap_or_else(|| Err(FetchError::Network("script exhausted".to_string())))
    }
}

type AckReply = Result<ToggleAck, FetchError>;

#[derive(Default)]
pub struct GatedRemote {
    calls: RefCell<Vec<(ItemId, bool)>>,
    pending: RefCell<VecDeque<oneshot::Receiver<AckReply>>>,
}

impl GatedRemote {
    pub fn expect(&self) -> oneshot::Sender<AckReply> {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().push_back(rx);
        tx
    }

    pub fn calls(&self) -> Vec<(ItemId, bool)> {
        self.calls.borrow().clone()
    }

    async fn call(&self, id: &ItemId, on: bool) -> AckReply {
        self.calls.borrow_mut().push((id.clone(), on));
        let slot = self.pending.borrow_mut().pop_front();
        match slot {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(FetchError::Network("response dropped".to_string()))),
            None => Err(FetchError::Network("unexpected request".to_string())),
        }
    }
}

impl ToggleRemote for GatedRemote {
    async fn apply_on(&self, id: &ItemId) -> AckReply {
        self.call(id, true).await
    }

    async fn apply_off(&self, id: &ItemId) -> AckReply {
        self.call(id, false).await
    }
}

pub type Renders = Rc<RefCell<Vec<(ItemId, bool)>>>;

pub fn recorder() -> (Renders, impl Fn(&ItemId, bool) + 'static) {
    let renders: Renders = Rc::default();
    let sink = renders.clone();
    (renders, move |id: &ItemId, on: bool| {
        sink.borrow_mut().push((id.clone(), on))
    })
}
