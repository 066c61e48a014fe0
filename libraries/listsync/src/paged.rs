//! # PagedList
//! Keeps the client-side copy of a server-paginated collection (menus, stores,
//! orders, reviews, favorites) and walks it forward one page at a time.
//!
//! At most one page request is in flight per list. `reset()` throws the whole
//! list away, including whatever answer the in-flight request brings back.

use std::cell::RefCell;

use crate::error::{FetchError, ListError};
use crate::model::{Cursor, Page, PageItem, Searchable, last_item_cursor};

/// Distance from the bottom of the scroll area, in pixels, at which the next
/// page is requested.
pub const SCROLL_THRESHOLD_PX: f64 = 200.0;

/// Fetches one page of a collection. This is the only way a list touches the
/// network.
#[allow(async_fn_in_trait)]
pub trait PageSource {
    type Item;

    async fn fetch_page(
        &self,
        cursor: Option<&Cursor>,
        page_size: usize,
    ) -> Result<Page<Self::Item>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ListState<T> {
    pub items: Vec<T>,
    pub cursor: Option<Cursor>,
    pub has_more: bool,
    pub loading: bool,
    /// Bumped by every reset; a response for an older generation is dropped.
    pub generation: u64,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
            has_more: true,
            loading: false,
            generation: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Appended { count: usize, has_more: bool },
    /// Already loading, or nothing left to load.
    Skipped,
    /// The list was reset while the request was in flight.
    Discarded,
}

/// Where the viewport sits inside the scrollable region.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollPosition {
    /// Distance scrolled from the top.
    pub offset: f64,
    /// Height of the visible area.
    pub viewport: f64,
    /// Full height of the scrollable content.
    pub extent: f64,
}

impl ScrollPosition {
    pub fn is_near_bottom(&self, threshold: f64) -> bool {
        self.offset + self.viewport >= self.extent - threshold
    }
}

type CursorFallback<T> = fn(&[T]) -> Option<Cursor>;

pub struct PagedList<S: PageSource> {
    source: S,
    page_size: usize,
    cursor_fallback: CursorFallback<S::Item>,
    on_batch: Option<Box<dyn Fn(&[S::Item])>>,
    // never borrowed across an .await
    state: RefCell<ListState<S::Item>>,
}

impl<S> PagedList<S>
where
    S: PageSource,
    S::Item: PageItem,
{
    pub fn new(source: S, page_size: usize) -> Result<Self, ListError> {
        if page_size == 0 {
            return Err(ListError::InvalidPageSize);
        }
        Ok(Self {
            source,
            page_size,
            cursor_fallback: last_item_cursor::<S::Item>,
            on_batch: None,
            state: RefCell::new(ListState::default()),
        })
    }
}

impl<S: PageSource> PagedList<S> {
    /// Replace the rule used to derive the next cursor when a page doesn't
    /// carry one.
    pub fn with_cursor_fallback(mut self, fallback: CursorFallback<S::Item>) -> Self {
        self.cursor_fallback = fallback;
        self
    }

    /// Called with every freshly appended batch.
    pub fn on_batch(mut self, callback: impl Fn(&[S::Item]) + 'static) -> Self {
        self.on_batch = Some(Box::new(callback));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.borrow().items.is_empty()
    }

    pub fn cursor(&self) -> Option<Cursor> {
        self.state.borrow().cursor.clone()
    }

    pub fn has_more(&self) -> bool {
        self.state.borrow().has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }

    pub fn with_items<R>(&self, f: impl FnOnce(&[S::Item]) -> R) -> R {
        f(&self.state.borrow().items)
    }

    /// Forget everything and start again from the first page.
    ///
    /// A request still in flight is not aborted, but its answer is ignored.
    pub fn reset(&self) {
        let mut state = self.state.borrow_mut();
        if state.loading {
            log::info!(
                "Resetting list during an in-flight request (generation {})",
                state.generation
            );
        }
        let generation = state.generation.wrapping_add(1);
        *state = ListState {
            generation,
            ..ListState::default()
        };
    }
}

impl<S> PagedList<S>
where
    S: PageSource,
    S::Item: Clone,
{
    pub fn items(&self) -> Vec<S::Item> {
        self.state.borrow().items.clone()
    }

    /// Fetch the page after the current cursor and append it.
    ///
    /// Does nothing while another page is loading or once the server said
    /// there is nothing more.
    pub async fn load_next(&self) -> Result<LoadOutcome, FetchError> {
        let (cursor, generation) = {
            let mut state = self.state.borrow_mut();
            if state.loading || !state.has_more {
                return Ok(LoadOutcome::Skipped);
            }
            state.loading = true;
            (state.cursor.clone(), state.generation)
        };
        let _loading = LoadingGuard {
            state: &self.state,
            generation,
        };

        log::debug!(
            "Requesting page after {cursor:?} (size {})",
            self.page_size
        );
        let result = self.source.fetch_page(cursor.as_ref(), self.page_size).await;

        if self.state.borrow().generation != generation {
            log::warn!("Dropping page that arrived after a reset");
            return Ok(LoadOutcome::Discarded);
        }

        let page = result.inspect_err(|e| log::error!("Failed to load page: {e}"))?;
        let Page {
            items,
            cursor: next_cursor,
            has_more,
        } = page;

        let batch = self.on_batch.as_ref().map(|_| items.clone());
        let count = items.len();
        let has_more = {
            let mut state = self.state.borrow_mut();
            let next_cursor = next_cursor.or_else(|| (self.cursor_fallback)(&items));
            if let Some(next_cursor) = next_cursor {
                state.cursor = Some(next_cursor);
            }
            state.has_more = has_more.unwrap_or(count == self.page_size);
            state.items.extend(items);
            state.loading = false;
            state.has_more
        };
        log::debug!("Appended {count} items, has_more = {has_more}");

        if let (Some(callback), Some(batch)) = (&self.on_batch, batch) {
            callback(&batch);
        }

        Ok(LoadOutcome::Appended { count, has_more })
    }

    /// Load the next page if the viewport is within `threshold` of the end.
    pub async fn trigger_near_bottom(
        &self,
        position: ScrollPosition,
        threshold: f64,
    ) -> Option<Result<LoadOutcome, FetchError>> {
        if !position.is_near_bottom(threshold) {
            return None;
        }
        Some(self.load_next().await)
    }
}

impl<S> PagedList<S>
where
    S: PageSource,
    S::Item: Searchable + Clone,
{
    /// Loaded items whose text contains `keyword`, ignoring case. An empty
    /// keyword matches everything.
    pub fn filtered(&self, keyword: &str) -> Vec<S::Item> {
        let keyword = keyword.trim().to_lowercase();
        let state = self.state.borrow();
        if keyword.is_empty() {
            return state.items.clone();
        }
        state
            .items
            .iter()
            .filter(|item| item.search_text().to_lowercase().contains(&keyword))
            .cloned()
            .collect()
    }
}

/// Clears `loading` when a fetch ends, however it ends (including the future
/// being dropped), unless a reset already started a new generation.
struct LoadingGuard<'a, T> {
    state: &'a RefCell<ListState<T>>,
    generation: u64,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        if state.generation == self.generation {
            state.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;
    use futures::FutureExt as _;
    use futures::executor::block_on;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    struct Menu {
        id: i64,
        name: &'static str,
    }

    impl PageItem for Menu {
        fn id(&self) -> ItemId {
            self.id.into()
        }
    }

    impl Searchable for Menu {
        fn search_text(&self) -> String {
            self.name.to_string()
        }
    }

    #[derive(Default)]
    struct Scripted {
        calls: RefCell<Vec<Option<Cursor>>>,
        responses: RefCell<VecDeque<Result<Page<Menu>, FetchError>>>,
    }

    impl Scripted {
        fn push(&self, response: Result<Page<Menu>, FetchError>) {
            self.responses.borrow_mut().push_back(response);
        }
    }

    impl PageSource for Scripted {
        type Item = Menu;

        async fn fetch_page(
            &self,
            cursor: Option<&Cursor>,
            _page_size: usize,
        ) -> Result<Page<Menu>, FetchError> {
            self.calls.borrow_mut().push(cursor.cloned());
            self.responses
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Ok(Page::new(vec![])))
        }
    }

    fn menus(ids: std::ops::RangeInclusive<i64>) -> Vec<Menu> {
        ids.map(|id| Menu { id, name: "menu" }).collect()
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            PagedList::new(Scripted::default(), 0),
            Err(ListError::InvalidPageSize)
        ));
    }

    #[test]
    fn has_more_falls_back_to_full_page() {
        let list = PagedList::new(Scripted::default(), 3).unwrap();
        list.source().push(Ok(Page::new(menus(1..=3))));
        list.source().push(Ok(Page::new(menus(4..=5))));

        let first = block_on(list.load_next()).unwrap();
        assert_eq!(
            first,
            LoadOutcome::Appended {
                count: 3,
                has_more: true
            }
        );
        assert_eq!(list.cursor(), Some(Cursor::Number(3)));

        let second = block_on(list.load_next()).unwrap();
        assert_eq!(
            second,
            LoadOutcome::Appended {
                count: 2,
                has_more: false
            }
        );
        assert_eq!(list.cursor(), Some(Cursor::Number(5)));
        assert_eq!(list.len(), 5);
    }

    #[test]
    fn explicit_cursor_beats_fallback() {
        let list = PagedList::new(Scripted::default(), 2).unwrap();
        list.source()
            .push(Ok(Page::new(menus(1..=2)).with_cursor("next-token")));
        block_on(list.load_next()).unwrap();
        assert_eq!(list.cursor(), Some(Cursor::Token("next-token".to_string())));
    }

    #[test]
    fn empty_page_keeps_previous_cursor() {
        let list = PagedList::new(Scripted::default(), 2).unwrap();
        list.source().push(Ok(Page::new(menus(1..=2))));
        list.source().push(Ok(Page::new(vec![]).with_has_more(true)));
        block_on(list.load_next()).unwrap();
        block_on(list.load_next()).unwrap();
        assert_eq!(list.cursor(), Some(Cursor::Number(2)));
        assert!(list.has_more());
    }

    #[test]
    fn custom_cursor_fallback() {
        let list = PagedList::new(Scripted::default(), 2)
            .unwrap()
            .with_cursor_fallback(|items| items.first().map(|m| Cursor::Number(m.id * 10)));
        list.source().push(Ok(Page::new(menus(4..=5))));
        block_on(list.load_next()).unwrap();
        assert_eq!(list.cursor(), Some(Cursor::Number(40)));
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let list = PagedList::new(Scripted::default(), 2).unwrap();
        list.source().push(Ok(Page::new(menus(1..=2))));
        list.source()
            .push(Err(FetchError::Network("connection reset".to_string())));
        block_on(list.load_next()).unwrap();

        let err = block_on(list.load_next()).unwrap_err();
        assert_eq!(err, FetchError::Network("connection reset".to_string()));
        assert_eq!(list.len(), 2);
        assert_eq!(list.cursor(), Some(Cursor::Number(2)));
        assert!(list.has_more());
        assert!(!list.is_loading());
    }

    #[test]
    fn on_batch_sees_only_new_items() {
        let seen = std::rc::Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let list = PagedList::new(Scripted::default(), 2)
            .unwrap()
            .on_batch(move |batch: &[Menu]| {
                sink.borrow_mut().push(batch.iter().map(|m| m.id).collect::<Vec<_>>())
            });
        list.source().push(Ok(Page::new(menus(1..=2))));
        list.source().push(Ok(Page::new(menus(3..=3))));
        block_on(list.load_next()).unwrap();
        block_on(list.load_next()).unwrap();
        assert_eq!(*seen.borrow(), vec![vec![1, 2], vec![3]]);
    }

    #[test]
    fn dropping_an_in_flight_load_clears_loading() {
        let (tx, rx) = futures::channel::oneshot::channel::<()>();
        struct Stalled(RefCell<Option<futures::channel::oneshot::Receiver<()>>>);
        impl PageSource for Stalled {
            type Item = Menu;
            async fn fetch_page(
                &self,
                _cursor: Option<&Cursor>,
                _page_size: usize,
            ) -> Result<Page<Menu>, FetchError> {
                let rx = self.0.borrow_mut().take();
                if let Some(rx) = rx {
                    let _ = rx.await;
                }
                Ok(Page::new(vec![]))
            }
        }

        let list = PagedList::new(Stalled(RefCell::new(Some(rx))), 10).unwrap();
        {
            let mut fut = Box::pin(list.load_next());
            assert!(fut.as_mut().now_or_never().is_none());
            assert!(list.is_loading());
        }
        assert!(!list.is_loading());
        drop(tx);
    }

    #[test]
    fn scroll_threshold() {
        let near = ScrollPosition {
            offset: 1500.0,
            viewport: 800.0,
            extent: 2450.0,
        };
        assert!(near.is_near_bottom(SCROLL_THRESHOLD_PX));

        let far = ScrollPosition {
            offset: 1000.0,
            viewport: 800.0,
            extent: 2450.0,
        };
        assert!(!far.is_near_bottom(SCROLL_THRESHOLD_PX));
    }

    #[test]
    fn trigger_near_bottom_only_loads_near_the_end() {
        let list = PagedList::new(Scripted::default(), 2).unwrap();
        list.source().push(Ok(Page::new(menus(1..=2))));

        let far = ScrollPosition {
            offset: 0.0,
            viewport: 600.0,
            extent: 3000.0,
        };
        assert!(block_on(list.trigger_near_bottom(far, SCROLL_THRESHOLD_PX)).is_none());
        assert!(list.source().calls.borrow().is_empty());

        let near = ScrollPosition {
            offset: 2300.0,
            viewport: 600.0,
            extent: 3000.0,
        };
        let outcome = block_on(list.trigger_near_bottom(near, SCROLL_THRESHOLD_PX));
        assert!(matches!(outcome, Some(Ok(LoadOutcome::Appended { count: 2, .. }))));
    }

    #[test]
    fn filtered_matches_case_insensitively() {
        let list = PagedList::new(Scripted::default(), 3).unwrap();
        list.source().push(Ok(Page::new(vec![
            Menu {
                id: 1,
                name: "Mango Smoothie",
            },
            Menu {
                id: 2,
                name: "Bagel",
            },
            Menu {
                id: 3,
                name: "mango cake",
            },
        ])));
        block_on(list.load_next()).unwrap();

        let ids: Vec<i64> = list.filtered("  MANGO ").iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(list.filtered("").len(), 3);
        assert!(list.filtered("pizza").is_empty());
    }
}
