mod common;

use common::{GatedSource, ScriptedSource, menus};
use futures::FutureExt as _;
use futures::executor::block_on;
use listsync::{Cursor, FetchError, LoadOutcome, Page, PagedList};

#[test]
fn second_load_while_first_in_flight_does_not_fetch() {
    let list = PagedList::new(GatedSource::default(), 10).unwrap();
    let release = list.source().expect();

    let mut first = Box::pin(list.load_next());
    assert!(first.as_mut().now_or_never().is_none());
    assert!(list.is_loading());

    assert_eq!(block_on(list.load_next()).unwrap(), LoadOutcome::Skipped);
    assert_eq!(list.source().requests().len(), 1);

    release
        .send(Ok(Page::new(menus(1..=10)).with_has_more(true)))
        .unwrap();
    assert_eq!(
        block_on(first).unwrap(),
        LoadOutcome::Appended {
            count: 10,
            has_more: true
        }
    );
    assert!(!list.is_loading());
    assert_eq!(list.source().requests().len(), 1);
}

#[test]
fn cursor_advances_and_items_concatenate() {
    let source = ScriptedSource::new([
        Ok(Page::new(menus(1..=3)).with_cursor(103).with_has_more(true)),
        Ok(Page::new(menus(4..=6)).with_cursor(106).with_has_more(true)),
        Ok(Page::new(menus(7..=8)).with_cursor(108).with_has_more(false)),
    ]);
    let list = PagedList::new(source, 3).unwrap();

    for _ in 0..3 {
        block_on(list.load_next()).unwrap();
    }

    assert_eq!(
        list.source().requests(),
        vec![None, Some(Cursor::Number(103)), Some(Cursor::Number(106))]
    );
    assert_eq!(list.items(), menus(1..=8));
    assert!(!list.has_more());
}

#[test]
fn exhausted_list_stays_quiet() {
    let source = ScriptedSource::new([Ok(Page::new(menus(1..=2)).with_has_more(false))]);
    let list = PagedList::new(source, 10).unwrap();

    block_on(list.load_next()).unwrap();
    assert!(!list.has_more());

    for _ in 0..3 {
        assert_eq!(block_on(list.load_next()).unwrap(), LoadOutcome::Skipped);
    }
    assert_eq!(list.source().requests().len(), 1);
    assert_eq!(list.len(), 2);
}

#[test]
fn reset_starts_over_from_the_first_page() {
    let source = ScriptedSource::new([
        Ok(Page::new(menus(1..=2)).with_cursor(2).with_has_more(false)),
        Ok(Page::new(menus(50..=51)).with_cursor(51).with_has_more(true)),
    ]);
    let list = PagedList::new(source, 2).unwrap();
    block_on(list.load_next()).unwrap();

    list.reset();
    assert!(list.is_empty());
    assert_eq!(list.cursor(), None);
    assert!(list.has_more());
    assert!(!list.is_loading());

    block_on(list.load_next()).unwrap();
    assert_eq!(list.source().requests(), vec![None, None]);
    assert_eq!(list.items(), menus(50..=51));
}

#[test]
fn reset_discards_the_in_flight_page() {
    let list = PagedList::new(GatedSource::default(), 10).unwrap();
    let stale = list.source().expect();

    let mut first = Box::pin(list.load_next());
    assert!(first.as_mut().now_or_never().is_none());

    list.reset();
    assert!(!list.is_loading());

    stale
        .send(Ok(Page::new(menus(1..=10)).with_cursor(10)))
        .unwrap();
    assert_eq!(block_on(first).unwrap(), LoadOutcome::Discarded);
    assert!(list.is_empty());
    assert_eq!(list.cursor(), None);
}

#[test]
fn stale_page_does_not_clear_a_newer_load() {
    let list = PagedList::new(GatedSource::default(), 10).unwrap();
    let stale = list.source().expect();
    let fresh = list.source().expect();

    let mut old = Box::pin(list.load_next());
    assert!(old.as_mut().now_or_never().is_none());
    list.reset();

    let mut new = Box::pin(list.load_next());
    assert!(new.as_mut().now_or_never().is_none());
    assert!(list.is_loading());

    stale.send(Ok(Page::new(menus(1..=10)))).unwrap();
    assert_eq!(block_on(old).unwrap(), LoadOutcome::Discarded);
    assert!(list.is_loading());

    fresh
        .send(Ok(Page::new(menus(90..=92)).with_has_more(false)))
        .unwrap();
    assert_eq!(
        block_on(new).unwrap(),
        LoadOutcome::Appended {
            count: 3,
            has_more: false
        }
    );
    assert_eq!(list.items(), menus(90..=92));
    assert_eq!(list.source().requests(), vec![None, None]);
}

#[test]
fn failed_load_can_be_retried() {
    let source = ScriptedSource::new([
        Err(FetchError::Unauthorized),
        Ok(Page::new(menus(1..=4)).with_has_more(false)),
    ]);
    let list = PagedList::new(source, 10).unwrap();

    let err = block_on(list.load_next()).unwrap_err();
    assert!(err.requires_login());
    assert!(list.is_empty());
    assert!(list.has_more());
    assert!(!list.is_loading());

    block_on(list.load_next()).unwrap();
    assert_eq!(list.len(), 4);
    assert_eq!(list.source().requests(), vec![None, None]);
}

#[test]
fn three_pages_of_menus() {
    let source = ScriptedSource::new([
        Ok(Page::new(menus(1..=10)).with_has_more(true)),
        Ok(Page::new(menus(11..=20)).with_has_more(true)),
        Ok(Page::new(menus(21..=25)).with_has_more(false)),
    ]);
    let list = PagedList::new(source, 10).unwrap();

    for _ in 0..3 {
        block_on(list.load_next()).unwrap();
    }
    assert_eq!(list.len(), 25);
    assert!(!list.has_more());
    assert_eq!(
        list.source().requests(),
        vec![None, Some(Cursor::Number(10)), Some(Cursor::Number(20))]
    );

    assert_eq!(block_on(list.load_next()).unwrap(), LoadOutcome::Skipped);
    assert_eq!(list.source().requests().len(), 3);
}
