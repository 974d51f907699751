use std::sync::Arc;

use super::common::*;
use crate::recruiting::board::ReviewBoard;
use crate::recruiting::domain::ApplicationStatus;
use crate::recruiting::filter::{FilterSpec, StatusFilter};
use crate::recruiting::{RecruitingService, ScoringConfig};

#[test]
fn board_refilters_after_each_feed_event() {
    let store = Arc::new(MemoryStore::default());
    let feed = Arc::new(MemoryFeed::default());
    let service = RecruitingService::new(store.clone(), feed.clone(), ScoringConfig::default());
    store.seed_application(strong_application());
    store.seed_application(bare_application());

    let shortlist = FilterSpec {
        status: StatusFilter::Only(ApplicationStatus::Shortlisted),
        ..FilterSpec::default()
    };
    let mut board = ReviewBoard::open(store.clone(), shortlist).expect("board opens");
    assert!(board.rows().is_empty());

    service
        .set_status(&reviewer(), &bare_application().id, ApplicationStatus::Shortlisted)
        .expect("status updated");
    for event in feed.events() {
        board.on_event(&event).expect("refresh succeeds");
    }

    assert_eq!(board.rows().len(), 1);
    assert_eq!(board.rows()[0].id, bare_application().id);
    assert_eq!(board.refreshes(), 2);
}

#[test]
fn board_sees_deletions_on_refresh() {
    let store = Arc::new(MemoryStore::default());
    let feed = Arc::new(MemoryFeed::default());
    let service = RecruitingService::new(store.clone(), feed.clone(), ScoringConfig::default());
    store.seed_application(strong_application());

    let mut board = ReviewBoard::open(store.clone(), FilterSpec::default()).expect("board opens");
    assert_eq!(board.rows().len(), 1);

    service
        .delete(&reviewer(), &strong_application().id)
        .expect("deleted");
    let event = feed.events().pop().expect("delete announced");

    assert!(board.on_event(&event).expect("refresh succeeds").is_empty());
}

#[test]
fn changing_the_filter_rereads_the_store() {
    let store = Arc::new(MemoryStore::default());
    store.seed_application(reviewed("app-1", "Jane Doe", ApplicationStatus::Applied, Some(30), true));
    store.seed_application(reviewed("app-2", "Kai Lund", ApplicationStatus::Applied, Some(75), false));

    let mut board = ReviewBoard::open(store, FilterSpec::default()).expect("board opens");
    let starred = FilterSpec {
        starred: true,
        ..FilterSpec::default()
    };
    let rows = board.set_filter(starred.clone()).expect("refresh succeeds");

    assert_eq!(rows.len(), 1);
    assert_eq!(board.spec(), &starred);
    assert_eq!(board.refreshes(), 2);
}

#[test]
fn board_open_surfaces_store_outage() {
    let result = ReviewBoard::open(Arc::new(UnavailableStore), FilterSpec::default());
    assert!(result.is_err());
}
