use std::sync::Once;

use pretty_assertions::assert_eq;
use sync_core::{
    update, Crawler, Effect, EntityState, Event, ListPage, Phase, SyncError, TransportFailureKind,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(sync_logging::initialize_for_tests);
}

fn page(items: Vec<Crawler>) -> Phase<ListPage<Crawler>> {
    Phase::Fulfilled(ListPage {
        items,
        total_items: None,
    })
}

fn loaded(items: Vec<Crawler>) -> EntityState<Crawler> {
    let (state, _) = update(EntityState::new(), Event::FetchList(Phase::Pending));
    let (state, _) = update(state, Event::FetchList(page(items)));
    state
}

#[test]
fn initial_state_is_empty() {
    let state = EntityState::<Crawler>::new();
    assert!(!state.loading());
    assert!(!state.updating());
    assert!(!state.update_success());
    assert_eq!(state.error_message(), None);
    assert!(state.entities().is_empty());
    assert_eq!(state.entity(), &Crawler::default());
}

#[test]
fn fetch_list_pending_sets_loading_and_clears_signals() {
    init_logging();
    let (state, _) = update(EntityState::new(), Event::Create(Phase::Pending));
    let (state, _) = update(
        state,
        Event::Create(Phase::Fulfilled(Crawler::new("a", 1, "s").with_id(1))),
    );
    assert!(state.update_success());

    let (state, effects) = update(state, Event::FetchList(Phase::Pending));
    assert!(state.loading());
    assert!(!state.update_success());
    assert_eq!(state.error_message(), None);
    assert!(effects.is_empty());
}

#[test]
fn fetch_list_replaces_entities_in_response_order() {
    init_logging();
    let first = loaded(vec![
        Crawler::new("a", 1, "s").with_id(1),
        Crawler::new("b", 2, "s").with_id(2),
    ]);

    let response = vec![
        Crawler::new("z", 9, "s").with_id(9),
        Crawler::new("b", 2, "s").with_id(2),
    ];
    let (state, _) = update(first, Event::FetchList(Phase::Pending));
    let (state, effects) = update(state, Event::FetchList(page(response.clone())));

    assert_eq!(state.entities(), response.as_slice());
    assert!(!state.loading());
    assert!(effects.is_empty());
}

#[test]
fn fetch_list_keeps_total_count() {
    let (state, _) = update(
        EntityState::<Crawler>::new(),
        Event::FetchList(Phase::Fulfilled(ListPage {
            items: Vec::new(),
            total_items: Some(42),
        })),
    );
    assert_eq!(state.total_items(), Some(42));
}

#[test]
fn failed_fetch_list_keeps_stale_entities_visible() {
    init_logging();
    let items = vec![Crawler::new("a", 1, "s").with_id(1)];
    let state = loaded(items.clone());

    let (state, _) = update(state, Event::FetchList(Phase::Pending));
    let err = SyncError::transport(TransportFailureKind::Connect, "refused");
    let (state, effects) = update(state, Event::FetchList(Phase::Rejected(err.clone())));

    assert!(!state.loading());
    assert_eq!(state.error_message(), Some(err.to_string().as_str()));
    assert_eq!(state.entities(), items.as_slice());
    assert!(effects.is_empty());
}

#[test]
fn fetch_one_sets_focus_and_is_idempotent() {
    let crawler = Crawler::new("a", 1, "s").with_id(1);
    let fetch = |state: EntityState<Crawler>| {
        let (state, _) = update(state, Event::FetchOne(Phase::Pending));
        update(state, Event::FetchOne(Phase::Fulfilled(crawler.clone()))).0
    };

    let once = fetch(EntityState::new());
    let twice = fetch(once.clone());
    assert_eq!(once.entity(), &crawler);
    assert_eq!(once, twice);
    assert!(!twice.loading());
}

#[test]
fn failed_fetch_one_keeps_previous_focus() {
    let crawler = Crawler::new("a", 1, "s").with_id(1);
    let (state, _) = update(
        EntityState::new(),
        Event::FetchOne(Phase::Fulfilled(crawler.clone())),
    );
    let (state, _) = update(state, Event::FetchOne(Phase::Pending));
    let (state, _) = update(
        state,
        Event::FetchOne(Phase::Rejected(SyncError::ServerRejection {
            status: 404,
            message: "Not Found".into(),
        })),
    );

    assert!(!state.loading());
    assert_eq!(state.entity(), &crawler);
    assert_eq!(
        state.error_message(),
        Some("server rejected request (404): Not Found")
    );
}

#[test]
fn reset_restores_defaults() {
    let state = loaded(vec![Crawler::new("a", 1, "s").with_id(1)]);
    let (state, _) = update(
        state,
        Event::FetchOne(Phase::Fulfilled(Crawler::new("a", 1, "s").with_id(1))),
    );
    let (state, effects) = update(state, Event::Reset);

    assert_eq!(state, EntityState::new());
    assert!(effects.is_empty());
}

#[test]
fn fetch_transitions_never_request_follow_ups() {
    let (_, effects) = update(
        EntityState::<Crawler>::new(),
        Event::FetchOne(Phase::Fulfilled(Crawler::default())),
    );
    assert_eq!(effects, Vec::<Effect>::new());
}
