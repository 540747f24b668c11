use pretty_assertions::assert_eq;
use sync_core::{
    update, Crawler, Effect, EntityState, Event, ListPage, Phase, QueryParams, SyncError,
    TransportFailureKind,
};

fn refresh() -> Vec<Effect> {
    vec![Effect::FetchList(QueryParams::default())]
}

#[test]
fn create_lifecycle_sets_update_success_and_requests_refresh() {
    let (state, effects) = update(EntityState::<Crawler>::new(), Event::Create(Phase::Pending));
    assert!(state.updating());
    assert!(!state.loading());
    assert!(effects.is_empty());

    let created = Crawler::new("news", 5, "http://example.com/feed").with_id(1);
    let (state, effects) = update(state, Event::Create(Phase::Fulfilled(created.clone())));

    assert!(!state.updating());
    assert!(state.update_success());
    assert_eq!(state.entity(), &created);
    assert_eq!(effects, refresh());
}

#[test]
fn update_and_partial_update_share_the_create_contract() {
    let saved = Crawler::new("news", 7, "s").with_id(4);
    for event in [
        Event::Update(Phase::Fulfilled(saved.clone())),
        Event::PartialUpdate(Phase::Fulfilled(saved.clone())),
    ] {
        let (state, _) = update(EntityState::new(), Event::Update(Phase::Pending));
        let (state, effects) = update(state, event);
        assert!(state.update_success());
        assert!(!state.updating());
        assert_eq!(state.entity(), &saved);
        assert_eq!(effects, refresh());
    }
}

#[test]
fn delete_clears_focus_and_requests_refresh() {
    let (state, _) = update(
        EntityState::new(),
        Event::FetchOne(Phase::Fulfilled(Crawler::new("a", 1, "s").with_id(1))),
    );
    let (state, _) = update(state, Event::Delete(Phase::Pending));
    let (state, effects) = update(state, Event::Delete(Phase::Fulfilled(())));

    assert_eq!(state.entity(), &Crawler::default());
    assert!(state.update_success());
    assert!(!state.updating());
    // The refresh is already marked as loading.
    assert!(state.loading());
    assert_eq!(effects, refresh());
}

#[test]
fn update_success_survives_the_refresh_it_triggers() {
    let created = Crawler::new("news", 5, "s").with_id(1);
    let (state, _) = update(EntityState::new(), Event::Create(Phase::Pending));
    let (state, _) = update(state, Event::Create(Phase::Fulfilled(created.clone())));
    let (state, _) = update(
        state,
        Event::FetchList(Phase::Fulfilled(ListPage {
            items: vec![created.clone()],
            total_items: None,
        })),
    );

    assert!(state.update_success());
    assert!(!state.loading());
    assert_eq!(state.entities(), &[created]);
}

#[test]
fn rejected_mutation_clears_busy_flag_and_keeps_data() {
    let focused = Crawler::new("a", 1, "s").with_id(1);
    let (state, _) = update(
        EntityState::new(),
        Event::FetchOne(Phase::Fulfilled(focused.clone())),
    );
    let (state, _) = update(state, Event::Update(Phase::Pending));
    let err = SyncError::transport(TransportFailureKind::Timeout, "30s elapsed");
    let (state, effects) = update(state, Event::Update(Phase::Rejected(err)));

    assert!(!state.updating());
    assert!(!state.update_success());
    assert_eq!(state.error_message(), Some("timeout: 30s elapsed"));
    assert_eq!(state.entity(), &focused);
    assert!(effects.is_empty());
}

#[test]
fn update_success_is_one_shot() {
    let (state, _) = update(
        EntityState::<Crawler>::new(),
        Event::Delete(Phase::Fulfilled(())),
    );
    assert!(state.update_success());

    let (state, _) = update(state, Event::Create(Phase::Pending));
    assert!(!state.update_success());

    let (state, _) = update(state, Event::Create(Phase::Fulfilled(Crawler::default())));
    assert!(state.update_success());
    let (state, _) = update(state, Event::Reset);
    assert!(!state.update_success());
}

#[test]
fn pending_mutation_leaves_loading_alone() {
    let (state, _) = update(EntityState::<Crawler>::new(), Event::FetchList(Phase::Pending));
    let (state, _) = update(state, Event::Delete(Phase::Pending));
    assert!(state.loading());
    assert!(state.updating());
}
