use crate::{Effect, EntityState, Event, Phase, QueryParams, Resource};

/// Pure transition function: applies one phase event to a resource's state
/// and returns any follow-up effects.
///
/// Events are applied in settlement order. A slower response settling after a
/// newer one overwrites it; nothing here fences stale responses.
pub fn update<T: Resource>(
    mut state: EntityState<T>,
    event: Event<T>,
) -> (EntityState<T>, Vec<Effect>) {
    let effects = match event {
        Event::FetchList(phase) => {
            match phase {
                Phase::Pending => state.begin_fetch(),
                Phase::Fulfilled(page) => state.replace_entities(page.items, page.total_items),
                // Previous entities stay visible.
                Phase::Rejected(err) => state.fetch_failed(err.to_string()),
            }
            Vec::new()
        }
        Event::FetchOne(phase) => {
            match phase {
                Phase::Pending => state.begin_fetch(),
                Phase::Fulfilled(entity) => state.focus(entity),
                Phase::Rejected(err) => state.fetch_failed(err.to_string()),
            }
            Vec::new()
        }
        Event::Create(phase) | Event::Update(phase) | Event::PartialUpdate(phase) => {
            apply_mutation(&mut state, phase.map(Some))
        }
        Event::Delete(phase) => apply_mutation(&mut state, phase.map(|()| None)),
        Event::Reset => {
            state = EntityState::default();
            Vec::new()
        }
    };

    (state, effects)
}

/// `Fulfilled(None)` means the entity is gone and focus returns to the empty record.
fn apply_mutation<T: Resource>(
    state: &mut EntityState<T>,
    phase: Phase<Option<T>>,
) -> Vec<Effect> {
    match phase {
        Phase::Pending => {
            state.begin_mutation();
            Vec::new()
        }
        Phase::Fulfilled(entity) => {
            // The refresh is under way before the mutation result lands.
            state.begin_fetch();
            match entity {
                Some(entity) => state.mutation_succeeded(entity),
                None => state.deletion_succeeded(),
            }
            vec![Effect::FetchList(QueryParams::default())]
        }
        Phase::Rejected(err) => {
            state.mutation_failed(err.to_string());
            Vec::new()
        }
    }
}

impl<P> Phase<P> {
    fn map<U>(self, f: impl FnOnce(P) -> U) -> Phase<U> {
        match self {
            Phase::Pending => Phase::Pending,
            Phase::Fulfilled(payload) => Phase::Fulfilled(f(payload)),
            Phase::Rejected(err) => Phase::Rejected(err),
        }
    }
}
