use crate::{update, Crawler, Effect, EntityState, Event, Filters, Operation, Resource, ResourceKind};

/// All entity states, one per resource type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Store {
    crawler: EntityState<Crawler>,
    filters: EntityState<Filters>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn crawler(&self) -> &EntityState<Crawler> {
        &self.crawler
    }

    pub fn filters(&self) -> &EntityState<Filters> {
        &self.filters
    }

    pub fn get<T: Resource>(&self) -> &EntityState<T> {
        T::state(self)
    }
}

/// An operation addressed to one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Crawler(Operation<Crawler>),
    Filters(Operation<Filters>),
}

impl Command {
    pub fn resource(&self) -> ResourceKind {
        match self {
            Command::Crawler(_) => ResourceKind::Crawler,
            Command::Filters(_) => ResourceKind::Filters,
        }
    }
}

impl From<Operation<Crawler>> for Command {
    fn from(operation: Operation<Crawler>) -> Self {
        Crawler::command(operation)
    }
}

impl From<Operation<Filters>> for Command {
    fn from(operation: Operation<Filters>) -> Self {
        Filters::command(operation)
    }
}

/// A phase event addressed to one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Crawler(Event<Crawler>),
    Filters(Event<Filters>),
}

impl StoreEvent {
    pub fn resource(&self) -> ResourceKind {
        match self {
            StoreEvent::Crawler(_) => ResourceKind::Crawler,
            StoreEvent::Filters(_) => ResourceKind::Filters,
        }
    }

    pub fn outcome(&self) -> Option<Result<(), crate::SyncError>> {
        match self {
            StoreEvent::Crawler(event) => event.outcome(),
            StoreEvent::Filters(event) => event.outcome(),
        }
    }
}

/// Routes an event to its resource's state; effects come back as commands
/// for the same resource.
pub fn update_store(mut store: Store, event: StoreEvent) -> (Store, Vec<Command>) {
    let commands = match event {
        StoreEvent::Crawler(event) => {
            let (state, effects) = update(std::mem::take(&mut store.crawler), event);
            store.crawler = state;
            follow_ups::<Crawler>(effects)
        }
        StoreEvent::Filters(event) => {
            let (state, effects) = update(std::mem::take(&mut store.filters), event);
            store.filters = state;
            follow_ups::<Filters>(effects)
        }
    };
    (store, commands)
}

fn follow_ups<T: Resource>(effects: Vec<Effect>) -> Vec<Command> {
    effects
        .into_iter()
        .map(|effect| match effect {
            Effect::FetchList(query) => T::command(Operation::FetchList(query)),
        })
        .collect()
}
