use serde::{Deserialize, Serialize};

use crate::{
    Command, EntityId, EntityState, Event, Operation, Resource, ResourceKind, Store, StoreEvent,
    SyncError,
};

/// Lowest accepted value of `Crawler::fetch`.
pub const FETCH_MIN: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Crawler {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fetch: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Crawler {
    pub fn new(name: impl Into<String>, fetch: i32, source: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
            fetch: Some(fetch),
            source: Some(source.into()),
        }
    }

    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }
}

fn check_name(name: &str) -> Result<(), SyncError> {
    if name.trim().is_empty() {
        return Err(SyncError::invalid_argument("crawler name must not be empty"));
    }
    Ok(())
}

fn check_fetch(fetch: i32) -> Result<(), SyncError> {
    if fetch < FETCH_MIN {
        return Err(SyncError::invalid_argument(format!(
            "crawler fetch must be at least {FETCH_MIN}, got {fetch}"
        )));
    }
    Ok(())
}

impl Resource for Crawler {
    const KIND: ResourceKind = ResourceKind::Crawler;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    fn validate(&self) -> Result<(), SyncError> {
        check_name(self.name.as_deref().unwrap_or_default())?;
        match self.fetch {
            Some(fetch) => check_fetch(fetch)?,
            None => return Err(SyncError::invalid_argument("crawler fetch is required")),
        }
        if self.source.is_none() {
            return Err(SyncError::invalid_argument("crawler source is required"));
        }
        Ok(())
    }

    fn validate_partial(&self) -> Result<(), SyncError> {
        if let Some(name) = self.name.as_deref() {
            check_name(name)?;
        }
        if let Some(fetch) = self.fetch {
            check_fetch(fetch)?;
        }
        Ok(())
    }

    fn state(store: &Store) -> &EntityState<Self> {
        store.crawler()
    }

    fn command(operation: Operation<Self>) -> Command {
        Command::Crawler(operation)
    }

    fn event(event: Event<Self>) -> StoreEvent {
        StoreEvent::Crawler(event)
    }
}

/// Dependent record; `crawler` embeds the full parent when set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Filters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default)]
    pub crawler: Option<Crawler>,
}

impl Resource for Filters {
    const KIND: ResourceKind = ResourceKind::Filters;

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    // A reference without an id is an unselected relation, never sent as `{}`.
    fn clean(mut self) -> Self {
        if self.crawler.as_ref().is_some_and(|c| c.id.is_none()) {
            self.crawler = None;
        }
        self
    }

    fn state(store: &Store) -> &EntityState<Self> {
        store.filters()
    }

    fn command(operation: Operation<Self>) -> Command {
        Command::Filters(operation)
    }

    fn event(event: Event<Self>) -> StoreEvent {
        StoreEvent::Filters(event)
    }
}
