use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Command, EntityState, Event, Store, StoreEvent, SyncError};

/// Server-assigned identifier.
pub type EntityId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Crawler,
    Filters,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Crawler => write!(f, "crawler"),
            ResourceKind::Filters => write!(f, "filters"),
        }
    }
}

/// A record type the engine synchronizes.
///
/// `Default` is the empty record: the initial focused entity and the value
/// left behind by a successful delete.
pub trait Resource:
    Clone + fmt::Debug + Default + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    const KIND: ResourceKind;

    fn id(&self) -> Option<EntityId>;

    /// Drops transient fields before the record is written.
    fn clean(self) -> Self {
        self
    }

    /// Checks a full record before create/update.
    fn validate(&self) -> Result<(), SyncError> {
        Ok(())
    }

    /// Checks the fields a partial update carries.
    fn validate_partial(&self) -> Result<(), SyncError> {
        Ok(())
    }

    fn state(store: &Store) -> &EntityState<Self>;

    fn command(operation: crate::Operation<Self>) -> Command;

    fn event(event: Event<Self>) -> StoreEvent;
}

/// Parses an identifier as it arrives from a route or form field.
pub fn parse_id(raw: &str) -> Result<EntityId, SyncError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SyncError::invalid_argument("identifier must not be empty"));
    }
    trimmed
        .parse::<EntityId>()
        .map_err(|_| SyncError::invalid_argument(format!("malformed identifier `{raw}`")))
}
