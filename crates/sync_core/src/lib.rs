//! Crawler sync core: pure entity state machine and relation binding.
mod effect;
mod error;
mod event;
mod model;
mod operation;
pub mod relation;
mod resource;
mod state;
mod store;
mod update;

pub use effect::Effect;
pub use error::{SyncError, TransportFailureKind};
pub use event::{Event, ListPage, OperationKind, Phase};
pub use model::{Crawler, Filters, FETCH_MIN};
pub use operation::{Method, Operation, QueryParams, RequestPlan, Target};
pub use resource::{parse_id, EntityId, Resource, ResourceKind};
pub use state::EntityState;
pub use store::{update_store, Command, Store, StoreEvent};
pub use update::update;
