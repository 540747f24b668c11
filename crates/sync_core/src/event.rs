use std::fmt;

use crate::SyncError;

/// Lifecycle position of one operation call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase<P> {
    Pending,
    Fulfilled(P),
    Rejected(SyncError),
}

impl<P> Phase<P> {
    pub fn outcome(&self) -> Option<Result<(), SyncError>> {
        match self {
            Phase::Pending => None,
            Phase::Fulfilled(_) => Some(Ok(())),
            Phase::Rejected(err) => Some(Err(err.clone())),
        }
    }
}

/// A successful list response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_items: Option<u64>,
}

/// One phase transition of one operation, tagged by operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<T> {
    FetchList(Phase<ListPage<T>>),
    FetchOne(Phase<T>),
    Create(Phase<T>),
    Update(Phase<T>),
    PartialUpdate(Phase<T>),
    Delete(Phase<()>),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    FetchList,
    FetchOne,
    Create,
    Update,
    PartialUpdate,
    Delete,
    Reset,
}

impl OperationKind {
    pub fn is_mutation(self) -> bool {
        matches!(
            self,
            OperationKind::Create
                | OperationKind::Update
                | OperationKind::PartialUpdate
                | OperationKind::Delete
        )
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::FetchList => "fetch_entity_list",
            OperationKind::FetchOne => "fetch_entity",
            OperationKind::Create => "create_entity",
            OperationKind::Update => "update_entity",
            OperationKind::PartialUpdate => "partial_update_entity",
            OperationKind::Delete => "delete_entity",
            OperationKind::Reset => "reset",
        };
        write!(f, "{name}")
    }
}

impl<T> Event<T> {
    pub fn pending(kind: OperationKind) -> Self {
        match kind {
            OperationKind::FetchList => Event::FetchList(Phase::Pending),
            OperationKind::FetchOne => Event::FetchOne(Phase::Pending),
            OperationKind::Create => Event::Create(Phase::Pending),
            OperationKind::Update => Event::Update(Phase::Pending),
            OperationKind::PartialUpdate => Event::PartialUpdate(Phase::Pending),
            OperationKind::Delete => Event::Delete(Phase::Pending),
            OperationKind::Reset => Event::Reset,
        }
    }

    pub fn rejected(kind: OperationKind, err: SyncError) -> Self {
        match kind {
            OperationKind::FetchList => Event::FetchList(Phase::Rejected(err)),
            OperationKind::FetchOne => Event::FetchOne(Phase::Rejected(err)),
            OperationKind::Create => Event::Create(Phase::Rejected(err)),
            OperationKind::Update => Event::Update(Phase::Rejected(err)),
            OperationKind::PartialUpdate => Event::PartialUpdate(Phase::Rejected(err)),
            OperationKind::Delete => Event::Delete(Phase::Rejected(err)),
            OperationKind::Reset => Event::Reset,
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Event::FetchList(_) => OperationKind::FetchList,
            Event::FetchOne(_) => OperationKind::FetchOne,
            Event::Create(_) => OperationKind::Create,
            Event::Update(_) => OperationKind::Update,
            Event::PartialUpdate(_) => OperationKind::PartialUpdate,
            Event::Delete(_) => OperationKind::Delete,
            Event::Reset => OperationKind::Reset,
        }
    }

    /// `None` while pending; the settled result otherwise. Reset settles at once.
    pub fn outcome(&self) -> Option<Result<(), SyncError>> {
        match self {
            Event::FetchList(phase) => phase.outcome(),
            Event::FetchOne(phase)
            | Event::Create(phase)
            | Event::Update(phase)
            | Event::PartialUpdate(phase) => phase.outcome(),
            Event::Delete(phase) => phase.outcome(),
            Event::Reset => Some(Ok(())),
        }
    }
}
