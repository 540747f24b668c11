use crate::QueryParams;

/// Follow-up work requested by a transition, executed by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Reload the whole collection of the same resource type. The transition
    /// that asks for it has already applied the fetch's pending phase.
    FetchList(QueryParams),
}
