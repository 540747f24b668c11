use crate::{parse_id, EntityId, OperationKind, Resource, SyncError};

/// Pagination and sorting, forwarded to the server untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl QueryParams {
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

/// A request a caller can dispatch against one resource type.
///
/// Identifiers are taken as text, the way routes and form fields carry them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation<T> {
    FetchList(QueryParams),
    FetchOne(String),
    Create(T),
    Update(T),
    PartialUpdate(T),
    Delete(String),
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

/// Where a request goes, relative to the resource's base path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Collection,
    Item(EntityId),
}

/// A validated operation, ready to be turned into a transport request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestPlan<T> {
    pub kind: OperationKind,
    pub method: Method,
    pub target: Target,
    pub query: QueryParams,
    pub body: Option<T>,
}

impl<T: Resource> Operation<T> {
    /// Create for a record without an id, update otherwise.
    pub fn save(entity: T) -> Self {
        if entity.id().is_some() {
            Operation::Update(entity)
        } else {
            Operation::Create(entity)
        }
    }

    pub fn fetch_one(id: EntityId) -> Self {
        Operation::FetchOne(id.to_string())
    }

    pub fn delete(id: EntityId) -> Self {
        Operation::Delete(id.to_string())
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::FetchList(_) => OperationKind::FetchList,
            Operation::FetchOne(_) => OperationKind::FetchOne,
            Operation::Create(_) => OperationKind::Create,
            Operation::Update(_) => OperationKind::Update,
            Operation::PartialUpdate(_) => OperationKind::PartialUpdate,
            Operation::Delete(_) => OperationKind::Delete,
            Operation::Reset => OperationKind::Reset,
        }
    }

    /// Checks arguments and builds the request. `Ok(None)` for `Reset`, which
    /// never leaves the process.
    pub fn plan(self) -> Result<Option<RequestPlan<T>>, SyncError> {
        let kind = self.kind();
        let plan =
            |method: Method, target: Target, query: QueryParams, body: Option<T>| RequestPlan {
                kind,
                method,
                target,
                query,
                body,
            };
        let plan = match self {
            Operation::FetchList(query) => plan(Method::Get, Target::Collection, query, None),
            Operation::FetchOne(id) => plan(
                Method::Get,
                Target::Item(parse_id(&id)?),
                QueryParams::default(),
                None,
            ),
            Operation::Create(entity) => {
                entity.validate()?;
                plan(
                    Method::Post,
                    Target::Collection,
                    QueryParams::default(),
                    Some(entity.clean()),
                )
            }
            Operation::Update(entity) => {
                let id = require_id(&entity, kind)?;
                entity.validate()?;
                plan(
                    Method::Put,
                    Target::Item(id),
                    QueryParams::default(),
                    Some(entity.clean()),
                )
            }
            Operation::PartialUpdate(entity) => {
                let id = require_id(&entity, kind)?;
                entity.validate_partial()?;
                plan(
                    Method::Patch,
                    Target::Item(id),
                    QueryParams::default(),
                    Some(entity.clean()),
                )
            }
            Operation::Delete(id) => plan(
                Method::Delete,
                Target::Item(parse_id(&id)?),
                QueryParams::default(),
                None,
            ),
            Operation::Reset => return Ok(None),
        };
        Ok(Some(plan))
    }
}

fn require_id<T: Resource>(entity: &T, kind: OperationKind) -> Result<EntityId, SyncError> {
    entity.id().ok_or_else(|| {
        SyncError::invalid_argument(format!("{} {kind} requires an entity with an id", T::KIND))
    })
}
