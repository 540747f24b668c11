use chrono::Utc;
use sync_core::{Event, OperationKind, RequestPlan, Resource, SyncError, Target};

use crate::codec;
use crate::config::SyncConfig;
use crate::transport::{HttpRequest, Transport};

pub const CACHE_BUSTER_PARAM: &str = "cacheBuster";

/// Distinct, increasing `cacheBuster` values: wall-clock millis, bumped when
/// two list requests land in the same millisecond.
#[derive(Debug, Default)]
pub(crate) struct CacheBuster {
    last: i64,
}

impl CacheBuster {
    pub(crate) fn next(&mut self) -> i64 {
        let now = Utc::now().timestamp_millis();
        self.last = now.max(self.last + 1);
        self.last
    }
}

pub(crate) fn build_request<T: Resource>(
    config: &SyncConfig,
    plan: &RequestPlan<T>,
    cache_buster: &mut CacheBuster,
) -> Result<HttpRequest, SyncError> {
    let mut url = config
        .resource_url(T::KIND)
        .map_err(|err| SyncError::invalid_argument(err.to_string()))?;
    if let Target::Item(id) = plan.target {
        url.path_segments_mut()
            .map_err(|()| SyncError::invalid_argument("base url cannot carry a path"))?
            .push(&id.to_string());
    }
    if plan.kind == OperationKind::FetchList {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in plan.query.pairs() {
            pairs.append_pair(key, &value);
        }
        pairs.append_pair(CACHE_BUSTER_PARAM, &cache_buster.next().to_string());
    }
    let body = plan.body.as_ref().map(codec::encode).transpose()?;

    Ok(HttpRequest {
        method: plan.method,
        url,
        body,
    })
}

/// Runs one request to settlement. Never fails: every error becomes the
/// rejected phase of `kind`.
pub(crate) async fn execute<T: Resource>(
    transport: &dyn Transport,
    kind: OperationKind,
    request: HttpRequest,
) -> Event<T> {
    match settle::<T>(transport, kind, request).await {
        Ok(event) => event,
        Err(err) => Event::rejected(kind, err),
    }
}

async fn settle<T: Resource>(
    transport: &dyn Transport,
    kind: OperationKind,
    request: HttpRequest,
) -> Result<Event<T>, SyncError> {
    let response = transport.send(request).await?;
    if !response.is_success() {
        return Err(codec::rejection(&response));
    }
    codec::decode_fulfilled(kind, &response)
}
