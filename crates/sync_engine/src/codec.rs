//! JSON codec for entity bodies and server error payloads.

use serde::Deserialize;
use sync_core::{Event, ListPage, OperationKind, Phase, Resource, SyncError, TransportFailureKind};

use crate::transport::HttpResponse;

pub fn encode<T: Resource>(entity: &T) -> Result<Vec<u8>, SyncError> {
    serde_json::to_vec(entity).map_err(|err| {
        SyncError::invalid_argument(format!("cannot encode {}: {err}", T::KIND))
    })
}

pub fn decode_one<T: Resource>(body: &[u8]) -> Result<T, SyncError> {
    serde_json::from_slice(body).map_err(decode_error)
}

pub fn decode_list<T: Resource>(body: &[u8]) -> Result<Vec<T>, SyncError> {
    serde_json::from_slice(body).map_err(decode_error)
}

fn decode_error(err: serde_json::Error) -> SyncError {
    SyncError::transport(TransportFailureKind::Decode, err.to_string())
}

/// Builds the fulfilled event for a successful response of `kind`.
pub fn decode_fulfilled<T: Resource>(
    kind: OperationKind,
    response: &HttpResponse,
) -> Result<Event<T>, SyncError> {
    let event = match kind {
        OperationKind::FetchList => Event::FetchList(Phase::Fulfilled(ListPage {
            items: decode_list(&response.body)?,
            total_items: response.total_count,
        })),
        OperationKind::FetchOne => Event::FetchOne(Phase::Fulfilled(decode_one(&response.body)?)),
        OperationKind::Create => Event::Create(Phase::Fulfilled(decode_one(&response.body)?)),
        OperationKind::Update => Event::Update(Phase::Fulfilled(decode_one(&response.body)?)),
        OperationKind::PartialUpdate => {
            Event::PartialUpdate(Phase::Fulfilled(decode_one(&response.body)?))
        }
        // 200 or 204; any body is ignored.
        OperationKind::Delete => Event::Delete(Phase::Fulfilled(())),
        OperationKind::Reset => Event::Reset,
    };
    Ok(event)
}

/// Problem-details payload; every field is optional.
#[derive(Debug, Default, Deserialize)]
struct ProblemBody {
    title: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

/// Maps a non-2xx response to a server rejection.
pub fn rejection(response: &HttpResponse) -> SyncError {
    SyncError::ServerRejection {
        status: response.status,
        message: rejection_message(response),
    }
}

fn rejection_message(response: &HttpResponse) -> String {
    let problem = serde_json::from_slice::<ProblemBody>(&response.body).unwrap_or_default();
    if let Some(message) = [problem.title, problem.detail, problem.message]
        .into_iter()
        .flatten()
        .find(|field| !field.trim().is_empty())
    {
        return message;
    }

    let raw = String::from_utf8_lossy(&response.body).trim().to_string();
    if !raw.is_empty() && !raw.starts_with('{') {
        return raw;
    }
    reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|status| status.canonical_reason())
        .unwrap_or("unknown status")
        .to_string()
}
