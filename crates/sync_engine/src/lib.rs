//! Crawler sync engine: async operation pipeline, HTTP transport and codec.
pub mod codec;
mod config;
mod engine;
mod pipeline;
mod transport;

pub use config::{ConfigError, SyncConfig};
pub use engine::{PendingHandle, StoreSnapshot, SyncClient};
pub use pipeline::CACHE_BUSTER_PARAM;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TOTAL_COUNT_HEADER};
