use std::time::Duration;

use serde::{Deserialize, Serialize};
use sync_core::ResourceKind;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base url `{url}`: {source}")]
    BaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url `{0}` cannot carry a path")]
    NotHierarchical(String),
    #[error("http client setup failed: {0}")]
    Client(String),
}

/// Where the resource API lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    pub base_url: String,
    pub crawlers_path: String,
    pub filters_path: String,
    #[serde(with = "millis")]
    pub connect_timeout: Duration,
    #[serde(with = "millis")]
    pub request_timeout: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            crawlers_path: "api/crawlers".to_string(),
            filters_path: "api/filters".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SyncConfig {
    pub fn resource_path(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Crawler => &self.crawlers_path,
            ResourceKind::Filters => &self.filters_path,
        }
    }

    /// `{base_url}/{resource path}` with exactly one slash between the parts.
    pub fn resource_url(&self, kind: ResourceKind) -> Result<Url, ConfigError> {
        let raw = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.resource_path(kind).trim_matches('/')
        );
        let url = Url::parse(&raw).map_err(|source| ConfigError::BaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigError::NotHierarchical(self.base_url.clone()));
        }
        Ok(url)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resource_url(ResourceKind::Crawler)?;
        self.resource_url(ResourceKind::Filters)?;
        Ok(())
    }
}

mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
