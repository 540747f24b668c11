//! Engine configuration from an optional RON file plus command-line overrides.

use std::fs;
use std::path::Path;

use anyhow::Context;
use sync_engine::SyncConfig;
use sync_logging::sync_info;

/// Reads `path` if given, defaults otherwise. Missing fields take their defaults.
pub(crate) fn load(path: Option<&Path>) -> anyhow::Result<SyncConfig> {
    let Some(path) = path else {
        return Ok(SyncConfig::default());
    };
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config from {:?}", path))?;
    let config: SyncConfig = ron::from_str(&content)
        .with_context(|| format!("Failed to parse config from {:?}", path))?;
    sync_info!("Loaded config from {:?}", path);
    Ok(config)
}

pub(crate) fn with_overrides(mut config: SyncConfig, base_url: Option<String>) -> SyncConfig {
    if let Some(base_url) = base_url {
        config.base_url = base_url;
    }
    config
}

/// Writes the default configuration as pretty RON.
pub(crate) fn write_default(path: &Path) -> anyhow::Result<()> {
    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(&SyncConfig::default(), pretty)
        .context("Failed to serialize default config")?;
    fs::write(path, content).with_context(|| format!("Failed to write config to {:?}", path))?;
    sync_info!("Wrote default config to {:?}", path);
    Ok(())
}
