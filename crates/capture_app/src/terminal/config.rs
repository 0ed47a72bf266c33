use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use capture_client::ClientSettings;
use client_logging::{client_info, client_warn};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "capture_client.ron";

/// User-editable settings, stored as RON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub poll_interval_ms: u64,
    /// How long the success indicator stays up after a capture completes.
    pub success_display_ms: u64,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5001".to_string(),
            poll_interval_ms: 1000,
            success_display_ms: 2000,
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
        }
    }
}

impl AppConfig {
    /// Reads the config file, falling back to defaults when it is missing or broken.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                client_info!("No config at {:?}; using defaults", path);
                return Self::default();
            }
            Err(err) => {
                client_warn!("Failed to read config from {:?}: {}", path, err);
                return Self::default();
            }
        };

        match ron::from_str(&content) {
            Ok(config) => {
                client_info!("Loaded config from {:?}", path);
                config
            }
            Err(err) => {
                client_warn!("Failed to parse config from {:?}: {}", path, err);
                Self::default()
            }
        }
    }

    pub fn success_display(&self) -> Duration {
        Duration::from_millis(self.success_display_ms)
    }

    pub fn to_client_settings(&self) -> ClientSettings {
        ClientSettings {
            server_url: self.server_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            // A zero period would make the poll timer panic.
            poll_interval: Duration::from_millis(self.poll_interval_ms.max(1)),
        }
    }
}

/// Writes `config` to `path` through a temporary file in the same directory.
///
/// Refuses to replace an existing file unless `overwrite` is set.
pub fn write_config(path: &Path, config: &AppConfig, overwrite: bool) -> anyhow::Result<()> {
    if path.exists() && !overwrite {
        bail!("{} already exists (use --force to replace it)", path.display());
    }

    let pretty = ron::ser::PrettyConfig::new();
    let content = ron::ser::to_string_pretty(config, pretty).context("serializing config")?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("creating temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .context("writing temporary config")?;
    tmp.persist(path)
        .with_context(|| format!("replacing {}", path.display()))?;

    client_info!("Wrote config to {:?}", path);
    Ok(())
}
