// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use horti_app::{DEFAULT_TRACKER_HOST, DEFAULT_TRACKER_OWNER, DEFAULT_TRACKER_REPO, IssueTracker};
use horti_data::{DEFAULT_SOURCE, DataSource};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

pub const APP_NAME: &str = "horti";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_TIMEOUT: &str = "10s";
const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub data: Data,
    #[serde(default)]
    pub tracker: Tracker,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data: Data::default(),
            tracker: Tracker::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub source: Option<String>,
    pub timeout: Option<String>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            source: Some(DEFAULT_SOURCE.to_owned()),
            timeout: Some(DEFAULT_TIMEOUT.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tracker {
    pub host: Option<String>,
    pub owner: Option<String>,
    pub repo: Option<String>,
}

impl Default for Tracker {
    fn default() -> Self {
        Self {
            host: Some(DEFAULT_TRACKER_HOST.to_owned()),
            owner: Some(DEFAULT_TRACKER_OWNER.to_owned()),
            repo: Some(DEFAULT_TRACKER_REPO.to_owned()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub file: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            file: None,
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("HORTI_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set HORTI_CONFIG_PATH to the config file")
        })?;
        Ok(config_root.join(APP_NAME).join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and keep values under [data], [tracker], and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        if let Some(source) = &self.data.source {
            DataSource::parse(source)
                .with_context(|| format!("invalid data.source in {}", path.display()))?;
        }

        if let Some(timeout) = &self.data.timeout {
            let parsed = parse_duration(timeout)?;
            if parsed.is_zero() {
                bail!(
                    "data.timeout in {} must be positive, got {}",
                    path.display(),
                    timeout
                );
            }
        }

        self.tracker()
            .with_context(|| format!("invalid [tracker] in {}", path.display()))?;

        let level = self.log_level();
        if EnvFilter::try_new(level).is_err() {
            bail!(
                "log.level in {} is not a valid filter, got {:?}; use error, warn, info, debug or trace",
                path.display(),
                level
            );
        }

        Ok(())
    }

    /// The catalog source, with a command-line override taking precedence.
    pub fn data_source(&self, override_source: Option<&str>) -> Result<DataSource> {
        let raw = override_source
            .or(self.data.source.as_deref())
            .unwrap_or(DEFAULT_SOURCE);
        DataSource::parse(raw)
    }

    pub fn timeout(&self) -> Result<Duration> {
        parse_duration(self.data.timeout.as_deref().unwrap_or(DEFAULT_TIMEOUT))
    }

    pub fn tracker(&self) -> Result<IssueTracker> {
        IssueTracker::new(
            self.tracker.host.as_deref().unwrap_or(DEFAULT_TRACKER_HOST),
            self.tracker.owner.as_deref().unwrap_or(DEFAULT_TRACKER_OWNER),
            self.tracker.repo.as_deref().unwrap_or(DEFAULT_TRACKER_REPO),
        )
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn log_file(&self) -> Result<PathBuf> {
        if let Some(file) = &self.log.file {
            return Ok(PathBuf::from(file));
        }
        let cache_root = dirs::cache_dir().ok_or_else(|| {
            anyhow!("cannot resolve cache directory; set [log].file in the config")
        })?;
        Ok(cache_root.join(APP_NAME).join("horti.log"))
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# horti config\n# Place this file at: {}\n\nversion = 1\n\n[data]\n# Local path, file:// URL or http(s) URL of the catalog JSON array.\nsource = \"{}\"\ntimeout = \"{}\"\n\n[tracker]\n# Contribution links open new issues at https://<host>/<owner>/<repo>/issues/new\nhost = \"{}\"\nowner = \"{}\"\nrepo = \"{}\"\n\n[log]\n# RUST_LOG overrides this level.\nlevel = \"{}\"\n# Optional. Default is the platform cache dir (for example ~/.cache/horti/horti.log)\n# file = \"/absolute/path/to/horti.log\"\n",
            path.display(),
            DEFAULT_SOURCE,
            DEFAULT_TIMEOUT,
            DEFAULT_TRACKER_HOST,
            DEFAULT_TRACKER_OWNER,
            DEFAULT_TRACKER_REPO,
            DEFAULT_LOG_LEVEL,
        )
    }
}

fn parse_duration(raw: &str) -> Result<Duration> {
    if let Some(value) = raw.strip_suffix("ms") {
        let millis: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_millis(millis));
    }
    if let Some(value) = raw.strip_suffix('s') {
        let secs: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        return Ok(Duration::from_secs(secs));
    }
    if let Some(value) = raw.strip_suffix('m') {
        let mins: u64 = value
            .parse()
            .with_context(|| format!("invalid timeout duration {raw:?}"))?;
        let secs = mins
            .checked_mul(60)
            .ok_or_else(|| anyhow!("timeout {raw:?} is too large"))?;
        return Ok(Duration::from_secs(secs));
    }

    bail!("invalid duration {raw:?}; use one of: <N>ms, <N>s, <N>m (for example 500ms or 10s)")
}
