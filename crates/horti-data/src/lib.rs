// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use horti_app::Catalog;
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use url::Url;

pub const DEFAULT_SOURCE: &str = "data/robots.json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Where the catalog JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Url(Url),
    File(PathBuf),
}

impl DataSource {
    /// `http(s)://` values are fetched, `file://` URLs and everything else are
    /// read from disk.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            bail!("data source must not be empty -- set [data].source or pass --source");
        }

        let lower = raw.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = Url::parse(raw).with_context(|| format!("invalid data source URL {raw:?}"))?;
            return Ok(Self::Url(url));
        }
        if lower.starts_with("file://") {
            let url = Url::parse(raw).with_context(|| format!("invalid data source URL {raw:?}"))?;
            let path = url
                .to_file_path()
                .map_err(|()| anyhow!("data source {raw:?} is not a local file URL"))?;
            return Ok(Self::File(path));
        }
        if raw.contains("://") {
            bail!("unsupported data source scheme in {raw:?}; use http(s):// or a file path");
        }

        Ok(Self::File(PathBuf::from(raw)))
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Performs the single startup fetch of the catalog. There is no retry: a
/// failure is reported to the caller, who shows it instead of the table.
#[derive(Debug, Clone)]
pub struct Loader {
    source: DataSource,
    timeout: Duration,
    http: HttpClient,
}

impl Loader {
    pub fn new(source: DataSource, timeout: Duration) -> Result<Self> {
        if timeout.is_zero() {
            bail!("data timeout must be positive");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            source,
            timeout,
            http,
        })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn load(&self) -> Result<Catalog> {
        let started = Instant::now();
        let raw = match &self.source {
            DataSource::Url(url) => self.fetch(url)?,
            DataSource::File(path) => fs::read_to_string(path)
                .with_context(|| format!("read catalog {}", path.display()))?,
        };
        let catalog = Catalog::from_json(&raw)
            .with_context(|| format!("load catalog from {}", self.source))?;
        tracing::info!(
            source = %self.source,
            items = catalog.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "catalog fetched"
        );
        Ok(catalog)
    }

    fn fetch(&self, url: &Url) -> Result<String> {
        tracing::debug!(%url, timeout_ms = self.timeout.as_millis() as u64, "fetching catalog");
        let response = self
            .http
            .get(url.clone())
            .send()
            .map_err(|error| connection_error(url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(url, status, &body));
        }

        response
            .text()
            .with_context(|| format!("read catalog response from {url}"))
    }
}

fn connection_error(url: &Url, error: reqwest::Error) -> anyhow::Error {
    if error.is_timeout() {
        return anyhow!("fetch catalog {url}: timed out ({error})");
    }
    anyhow!("fetch catalog {url}: cannot reach server -- check the URL or your connection ({error})")
}

fn clean_error_response(url: &Url, status: StatusCode, body: &str) -> anyhow::Error {
    let body = body.trim();
    if !body.is_empty() && body.len() < 100 && !body.contains('<') && !body.contains('{') {
        return anyhow!("fetch catalog {url}: server error ({}): {body}", status.as_u16());
    }
    anyhow!("fetch catalog {url}: server returned {}", status.as_u16())
}

#[cfg(test)]
mod tests {
    use super::{DataSource, Loader, clean_error_response};
    use anyhow::Result;
    use reqwest::StatusCode;
    use std::path::PathBuf;
    use std::time::Duration;
    use url::Url;

    #[test]
    fn parse_recognizes_http_urls() -> Result<()> {
        let source = DataSource::parse(" https://example.test/data/robots.json ")?;
        assert_eq!(
            source,
            DataSource::Url(Url::parse("https://example.test/data/robots.json")?)
        );
        assert!(matches!(
            DataSource::parse("HTTP://example.test/x.json")?,
            DataSource::Url(_)
        ));
        Ok(())
    }

    #[test]
    fn parse_treats_other_values_as_paths() -> Result<()> {
        assert_eq!(
            DataSource::parse("data/robots.json")?,
            DataSource::File(PathBuf::from("data/robots.json"))
        );
        Ok(())
    }

    #[cfg(unix)]
    #[test]
    fn parse_accepts_file_urls() -> Result<()> {
        assert_eq!(
            DataSource::parse("file:///tmp/robots.json")?,
            DataSource::File(PathBuf::from("/tmp/robots.json"))
        );
        Ok(())
    }

    #[test]
    fn parse_rejects_empty_and_unknown_schemes() {
        let error = DataSource::parse("  ").expect_err("empty source should fail");
        assert!(error.to_string().contains("must not be empty"));

        let error = DataSource::parse("ftp://example.test/robots.json")
            .expect_err("ftp should fail");
        assert!(error.to_string().contains("unsupported data source scheme"));
    }

    #[test]
    fn loader_rejects_zero_timeout() {
        let error = Loader::new(DataSource::File(PathBuf::from("x.json")), Duration::ZERO)
            .expect_err("zero timeout should fail");
        assert!(error.to_string().contains("must be positive"));
    }

    #[test]
    fn error_response_keeps_short_plain_bodies_only() -> Result<()> {
        let url = Url::parse("https://example.test/robots.json")?;
        let short = clean_error_response(&url, StatusCode::NOT_FOUND, "not found\n");
        assert!(short.to_string().ends_with("server error (404): not found"));

        let html = clean_error_response(&url, StatusCode::BAD_GATEWAY, "<html>bad</html>");
        assert!(html.to_string().ends_with("server returned 502"));
        Ok(())
    }
}
