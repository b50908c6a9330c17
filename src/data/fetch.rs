//! Spreadsheet fetcher.
//!
//! One GET per term, no retry, transport default timeout. Local paths are
//! read from disk so fixture registries and archived files go through the same
//! code path as the live source.

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;

use crate::error::SourceError;

pub struct Fetcher {
    client: Client,
    base_dir: Option<PathBuf>,
}

impl Fetcher {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self {
            client: Client::new(),
            base_dir,
        }
    }

    /// Fetch the raw bytes behind `url`.
    pub fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        if is_remote(url) {
            self.fetch_http(url)
        } else {
            self.fetch_local(url)
        }
    }

    fn fetch_http(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let resp = self.client.get(url).send().map_err(|e| SourceError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !resp.status().is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.bytes().map_err(|e| SourceError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(body.to_vec())
    }

    fn fetch_local(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        let path = self.resolve_local(url);
        fs::read(&path).map_err(|source| SourceError::Io { path, source })
    }

    fn resolve_local(&self, url: &str) -> PathBuf {
        let raw = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.base_dir {
            Some(dir) if raw.is_relative() => dir.join(raw),
            _ => raw.to_path_buf(),
        }
    }
}

fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Last path segment of a URL, for log lines.
pub fn file_name(url: &str) -> &str {
    url.rsplit('/').next().filter(|s| !s.is_empty()).unwrap_or(url)
}
