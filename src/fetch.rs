//! HTTP GET with a file cache keyed by page.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use reqwest::StatusCode;
use reqwest::blocking::Client;
use tracing::{debug, error, info};

use crate::error::FetchError;

pub struct Fetcher {
    client: Client,
    cache_dir: PathBuf,
    ttl: Duration,
}

impl Fetcher {
    pub fn new(cache_dir: &Path, ttl: Duration, timeout: Duration) -> Result<Self, FetchError> {
        fs::create_dir_all(cache_dir).map_err(|source| FetchError::Cache {
            path: cache_dir.to_path_buf(),
            source,
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("uttalelser/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            client,
            cache_dir: cache_dir.to_path_buf(),
            ttl,
        })
    }

    /// Returns the cached copy when it is younger than the TTL, otherwise
    /// fetches `url` and stores the body under `cache_key`.
    ///
    /// A 404 falls back to a stale cached copy when one exists.
    pub fn fetch(&self, url: &str, cache_key: &str) -> Result<String, FetchError> {
        let cache_path = self.cache_dir.join(cache_key);

        if self.is_fresh(&cache_path) {
            debug!(url = %url, path = %cache_path.display(), "cache hit");
            return read_cache(&cache_path);
        }

        info!(url = %url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response.text().map_err(|source| FetchError::Http {
            url: url.to_string(),
            source,
        })?;
        info!(url = %url, status = status.as_u16(), bytes = body.len(), "response");

        if status == StatusCode::NOT_FOUND {
            if cache_path.exists() {
                info!(url = %url, "404 Not Found, using cache");
                return read_cache(&cache_path);
            }
            return Err(FetchError::NotFoundWithoutCache {
                url: url.to_string(),
            });
        }

        if status != StatusCode::OK {
            error!(url = %url, status = status.as_u16(), body = %body, "unexpected response");
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody {
                url: url.to_string(),
            });
        }

        fs::write(&cache_path, &body).map_err(|source| FetchError::Cache {
            path: cache_path.clone(),
            source,
        })?;

        Ok(body)
    }

    fn is_fresh(&self, path: &Path) -> bool {
        fs::metadata(path)
            .and_then(|metadata| metadata.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok())
            .is_some_and(|age| age < self.ttl)
    }
}

/// Cache file name for a detail page: scheme dropped, `/` replaced by `---`.
pub fn cache_key_for_url(url: &str) -> String {
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    format!("uttalelse-{}.html", without_scheme.replace('/', "---"))
}

pub fn cache_key_for_page(page: usize) -> String {
    format!("page-{page}.html")
}

fn read_cache(path: &Path) -> Result<String, FetchError> {
    fs::read_to_string(path).map_err(|source| FetchError::Cache {
        path: path.to_path_buf(),
        source,
    })
}
