use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;

use crate::cache::catalog::Catalog;
use crate::cache::fetch::Fetch;
use crate::config::CatalogConfig;

/// Why a dataset load failed.
///
/// Cloneable because every caller attached to the same in-flight load
/// receives the same failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("fetch failed for {path}: {message}")]
    Fetch { path: String, message: String },
    #[error("{path} returned HTTP status {status}")]
    Status { path: String, status: u16 },
    #[error("parse error: {0}")]
    Parse(String),
    #[error("fetch of {path} timed out after {seconds}s")]
    Timeout { path: String, seconds: u64 },
    #[error("Duplicate benchmark slug: {0}")]
    DuplicateSlug(String),
}

type SharedLoad = Shared<BoxFuture<'static, Result<Arc<Catalog>, LoadError>>>;

/// Fetches, parses and indexes the benchmark collection at most once.
///
/// Concurrent callers before the first resolution share one in-flight
/// fetch. A success is kept for the loader's lifetime; a failure clears
/// the slot so the next call starts over.
pub struct DatasetLoader<F> {
    fetcher: Arc<F>,
    path: String,
    timeout: Duration,
    in_flight: Mutex<Option<SharedLoad>>,
}

impl<F: Fetch + 'static> DatasetLoader<F> {
    pub fn new(fetcher: Arc<F>, config: &CatalogConfig) -> Self {
        Self {
            fetcher,
            path: config.dataset_path.clone(),
            timeout: config.fetch_timeout(),
            in_flight: Mutex::new(None),
        }
    }

    /// Requires a tokio runtime with the time driver enabled.
    pub async fn load(&self) -> Result<Arc<Catalog>, LoadError> {
        let shared = {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            match slot.as_ref() {
                Some(pending) => pending.clone(),
                None => {
                    let fut = fetch_catalog(Arc::clone(&self.fetcher), self.path.clone(), self.timeout)
                        .boxed()
                        .shared();
                    *slot = Some(fut.clone());
                    fut
                }
            }
        };

        let result = shared.clone().await;

        if let Err(err) = &result {
            let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
            // A later load may already have replaced the failed one
            if slot.as_ref().is_some_and(|pending| pending.ptr_eq(&shared)) {
                tracing::warn!(path = %self.path, error = %err, "dataset load failed, cache cleared");
                *slot = None;
            }
        }

        result
    }

    /// The resolved catalog, if a load has already succeeded.
    pub fn cached(&self) -> Option<Arc<Catalog>> {
        let slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        match slot.as_ref()?.peek()? {
            Ok(catalog) => Some(Arc::clone(catalog)),
            Err(_) => None,
        }
    }

    /// Drop the cached catalog so the next load fetches and indexes again.
    pub fn invalidate(&self) {
        let mut slot = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = None;
    }
}

async fn fetch_catalog<F: Fetch>(
    fetcher: Arc<F>,
    path: String,
    timeout: Duration,
) -> Result<Arc<Catalog>, LoadError> {
    tracing::debug!(path = %path, "fetching benchmark dataset");

    let response = match tokio::time::timeout(timeout, fetcher.fetch(&path)).await {
        Ok(Ok(response)) => response,
        Ok(Err(e)) => {
            return Err(LoadError::Fetch {
                path,
                message: e.to_string(),
            })
        }
        Err(_) => {
            return Err(LoadError::Timeout {
                path,
                seconds: timeout.as_secs(),
            })
        }
    };

    if !response.is_success() {
        return Err(LoadError::Status {
            path,
            status: response.status,
        });
    }

    let catalog = Catalog::from_json(&response.body)?;
    tracing::debug!(
        records = catalog.len(),
        version = %catalog.version(),
        "benchmark catalog indexed"
    );

    Ok(Arc::new(catalog))
}
