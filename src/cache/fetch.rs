//! The fetch seam between the catalog and wherever its static files live.
//!
//! A [`Fetch`] implementation resolves a site-absolute path such as
//! `/benchmarks.json` to a status and a body. Non-success statuses are
//! reported as responses, not errors; transport failures are errors.

use std::future::Future;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("transport error: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl FetchResponse {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::with_status(404)
    }

    pub fn with_status(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Resolves site paths to responses.
///
/// All implementations must be `Send + Sync`; one fetcher is shared by the
/// loader, the manifests and the reports.
pub trait Fetch: Send + Sync {
    fn fetch(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send;
}

/// Adapts a caller-supplied async function into a [`Fetch`].
///
/// ```
/// use edubench_catalog::cache::{FetchError, FetchFn, FetchResponse};
///
/// let fetcher = FetchFn(|path: String| async move {
///     Ok::<_, FetchError>(FetchResponse::ok(format!("requested {path}")))
/// });
/// # let _ = fetcher;
/// ```
pub struct FetchFn<F>(pub F);

impl<F, Fut> Fetch for FetchFn<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<FetchResponse, FetchError>> + Send,
{
    fn fetch(
        &self,
        path: &str,
    ) -> impl Future<Output = Result<FetchResponse, FetchError>> + Send {
        (self.0)(path.to_string())
    }
}

/// Serves site paths from a local directory, as a static host would.
///
/// Missing files and paths that try to leave the root answer 404.
#[derive(Debug, Clone)]
pub struct DirFetcher {
    root: PathBuf,
}

impl DirFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Fetch for DirFetcher {
    async fn fetch(&self, path: &str) -> Result<FetchResponse, FetchError> {
        let Some(relative) = site_relative(path) else {
            return Ok(FetchResponse::not_found());
        };

        match tokio::fs::read(self.root.join(relative)).await {
            Ok(body) => Ok(FetchResponse::ok(body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FetchResponse::not_found()),
            Err(e) => Err(FetchError::Io(e)),
        }
    }
}

/// `/a/b.json` → `a/b.json`; `None` for anything but plain components.
fn site_relative(path: &str) -> Option<PathBuf> {
    let trimmed = path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }

    let relative = Path::new(trimmed);
    relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
        .then(|| relative.to_path_buf())
}
