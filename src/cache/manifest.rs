use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::OnceCell;

use crate::cache::fetch::Fetch;
use crate::config::CatalogConfig;

/// Which categories have a markdown research report.
///
/// Each manifest is fetched at most once. Any failure (error status,
/// transport error, timeout, malformed JSON) yields an empty set, and the
/// empty set is remembered like any other result.
pub struct ResearchManifests<F> {
    fetcher: Arc<F>,
    config: CatalogConfig,
    frameworks: OnceCell<BTreeSet<String>>,
    tool_types: OnceCell<BTreeSet<String>>,
    concerns: OnceCell<BTreeSet<String>>,
}

impl<F: Fetch> ResearchManifests<F> {
    pub fn new(fetcher: Arc<F>, config: CatalogConfig) -> Self {
        Self {
            fetcher,
            config,
            frameworks: OnceCell::new(),
            tool_types: OnceCell::new(),
            concerns: OnceCell::new(),
        }
    }

    /// Framework category ids with a report.
    pub async fn framework_ids(&self) -> &BTreeSet<String> {
        self.frameworks
            .get_or_init(|| self.load("manifest.json"))
            .await
    }

    /// Tool-type keys with a report.
    pub async fn tool_type_keys(&self) -> &BTreeSet<String> {
        self.tool_types
            .get_or_init(|| self.load("tool-type/manifest.json"))
            .await
    }

    /// Concern keys with a report.
    pub async fn concern_keys(&self) -> &BTreeSet<String> {
        self.concerns
            .get_or_init(|| self.load("concern/manifest.json"))
            .await
    }

    async fn load(&self, relative: &str) -> BTreeSet<String> {
        let path = self.config.research_path(relative);
        let timeout = self.config.fetch_timeout();

        match fetch_manifest(self.fetcher.as_ref(), &path, timeout).await {
            Ok(ids) => ids,
            Err(reason) => {
                tracing::warn!(path = %path, reason = %reason, "research manifest unavailable, treating as empty");
                BTreeSet::new()
            }
        }
    }
}

async fn fetch_manifest<F: Fetch>(
    fetcher: &F,
    path: &str,
    timeout: Duration,
) -> Result<BTreeSet<String>, String> {
    let response = tokio::time::timeout(timeout, fetcher.fetch(path))
        .await
        .map_err(|_| format!("timed out after {}s", timeout.as_secs()))?
        .map_err(|e| e.to_string())?;

    if !response.is_success() {
        return Err(format!("HTTP status {}", response.status));
    }

    let ids: Vec<String> = serde_json::from_slice(&response.body).map_err(|e| e.to_string())?;
    Ok(ids.into_iter().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fetch::{FetchError, FetchFn, FetchResponse};

    #[tokio::test]
    async fn parses_id_arrays() {
        let fetcher = Arc::new(FetchFn(|path: String| async move {
            let body = match path.as_str() {
                "/research/manifest.json" => r#"["2.3", "1"]"#,
                "/research/tool-type/manifest.json" => r#"["pal"]"#,
                _ => return Ok::<_, FetchError>(FetchResponse::not_found()),
            };
            Ok(FetchResponse::ok(body))
        }));
        let manifests = ResearchManifests::new(fetcher, CatalogConfig::default());

        let ids: Vec<&str> = manifests.framework_ids().await.iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["1", "2.3"]);
        assert!(manifests.tool_type_keys().await.contains("pal"));
        assert!(manifests.concern_keys().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_manifest_degrades_to_empty() {
        let fetcher = Arc::new(FetchFn(|_path: String| async move {
            Ok::<_, FetchError>(FetchResponse::ok("{ not an array"))
        }));
        let manifests = ResearchManifests::new(fetcher, CatalogConfig::default());
        assert!(manifests.framework_ids().await.is_empty());
    }

    #[tokio::test]
    async fn transport_error_degrades_to_empty() {
        let fetcher = Arc::new(FetchFn(|_path: String| async move {
            Err::<FetchResponse, _>(FetchError::Transport("connection reset".into()))
        }));
        let manifests = ResearchManifests::new(fetcher, CatalogConfig::default());
        assert!(manifests.concern_keys().await.is_empty());
    }
}
