use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use edubench_catalog::cache::{DatasetLoader, DirFetcher, Fetch, FetchError, FetchResponse, LoadError};
use edubench_catalog::CatalogConfig;

const DATASET: &str = r#"[
    {"name": "Low", "slug": "low", "sourceUrl": "https://example.org/low", "sourceType": "paper",
     "description": "A low relevance paper.", "relevanceScore": 3},
    {"name": "Unscored", "slug": "unscored", "sourceUrl": "https://example.org/u", "sourceType": "dataset",
     "description": "No relevance score."},
    {"name": "High", "slug": "high", "sourceUrl": "https://example.org/high", "sourceType": "paper",
     "description": "A high relevance paper.", "relevanceScore": 9}
]"#;

/// Serves scripted responses in call order and counts calls.
struct ScriptedFetcher {
    calls: AtomicUsize,
    script: Vec<FetchResponse>,
    delay: Duration,
}

impl ScriptedFetcher {
    fn new(script: Vec<FetchResponse>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            script,
            delay: Duration::from_millis(10),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetch for ScriptedFetcher {
    async fn fetch(&self, _path: &str) -> Result<FetchResponse, FetchError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        let last = self.script.len() - 1;
        Ok(self.script[n.min(last)].clone())
    }
}

fn loader(fetcher: &Arc<ScriptedFetcher>) -> DatasetLoader<ScriptedFetcher> {
    DatasetLoader::new(Arc::clone(fetcher), &CatalogConfig::default())
}

#[tokio::test]
async fn invariant_concurrent_loads_share_one_fetch() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]));
    let loader = loader(&fetcher);

    let (a, b) = tokio::join!(loader.load(), loader.load());
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(fetcher.calls(), 1);
    assert!(Arc::ptr_eq(&a, &b));

    // Later calls reuse the resolved catalog
    let c = loader.load().await.unwrap();
    assert!(Arc::ptr_eq(&a, &c));
    assert_eq!(fetcher.calls(), 1);
}

#[tokio::test]
async fn invariant_failure_is_retried_on_next_call() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        FetchResponse::with_status(503),
        FetchResponse::ok(DATASET),
    ]));
    let loader = loader(&fetcher);

    let err = loader.load().await.unwrap_err();
    assert_eq!(
        err,
        LoadError::Status {
            path: "/benchmarks.json".into(),
            status: 503
        }
    );
    assert!(loader.cached().is_none());

    let catalog = loader.load().await.unwrap();
    assert_eq!(catalog.len(), 3);
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn invariant_concurrent_callers_share_a_failure() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![
        FetchResponse::with_status(500),
        FetchResponse::ok(DATASET),
    ]));
    let loader = loader(&fetcher);

    let (a, b) = tokio::join!(loader.load(), loader.load());
    assert_eq!(a.unwrap_err(), b.unwrap_err());
    assert_eq!(fetcher.calls(), 1);

    assert!(loader.load().await.is_ok());
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn test_parse_error_is_reported() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok("{ not json")]));
    let err = loader(&fetcher).load().await.unwrap_err();
    assert!(matches!(err, LoadError::Parse(_)));
}

#[tokio::test]
async fn test_duplicate_slug_fails_load() {
    let body = r#"[
        {"name": "A", "slug": "same", "sourceUrl": "", "sourceType": "paper", "description": ""},
        {"name": "B", "slug": "same", "sourceUrl": "", "sourceType": "paper", "description": ""}
    ]"#;
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(body)]));
    let err = loader(&fetcher).load().await.unwrap_err();
    assert_eq!(err, LoadError::DuplicateSlug("same".into()));
}

#[tokio::test(start_paused = true)]
async fn test_hung_fetch_times_out() {
    let mut fetcher = ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]);
    fetcher.delay = Duration::from_secs(120);
    let fetcher = Arc::new(fetcher);

    let config = CatalogConfig {
        fetch_timeout_secs: 5,
        ..Default::default()
    };
    let loader = DatasetLoader::new(Arc::clone(&fetcher), &config);

    let err = loader.load().await.unwrap_err();
    assert_eq!(
        err,
        LoadError::Timeout {
            path: "/benchmarks.json".into(),
            seconds: 5
        }
    );
}

#[tokio::test]
async fn test_records_ordered_by_relevance_descending() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]));
    let catalog = loader(&fetcher).load().await.unwrap();

    let slugs: Vec<&str> = catalog.benchmarks().iter().map(|b| b.slug.as_str()).collect();
    assert_eq!(slugs, vec!["high", "low", "unscored"]);
}

#[tokio::test]
async fn test_index_is_ready_when_load_resolves() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]));
    let catalog = loader(&fetcher).load().await.unwrap();

    assert!(catalog.index().is_ready());
    assert_eq!(catalog.index().built_from(), Some(catalog.version()));
    let hits = catalog.search("paper").unwrap();
    assert_eq!(hits.len(), 2);
}

#[tokio::test]
async fn test_invalidate_forces_refetch() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]));
    let loader = loader(&fetcher);

    loader.load().await.unwrap();
    assert!(loader.cached().is_some());

    loader.invalidate();
    assert!(loader.cached().is_none());

    loader.load().await.unwrap();
    assert_eq!(fetcher.calls(), 2);
}

#[tokio::test]
async fn golden_bundled_dataset_loads_from_directory() {
    let fetcher = Arc::new(DirFetcher::new(concat!(env!("CARGO_MANIFEST_DIR"), "/static")));
    let loader = DatasetLoader::new(fetcher, &CatalogConfig::default());

    let catalog = loader.load().await.unwrap();
    assert_eq!(catalog.len(), 50);
    assert!(catalog.version().as_str().starts_with("sha256:"));
}

#[tokio::test]
async fn test_unvalidated_zero_timeout_still_loads() {
    let fetcher = Arc::new(ScriptedFetcher::new(vec![FetchResponse::ok(DATASET)]));
    let config = CatalogConfig {
        fetch_timeout_secs: 0,
        ..Default::default()
    };
    let loader = DatasetLoader::new(Arc::clone(&fetcher), &config);

    assert_eq!(loader.load().await.unwrap().len(), 3);
}
