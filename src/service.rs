use std::collections::BTreeSet;
use std::sync::Arc;

use crate::cache::catalog::Catalog;
use crate::cache::fetch::Fetch;
use crate::cache::loader::{DatasetLoader, LoadError};
use crate::cache::manifest::ResearchManifests;
use crate::config::{CatalogConfig, ConfigError};
use crate::reports::ResearchReports;

/// Everything the index page needs, gathered in one round trip.
#[derive(Debug, Clone)]
pub struct CatalogOverview {
    pub catalog: Arc<Catalog>,
    /// Framework ids that have a research report.
    pub framework_reports: BTreeSet<String>,
    /// Tool-type keys that have a research report.
    pub tool_type_reports: BTreeSet<String>,
}

/// The catalog's read side behind one fetcher: the dataset, the research
/// manifests and the reports.
pub struct CatalogService<F> {
    config: CatalogConfig,
    loader: DatasetLoader<F>,
    manifests: ResearchManifests<F>,
    reports: ResearchReports<F>,
}

impl<F: Fetch + 'static> CatalogService<F> {
    /// Fails when `config` does not pass [`CatalogConfig::validate`].
    pub fn new(fetcher: F, config: CatalogConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let fetcher = Arc::new(fetcher);
        Ok(Self {
            loader: DatasetLoader::new(Arc::clone(&fetcher), &config),
            manifests: ResearchManifests::new(Arc::clone(&fetcher), config.clone()),
            reports: ResearchReports::new(fetcher, config.clone()),
            config,
        })
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub async fn catalog(&self) -> Result<Arc<Catalog>, LoadError> {
        self.loader.load().await
    }

    pub fn loader(&self) -> &DatasetLoader<F> {
        &self.loader
    }

    pub fn manifests(&self) -> &ResearchManifests<F> {
        &self.manifests
    }

    pub fn reports(&self) -> &ResearchReports<F> {
        &self.reports
    }

    /// Loads the catalog and both manifests concurrently. Only the catalog
    /// can fail; manifests degrade to empty sets.
    pub async fn overview(&self) -> Result<CatalogOverview, LoadError> {
        let (catalog, framework_reports, tool_type_reports) = futures::join!(
            self.loader.load(),
            self.manifests.framework_ids(),
            self.manifests.tool_type_keys(),
        );

        Ok(CatalogOverview {
            catalog: catalog?,
            framework_reports: framework_reports.clone(),
            tool_type_reports: tool_type_reports.clone(),
        })
    }
}
