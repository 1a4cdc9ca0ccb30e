//! Markdown research reports, one per framework category, tool type or
//! concern, served at fixed paths under the research root:
//!
//! - `{root}/{framework id}.md`
//! - `{root}/tool-type/{key}.md`
//! - `{root}/concern/{key}.md`

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::cache::fetch::Fetch;
use crate::config::CatalogConfig;
use crate::taxonomy::{self, Concern, Framework, ToolType};

/// Every variant means "not found" to the page layer. Transport errors
/// and timeouts are logged and reported as [`ReportError::NotAvailable`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("Framework category \"{0}\" not found")]
    UnknownFramework(String),
    #[error("Tool type \"{0}\" not found")]
    UnknownToolType(String),
    #[error("Concern \"{0}\" not found")]
    UnknownConcern(String),
    #[error("Research report for \"{name}\" not available yet")]
    NotAvailable { name: String },
}

impl ReportError {
    /// Whether the category itself is unknown, as opposed to a known
    /// category whose report could not be fetched.
    pub fn is_unknown_category(&self) -> bool {
        !matches!(self, ReportError::NotAvailable { .. })
    }
}

/// A taxonomy entry together with its report text.
#[derive(Debug, Clone, Serialize)]
pub struct Report<T: 'static> {
    pub subject: &'static T,
    pub markdown: String,
}

pub struct ResearchReports<F> {
    fetcher: Arc<F>,
    config: CatalogConfig,
}

impl<F: Fetch> ResearchReports<F> {
    pub fn new(fetcher: Arc<F>, config: CatalogConfig) -> Self {
        Self { fetcher, config }
    }

    pub async fn framework_report(&self, id: &str) -> Result<Report<Framework>, ReportError> {
        let framework =
            taxonomy::framework(id).ok_or_else(|| ReportError::UnknownFramework(id.to_string()))?;
        let markdown = self
            .fetch_markdown(&format!("{}.md", framework.id), framework.name)
            .await?;
        Ok(Report {
            subject: framework,
            markdown,
        })
    }

    pub async fn tool_type_report(&self, key: &str) -> Result<Report<ToolType>, ReportError> {
        let tool_type =
            taxonomy::tool_type(key).ok_or_else(|| ReportError::UnknownToolType(key.to_string()))?;
        let markdown = self
            .fetch_markdown(&format!("tool-type/{}.md", tool_type.key), tool_type.name)
            .await?;
        Ok(Report {
            subject: tool_type,
            markdown,
        })
    }

    pub async fn concern_report(&self, key: &str) -> Result<Report<Concern>, ReportError> {
        let concern =
            taxonomy::concern(key).ok_or_else(|| ReportError::UnknownConcern(key.to_string()))?;
        let markdown = self
            .fetch_markdown(&format!("concern/{}.md", concern.key), concern.name)
            .await?;
        Ok(Report {
            subject: concern,
            markdown,
        })
    }

    async fn fetch_markdown(&self, relative: &str, name: &str) -> Result<String, ReportError> {
        let path = self.config.research_path(relative);
        let not_available = || ReportError::NotAvailable {
            name: name.to_string(),
        };

        let response = match tokio::time::timeout(self.config.fetch_timeout(), self.fetcher.fetch(&path)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                tracing::warn!(path = %path, error = %e, "research report fetch failed");
                return Err(not_available());
            }
            Err(_) => {
                tracing::warn!(path = %path, "research report fetch timed out");
                return Err(not_available());
            }
        };

        if !response.is_success() {
            tracing::debug!(path = %path, status = response.status, "research report missing");
            return Err(not_available());
        }

        Ok(String::from_utf8_lossy(&response.body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::fetch::{FetchError, FetchFn, FetchResponse};

    #[test]
    fn display_not_available() {
        let err = ReportError::NotAvailable {
            name: "Content knowledge".into(),
        };
        assert_eq!(
            err.to_string(),
            "Research report for \"Content knowledge\" not available yet"
        );
        assert!(!err.is_unknown_category());
        assert!(ReportError::UnknownConcern("x".into()).is_unknown_category());
    }

    #[tokio::test]
    async fn transport_failure_is_not_available() {
        let fetcher = Arc::new(FetchFn(|_path: String| async move {
            Err::<FetchResponse, _>(FetchError::Transport("connection reset".into()))
        }));
        let reports = ResearchReports::new(fetcher, CatalogConfig::default());

        let err = reports.framework_report("2.3").await.unwrap_err();
        assert_eq!(
            err,
            ReportError::NotAvailable {
                name: "Pedagogical interactions".into()
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_is_not_available() {
        let fetcher = Arc::new(FetchFn(|_path: String| async move {
            tokio::time::sleep(std::time::Duration::from_secs(600)).await;
            Ok::<_, FetchError>(FetchResponse::ok("late"))
        }));
        let reports = ResearchReports::new(fetcher, CatalogConfig::default());

        let err = reports.concern_report("metacognition").await.unwrap_err();
        assert!(matches!(err, ReportError::NotAvailable { .. }));
    }
}
