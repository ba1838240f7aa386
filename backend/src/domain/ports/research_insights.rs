//! Driving port behind the researcher insights page.

use async_trait::async_trait;

use crate::domain::{Error, InsightBoard, MineralInsight, MineralInsightDraft, RecordId};

/// Notes researchers keep against minerals.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResearchInsights: Send + Sync {
    /// Minerals to choose from plus every insight, newest first.
    async fn board(&self) -> Result<InsightBoard, Error>;

    /// Store a note for an existing mineral.
    async fn add(&self, draft: MineralInsightDraft) -> Result<MineralInsight, Error>;

    /// Replace the text of insight `id`, keeping its mineral.
    async fn revise(&self, id: RecordId, insight: String) -> Result<MineralInsight, Error>;

    /// Remove insight `id`.
    async fn delete(&self, id: RecordId) -> Result<(), Error>;
}
