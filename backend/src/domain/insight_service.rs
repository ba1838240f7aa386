//! Researcher insights over the insight and mineral tables.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::catalogue_service::{map_repository_error, map_validation_error};
use super::ports::{EntityRepository, ResearchInsights};
use super::reports::{self, InsightBoard};
use super::{Error, Mineral, MineralInsight, MineralInsightDraft, RecordId, Validate};

/// Insight use-cases. New notes must name a stored mineral.
#[derive(Clone)]
pub struct InsightService {
    insights: Arc<dyn EntityRepository<MineralInsight>>,
    minerals: Arc<dyn EntityRepository<Mineral>>,
}

impl InsightService {
    /// Create a service over the insight table and the minerals it annotates.
    pub fn new(
        insights: Arc<dyn EntityRepository<MineralInsight>>,
        minerals: Arc<dyn EntityRepository<Mineral>>,
    ) -> Self {
        Self { insights, minerals }
    }
}

#[async_trait]
impl ResearchInsights for InsightService {
    async fn board(&self) -> Result<InsightBoard, Error> {
        let minerals = self.minerals.list().await.map_err(map_repository_error)?;
        let insights = self.insights.list().await.map_err(map_repository_error)?;
        Ok(reports::insight_board(&minerals, &insights))
    }

    async fn add(&self, draft: MineralInsightDraft) -> Result<MineralInsight, Error> {
        draft.validate().map_err(map_validation_error)?;
        let mineral = self
            .minerals
            .get(draft.mineral_id)
            .await
            .map_err(map_repository_error)?;
        if mineral.is_none() {
            return Err(Error::invalid_request("Unknown mineral.")
                .with_details(json!({ "field": "mineral_id" })));
        }
        let insight = self
            .insights
            .add(&draft)
            .await
            .map_err(map_repository_error)?;
        info!(id = %insight.id, mineral_id = %insight.mineral_id, "insight added");
        Ok(insight)
    }

    async fn revise(&self, id: RecordId, insight: String) -> Result<MineralInsight, Error> {
        let existing = self
            .insights
            .get(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("mineral insight {id} not found")))?;
        let draft = MineralInsightDraft {
            mineral_id: existing.mineral_id,
            insight,
        };
        draft.validate().map_err(map_validation_error)?;
        let revised = self
            .insights
            .edit(id, &draft)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "insight revised");
        Ok(revised)
    }

    async fn delete(&self, id: RecordId) -> Result<(), Error> {
        self.insights
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        info!(%id, "insight deleted");
        Ok(())
    }
}
