//! Yearly production statistics per country and mineral.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate};
use super::{require_finite, require_non_negative, require_positive_year};

/// A stored production statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionStat {
    pub id: RecordId,
    pub year: i32,
    pub country_id: RecordId,
    pub mineral_id: RecordId,
    pub production_tonnes: f64,
    pub export_value_billion_usd: f64,
}

/// Columns supplied when adding or editing a production statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionStatDraft {
    pub year: i32,
    pub country_id: RecordId,
    pub mineral_id: RecordId,
    pub production_tonnes: f64,
    pub export_value_billion_usd: f64,
}

impl Validate for ProductionStatDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_positive_year(self.year)?;
        require_non_negative("production_tonnes", self.production_tonnes)?;
        require_finite("export_value_billion_usd", self.export_value_billion_usd)
    }
}

impl Record for ProductionStat {
    type Draft = ProductionStatDraft;
    const ENTITY: Entity = Entity::ProductionStat;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: ProductionStatDraft) -> Self {
        Self {
            id,
            year: draft.year,
            country_id: draft.country_id,
            mineral_id: draft.mineral_id,
            production_tonnes: draft.production_tonnes,
            export_value_billion_usd: draft.export_value_billion_usd,
        }
    }
}
