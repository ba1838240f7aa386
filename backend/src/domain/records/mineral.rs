//! Mineral commodities and their reference market price.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate};
use super::{require_non_negative, require_text};

/// A stored mineral row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mineral {
    pub id: RecordId,
    pub name: String,
    pub description: String,
    pub market_price_usd_per_tonne: f64,
}

/// Columns supplied when adding or editing a mineral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralDraft {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub market_price_usd_per_tonne: f64,
}

impl Validate for MineralDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_non_negative("market_price_usd_per_tonne", self.market_price_usd_per_tonne)
    }
}

impl Record for Mineral {
    type Draft = MineralDraft;
    const ENTITY: Entity = Entity::Mineral;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: MineralDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            market_price_usd_per_tonne: draft.market_price_usd_per_tonne,
        }
    }
}
