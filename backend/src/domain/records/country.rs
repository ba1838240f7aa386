//! Producer countries with headline economic figures.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate};
use super::{require_finite, require_text};

/// A stored country row. GDP and mining revenue are in billions of USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Country {
    pub id: RecordId,
    pub name: String,
    pub gdp_billion_usd: f64,
    pub mining_revenue_billion_usd: f64,
    pub key_projects: String,
}

/// Columns supplied when adding or editing a country.
///
/// Revenue is expected to stay within GDP but this is not enforced; the GDP
/// composition report shows a negative remainder when it does not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDraft {
    pub name: String,
    pub gdp_billion_usd: f64,
    pub mining_revenue_billion_usd: f64,
    #[serde(default)]
    pub key_projects: String,
}

impl Validate for CountryDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_finite("gdp_billion_usd", self.gdp_billion_usd)?;
        require_finite("mining_revenue_billion_usd", self.mining_revenue_billion_usd)
    }
}

impl Record for Country {
    type Draft = CountryDraft;
    const ENTITY: Entity = Entity::Country;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: CountryDraft) -> Self {
        Self {
            id,
            name: draft.name,
            gdp_billion_usd: draft.gdp_billion_usd,
            mining_revenue_billion_usd: draft.mining_revenue_billion_usd,
            key_projects: draft.key_projects,
        }
    }
}
