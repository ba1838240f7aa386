//! Historical mineral prices.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate};
use super::{require_non_negative, require_positive_year, require_text};

/// A stored yearly price.
///
/// The mineral is referenced by name rather than id. `(mineral_name, year)`
/// is unique only by convention; the price seeder relies on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralPrice {
    pub id: RecordId,
    pub mineral_name: String,
    pub year: i32,
    pub price_usd_per_tonne: f64,
}

/// Columns supplied when adding, editing or seeding a price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MineralPriceDraft {
    pub mineral_name: String,
    pub year: i32,
    pub price_usd_per_tonne: f64,
}

impl MineralPriceDraft {
    /// Build a draft from borrowed parts.
    pub fn new(mineral_name: impl Into<String>, year: i32, price_usd_per_tonne: f64) -> Self {
        Self {
            mineral_name: mineral_name.into(),
            year,
            price_usd_per_tonne,
        }
    }
}

impl Validate for MineralPriceDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("mineral_name", &self.mineral_name)?;
        require_positive_year(self.year)?;
        require_non_negative("price_usd_per_tonne", self.price_usd_per_tonne)
    }
}

impl Record for MineralPrice {
    type Draft = MineralPriceDraft;
    const ENTITY: Entity = Entity::MineralPrice;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: MineralPriceDraft) -> Self {
        Self {
            id,
            mineral_name: draft.mineral_name,
            year: draft.year,
            price_usd_per_tonne: draft.price_usd_per_tonne,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(MineralPriceDraft::new("Cobalt", 2024, 49822.0), None)]
    #[case(MineralPriceDraft::new("", 2024, 1.0), Some("mineral_name"))]
    #[case(MineralPriceDraft::new("Cobalt", -3, 1.0), Some("year"))]
    #[case(MineralPriceDraft::new("Cobalt", 2024, -1.0), Some("price_usd_per_tonne"))]
    fn validates_price_rows(#[case] draft: MineralPriceDraft, #[case] field: Option<&str>) {
        assert_eq!(draft.validate().err().map(|err| err.field()), field);
    }
}
