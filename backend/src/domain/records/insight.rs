//! Research notes researchers attach to minerals.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate, require_text};

/// A stored insight. `mineral_id` is not an enforced reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineralInsight {
    pub id: RecordId,
    pub mineral_id: RecordId,
    pub insight: String,
}

/// Columns supplied when adding or rewriting an insight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MineralInsightDraft {
    pub mineral_id: RecordId,
    pub insight: String,
}

impl Validate for MineralInsightDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("insight", &self.insight)
    }
}

impl Record for MineralInsight {
    type Draft = MineralInsightDraft;
    const ENTITY: Entity = Entity::MineralInsight;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: MineralInsightDraft) -> Self {
        Self {
            id,
            mineral_id: draft.mineral_id,
            insight: draft.insight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Supply tightening after 2024 export ban.", true)]
    #[case(" \n ", false)]
    fn insight_text_is_required(#[case] text: &str, #[case] ok: bool) {
        let draft = MineralInsightDraft {
            mineral_id: RecordId::new(1),
            insight: text.to_owned(),
        };
        assert_eq!(draft.validate().is_ok(), ok);
    }
}
