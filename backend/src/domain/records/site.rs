//! Mining sites placed on the map.

use serde::{Deserialize, Serialize};

use super::{Entity, Record, RecordId, RecordValidationError, Validate};
use super::{require_non_negative, require_range, require_text};

/// A stored site row.
///
/// `country_id` and `mineral_id` are not enforced references; deleting the
/// country or mineral leaves them dangling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Site {
    pub id: RecordId,
    pub name: String,
    pub country_id: RecordId,
    pub mineral_id: RecordId,
    pub latitude: f64,
    pub longitude: f64,
    pub production_tonnes: f64,
}

/// Columns supplied when adding or editing a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDraft {
    pub name: String,
    pub country_id: RecordId,
    pub mineral_id: RecordId,
    pub latitude: f64,
    pub longitude: f64,
    pub production_tonnes: f64,
}

impl Validate for SiteDraft {
    fn validate(&self) -> Result<(), RecordValidationError> {
        require_text("name", &self.name)?;
        require_range("latitude", self.latitude, -90.0, 90.0)?;
        require_range("longitude", self.longitude, -180.0, 180.0)?;
        require_non_negative("production_tonnes", self.production_tonnes)
    }
}

impl Record for Site {
    type Draft = SiteDraft;
    const ENTITY: Entity = Entity::Site;

    fn id(&self) -> RecordId {
        self.id
    }

    fn from_draft(id: RecordId, draft: SiteDraft) -> Self {
        Self {
            id,
            name: draft.name,
            country_id: draft.country_id,
            mineral_id: draft.mineral_id,
            latitude: draft.latitude,
            longitude: draft.longitude,
            production_tonnes: draft.production_tonnes,
        }
    }
}
