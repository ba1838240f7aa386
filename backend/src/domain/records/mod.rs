//! Reference-data records managed by administrators, plus researcher
//! insights.
//!
//! Every table is modelled as a stored record plus a draft carrying the
//! caller-supplied columns. Drafts validate themselves before an adapter
//! sees them; the record adds the identifier assigned by the store.

mod country;
mod entity;
mod insight;
mod mineral;
mod price;
mod production;
mod role;
mod site;
mod user;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use country::{Country, CountryDraft};
pub use entity::{Entity, UnknownEntityError};
pub use insight::{MineralInsight, MineralInsightDraft};
pub use mineral::{Mineral, MineralDraft};
pub use price::{MineralPrice, MineralPriceDraft};
pub use production::{ProductionStat, ProductionStatDraft};
pub use role::{Role, RoleDraft};
pub use site::{Site, SiteDraft};
pub use user::{User, UserDraft};

/// Primary key assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i32);

impl RecordId {
    /// Wrap a raw primary key.
    #[must_use]
    pub const fn new(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for RecordId {
    fn from(raw: i32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons a draft is rejected before persistence.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    /// A text column was empty once trimmed.
    BlankField { field: &'static str },
    /// A numeric column must not be negative.
    Negative { field: &'static str, value: f64 },
    /// A numeric column was NaN or infinite.
    NotFinite { field: &'static str },
    /// A coordinate fell outside its valid range.
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    /// Years count from 1.
    NonPositiveYear { value: i32 },
}

impl RecordValidationError {
    /// Name of the offending field, for error details.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::BlankField { field }
            | Self::Negative { field, .. }
            | Self::NotFinite { field }
            | Self::OutOfRange { field, .. } => field,
            Self::NonPositiveYear { .. } => "year",
        }
    }
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankField { field } => write!(f, "{field} must not be empty"),
            Self::Negative { field, value } => {
                write!(f, "{field} must not be negative (got {value})")
            }
            Self::NotFinite { field } => write!(f, "{field} must be a finite number"),
            Self::OutOfRange {
                field,
                value,
                min,
                max,
            } => write!(f, "{field} must be between {min} and {max} (got {value})"),
            Self::NonPositiveYear { value } => write!(f, "year must be positive (got {value})"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Draft columns that can check their own invariants.
pub trait Validate {
    /// Reject drafts that would break a table invariant.
    fn validate(&self) -> Result<(), RecordValidationError>;
}

/// A stored row of one of the reference tables.
pub trait Record: Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    /// Caller-supplied columns used for inserts and full-row edits.
    type Draft: Validate + Clone + fmt::Debug + Send + Sync + 'static;

    /// Table this record lives in.
    const ENTITY: Entity;

    /// Primary key.
    fn id(&self) -> RecordId;

    /// Combine an assigned id with the draft columns.
    fn from_draft(id: RecordId, draft: Self::Draft) -> Self;

    /// Value of the column carrying a uniqueness constraint, if the table has one.
    fn unique_key(_draft: &Self::Draft) -> Option<&str> {
        None
    }
}

pub(crate) fn require_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        return Err(RecordValidationError::BlankField { field });
    }
    Ok(())
}

pub(crate) fn require_finite(field: &'static str, value: f64) -> Result<(), RecordValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(RecordValidationError::NotFinite { field })
    }
}

pub(crate) fn require_non_negative(
    field: &'static str,
    value: f64,
) -> Result<(), RecordValidationError> {
    require_finite(field, value)?;
    if value < 0.0 {
        return Err(RecordValidationError::Negative { field, value });
    }
    Ok(())
}

pub(crate) fn require_range(
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), RecordValidationError> {
    require_finite(field, value)?;
    if !(min..=max).contains(&value) {
        return Err(RecordValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

pub(crate) fn require_positive_year(value: i32) -> Result<(), RecordValidationError> {
    if value <= 0 {
        return Err(RecordValidationError::NonPositiveYear { value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Shared validation helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("   ", false)]
    #[case("Lithium", true)]
    fn text_must_not_be_blank(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(require_text("name", value).is_ok(), ok);
    }

    #[rstest]
    #[case(-0.5, false)]
    #[case(0.0, true)]
    #[case(f64::NAN, false)]
    #[case(f64::INFINITY, false)]
    fn non_negative_rejects_negatives_and_nan(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(require_non_negative("price", value).is_ok(), ok);
    }

    #[rstest]
    #[case(-90.0, true)]
    #[case(90.0, true)]
    #[case(90.5, false)]
    fn range_is_inclusive(#[case] value: f64, #[case] ok: bool) {
        assert_eq!(require_range("latitude", value, -90.0, 90.0).is_ok(), ok);
    }

    #[rstest]
    fn year_zero_is_rejected() {
        assert_eq!(
            require_positive_year(0),
            Err(RecordValidationError::NonPositiveYear { value: 0 })
        );
        assert_eq!(RecordValidationError::NonPositiveYear { value: 0 }.field(), "year");
    }
}
