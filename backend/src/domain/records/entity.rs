//! Names of the reference tables as they appear in admin URLs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// A stored table: the seven reference tables plus researcher insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Entity {
    Role,
    User,
    Mineral,
    Country,
    Site,
    ProductionStat,
    MineralPrice,
    MineralInsight,
}

impl Entity {
    /// Every table administrators manage, in admin menu order. Insights
    /// belong to researchers and are not listed.
    pub const ALL: [Self; 7] = [
        Self::Role,
        Self::User,
        Self::Mineral,
        Self::Country,
        Self::Site,
        Self::ProductionStat,
        Self::MineralPrice,
    ];

    /// Path segment used under `/admin/`, or under `/researcher/` for insights.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Role => "roles",
            Self::User => "users",
            Self::Mineral => "minerals",
            Self::Country => "countries",
            Self::Site => "sites",
            Self::ProductionStat => "production",
            Self::MineralPrice => "prices",
            Self::MineralInsight => "insights",
        }
    }

    /// Singular label for messages and export filenames.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Role => "role",
            Self::User => "user",
            Self::Mineral => "mineral",
            Self::Country => "country",
            Self::Site => "site",
            Self::ProductionStat => "production stat",
            Self::MineralPrice => "mineral price",
            Self::MineralInsight => "mineral insight",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Raised when a URL names no administrator table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown entity: {0}")]
pub struct UnknownEntityError(pub String);

impl FromStr for Entity {
    type Err = UnknownEntityError;

    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|entity| entity.path_segment() == segment)
            .ok_or_else(|| UnknownEntityError(segment.to_owned()))
    }
}
