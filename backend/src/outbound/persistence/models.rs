//! Internal Diesel row structs.
//!
//! Rows never leave the persistence layer: repositories convert them into
//! domain records with `From`. Each table has one read struct and one write
//! struct; the write struct serves both `INSERT` and full-row `UPDATE`.

use diesel::prelude::*;

use super::schema::{
    countries, mineral_insights, mineral_prices, minerals, production_stats, roles, sites, users,
};
use crate::domain::{
    Country, CountryDraft, Mineral, MineralDraft, MineralInsight, MineralInsightDraft,
    MineralPrice, MineralPriceDraft, ProductionStat, ProductionStatDraft, RecordId, Role,
    RoleDraft, Site, SiteDraft, User, UserDraft,
};

// ---------------------------------------------------------------------------
// Roles and users
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct RoleRow {
    pub id: i32,
    pub name: String,
    pub permissions: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = roles)]
pub(crate) struct RoleWrite<'a> {
    pub name: &'a str,
    pub permissions: &'a str,
}

impl From<RoleRow> for Role {
    fn from(row: RoleRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            name: row.name,
            permissions: row.permissions,
        }
    }
}

impl<'a> From<&'a RoleDraft> for RoleWrite<'a> {
    fn from(draft: &'a RoleDraft) -> Self {
        Self {
            name: &draft.name,
            permissions: &draft.permissions,
        }
    }
}

/// Row struct for the users table; `password_hash` is a PHC string.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct UserRow {
    pub id: i32,
    pub username: String,
    pub password_hash: String,
    pub role_id: i32,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserWrite<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role_id: i32,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            username: row.username,
            password_hash: row.password_hash,
            role_id: RecordId::new(row.role_id),
        }
    }
}

impl<'a> From<&'a UserDraft> for UserWrite<'a> {
    fn from(draft: &'a UserDraft) -> Self {
        Self {
            username: &draft.username,
            password_hash: &draft.password_hash,
            role_id: draft.role_id.get(),
        }
    }
}

// ---------------------------------------------------------------------------
// Reference tables
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = minerals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MineralRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub market_price_usd_per_tonne: f64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = minerals)]
pub(crate) struct MineralWrite<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub market_price_usd_per_tonne: f64,
}

impl From<MineralRow> for Mineral {
    fn from(row: MineralRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            name: row.name,
            description: row.description,
            market_price_usd_per_tonne: row.market_price_usd_per_tonne,
        }
    }
}

impl<'a> From<&'a MineralDraft> for MineralWrite<'a> {
    fn from(draft: &'a MineralDraft) -> Self {
        Self {
            name: &draft.name,
            description: &draft.description,
            market_price_usd_per_tonne: draft.market_price_usd_per_tonne,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = countries)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct CountryRow {
    pub id: i32,
    pub name: String,
    pub gdp_billion_usd: f64,
    pub mining_revenue_billion_usd: f64,
    pub key_projects: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = countries)]
pub(crate) struct CountryWrite<'a> {
    pub name: &'a str,
    pub gdp_billion_usd: f64,
    pub mining_revenue_billion_usd: f64,
    pub key_projects: &'a str,
}

impl From<CountryRow> for Country {
    fn from(row: CountryRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            name: row.name,
            gdp_billion_usd: row.gdp_billion_usd,
            mining_revenue_billion_usd: row.mining_revenue_billion_usd,
            key_projects: row.key_projects,
        }
    }
}

impl<'a> From<&'a CountryDraft> for CountryWrite<'a> {
    fn from(draft: &'a CountryDraft) -> Self {
        Self {
            name: &draft.name,
            gdp_billion_usd: draft.gdp_billion_usd,
            mining_revenue_billion_usd: draft.mining_revenue_billion_usd,
            key_projects: &draft.key_projects,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sites)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct SiteRow {
    pub id: i32,
    pub name: String,
    pub country_id: i32,
    pub mineral_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub production_tonnes: f64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = sites)]
pub(crate) struct SiteWrite<'a> {
    pub name: &'a str,
    pub country_id: i32,
    pub mineral_id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub production_tonnes: f64,
}

impl From<SiteRow> for Site {
    fn from(row: SiteRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            name: row.name,
            country_id: RecordId::new(row.country_id),
            mineral_id: RecordId::new(row.mineral_id),
            latitude: row.latitude,
            longitude: row.longitude,
            production_tonnes: row.production_tonnes,
        }
    }
}

impl<'a> From<&'a SiteDraft> for SiteWrite<'a> {
    fn from(draft: &'a SiteDraft) -> Self {
        Self {
            name: &draft.name,
            country_id: draft.country_id.get(),
            mineral_id: draft.mineral_id.get(),
            latitude: draft.latitude,
            longitude: draft.longitude,
            production_tonnes: draft.production_tonnes,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = production_stats)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct ProductionStatRow {
    pub id: i32,
    pub year: i32,
    pub country_id: i32,
    pub mineral_id: i32,
    pub production_tonnes: f64,
    pub export_value_billion_usd: f64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = production_stats)]
pub(crate) struct ProductionStatWrite {
    pub year: i32,
    pub country_id: i32,
    pub mineral_id: i32,
    pub production_tonnes: f64,
    pub export_value_billion_usd: f64,
}

impl From<ProductionStatRow> for ProductionStat {
    fn from(row: ProductionStatRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            year: row.year,
            country_id: RecordId::new(row.country_id),
            mineral_id: RecordId::new(row.mineral_id),
            production_tonnes: row.production_tonnes,
            export_value_billion_usd: row.export_value_billion_usd,
        }
    }
}

impl From<&ProductionStatDraft> for ProductionStatWrite {
    fn from(draft: &ProductionStatDraft) -> Self {
        Self {
            year: draft.year,
            country_id: draft.country_id.get(),
            mineral_id: draft.mineral_id.get(),
            production_tonnes: draft.production_tonnes,
            export_value_billion_usd: draft.export_value_billion_usd,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mineral_prices)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MineralPriceRow {
    pub id: i32,
    pub mineral_name: String,
    pub year: i32,
    pub price_usd_per_tonne: f64,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = mineral_prices)]
pub(crate) struct MineralPriceWrite<'a> {
    pub mineral_name: &'a str,
    pub year: i32,
    pub price_usd_per_tonne: f64,
}

impl From<MineralPriceRow> for MineralPrice {
    fn from(row: MineralPriceRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            mineral_name: row.mineral_name,
            year: row.year,
            price_usd_per_tonne: row.price_usd_per_tonne,
        }
    }
}

impl<'a> From<&'a MineralPriceDraft> for MineralPriceWrite<'a> {
    fn from(draft: &'a MineralPriceDraft) -> Self {
        Self {
            mineral_name: &draft.mineral_name,
            year: draft.year,
            price_usd_per_tonne: draft.price_usd_per_tonne,
        }
    }
}

// ---------------------------------------------------------------------------
// Researcher insights
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = mineral_insights)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub(crate) struct MineralInsightRow {
    pub id: i32,
    pub mineral_id: i32,
    pub insight: String,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = mineral_insights)]
pub(crate) struct MineralInsightWrite<'a> {
    pub mineral_id: i32,
    pub insight: &'a str,
}

impl From<MineralInsightRow> for MineralInsight {
    fn from(row: MineralInsightRow) -> Self {
        Self {
            id: RecordId::new(row.id),
            mineral_id: RecordId::new(row.mineral_id),
            insight: row.insight,
        }
    }
}

impl<'a> From<&'a MineralInsightDraft> for MineralInsightWrite<'a> {
    fn from(draft: &'a MineralInsightDraft) -> Self {
        Self {
            mineral_id: draft.mineral_id.get(),
            insight: &draft.insight,
        }
    }
}
