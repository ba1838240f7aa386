//! Domain types and use-cases.
//!
//! Purpose: model the mining reference tables, the reports built from them
//! and the account rules, independent of HTTP and SQL. Adapters reach the
//! domain only through [`ports`].
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic failures.
//! - Records (`Mineral`, `Country`, `Site`, ...) with their drafts.
//! - `AccessRole`, `LoginCredentials`, `Registration`, `RequestContext`.
//! - Report functions and `ReportService`.
//! - Export encoding (`export_rows`, `ExportFile`).
//! - `AccountService`, `CatalogueService`, `InsightService`, `PriceSeeder`.

pub mod ports;

mod account_service;
mod auth;
mod catalogue_service;
mod error;
mod export;
mod insight_service;
mod price_seed;
mod records;
mod report_service;
mod reports;
mod trace_id;

pub use self::account_service::{AccountService, UserAccountDraft};
pub use self::auth::{
    AccessRole, AuthenticatedUser, LoginCredentials, LoginValidationError, MIN_PASSWORD_LENGTH,
    Registration, RegistrationValidationError, RequestContext, unknown_role,
};
pub use self::catalogue_service::CatalogueService;
pub use self::error::{Error, ErrorCode};
pub use self::export::{
    ExportFile, ExportFormat, ExportPayload, ExportRecord, ExportValue, Exportable,
    export_filename, export_rows, export_selection, select_by_ids,
};
pub use self::insight_service::InsightService;
pub use self::price_seed::{HISTORICAL_PRICES, PriceSeeder, historical_price_drafts};
pub use self::records::{
    Country, CountryDraft, Entity, Mineral, MineralDraft, MineralInsight, MineralInsightDraft,
    MineralPrice, MineralPriceDraft, ProductionStat, ProductionStatDraft, Record, RecordId,
    RecordValidationError, Role, RoleDraft, Site, SiteDraft, UnknownEntityError, User, UserDraft,
    Validate,
};
pub use self::report_service::ReportService;
pub use self::reports::{
    CountryComparisonRow, GdpComposition, GdpSlice, InsightBoard, InsightEntry, MAP_CENTER,
    MAP_ZOOM, MineralPriceSeries, PriceAnalysis, PricePoint, SiteMap, SiteMapPoint,
    UNKNOWN_COUNTRY, UNKNOWN_MINERAL, analyze_prices, compare_countries, gdp_composition,
    insight_board, site_map, site_map_points,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
