//! Driving port for the read-only pages shared by investors and researchers.

use async_trait::async_trait;

use crate::domain::{
    Country, CountryComparisonRow, Error, GdpComposition, Mineral, PriceAnalysis, RecordId,
    SiteMap,
};

/// Reports computed from the stored reference data.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReportQuery: Send + Sync {
    /// All minerals, ordered by id.
    async fn minerals(&self) -> Result<Vec<Mineral>, Error>;

    /// All countries, ordered by id.
    async fn countries(&self) -> Result<Vec<Country>, Error>;

    /// Mining revenue against the rest of GDP for one country.
    async fn gdp_composition(&self, country_id: RecordId) -> Result<GdpComposition, Error>;

    /// Headline figures for the requested countries, in request order.
    async fn compare_countries(&self, ids: &[RecordId])
    -> Result<Vec<CountryComparisonRow>, Error>;

    /// Yearly price series and latest price per mineral.
    async fn analyze_prices(&self) -> Result<PriceAnalysis, Error>;

    /// Map markers for every site.
    async fn site_map(&self) -> Result<SiteMap, Error>;
}
