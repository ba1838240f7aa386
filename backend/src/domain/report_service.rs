//! Loads reference rows through the repository ports and runs the pure
//! report calculations in [`super::reports`].

use std::sync::Arc;

use async_trait::async_trait;

use super::catalogue_service::map_repository_error;
use super::ports::{EntityRepository, ReportQuery};
use super::reports::{self, CountryComparisonRow, GdpComposition, PriceAnalysis, SiteMap};
use super::{Country, Error, Mineral, MineralPrice, RecordId, Site};

/// Report use-cases backed by the reference tables.
#[derive(Clone)]
pub struct ReportService {
    countries: Arc<dyn EntityRepository<Country>>,
    minerals: Arc<dyn EntityRepository<Mineral>>,
    sites: Arc<dyn EntityRepository<Site>>,
    prices: Arc<dyn EntityRepository<MineralPrice>>,
}

impl ReportService {
    /// Create a service over the four tables the reports read.
    pub fn new(
        countries: Arc<dyn EntityRepository<Country>>,
        minerals: Arc<dyn EntityRepository<Mineral>>,
        sites: Arc<dyn EntityRepository<Site>>,
        prices: Arc<dyn EntityRepository<MineralPrice>>,
    ) -> Self {
        Self {
            countries,
            minerals,
            sites,
            prices,
        }
    }
}

#[async_trait]
impl ReportQuery for ReportService {
    async fn minerals(&self) -> Result<Vec<Mineral>, Error> {
        self.minerals.list().await.map_err(map_repository_error)
    }

    async fn countries(&self) -> Result<Vec<Country>, Error> {
        self.countries.list().await.map_err(map_repository_error)
    }

    async fn gdp_composition(&self, country_id: RecordId) -> Result<GdpComposition, Error> {
        let country = self
            .countries
            .get(country_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(format!("country {country_id} not found")))?;
        Ok(reports::gdp_composition(&country))
    }

    async fn compare_countries(
        &self,
        ids: &[RecordId],
    ) -> Result<Vec<CountryComparisonRow>, Error> {
        let countries = self.countries().await?;
        Ok(reports::compare_countries(&countries, ids))
    }

    async fn analyze_prices(&self) -> Result<PriceAnalysis, Error> {
        let prices = self.prices.list().await.map_err(map_repository_error)?;
        Ok(reports::analyze_prices(&prices))
    }

    async fn site_map(&self) -> Result<SiteMap, Error> {
        let sites = self.sites.list().await.map_err(map_repository_error)?;
        let countries = self.countries().await?;
        let minerals = self.minerals().await?;
        Ok(reports::site_map(reports::site_map_points(
            &sites, &countries, &minerals,
        )))
    }
}
