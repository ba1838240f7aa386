//! Builders wiring the Diesel adapters into the HTTP state.

use std::sync::Arc;

use mining_insights::domain::ports::{EntityRepository, UserRepository};
use mining_insights::domain::{
    AccountService, CatalogueService, Country, InsightService, Mineral, MineralPrice,
    ProductionStat, Record, ReportService, Role, Site,
};
use mining_insights::inbound::http::state::{CataloguePorts, HttpState};
use mining_insights::outbound::persistence::{
    DbPool, DieselCountryRepository, DieselMineralInsightRepository, DieselMineralPriceRepository,
    DieselMineralRepository, DieselProductionStatRepository, DieselRoleRepository,
    DieselSiteRepository, DieselUserRepository,
};
use mining_insights::outbound::security::Argon2PasswordHasher;

fn catalogue<R: Record>(repo: Arc<dyn EntityRepository<R>>) -> Arc<CatalogueService<R>> {
    Arc::new(CatalogueService::new(repo))
}

/// Build every driving port over repositories sharing `pool`.
pub(crate) fn build_http_state(pool: &DbPool) -> HttpState {
    let countries = Arc::new(DieselCountryRepository::new(pool.clone()));
    let minerals = Arc::new(DieselMineralRepository::new(pool.clone()));
    let sites = Arc::new(DieselSiteRepository::new(pool.clone()));
    let prices = Arc::new(DieselMineralPriceRepository::new(pool.clone()));
    let users: Arc<dyn UserRepository> = Arc::new(DieselUserRepository::new(pool.clone()));

    let accounts = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
    ));
    let reports = Arc::new(ReportService::new(
        countries.clone(),
        minerals.clone(),
        sites.clone(),
        prices.clone(),
    ));
    let insights = Arc::new(InsightService::new(
        Arc::new(DieselMineralInsightRepository::new(pool.clone())),
        minerals.clone(),
    ));

    HttpState {
        login: accounts.clone(),
        registration: accounts.clone(),
        reports,
        insights,
        catalogue: CataloguePorts {
            roles: catalogue::<Role>(Arc::new(DieselRoleRepository::new(pool.clone()))),
            users: accounts,
            minerals: catalogue::<Mineral>(minerals),
            countries: catalogue::<Country>(countries),
            sites: catalogue::<Site>(sites),
            production: catalogue::<ProductionStat>(Arc::new(
                DieselProductionStatRepository::new(pool.clone()),
            )),
            prices: catalogue::<MineralPrice>(prices),
        },
    }
}
