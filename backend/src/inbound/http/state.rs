//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only see domain ports, so
//! they can be exercised with in-memory adapters and mocks.

use std::sync::Arc;

use crate::domain::ports::{
    CatalogueAdmin, LoginService, RegistrationService, ReportQuery, ResearchInsights,
};
use crate::domain::{
    Country, Mineral, MineralPrice, ProductionStat, Role, Site, User, UserAccountDraft,
};

/// Administrator CRUD ports, one per reference table.
#[derive(Clone)]
pub struct CataloguePorts {
    pub roles: Arc<dyn CatalogueAdmin<Role>>,
    pub users: Arc<dyn CatalogueAdmin<User, UserAccountDraft>>,
    pub minerals: Arc<dyn CatalogueAdmin<Mineral>>,
    pub countries: Arc<dyn CatalogueAdmin<Country>>,
    pub sites: Arc<dyn CatalogueAdmin<Site>>,
    pub production: Arc<dyn CatalogueAdmin<ProductionStat>>,
    pub prices: Arc<dyn CatalogueAdmin<MineralPrice>>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub reports: Arc<dyn ReportQuery>,
    pub insights: Arc<dyn ResearchInsights>,
    pub catalogue: CataloguePorts,
}
