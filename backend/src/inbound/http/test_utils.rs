//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use actix_web::{HttpResponse, test as actix_test, web};

use super::session::SessionContext;
use super::state::{CataloguePorts, HttpState};
use crate::domain::ports::{
    InMemoryEntityRepository, InMemoryUserRepository, MockLoginService, MockRegistrationService,
    MockReportQuery, PasswordHashError, PasswordHasher, ResearchInsights,
};
use crate::domain::{
    AccessRole, AccountService, AuthenticatedUser, CatalogueService, Country, InsightService,
    Mineral, MineralInsight, MineralPrice, ProductionStat, Record, RecordId, Role, Site,
};

/// Session middleware with a throwaway key and an insecure cookie so tests
/// can run over plain HTTP.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// The `session` cookie set by `response`.
pub fn session_cookie<B>(response: &ServiceResponse<B>) -> Cookie<'static> {
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}

/// Prefixing stand-in for the Argon2 adapter.
pub struct PrefixHasher;

impl PasswordHasher for PrefixHasher {
    fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("hashed:{password}"))
    }

    fn verify(&self, password: &str, stored_hash: &str) -> Result<bool, PasswordHashError> {
        Ok(stored_hash.strip_prefix("hashed:") == Some(password))
    }
}

/// Catalogue ports over empty in-memory tables.
pub fn in_memory_catalogue() -> CataloguePorts {
    fn table<R: Record>() -> Arc<CatalogueService<R>> {
        Arc::new(CatalogueService::new(Arc::new(InMemoryEntityRepository::<R>::new())))
    }
    CataloguePorts {
        roles: table::<Role>(),
        users: Arc::new(AccountService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(PrefixHasher),
        )),
        minerals: table::<Mineral>(),
        countries: table::<Country>(),
        sites: table::<Site>(),
        production: table::<ProductionStat>(),
        prices: table::<MineralPrice>(),
    }
}

/// Insight port over empty in-memory tables.
pub fn in_memory_insights() -> Arc<InsightService> {
    Arc::new(InsightService::new(
        Arc::new(InMemoryEntityRepository::<MineralInsight>::new()),
        Arc::new(InMemoryEntityRepository::<Mineral>::new()),
    ))
}

fn state(
    login: MockLoginService,
    registration: MockRegistrationService,
    reports: MockReportQuery,
    catalogue: CataloguePorts,
) -> HttpState {
    HttpState {
        login: Arc::new(login),
        registration: Arc::new(registration),
        reports: Arc::new(reports),
        insights: in_memory_insights(),
        catalogue,
    }
}

/// State for account handler tests.
pub fn http_state(login: MockLoginService, registration: MockRegistrationService) -> HttpState {
    state(login, registration, MockReportQuery::new(), in_memory_catalogue())
}

/// State for report and export handler tests.
pub fn report_state(reports: MockReportQuery) -> HttpState {
    state(
        MockLoginService::new(),
        MockRegistrationService::new(),
        reports,
        in_memory_catalogue(),
    )
}

/// State for administrator handler tests.
pub fn catalogue_state(catalogue: CataloguePorts) -> HttpState {
    state(
        MockLoginService::new(),
        MockRegistrationService::new(),
        MockReportQuery::new(),
        catalogue,
    )
}

/// State for researcher insight handler tests.
pub fn insight_state(insights: Arc<dyn ResearchInsights>) -> HttpState {
    HttpState {
        insights,
        ..catalogue_state(in_memory_catalogue())
    }
}

/// Request hitting [`test_login`] for `role`.
pub fn test_login_request(role: AccessRole) -> actix_test::TestRequest {
    actix_test::TestRequest::get().uri(&format!("/test-login/{}", role.id()))
}

/// Route `/test-login/{role_id}`: sign in as `tester` with any role id.
pub async fn test_login(session: SessionContext, role_id: web::Path<i32>) -> HttpResponse {
    let user = AuthenticatedUser {
        user_id: RecordId::new(1),
        username: "tester".to_owned(),
        role_id: RecordId::new(role_id.into_inner()),
    };
    match session.persist_user(&user) {
        Ok(()) => HttpResponse::Ok().finish(),
        Err(error) => HttpResponse::InternalServerError().body(error.to_string()),
    }
}
