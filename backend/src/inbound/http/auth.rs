//! Login, registration, logout and the role dashboard.
//!
//! ```text
//! POST /login    {"username":"ada","password":"hunter2222"}
//! POST /register {"username":"ada","password":"..","confirm_password":"..","role":"Investor"}
//! GET|POST /logout
//! GET  /home
//! ```

use actix_web::{HttpResponse, get, post, route, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{
    AccessRole, Error, LoginCredentials, LoginValidationError, Registration, RequestContext,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

const REGISTERED: &str = "Registration complete. You may now log in.";

/// Body of `POST /login`.
#[derive(Debug, Deserialize, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of `POST /register`.
#[derive(Debug, Deserialize, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
}

/// A link on a dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: &'static str,
    pub path: String,
}

/// What `/home` shows for the signed-in role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dashboard {
    pub username: String,
    pub role: AccessRole,
    pub menu: Vec<MenuItem>,
}

impl Dashboard {
    /// Build the dashboard for `context`.
    pub fn for_context(context: &RequestContext) -> Self {
        Self {
            username: context.username().to_owned(),
            role: context.role(),
            menu: menu_for(context.role()),
        }
    }
}

fn menu_for(role: AccessRole) -> Vec<MenuItem> {
    let segment = role.path_segment();
    let shared = |label, page: &str| MenuItem {
        label,
        path: format!("/{segment}/{page}"),
    };
    match role {
        AccessRole::Administrator => {
            let mut menu: Vec<MenuItem> = crate::domain::Entity::ALL
                .into_iter()
                .map(|entity| MenuItem {
                    label: entity.path_segment(),
                    path: format!("/admin/{}", entity.path_segment()),
                })
                .collect();
            menu.push(shared("minerals", "minerals"));
            menu
        }
        AccessRole::Investor | AccessRole::Researcher => {
            let mut menu = vec![
                shared("minerals", "minerals"),
                shared("country profile", "country-profile"),
                shared("compare countries", "compare-countries"),
                shared("map", "map"),
            ];
            match role {
                AccessRole::Investor => menu.push(shared("analyze prices", "analyze-prices")),
                _ => menu.push(shared("insights", "insights")),
            }
            menu
        }
    }
}

fn map_login_validation_error(error: LoginValidationError) -> Error {
    let field = match error {
        LoginValidationError::EmptyUsername => "username",
        LoginValidationError::EmptyPassword => "password",
    };
    Error::invalid_request(error.to_string()).with_details(json!({ "field": field }))
}

/// Authenticate and start a session.
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;
    let user = state.login.authenticate(&credentials).await?;
    session.persist_user(&user)?;
    Ok(HttpResponse::Ok().json(json!({
        "username": user.username,
        "role_id": user.role_id,
    })))
}

/// Create an investor or researcher account.
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration = Registration::try_from_parts(
        &payload.username,
        &payload.password,
        &payload.confirm_password,
        &payload.role,
    )?;
    let user = state.registration.register(&registration).await?;
    Ok(HttpResponse::Created().json(json!({ "message": REGISTERED, "user": user })))
}

/// End the session. Accepts `GET` so a plain link can sign out.
#[route("/logout", method = "GET", method = "POST")]
pub async fn logout(_context: RequestContext, session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Dashboard for the signed-in role.
#[get("/home")]
pub async fn home(context: RequestContext) -> web::Json<Dashboard> {
    web::Json(Dashboard::for_context(&context))
}
