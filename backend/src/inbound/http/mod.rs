//! HTTP inbound adapter exposing the JSON endpoints.
//!
//! Handlers stay thin: they pull the [`RequestContext`](crate::domain::RequestContext)
//! from the session, call a driving port held in [`state::HttpState`] and map
//! domain errors through [`error`].

use actix_web::web;

pub mod admin;
pub mod auth;
pub mod error;
pub mod export;
pub mod health;
pub mod insights;
pub mod reports;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;

/// Register every session-backed route.
///
/// Literal prefixes (`/admin/...`, `/researcher/insights`,
/// `/investor/analyze-prices`) are registered before the `/{role}/...`
/// patterns so they win.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::home)
        .service(admin::list_rows)
        .service(admin::add_row)
        .service(admin::edit_row)
        .service(admin::delete_row)
        .service(insights::list_insights)
        .service(insights::add_insight)
        .service(insights::edit_insight)
        .service(insights::delete_insight)
        .service(reports::analyze_prices)
        .service(reports::show_minerals)
        .service(reports::country_profile)
        .service(reports::compare_countries)
        .service(reports::site_map)
        .service(export::export_countries)
        .service(export::export_minerals);
}
