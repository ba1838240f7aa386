//! Read-only report pages shared by investors and researchers.
//!
//! The first path segment names the role the page is rendered for and must
//! match the signed-in role.

use actix_web::{HttpRequest, HttpResponse, get, web};
use serde_json::json;
use url::form_urlencoded;

use crate::domain::{AccessRole, Error, ErrorCode, RecordId, RequestContext};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const REPORT_ROLES: [AccessRole; 2] = [AccessRole::Investor, AccessRole::Researcher];
const MINERAL_ROLES: [AccessRole; 3] = [
    AccessRole::Investor,
    AccessRole::Researcher,
    AccessRole::Administrator,
];

const COUNTRY_ID_PARAM: &str = "country_id";

/// Every `country_id` value in the form-encoded `query`, in order. Values
/// that are not integers are skipped.
fn country_ids(query: &str) -> Vec<RecordId> {
    form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == COUNTRY_ID_PARAM)
        .filter_map(|(_, value)| value.trim().parse::<i32>().ok())
        .map(RecordId::new)
        .collect()
}

/// Mineral catalogue; administrators may view it too.
#[get("/{role}/minerals")]
pub async fn show_minerals(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let role = context.require_path_role(&role, &MINERAL_ROLES)?;
    let minerals = state.reports.minerals().await?;
    Ok(HttpResponse::Ok().json(json!({ "role": role, "minerals": minerals })))
}

/// Country list plus, when `country_id` names a stored country, its GDP
/// composition. A `country_id` that is not an integer is ignored.
#[get("/{role}/country-profile")]
pub async fn country_profile(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let role = context.require_path_role(&role, &REPORT_ROLES)?;
    let countries = state.reports.countries().await?;
    let selected = country_ids(req.query_string()).into_iter().next();
    let composition = match selected {
        Some(id) => match state.reports.gdp_composition(id).await {
            Ok(composition) => Some(composition),
            Err(error) if error.code() == ErrorCode::NotFound => None,
            Err(error) => return Err(error),
        },
        None => None,
    };
    Ok(HttpResponse::Ok().json(json!({
        "role": role,
        "countries": countries,
        "composition": composition,
    })))
}

/// GDP and mining revenue for each `country_id` in the query string.
#[get("/{role}/compare-countries")]
pub async fn compare_countries(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let role = context.require_path_role(&role, &REPORT_ROLES)?;
    let ids = country_ids(req.query_string());
    let countries = state.reports.countries().await?;
    let comparison = if ids.is_empty() {
        Vec::new()
    } else {
        state.reports.compare_countries(&ids).await?
    };
    Ok(HttpResponse::Ok().json(json!({
        "role": role,
        "countries": countries,
        "comparison": comparison,
    })))
}

/// Marker data for every mining site.
#[get("/{role}/map")]
pub async fn site_map(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
) -> ApiResult<HttpResponse> {
    context.require_path_role(&role, &REPORT_ROLES)?;
    let map = state.reports.site_map().await?;
    if map.points.is_empty() {
        return Err(Error::not_found("No mineral sites found."));
    }
    Ok(HttpResponse::Ok().json(map))
}

/// Yearly price series per mineral. Investors only.
#[get("/investor/analyze-prices")]
pub async fn analyze_prices(
    state: web::Data<HttpState>,
    context: RequestContext,
) -> ApiResult<HttpResponse> {
    context.require_any(&[AccessRole::Investor])?;
    Ok(HttpResponse::Ok().json(state.reports.analyze_prices().await?))
}
