//! CSV and JSON downloads of selected countries or minerals.

use actix_web::http::header::{self, ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, post, web};
use serde::Deserialize;
use tracing::info;

use crate::domain::{
    AccessRole, Error, ExportFile, Exportable, RecordId, RequestContext, export_selection,
    select_by_ids,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const EXPORT_ROLES: [AccessRole; 2] = [AccessRole::Investor, AccessRole::Researcher];

/// Body of the export routes.
#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    #[serde(default)]
    pub ids: Vec<RecordId>,
    pub format: String,
}

fn build_export<T: Exportable>(
    role: AccessRole,
    rows: &[T],
    request: &ExportRequest,
) -> Result<ExportFile, Error> {
    let selected = select_by_ids(rows, &request.ids);
    export_selection(role, &selected, &request.format)
}

fn attachment(file: ExportFile) -> HttpResponse {
    info!(filename = %file.filename, bytes = file.bytes.len(), "export generated");
    HttpResponse::Ok()
        .content_type(file.mime)
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(file.filename)],
        })
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .body(file.bytes)
}

/// Export the selected countries.
#[post("/{role}/export-countries")]
pub async fn export_countries(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
    payload: web::Json<ExportRequest>,
) -> ApiResult<HttpResponse> {
    let role = context.require_path_role(&role, &EXPORT_ROLES)?;
    if payload.ids.is_empty() {
        return Err(Error::invalid_request("No countries selected for export."));
    }
    let countries = state.reports.countries().await?;
    let file = build_export(role, &countries, &payload)?;
    Ok(attachment(file))
}

/// Export the selected minerals.
#[post("/{role}/export-minerals")]
pub async fn export_minerals(
    state: web::Data<HttpState>,
    context: RequestContext,
    role: web::Path<String>,
    payload: web::Json<ExportRequest>,
) -> ApiResult<HttpResponse> {
    let role = context.require_path_role(&role, &EXPORT_ROLES)?;
    if payload.ids.is_empty() {
        return Err(Error::invalid_request("No minerals selected for export."));
    }
    let minerals = state.reports.minerals().await?;
    let file = build_export(role, &minerals, &payload)?;
    Ok(attachment(file))
}
