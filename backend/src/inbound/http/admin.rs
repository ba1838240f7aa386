//! Administrator CRUD over every reference table.
//!
//! ```text
//! GET  /admin/{entity}
//! POST /admin/{entity}/add          <draft JSON>
//! POST /admin/{entity}/edit/{id}    <draft JSON>
//! POST /admin/{entity}/delete/{id}
//! ```
//!
//! `{entity}` is one of `roles`, `users`, `minerals`, `countries`, `sites`,
//! `production` or `prices`. User payloads carry a plaintext `password`
//! which is hashed before storage.

use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::domain::ports::CatalogueAdmin;
use crate::domain::{AccessRole, Entity, Error, Record, RecordId, RequestContext};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::{CataloguePorts, HttpState};

/// Run `$body` with `$admin` bound to the port serving `$entity`.
macro_rules! with_catalogue {
    ($ports:expr, $entity:expr, |$admin:ident| $body:expr) => {{
        let ports: &CataloguePorts = $ports;
        match $entity {
            Entity::Role => {
                let $admin = &*ports.roles;
                $body
            }
            Entity::User => {
                let $admin = &*ports.users;
                $body
            }
            Entity::Mineral => {
                let $admin = &*ports.minerals;
                $body
            }
            Entity::Country => {
                let $admin = &*ports.countries;
                $body
            }
            Entity::Site => {
                let $admin = &*ports.sites;
                $body
            }
            Entity::ProductionStat => {
                let $admin = &*ports.production;
                $body
            }
            Entity::MineralPrice => {
                let $admin = &*ports.prices;
                $body
            }
            Entity::MineralInsight => Err(unknown_table(Entity::MineralInsight.path_segment())),
        }
    }};
}

fn unknown_table(segment: &str) -> Error {
    Error::not_found(format!("Unknown table: {segment}."))
}

fn authorise(context: &RequestContext, segment: &str) -> Result<Entity, Error> {
    context.require_any(&[AccessRole::Administrator])?;
    segment.parse().map_err(|_| unknown_table(segment))
}

fn parse_payload<D: DeserializeOwned>(entity: Entity, body: Value) -> Result<D, Error> {
    serde_json::from_value(body).map_err(|err| {
        Error::invalid_request(format!("invalid {entity} payload: {err}"))
            .with_details(json!({ "entity": entity.path_segment() }))
    })
}

async fn list_with<R, D>(admin: &dyn CatalogueAdmin<R, D>) -> ApiResult<HttpResponse>
where
    R: Record + Serialize,
    D: Send + 'static,
{
    Ok(HttpResponse::Ok().json(admin.list().await?))
}

async fn add_with<R, D>(
    admin: &dyn CatalogueAdmin<R, D>,
    entity: Entity,
    body: Value,
) -> ApiResult<HttpResponse>
where
    R: Record + Serialize,
    D: DeserializeOwned + Send + 'static,
{
    let payload = parse_payload::<D>(entity, body)?;
    Ok(HttpResponse::Created().json(admin.add(payload).await?))
}

async fn edit_with<R, D>(
    admin: &dyn CatalogueAdmin<R, D>,
    entity: Entity,
    id: RecordId,
    body: Value,
) -> ApiResult<HttpResponse>
where
    R: Record + Serialize,
    D: DeserializeOwned + Send + 'static,
{
    let payload = parse_payload::<D>(entity, body)?;
    Ok(HttpResponse::Ok().json(admin.edit(id, payload).await?))
}

/// List every row of a table, ordered by id.
#[get("/admin/{entity}")]
pub async fn list_rows(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let entity = authorise(&context, &path)?;
    with_catalogue!(&state.catalogue, entity, |admin| list_with(admin).await)
}

/// Validate and insert a row.
#[post("/admin/{entity}/add")]
pub async fn add_row(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<String>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let entity = authorise(&context, &path)?;
    let body = body.into_inner();
    with_catalogue!(&state.catalogue, entity, |admin| add_with(admin, entity, body).await)
}

/// Validate and overwrite a row.
#[post("/admin/{entity}/edit/{id}")]
pub async fn edit_row(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<(String, i32)>,
    body: web::Json<Value>,
) -> ApiResult<HttpResponse> {
    let (segment, id) = path.into_inner();
    let entity = authorise(&context, &segment)?;
    let id = RecordId::new(id);
    let body = body.into_inner();
    with_catalogue!(&state.catalogue, entity, |admin| {
        edit_with(admin, entity, id, body).await
    })
}

/// Remove a row. Rows that reference it are left in place.
#[post("/admin/{entity}/delete/{id}")]
pub async fn delete_row(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<(String, i32)>,
) -> ApiResult<HttpResponse> {
    let (segment, id) = path.into_inner();
    let entity = authorise(&context, &segment)?;
    let id = RecordId::new(id);
    with_catalogue!(&state.catalogue, entity, |admin| admin.delete(id).await)?;
    Ok(HttpResponse::NoContent().finish())
}
