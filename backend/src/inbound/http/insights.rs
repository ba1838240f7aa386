//! Researcher notes on minerals.
//!
//! ```text
//! GET  /researcher/insights
//! POST /researcher/insights             {"mineral_id":1,"insight":".."}
//! POST /researcher/insights/edit/{id}   {"insight":".."}
//! POST /researcher/insights/delete/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::{AccessRole, MineralInsightDraft, RecordId, RequestContext};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

const INSIGHT_ROLES: [AccessRole; 1] = [AccessRole::Researcher];

/// Body of `POST /researcher/insights`.
#[derive(Debug, Deserialize)]
pub struct NewInsightRequest {
    pub mineral_id: RecordId,
    pub insight: String,
}

/// Body of `POST /researcher/insights/edit/{id}`.
#[derive(Debug, Deserialize)]
pub struct ReviseInsightRequest {
    #[serde(alias = "updated_insight")]
    pub insight: String,
}

/// Minerals ordered by name plus every insight, newest first.
#[get("/researcher/insights")]
pub async fn list_insights(
    state: web::Data<HttpState>,
    context: RequestContext,
) -> ApiResult<HttpResponse> {
    context.require_any(&INSIGHT_ROLES)?;
    Ok(HttpResponse::Ok().json(state.insights.board().await?))
}

#[post("/researcher/insights")]
pub async fn add_insight(
    state: web::Data<HttpState>,
    context: RequestContext,
    payload: web::Json<NewInsightRequest>,
) -> ApiResult<HttpResponse> {
    context.require_any(&INSIGHT_ROLES)?;
    let NewInsightRequest {
        mineral_id,
        insight,
    } = payload.into_inner();
    let stored = state
        .insights
        .add(MineralInsightDraft {
            mineral_id,
            insight,
        })
        .await?;
    Ok(HttpResponse::Created().json(stored))
}

#[post("/researcher/insights/edit/{id}")]
pub async fn edit_insight(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<i32>,
    payload: web::Json<ReviseInsightRequest>,
) -> ApiResult<HttpResponse> {
    context.require_any(&INSIGHT_ROLES)?;
    let id = RecordId::new(path.into_inner());
    let revised = state
        .insights
        .revise(id, payload.into_inner().insight)
        .await?;
    Ok(HttpResponse::Ok().json(revised))
}

#[post("/researcher/insights/delete/{id}")]
pub async fn delete_insight(
    state: web::Data<HttpState>,
    context: RequestContext,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    context.require_any(&INSIGHT_ROLES)?;
    state
        .insights
        .delete(RecordId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{InMemoryEntityRepository, MockResearchInsights, ResearchInsights};
    use crate::domain::{Error, ErrorCode, InsightService, Mineral, MineralDraft, MineralInsight};
    use crate::inbound::http::test_utils::{
        insight_state, session_cookie, test_login, test_login_request, test_session_middleware,
    };
    use actix_web::cookie::Cookie;
    use actix_web::dev::{Service, ServiceResponse};
    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn mineral(name: &str) -> MineralDraft {
        MineralDraft {
            name: name.to_owned(),
            description: String::new(),
            market_price_usd_per_tonne: 1.0,
        }
    }

    fn in_memory_board() -> InsightService {
        InsightService::new(
            Arc::new(InMemoryEntityRepository::<MineralInsight>::new()),
            Arc::new(InMemoryEntityRepository::<Mineral>::with_drafts([
                mineral("Lithium"),
                mineral("Cobalt"),
            ])),
        )
    }

    async fn service(
        insights: impl ResearchInsights + 'static,
    ) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>
    {
        actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(web::Data::new(insight_state(Arc::new(insights))))
                .route("/test-login/{role_id}", web::get().to(test_login))
                .service(list_insights)
                .service(add_insight)
                .service(edit_insight)
                .service(delete_insight),
        )
        .await
    }

    async fn sign_in(
        app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
        role: AccessRole,
    ) -> Cookie<'static> {
        let login = actix_test::call_service(app, test_login_request(role).to_request()).await;
        session_cookie(&login)
    }

    fn post(uri: &str, cookie: &Cookie<'static>, body: Value) -> actix_http::Request {
        actix_test::TestRequest::post()
            .uri(uri)
            .cookie(cookie.clone())
            .set_json(body)
            .to_request()
    }

    fn get(uri: &str, cookie: &Cookie<'static>) -> actix_http::Request {
        actix_test::TestRequest::get()
            .uri(uri)
            .cookie(cookie.clone())
            .to_request()
    }

    #[rstest]
    #[actix_web::test]
    async fn researcher_keeps_insights() {
        let app = service(in_memory_board()).await;
        let cookie = sign_in(&app, AccessRole::Researcher).await;

        for (mineral_id, text) in [(1, "Brine output rising."), (2, "Refining concentrated.")] {
            let body = json!({ "mineral_id": mineral_id, "insight": text });
            let res = actix_test::call_service(&app, post("/researcher/insights", &cookie, body)).await;
            assert_eq!(res.status(), StatusCode::CREATED);
        }

        let res = actix_test::call_service(
            &app,
            post(
                "/researcher/insights/edit/1",
                &cookie,
                json!({ "updated_insight": "Brine output flat." }),
            ),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);

        let res = actix_test::call_service(&app, get("/researcher/insights", &cookie)).await;
        assert_eq!(res.status(), StatusCode::OK);
        let board: Value = actix_test::read_body_json(res).await;
        assert_eq!(board["minerals"][0]["name"], "Cobalt");
        assert_eq!(board["minerals"][1]["name"], "Lithium");
        assert_eq!(board["insights"][0]["insight_id"], 2);
        assert_eq!(board["insights"][0]["mineral_name"], "Cobalt");
        assert_eq!(board["insights"][1]["insight"], "Brine output flat.");
        assert_eq!(board["insights"][1]["mineral_name"], "Lithium");

        let res =
            actix_test::call_service(&app, post("/researcher/insights/delete/2", &cookie, json!({})))
                .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
        let res =
            actix_test::call_service(&app, post("/researcher/insights/delete/2", &cookie, json!({})))
                .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[rstest]
    #[case(json!({ "mineral_id": 1, "insight": "  " }))]
    #[case(json!({ "mineral_id": 42, "insight": "No such mineral." }))]
    #[actix_web::test]
    async fn invalid_insights_are_rejected(#[case] body: Value) {
        let app = service(in_memory_board()).await;
        let cookie = sign_in(&app, AccessRole::Researcher).await;
        let res = actix_test::call_service(&app, post("/researcher/insights", &cookie, body)).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let error: Error = actix_test::read_body_json(res).await;
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[case(AccessRole::Investor)]
    #[case(AccessRole::Administrator)]
    #[actix_web::test]
    async fn only_researchers_reach_insights(#[case] role: AccessRole) {
        let app = service(MockResearchInsights::new()).await;
        let cookie = sign_in(&app, role).await;

        let list = actix_test::call_service(&app, get("/researcher/insights", &cookie)).await;
        assert_eq!(list.status(), StatusCode::FORBIDDEN);

        let body = json!({ "mineral_id": 1, "insight": "Not mine to write." });
        let add = actix_test::call_service(&app, post("/researcher/insights", &cookie, body)).await;
        assert_eq!(add.status(), StatusCode::FORBIDDEN);

        let edit = actix_test::call_service(
            &app,
            post("/researcher/insights/edit/1", &cookie, json!({ "insight": "x" })),
        )
        .await;
        assert_eq!(edit.status(), StatusCode::FORBIDDEN);

        let delete =
            actix_test::call_service(&app, post("/researcher/insights/delete/1", &cookie, json!({})))
                .await;
        assert_eq!(delete.status(), StatusCode::FORBIDDEN);
    }

    #[rstest]
    #[actix_web::test]
    async fn anonymous_requests_are_unauthorised() {
        let app = service(MockResearchInsights::new()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/researcher/insights").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
