//! Session helpers so handlers never touch the raw cookie store.
//!
//! The cookie carries the username and role id set at login. Handlers that
//! need an identity take a [`RequestContext`] extractor instead of reading
//! the session themselves.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{AccessRole, AuthenticatedUser, Error, RecordId, RequestContext, unknown_role};

pub(crate) const USERNAME_KEY: &str = "username";
pub(crate) const ROLE_ID_KEY: &str = "role_id";

const LOGIN_REQUIRED: &str = "Please log in to continue.";

/// Newtype wrapper exposing the session operations handlers need.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Wrap an Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the authenticated user's name and role id.
    pub fn persist_user(&self, user: &AuthenticatedUser) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USERNAME_KEY, &user.username)
            .and_then(|()| self.0.insert(ROLE_ID_KEY, user.role_id.get()))
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop everything stored in the session.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Resolve the identity stored in the session.
    ///
    /// A missing session is `Unauthorized`; a role id that matches no
    /// built-in role is `NotFound` ("Unknown role.").
    pub fn request_context(&self) -> Result<RequestContext, Error> {
        let read_error = |error| Error::internal(format!("failed to read session: {error}"));
        let username = self.0.get::<String>(USERNAME_KEY).map_err(read_error)?;
        let role_id = self.0.get::<i32>(ROLE_ID_KEY).map_err(read_error)?;
        let (Some(username), Some(role_id)) = (username, role_id) else {
            return Err(Error::unauthorized(LOGIN_REQUIRED));
        };
        let role = AccessRole::from_id(RecordId::new(role_id)).ok_or_else(|| {
            warn!(role_id, "session refers to an unknown role");
            unknown_role()
        })?;
        Ok(RequestContext::new(username, role))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

impl FromRequest for RequestContext {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = SessionContext::from_request(req, payload);
        Box::pin(async move {
            let session = fut
                .await
                .map_err(|error| Error::internal(format!("session unavailable: {error}")))?;
            session.request_context()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use rstest::rstest;

    fn investor() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: RecordId::new(7),
            username: "ada".to_owned(),
            role_id: AccessRole::Investor.id(),
        }
    }

    #[rstest]
    #[actix_web::test]
    async fn round_trips_request_context() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist_user(&investor())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|context: RequestContext| async move {
                        HttpResponse::Ok().json(context)
                    }),
                ),
        )
        .await;

        let set = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = session_cookie(&set);
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/whoami").cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = actix_test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "username": "ada", "role": "investor" }));
    }

    #[rstest]
    #[actix_web::test]
    async fn missing_session_is_unauthorised() {
        let app = actix_test::init_service(App::new().wrap(test_session_middleware()).route(
            "/whoami",
            web::get().to(|context: RequestContext| async move {
                HttpResponse::Ok().body(context.username().to_owned())
            }),
        ))
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/whoami").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest]
    #[actix_web::test]
    async fn unknown_role_id_is_not_found() {
        let app = actix_test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set",
                    web::get().to(|session: Session| async move {
                        session.insert(USERNAME_KEY, "mallory").expect("set username");
                        session.insert(ROLE_ID_KEY, 42).expect("set role id");
                        HttpResponse::Ok()
                    }),
                )
                .route(
                    "/whoami",
                    web::get().to(|session: SessionContext| async move {
                        let error = session.request_context().expect_err("unknown role");
                        HttpResponse::Ok().body(format!("{:?}", error.code()))
                    }),
                ),
        )
        .await;

        let set = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/whoami")
                .cookie(session_cookie(&set))
                .to_request(),
        )
        .await;
        let body = actix_test::read_body(res).await;
        assert_eq!(body, format!("{:?}", ErrorCode::NotFound));
    }
}
