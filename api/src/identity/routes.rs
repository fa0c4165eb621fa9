use axum::{Json, Router, routing::get};

use crate::{
    App,
    error::{ApiRequestError, AppError},
    response::Envelope,
};

use super::{
    AuthUser, AuthenticationError,
    models::identity::{Role, Traits},
};

pub fn route() -> Router<App> {
    Router::<App>::new().route("/me", get(handle_whoami))
}

impl ApiRequestError for AuthenticationError {
    fn status_code(&self) -> axum::http::StatusCode {
        axum::http::StatusCode::UNAUTHORIZED
    }
}

#[derive(serde::Serialize)]
pub struct WhoamiResponse {
    id: i32,
    role: Role,
    traits: Traits,
}

async fn handle_whoami(
    AuthUser(identity): AuthUser,
) -> Result<Json<Envelope<WhoamiResponse>>, AppError> {
    Ok(Json(Envelope::new(WhoamiResponse {
        id: identity.id,
        role: identity.role,
        traits: identity.get_traits(),
    })))
}

#[cfg(test)]
mod test {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::{identity::models::identity::Role, test_support::TestApp};

    #[tokio::test]
    async fn whoami_reports_identity_and_role() {
        let app = TestApp::new();
        let (identity, token) = app.user(Role::Bloggers);

        let (status, body) = app
            .request(Method::GET, "/api/v1/identity/me", Some(&token), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["id"], json!(identity.id));
        assert_eq!(body["data"]["role"], json!("bloggers"));
        assert_eq!(body["data"]["traits"]["name"], json!("bloggers user"));
    }

    #[tokio::test]
    async fn whoami_requires_a_session() {
        let app = TestApp::new();
        let (status, body) = app.get("/api/v1/identity/me").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], json!(false));
    }
}
