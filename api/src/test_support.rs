use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use crate::{
    App,
    config::{Env, ServerConfig},
    identity::models::identity::{Identity, Role},
    store::memory::MemoryStore,
};

/// The full router backed by a fresh `MemoryStore`.
pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());
        let config = ServerConfig {
            env: Env::Dev,
            database_url: String::new(),
            database_max_connections: 1,
            listen_addr: ([127, 0, 0, 1], 0).into(),
            cors_origins: Vec::new(),
        };
        let app = App {
            store: store.clone(),
            config: Arc::new(config),
        };

        TestApp {
            store,
            router: crate::router(app),
        }
    }

    /// A signed-in identity and its session token.
    pub fn user(&self, role: Role) -> (Identity, String) {
        self.store.add_identity(role, &format!("{role} user"))
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    /// Creates a blog through the API and returns its id.
    pub async fn blog(&self, token: &str, name: &str) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/v1/blogs",
                Some(token),
                Some(serde_json::json!({ "name": name, "description": "A blog" })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    /// Comments on a blog through the API and returns the comment id.
    pub async fn comment(&self, token: &str, blog_id: i64, rating: i32) -> i64 {
        let (status, body) = self
            .request(
                Method::POST,
                &format!("/api/v1/blogs/{blog_id}/comments"),
                Some(token),
                Some(serde_json::json!({
                    "title": "Review",
                    "text": "Some thoughts",
                    "rating": rating,
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_i64().unwrap()
    }

    pub async fn average_rating(&self, blog_id: i64) -> Value {
        let (status, body) = self.get(&format!("/api/v1/blogs/{blog_id}")).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["data"]["average_rating"].clone()
    }
}
