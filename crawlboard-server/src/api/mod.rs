//! API Module
//!
//! HTTP API layer for the crawl dashboard.
//! Each submodule handles endpoints for a specific concern.

pub mod auth;
pub mod error;
pub mod health;
pub mod job;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the main API router with all endpoints
pub fn create_router(state: AppState) -> Router {
    let crawl = Router::new()
        .route("/crawl", get(job::list_jobs).post(job::create_job))
        .route("/crawl/view", get(job::view_jobs))
        .route("/crawl/stats", get(job::get_stats))
        .route("/crawl/demo", post(job::seed_demo))
        .route("/crawl/bulk", post(job::bulk_action))
        .route(
            "/crawl/{id}",
            get(job::get_job)
                .put(job::apply_action)
                .delete(job::delete_job),
        )
        .route_layer(middleware::from_fn(auth::require_bearer));

    Router::new()
        // Health check stays open
        .route("/health", get(health::health_check))
        .merge(crawl)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use crawlboard_core::domain::job::{Job, JobStatus};
    use crawlboard_core::simulation::SeededRandom;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;
    use uuid::Uuid;

    fn app() -> Router {
        // Keep timers out of the way of request assertions
        let mut config = Config::default();
        config.auto_start_delay = Duration::from_secs(3600);
        config.demo_start_delay = Duration::from_secs(3600);
        create_router(AppState::with_random(config, Arc::new(SeededRandom::new(3))))
    }

    fn request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, "Bearer test-token");

        match body {
            Some(value) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn submit(app: &Router, url: &str) -> Job {
        let (status, body) = send(app, request("POST", "/crawl", Some(json!({ "url": url })))).await;
        assert_eq!(status, StatusCode::CREATED);
        serde_json::from_value(body).unwrap()
    }

    #[tokio::test]
    async fn test_health_needs_no_token() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_bearer_is_unauthorized() {
        let app = app();

        let (status, body) = send(
            &app,
            Request::get("/crawl").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));

        let (status, _) = send(
            &app,
            Request::get("/crawl")
                .header(header::AUTHORIZATION, "Basic abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_returns_queued_job() {
        let app = app();

        let job = submit(&app, "https://example.com").await;
        assert_eq!(job.status, JobStatus::Queued);
        assert!(job.data.is_none());

        let (status, body) = send(&app, request("GET", "/crawl", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["status"], "queued");
        assert!(body[0].get("createdAt").is_some());
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_input() {
        let app = app();

        let (status, body) =
            send(&app, request("POST", "/crawl", Some(json!({ "url": "not-a-url" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid URL");

        let (status, body) = send(&app, request("POST", "/crawl", Some(json!({ "url": "" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "URL is required");

        let (status, body) = send(&app, request("POST", "/crawl", Some(json!([1, 2])))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid request body");

        let (_, body) = send(&app, request("GET", "/crawl", None)).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found() {
        let app = app();
        let uri = format!("/crawl/{}", Uuid::new_v4());

        let (status, body) = send(&app, request("GET", &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Result not found");

        let (status, _) = send(&app, request("PUT", &uri, Some(json!({ "action": "start" })))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, request("DELETE", &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_malformed_id_is_json_not_found() {
        let app = app();

        for (method, body) in [
            ("GET", None),
            ("PUT", Some(json!({ "action": "start" }))),
            ("DELETE", None),
        ] {
            let response = app
                .clone()
                .oneshot(request(method, "/crawl/not-a-uuid", body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", method);
            assert_eq!(
                response.headers()[header::CONTENT_TYPE],
                "application/json",
                "{}",
                method
            );

            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let body: Value = serde_json::from_slice(&bytes).unwrap();
            assert_eq!(body, json!({ "error": "Result not found" }));
        }
    }

    #[tokio::test]
    async fn test_actions() {
        let app = app();
        let job = submit(&app, "https://example.com").await;
        let uri = format!("/crawl/{}", job.id);

        let (status, body) = send(&app, request("PUT", &uri, Some(json!({ "action": "explode" })))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid action");

        let (status, body) = send(&app, request("PUT", &uri, Some(json!({ "action": "stop" })))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["applied"], false);
        assert_eq!(body["job"]["status"], "queued");

        let (_, body) = send(&app, request("PUT", &uri, Some(json!({ "action": "start" })))).await;
        assert_eq!(body["applied"], true);
        assert_eq!(body["job"]["status"], "running");
        assert!(body["job"]["startedAt"].is_string());

        let (status, body) = send(&app, request("DELETE", &uri, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, _) = send(&app, request("GET", &uri, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_view_and_stats() {
        let app = app();
        for url in ["https://b.test", "https://a.test", "https://c.test"] {
            submit(&app, url).await;
        }

        let (status, body) = send(
            &app,
            request("GET", "/crawl/view?sort=url&direction=asc&page=9", None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["page"]["page"], 1);
        assert_eq!(body["page"]["items"][0]["url"], "https://a.test");
        assert_eq!(body["counts"]["total"], 3);

        let (status, _) = send(&app, request("GET", "/crawl/view?sort=bogus", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&app, request("GET", "/crawl/stats", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["queued"], 3);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let app = app();
        submit(&app, "https://alpha.test").await;
        submit(&app, "https://beta.test").await;

        let (_, body) = send(&app, request("GET", "/crawl?search=ALPHA", None)).await;
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = send(&app, request("GET", "/crawl?status=running", None)).await;
        assert_eq!(body, json!([]));

        let (status, _) = send(&app, request("GET", "/crawl?status=paused", None)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bulk_and_demo() {
        let app = app();

        let (status, body) = send(&app, request("POST", "/crawl/demo", None)).await;
        assert_eq!(status, StatusCode::CREATED);
        let ids: Vec<Value> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|job| job["id"].clone())
            .collect();
        assert_eq!(ids.len(), 5);
        let first_two = ids[..2].to_vec();

        let (status, report) = send(
            &app,
            request("POST", "/crawl/bulk", Some(json!({ "action": "start", "ids": first_two }))),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["applied"].as_array().unwrap().len(), 2);

        let (status, _) = send(
            &app,
            request("POST", "/crawl/bulk", Some(json!({ "action": "pause", "ids": [] }))),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, report) = send(
            &app,
            request("POST", "/crawl/bulk", Some(json!({ "action": "delete", "ids": ids }))),
        )
        .await;
        assert_eq!(report["applied"].as_array().unwrap().len(), 5);

        let (_, stats) = send(&app, request("GET", "/crawl/stats", None)).await;
        assert_eq!(stats["total"], 0);
    }
}
