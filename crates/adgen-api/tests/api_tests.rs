//! Router tests against the mock provider and the in-memory cache.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use adgen_api::{create_router, ApiConfig, AppState};
use adgen_cache::{CacheKeyGenerator, CacheManager, InMemoryCache};
use adgen_llm::{LlmProvider, MockProvider, ProviderRegistry};
use adgen_pipeline::PipelineConfig;

fn state_with(providers: Vec<(&str, Arc<dyn LlmProvider>)>, config: ApiConfig) -> AppState {
    let default_provider = providers
        .first()
        .map(|(name, _)| name.to_string())
        .unwrap_or_else(|| "mock".to_string());

    let mut registry = ProviderRegistry::new();
    for (name, provider) in providers {
        registry.register(name, provider);
    }

    let cache = Arc::new(CacheManager::new(
        Arc::new(InMemoryCache::new()),
        Duration::from_secs(3600),
    ));

    AppState::from_parts(
        config,
        PipelineConfig {
            default_provider: default_provider.clone(),
            ..PipelineConfig::default()
        },
        cache,
        CacheKeyGenerator::new("prompt_parse", "v1", default_provider),
        Arc::new(registry),
        Duration::from_secs(5),
    )
}

fn mock_app() -> Router {
    let state = state_with(
        vec![("mock", Arc::new(MockProvider::new()) as Arc<dyn LlmProvider>)],
        ApiConfig::default(),
    );
    create_router(state, None)
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn parse_body(text: &str) -> Value {
    json!({"prompt": {"text": text}})
}

#[tokio::test]
async fn test_health_sets_security_and_request_id_headers() {
    let response = mock_app()
        .oneshot(empty_request(Method::GET, "/health"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("x-request-id"));

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_incoming_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-1234")
        .body(Body::empty())
        .unwrap();

    let response = mock_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-1234");
}

#[tokio::test]
async fn test_parse_returns_creative_direction() {
    let response = mock_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/parse",
            parse_body("30 second instagram ad for sneakers"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["metadata"]["cache_hit"], false);
    assert_eq!(body["metadata"]["llm_provider_used"], "mock");
    assert_eq!(body["creative_direction"]["technical_specs"]["aspect_ratio"], "9:16");

    let scenes = body["scenes"].as_array().unwrap();
    assert_eq!(scenes.len(), 6);
    assert_eq!(scenes[0]["purpose"], "hook");
    assert_eq!(scenes[scenes.len() - 1]["purpose"], "cta");
    assert!(body.get("cost_estimate").is_none());
}

#[tokio::test]
async fn test_repeated_parse_is_served_from_cache() {
    let provider = MockProvider::new();
    let state = state_with(
        vec![("mock", Arc::new(provider.clone()) as Arc<dyn LlmProvider>)],
        ApiConfig::default(),
    );
    let app = create_router(state, None);
    let body = parse_body("15 second tiktok ad for a water bottle");

    let first = app
        .clone()
        .oneshot(json_request(Method::POST, "/api/v1/parse", body.clone()))
        .await
        .unwrap();
    assert_eq!(body_json(first).await["metadata"]["cache_hit"], false);

    let second = app
        .oneshot(json_request(Method::POST, "/api/v1/parse", body))
        .await
        .unwrap();
    assert_eq!(body_json(second).await["metadata"]["cache_hit"], true);
    assert_eq!(provider.call_count(), 1);
}

#[tokio::test]
async fn test_parse_with_cost_estimate() {
    let mut body = parse_body("30 second instagram ad for sneakers");
    body["options"] = json!({"include_cost_estimate": true});

    let response = mock_app()
        .oneshot(json_request(Method::POST, "/api/v1/parse", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["cost_estimate"]["source"], "fallback");
    assert_eq!(body["cost_estimate"]["confidence"], "low");
    assert_eq!(body["cost_estimate"]["scene_count"], 6);
}

#[tokio::test]
async fn test_empty_prompt_is_bad_request() {
    let response = mock_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/parse",
            json!({"prompt": {"text": "   "}}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_input");
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/parse")
        .header("content-type", "application/json")
        .body(Body::from("{\"prompt\": "))
        .unwrap();

    let response = mock_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "invalid_input");
}

#[tokio::test]
async fn test_disallowed_content_is_rejected() {
    let response = mock_app()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/parse",
            parse_body("ad for a fake ID printing service"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "content_rejected");
    assert!(body["detail"].as_str().unwrap().contains("fake id"));
}

#[tokio::test]
async fn test_exhausted_providers_is_bad_gateway() {
    let state = state_with(
        vec![
            ("a", Arc::new(MockProvider::failing("503 from a").named("a")) as Arc<dyn LlmProvider>),
            ("b", Arc::new(MockProvider::failing("503 from b").named("b")) as Arc<dyn LlmProvider>),
        ],
        ApiConfig::default(),
    );

    let response = create_router(state, None)
        .oneshot(json_request(
            Method::POST,
            "/api/v1/parse",
            parse_body("30 second ad for sneakers"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await["code"], "providers_exhausted");
}

#[tokio::test]
async fn test_clear_cache_removes_entries() {
    let app = mock_app();

    let parsed = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/api/v1/parse",
            parse_body("30 second ad for sneakers"),
        ))
        .await
        .unwrap();
    assert_eq!(parsed.status(), StatusCode::OK);

    let cleared = app
        .clone()
        .oneshot(empty_request(Method::DELETE, "/api/v1/cache"))
        .await
        .unwrap();
    assert_eq!(cleared.status(), StatusCode::OK);
    let body = body_json(cleared).await;
    assert_eq!(body["cleared"], 1);
    assert_eq!(body["pattern"], "prompt_parse:v1:");

    let again = app
        .oneshot(empty_request(Method::DELETE, "/api/v1/cache?pattern=prompt_parse:*"))
        .await
        .unwrap();
    assert_eq!(body_json(again).await["cleared"], 0);
}

#[tokio::test]
async fn test_clear_cache_refuses_bare_wildcard() {
    let response = mock_app()
        .oneshot(empty_request(Method::DELETE, "/api/v1/cache?pattern=*"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_providers() {
    let state = state_with(
        vec![
            ("mock", Arc::new(MockProvider::new()) as Arc<dyn LlmProvider>),
            (
                "slow",
                Arc::new(MockProvider::new().named("slow").with_delay(Duration::from_millis(250)))
                    as Arc<dyn LlmProvider>,
            ),
        ],
        ApiConfig::default(),
    );

    let response = create_router(state, None)
        .oneshot(empty_request(Method::GET, "/api/v1/providers"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let providers = body["providers"].as_array().unwrap();
    assert_eq!(providers.len(), 2);
    assert_eq!(providers[0]["name"], "mock");
    assert_eq!(providers[0]["default"], true);
    assert_eq!(providers[1]["name"], "slow");
    assert_eq!(providers[1]["available"], true);
    assert_eq!(providers[1]["estimated_latency_ms"], 250);
}

#[tokio::test]
async fn test_ready_reports_cache_backend() {
    let response = mock_app()
        .oneshot(empty_request(Method::GET, "/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ready");
    assert_eq!(body["checks"]["cache"]["backend"], "memory");
}

#[tokio::test]
async fn test_ready_without_providers_is_unavailable() {
    let response = create_router(state_with(Vec::new(), ApiConfig::default()), None)
        .oneshot(empty_request(Method::GET, "/ready"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(response).await["status"], "degraded");
}

#[tokio::test]
async fn test_rate_limit_per_client_ip() {
    let config = ApiConfig {
        rate_limit_per_minute: 1,
        ..ApiConfig::default()
    };
    let app = create_router(
        state_with(
            vec![("mock", Arc::new(MockProvider::new()) as Arc<dyn LlmProvider>)],
            config,
        ),
        None,
    );

    let from = |ip: &str| {
        Request::builder()
            .uri("/api/v1/providers")
            .header("x-forwarded-for", ip)
            .body(Body::empty())
            .unwrap()
    };

    let first = app.clone().oneshot(from("203.0.113.9")).await.unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app.clone().oneshot(from("203.0.113.9")).await.unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.headers()["retry-after"], "60");
    assert_eq!(body_json(second).await["code"], "rate_limited");

    let other = app.oneshot(from("203.0.113.10")).await.unwrap();
    assert_eq!(other.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_not_rate_limited() {
    let config = ApiConfig {
        rate_limit_per_minute: 1,
        ..ApiConfig::default()
    };
    let app = create_router(state_with(Vec::new(), config), None);

    for _ in 0..3 {
        let request = Request::builder()
            .uri("/health")
            .header("x-forwarded-for", "203.0.113.9")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
