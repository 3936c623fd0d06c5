use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tsp::config::Config;
use tsp::interfaces::server::WebApi;
use tsp::server::create_app;

fn app() -> Router {
    let config = Config::from_yaml("whale:\n  population: 6\n  iterations: 10\n  seed: 5\n").unwrap();
    create_app(WebApi::new(config))
}

fn cities() -> Value {
    json!([
        {"name": "Hanoi", "lat": 21.0278, "lng": 105.8342},
        {"name": "Hue", "lat": 16.4637, "lng": 107.5909},
        {"name": "Danang", "lat": 16.0544, "lng": 108.2022},
        {"name": "Hochiminh", "lat": 10.7758, "lng": 106.7019}
    ])
}

async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };
    respond(request).await
}

async fn send_raw(uri: &str, content_type: Option<&str>, body: &'static str) -> (StatusCode, Value) {
    let mut request = Request::builder().method("POST").uri(uri);
    if let Some(content_type) = content_type {
        request = request.header("content-type", content_type);
    }
    respond(request.body(Body::from(body)).unwrap()).await
}

async fn respond(request: Request<Body>) -> (StatusCode, Value) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_success() {
    let (status, body) = send("GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn calculate_route_returns_both_results() {
    let payload = json!({"cities": cities(), "starting_point": "Hue"});
    let (status, body) = send("POST", "/api/calculate-route", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    for key in ["GBFS", "WCO"] {
        assert_eq!(body[key]["starting_point"], "Hue");
        assert_eq!(body[key]["best_solution"][0], "Hue");
        assert_eq!(body[key]["best_solution"][4], "Hue");
    }
}

#[tokio::test]
async fn single_solver_endpoints() {
    let payload = json!({"cities": cities()});
    let (status, body) = send("POST", "/api/gbfs", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "GBFS");
    assert_eq!(body["steps"].as_array().unwrap().len(), 4);
    let (status, body) = send("POST", "/api/wco", Some(payload)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "WCO");
}

#[tokio::test]
async fn rejects_invalid_input() {
    let one_city = json!({"cities": [{"name": "Hanoi", "lat": 21.0, "lng": 105.8}]});
    let (status, body) = send("POST", "/api/calculate-route", Some(one_city)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let missing_field = json!({"cities": [{"name": "Hanoi", "lat": 21.0}]});
    let (status, body) = send("POST", "/api/gbfs", Some(missing_field)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));

    let unknown_start = json!({"cities": cities(), "starting_point": "Paris"});
    let (status, _) = send("POST", "/api/wco", Some(unknown_start)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn malformed_json_gets_an_error_body() {
    for uri in ["/api/calculate-route", "/api/gbfs", "/api/wco"] {
        let (status, body) = send_raw(uri, Some("application/json"), r#"{"cities": ["#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
    }
    let (status, body) = send_raw("/api/gbfs", Some("application/json"), "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn body_without_content_type_is_accepted() {
    let payload = r#"{"cities": [
        {"name": "Hanoi", "lat": 21.0278, "lng": 105.8342},
        {"name": "Hue", "lat": 16.4637, "lng": 107.5909},
        {"name": "Danang", "lat": 16.0544, "lng": 108.2022}
    ]}"#;
    let (status, body) = send_raw("/api/gbfs", None, payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["algorithm"], "GBFS");
    let (status, body) = send_raw("/api/wco", None, r#"{"cities": 3}"#).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
