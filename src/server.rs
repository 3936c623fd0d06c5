use crate::config::Config;
use crate::interfaces::server::WebApi;
use crate::interfaces::RouteRequest;
use crate::Error;
use axum::body::Bytes;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tracing::{info, warn};

/// 请求体大小上限
const BODY_LIMIT: usize = 10 * 1024 * 1024;
/// 单个请求的处理时限
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<WebApi>,
}

/// 以 `{"error": …}` 形式返回的错误响应
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::bad_request(error.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// 请求体按 JSON 解析，不检查 `Content-Type`；语法错误与字段错误都以 `{error}` 返回
fn parse_request(body: &[u8]) -> Result<RouteRequest, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid request: {e}")))
}

/// 在阻塞线程中执行求解，避免占用异步运行时
async fn run_blocking<T, F>(api: Arc<WebApi>, task: F) -> Result<Json<T>, ApiError>
where
    T: Serialize + Send + 'static,
    F: FnOnce(&WebApi) -> Result<T, Error> + Send + 'static,
{
    let result = tokio::task::spawn_blocking(move || task(api.as_ref())).await;
    match result {
        Ok(Ok(value)) => Ok(Json(value)),
        Ok(Err(error)) => {
            warn!("请求被拒绝: {}", error.message);
            Err(error.into())
        }
        Err(error) => {
            warn!("求解任务崩溃: {error}");
            Err(ApiError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Solver task failed: {error}"),
            })
        }
    }
}

/// HTTP API: 健康检查
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "success",
        "message": "TSP solver is running",
        "timestamp": Local::now().to_rfc3339(),
    }))
}

/// HTTP API: 两种求解方法的合并结果
pub async fn calculate_route(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/calculate-route");
    let request = parse_request(&body)?;
    run_blocking(state.api, move |api| api.calculate_route(request)).await
}

/// HTTP API: 只运行贪心最佳优先构造
pub async fn gbfs(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/gbfs");
    let request = parse_request(&body)?;
    run_blocking(state.api, move |api| api.greedy(request)).await
}

/// HTTP API: 只运行鲸鱼优化算法
pub async fn wco(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    info!("POST /api/wco");
    let request = parse_request(&body)?;
    run_blocking(state.api, move |api| api.whale(request)).await
}

/// 创建应用路由
pub fn create_app(api: WebApi) -> Router {
    let state = AppState { api: Arc::new(api) };
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/calculate-route", post(calculate_route))
        .route("/api/gbfs", post(gbfs))
        .route("/api/wco", post(wco))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(cors)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .with_state(state)
}

async fn try_bind(port: u16) -> Option<tokio::net::TcpListener> {
    tokio::net::TcpListener::bind(("0.0.0.0", port)).await.ok()
}

/// 尝试绑定首选端口；被占用时依次尝试附近的端口，最后交给系统分配
async fn bind_available_port(preferred_port: u16) -> Result<(tokio::net::TcpListener, u16), Error> {
    if let Some(listener) = try_bind(preferred_port).await {
        info!("成功绑定到首选端口: {preferred_port}");
        return Ok((listener, preferred_port));
    }
    info!("端口 {preferred_port} 已被占用");

    let above = (1..=50).filter_map(|offset| preferred_port.checked_add(offset));
    // 避免使用系统保留端口
    let below = (1..=50)
        .filter_map(|offset| preferred_port.checked_sub(offset))
        .filter(|&port| port >= 1024);
    for port in above.chain(below) {
        if let Some(listener) = try_bind(port).await {
            info!("成功绑定到替代端口: {port}");
            return Ok((listener, port));
        }
    }

    let listener = try_bind(0)
        .await
        .ok_or_else(|| Error::from("无法绑定到任何端口"))?;
    let port = listener
        .local_addr()
        .map_err(|e| format!("无法读取监听地址: {e}"))?
        .port();
    info!("使用系统自动分配的端口: {port}");
    Ok((listener, port))
}

/// 启动服务器
pub async fn start_server(config: Config, port: u16) -> Result<(), Error> {
    tracing_subscriber::fmt::init();

    let app = create_app(WebApi::new(config));
    let (listener, actual_port) = bind_available_port(port).await?;

    info!("Listening on: http://127.0.0.1:{actual_port}");
    info!("API Endpoints:");
    info!("   GET  /api/health          - 健康检查");
    info!("   POST /api/calculate-route - 两种算法的合并结果");
    info!("   POST /api/gbfs            - 贪心最佳优先构造");
    info!("   POST /api/wco             - 鲸鱼优化算法");

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("服务器错误: {e}"))?;
    Ok(())
}
