use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{info, warn};

use crate::alert::Alert;
use crate::config::Config;
use crate::engine::{evaluate, evaluate_alerts, DashboardView};
use crate::forecast::insights::{summarize_window, ForecastInsights};
use crate::metrics::MetricOverrides;
use crate::recommendations::{recommend, RecommendationPlan};
use crate::refresh::{refresh_from_source, LatestView, PublishedView};
use crate::snapshot::{DashboardSnapshot, SnapshotError, SnapshotSource};

#[derive(Clone)]
pub struct ApiState {
    config: Config,
    source: SnapshotSource,
    latest: LatestView,
}

impl ApiState {
    pub fn new(config: Config) -> Self {
        Self {
            source: SnapshotSource::open(config.resolved_snapshot_path()),
            config,
            latest: LatestView::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ApiResponse<T: Serialize> {
    ok: bool,
    data: T,
}

#[derive(Debug, Serialize)]
struct ApiErrorBody {
    ok: bool,
    error: String,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }
}

impl From<SnapshotError> for ApiError {
    fn from(error: SnapshotError) -> Self {
        let status = match &error {
            SnapshotError::Read { .. } => StatusCode::SERVICE_UNAVAILABLE,
            SnapshotError::Parse { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        };
        Self {
            status,
            message: error.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ApiErrorBody {
            ok: false,
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<Json<ApiResponse<T>>, ApiError>;

#[derive(Debug, Clone, Deserialize)]
struct EvaluateRequest {
    #[serde(flatten)]
    snapshot: DashboardSnapshot,
    #[serde(default)]
    overrides: MetricOverrides,
}

impl EvaluateRequest {
    fn into_snapshot(self) -> DashboardSnapshot {
        self.snapshot.with_overrides(&self.overrides)
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RecommendationRequest {
    #[serde(flatten)]
    snapshot: DashboardSnapshot,
    /// Reference date for picking the active event; server-local today if absent.
    #[serde(default)]
    as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

#[derive(Debug, Serialize)]
struct AlertsResponse {
    alerts: Vec<Alert>,
}

pub fn build_router(state: ApiState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);
    Router::new()
        .route("/health", get(health))
        .route("/v1/config", get(show_config))
        .route("/v1/evaluate", post(evaluate_snapshot))
        .route("/v1/alerts", post(alerts))
        .route("/v1/insights", post(insights))
        .route("/v1/recommendations", post(recommendations))
        .route("/v1/dashboard", get(dashboard))
        .route("/v1/refresh", post(refresh))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, bind: SocketAddr) -> Result<()> {
    let state = ApiState::new(config);
    if state.config.refresh.auto_refresh {
        spawn_auto_refresh(
            state.source.clone(),
            state.latest.clone(),
            state.config.refresh.interval_secs,
        );
    }

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

fn spawn_auto_refresh(source: SnapshotSource, latest: LatestView, interval_secs: u64) {
    info!(
        interval_secs,
        path = %source.path().display(),
        "auto-refresh enabled"
    );
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));
        loop {
            ticker.tick().await;
            if let Err(err) = refresh_from_source(&source, &latest).await {
                warn!("auto-refresh failed: {err}");
            }
        }
    });
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let parsed = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!("ignoring invalid CORS origin {origin}: {err}");
                None
            }
        })
        .collect::<Vec<_>>();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(parsed))
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse { status: "ok" })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config)
}

async fn evaluate_snapshot(Json(request): Json<EvaluateRequest>) -> ApiResult<DashboardView> {
    Ok(ok(evaluate(&request.into_snapshot())))
}

async fn alerts(Json(request): Json<EvaluateRequest>) -> ApiResult<AlertsResponse> {
    Ok(ok(AlertsResponse {
        alerts: evaluate_alerts(&request.into_snapshot()),
    }))
}

async fn insights(Json(request): Json<EvaluateRequest>) -> ApiResult<ForecastInsights> {
    Ok(ok(summarize_window(&request.snapshot.forecast)))
}

async fn recommendations(
    Json(request): Json<RecommendationRequest>,
) -> ApiResult<RecommendationPlan> {
    let as_of = request.as_of.unwrap_or_else(|| Local::now().date_naive());
    recommend(&request.snapshot, as_of)
        .map(ok)
        .ok_or_else(|| ApiError::not_found("no events available for recommendations"))
}

async fn dashboard(State(state): State<ApiState>) -> ApiResult<PublishedView> {
    state
        .latest
        .current()
        .await
        .map(ok)
        .ok_or_else(|| ApiError::not_found("no dashboard view published yet"))
}

async fn refresh(State(state): State<ApiState>) -> ApiResult<PublishedView> {
    let published = refresh_from_source(&state.source, &state.latest).await?;
    Ok(ok(published))
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}
