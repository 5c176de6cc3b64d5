use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::catalog::{CandidateFix, Catalog};
use crate::config::Config;
use crate::optimizer::constraints::ConstraintOverrides;
use crate::optimizer::{
    optimize, ranked_candidates, ConstraintSet, ExposureBand, OptimizationResult, RankedCandidate,
    RoiSummary, Scenario,
};
use crate::simulation::session::SessionSnapshot;
use crate::simulation::PlannerSession;

#[derive(Clone)]
pub struct ApiState {
    config: Arc<Config>,
    session: Arc<RwLock<PlannerSession>>,
}

impl ApiState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        let session = PlannerSession::new(catalog, config.baseline(), config.constraints);
        Self {
            config: Arc::new(config),
            session: Arc::new(RwLock::new(session)),
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
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
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

#[derive(Debug, Deserialize)]
struct ScenarioQuery {
    scenario: Option<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Serialize)]
struct CatalogResponse {
    source: String,
    raw_hash: String,
    ranked: Vec<RankedCandidate>,
}

#[derive(Debug, Serialize)]
struct PlanResponse {
    constraints: ConstraintSet,
    result: OptimizationResult,
    roi_summary: RoiSummary,
}

#[derive(Debug, Serialize)]
struct SimulationResponse {
    simulation: SessionSnapshot,
    result: OptimizationResult,
}

#[derive(Debug, Serialize)]
struct ScenarioResponse {
    band: ExposureBand,
    scenario: Option<Scenario>,
    residual_exposure: Option<f64>,
}

pub fn build_router(state: ApiState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/v1/catalog", get(catalog))
        .route("/v1/catalog/:checkpoint_id", get(catalog_entry))
        .route("/v1/constraints", get(show_constraints).put(update_constraints))
        .route("/v1/optimize", post(optimize_plan))
        .route("/v1/apply", post(apply))
        .route("/v1/reset", post(reset))
        .route("/v1/simulation", get(simulation))
        .route("/v1/scenarios", get(scenarios))
        .route("/v1/config", get(show_config))
        .layer(cors)
        .with_state(state)
}

pub async fn run_server(config: Config, catalog: Catalog, bind: SocketAddr) -> Result<()> {
    let state = ApiState::new(config, catalog);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("REST API listening on http://{bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<ApiResponse<HealthResponse>> {
    ok(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

async fn show_config(State(state): State<ApiState>) -> Json<ApiResponse<Config>> {
    ok(state.config.as_ref().clone())
}

async fn catalog(State(state): State<ApiState>) -> Json<ApiResponse<CatalogResponse>> {
    let session = state.session.read().await;
    let catalog = session.catalog();
    ok(CatalogResponse {
        source: catalog.source.clone(),
        raw_hash: catalog.raw_hash.clone(),
        ranked: ranked_candidates(catalog.fixes(), session.constraints()),
    })
}

async fn catalog_entry(
    State(state): State<ApiState>,
    Path(checkpoint_id): Path<String>,
) -> ApiResult<CandidateFix> {
    let session = state.session.read().await;
    session
        .catalog()
        .get(&checkpoint_id)
        .cloned()
        .map(ok)
        .ok_or_else(|| ApiError::not_found(format!("unknown checkpoint: {checkpoint_id}")))
}

async fn show_constraints(State(state): State<ApiState>) -> Json<ApiResponse<PlanResponse>> {
    let session = state.session.read().await;
    ok(plan_response(*session.constraints(), session.result()))
}

/// Slider update: merge, clamp, store, recompute.
async fn update_constraints(
    State(state): State<ApiState>,
    Json(overrides): Json<ConstraintOverrides>,
) -> Json<ApiResponse<PlanResponse>> {
    let mut session = state.session.write().await;
    let constraints = session
        .constraints()
        .with_overrides(overrides.clamped());
    session.set_constraints(constraints);
    ok(plan_response(constraints, session.result()))
}

/// Stateless what-if run; the session constraints are left untouched.
async fn optimize_plan(
    State(state): State<ApiState>,
    Json(overrides): Json<ConstraintOverrides>,
) -> Json<ApiResponse<PlanResponse>> {
    let session = state.session.read().await;
    let constraints = session
        .constraints()
        .with_overrides(overrides.clamped());
    let result = optimize(session.catalog().fixes(), &constraints, session.baseline());
    ok(plan_response(constraints, result))
}

async fn apply(State(state): State<ApiState>) -> Json<ApiResponse<SimulationResponse>> {
    let mut session = state.session.write().await;
    let result = session.result();
    session.apply(&result);
    ok(SimulationResponse {
        simulation: session.snapshot(),
        result,
    })
}

async fn reset(State(state): State<ApiState>) -> Json<ApiResponse<SimulationResponse>> {
    let mut session = state.session.write().await;
    session.reset();
    ok(SimulationResponse {
        simulation: session.snapshot(),
        result: session.result(),
    })
}

async fn simulation(State(state): State<ApiState>) -> Json<ApiResponse<SessionSnapshot>> {
    let session = state.session.read().await;
    ok(session.snapshot())
}

async fn scenarios(
    State(state): State<ApiState>,
    Query(query): Query<ScenarioQuery>,
) -> ApiResult<ScenarioResponse> {
    let scenario = query
        .scenario
        .as_deref()
        .map(Scenario::from_str)
        .transpose()
        .map_err(|e| ApiError::bad_request(e.to_string()))?;

    let session = state.session.read().await;
    let band = session
        .result()
        .exposure_band(session.baseline(), state.config.scenarios.spread);
    Ok(ok(ScenarioResponse {
        band,
        scenario,
        residual_exposure: scenario.map(|s| band.value(s)),
    }))
}

fn plan_response(constraints: ConstraintSet, result: OptimizationResult) -> PlanResponse {
    PlanResponse {
        constraints,
        roi_summary: result.roi_summary(),
        result,
    }
}

fn ok<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse { ok: true, data })
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::{build_router, ApiState};
    use crate::catalog::Catalog;
    use crate::config::Config;

    fn router() -> axum::Router {
        build_router(ApiState::new(Config::default(), Catalog::builtin()))
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("build request")
    }

    fn empty_request(method: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("build request")
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router()
            .oneshot(empty_request("GET", "/health"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["status"], "ok");
    }

    #[tokio::test]
    async fn constraint_updates_are_clamped_and_persisted() {
        let app = router();
        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/v1/constraints",
                json!({ "budget_constraint": 50000.0, "timeline": 400 }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["data"]["constraints"]["budget_constraint"], 100000.0);
        assert_eq!(body["data"]["constraints"]["timeline"], 177);

        let response = app
            .oneshot(empty_request("GET", "/v1/constraints"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["constraints"]["budget_constraint"], 100000.0);
    }

    #[tokio::test]
    async fn apply_then_reset_round_trips_simulation_mode() {
        let app = router();
        let response = app
            .clone()
            .oneshot(empty_request("POST", "/v1/apply"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["simulation"]["mode"], "projected");
        assert_eq!(
            body["data"]["simulation"]["simulated_fixes"][0]["status"],
            "pending"
        );

        let response = app
            .clone()
            .oneshot(empty_request("POST", "/v1/reset"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["simulation"]["mode"], "current");
        assert_eq!(body["data"]["simulation"]["constraints"]["timeline"], 90);

        let response = app
            .oneshot(empty_request("GET", "/v1/simulation"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert!(body["data"]["simulated_fixes"]
            .as_array()
            .map(Vec::is_empty)
            .unwrap_or(false));
    }

    #[tokio::test]
    async fn optimize_does_not_touch_session_constraints() {
        let app = router();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/v1/optimize",
                json!({ "risk_tolerance": 0.2 }),
            ))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["constraints"]["risk_tolerance"], 0.2);

        let response = app
            .oneshot(empty_request("GET", "/v1/constraints"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["constraints"]["risk_tolerance"], 0.5);
    }

    #[tokio::test]
    async fn unknown_checkpoint_is_not_found() {
        let response = router()
            .oneshot(empty_request("GET", "/v1/catalog/NOPE-1"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn bad_scenario_is_rejected() {
        let response = router()
            .oneshot(empty_request("GET", "/v1/scenarios?scenario=median"))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = router()
            .oneshot(empty_request("GET", "/v1/scenarios?scenario=worst"))
            .await
            .expect("route executes");
        let body = read_json(response).await;
        assert_eq!(body["data"]["scenario"], "pessimistic");
        assert!(body["data"]["residual_exposure"].is_number());
    }
}
