use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::analysis::run_scenario_engine;
use super::domain::{
    ApprovalRequest, CreateScenarioRequest, OrganizationalBaseline, OrganizationalVariant,
    RoiRequest, ScenarioId, ScenarioStatus, UpdateScenarioRequest,
};
use super::repository::{RepositoryError, ScenarioRepository};
use super::service::{ScenarioService, ScenarioServiceError};

/// Header carrying the acting user; requests without it are attributed to `system`.
pub const USER_HEADER: &str = "x-user-id";
const SYSTEM_USER: &str = "system";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub organization_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct VersionRequest {
    #[serde(default)]
    pub changes: Value,
}

#[derive(Debug, Deserialize)]
pub struct EngineRequest {
    pub baseline: OrganizationalBaseline,
    pub variant: OrganizationalVariant,
}

/// Router exposing the scenario lifecycle plus the ad hoc engine run.
pub fn scenario_router<R>(service: Arc<ScenarioService<R>>) -> Router
where
    R: ScenarioRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/scenarios",
            post(create_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/scenarios/compare", post(engine_handler))
        .route(
            "/api/v1/scenarios/:id",
            get(get_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/scenarios/:id/roi",
            get(roi_history_handler::<R>).post(roi_handler::<R>),
        )
        .route(
            "/api/v1/scenarios/:id/versions",
            get(versions_handler::<R>).post(create_version_handler::<R>),
        )
        .route(
            "/api/v1/scenarios/:id/approvals",
            get(approvals_handler::<R>).post(approval_handler::<R>),
        )
        .route("/api/v1/scenarios/:id/analysis", get(analysis_handler::<R>))
        .route("/api/v1/scenarios/:id/summary", get(summary_handler::<R>))
        .route(
            "/api/v1/scenarios/:id/compare/:other_id",
            get(compare_handler::<R>),
        )
        .with_state(service)
}

fn acting_user(headers: &HeaderMap) -> &str {
    headers
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .unwrap_or(SYSTEM_USER)
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, ScenarioServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, axum::Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) fn error_response(error: ScenarioServiceError) -> Response {
    let status = match &error {
        ScenarioServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScenarioServiceError::NotFound(_)
        | ScenarioServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScenarioServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ScenarioServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let payload = match &error {
        ScenarioServiceError::Validation(issues) => json!({
            "error": error.to_string(),
            "details": issues,
        }),
        _ => json!({ "error": error.to_string() }),
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(error = %error, "scenario request failed");
    }
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn create_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<CreateScenarioRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.create(request, acting_user(&headers)),
    )
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Query(query): Query<ListQuery>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    let status = match query.status.as_deref().map(str::parse::<ScenarioStatus>) {
        None => None,
        Some(Ok(status)) => Some(status),
        Some(Err(message)) => {
            return (
                StatusCode::BAD_REQUEST,
                axum::Json(json!({ "error": message })),
            )
                .into_response();
        }
    };
    respond(
        StatusCode::OK,
        service.list(&query.organization_id, status, query.limit),
    )
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.get(&ScenarioId(id)))
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<UpdateScenarioRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.update(&ScenarioId(id), request, acting_user(&headers)),
    )
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    match service.delete(&ScenarioId(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn roi_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<RoiRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.calculate_roi(&ScenarioId(id), request, acting_user(&headers)),
    )
}

pub(crate) async fn roi_history_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.roi_calculations(&ScenarioId(id)))
}

pub(crate) async fn versions_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.versions(&ScenarioId(id)))
}

pub(crate) async fn create_version_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    axum::Json(request): axum::Json<VersionRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.create_version(&ScenarioId(id), request.changes, acting_user(&headers)),
    )
}

pub(crate) async fn approvals_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.approvals(&ScenarioId(id)))
}

pub(crate) async fn approval_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
    axum::Json(request): axum::Json<ApprovalRequest>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::CREATED,
        service.submit_approval(&ScenarioId(id), request),
    )
}

pub(crate) async fn analysis_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.analyze(&ScenarioId(id)))
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path(id): Path<String>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(StatusCode::OK, service.summary(&ScenarioId(id)))
}

pub(crate) async fn compare_handler<R>(
    State(service): State<Arc<ScenarioService<R>>>,
    Path((id, other_id)): Path<(String, String)>,
) -> Response
where
    R: ScenarioRepository + 'static,
{
    respond(
        StatusCode::OK,
        service.compare(&ScenarioId(id), &ScenarioId(other_id)),
    )
}

pub(crate) async fn engine_handler(axum::Json(request): axum::Json<EngineRequest>) -> Response {
    let result = run_scenario_engine(&request.baseline, &request.variant);
    (StatusCode::OK, axum::Json(result)).into_response()
}
