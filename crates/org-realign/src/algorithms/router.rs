use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

use super::aibs::calculate_aibs;
use super::aics::calculate_aics;
use super::aims::calculate_aims;
use super::aips::calculate_aips;
use super::airix::calculate_airix;
use super::airs::calculate_airs;
use super::runner::{run_algorithms, AlgorithmPayload};
use super::suite::AlgorithmSuite;
use crate::assessment::{
    benchmark_comparison, generate_insights, validate_assessment, AssessmentData,
    BenchmarkComparison, OrganizationMetrics,
};

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub assessment: AssessmentData,
    #[serde(default)]
    pub metrics: OrganizationMetrics,
    #[serde(default)]
    pub include_ai: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InsightRequest {
    pub scores: BTreeMap<String, f64>,
    #[serde(default)]
    pub thresholds: BTreeMap<String, f64>,
    #[serde(default)]
    pub benchmarks: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InsightView {
    pub insights: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<BenchmarkComparison>,
}

/// Stateless scoring endpoints. Every handler is a pure computation over the request body.
pub fn assessment_router(suite: Arc<AlgorithmSuite>) -> Router {
    Router::new()
        .route("/api/v1/assessments/score", post(score_handler))
        .route("/api/v1/assessments/airix", post(airix_handler))
        .route("/api/v1/assessments/airs", post(airs_handler))
        .route("/api/v1/assessments/aibs", post(aibs_handler))
        .route("/api/v1/assessments/aics", post(aics_handler))
        .route("/api/v1/assessments/aims", post(aims_handler))
        .route("/api/v1/assessments/aips", post(aips_handler))
        .route("/api/v1/assessments/validate", post(validate_handler))
        .route("/api/v1/assessments/insights", post(insights_handler))
        .route("/api/v1/algorithms/run", post(run_handler))
        .with_state(suite)
}

pub(crate) async fn score_handler(
    State(suite): State<Arc<AlgorithmSuite>>,
    axum::Json(request): axum::Json<ScoreRequest>,
) -> Response {
    let result = if request.include_ai {
        suite
            .as_ref()
            .clone()
            .with_ai_modules(true)
            .calculate(&request.assessment, &request.metrics)
    } else {
        suite.calculate(&request.assessment, &request.metrics)
    };
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn airix_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_airix(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn airs_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_airs(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn aibs_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_aibs(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn aics_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_aics(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn aims_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_aims(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn aips_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let result = calculate_aips(&request.assessment, &request.metrics);
    (StatusCode::OK, axum::Json(result)).into_response()
}

pub(crate) async fn validate_handler(axum::Json(data): axum::Json<AssessmentData>) -> Response {
    let report = validate_assessment(&data);
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn insights_handler(axum::Json(request): axum::Json<InsightRequest>) -> Response {
    let insights = generate_insights(&request.scores, &request.thresholds, &request.benchmarks);
    let comparison = if request.benchmarks.is_empty() {
        None
    } else {
        Some(benchmark_comparison(&request.scores, &request.benchmarks))
    };
    (StatusCode::OK, axum::Json(InsightView { insights, comparison })).into_response()
}

pub(crate) async fn run_handler(axum::Json(payload): axum::Json<AlgorithmPayload>) -> Response {
    (StatusCode::OK, axum::Json(run_algorithms(&payload))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header::CONTENT_TYPE, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn router() -> Router {
        assessment_router(Arc::new(AlgorithmSuite::default()))
    }

    async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
        let response = router()
            .oneshot(
                Request::post(path)
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn assessment() -> Value {
        json!({
            "id": "a-http",
            "responses": [
                { "question_id": "q1", "prompt": "Reporting hierarchy", "value": 4 },
                { "question_id": "q2", "prompt": "Faculty culture", "value": "agree", "domain": "cultural" }
            ]
        })
    }

    #[tokio::test]
    async fn score_route_returns_core_modules_only_by_default() {
        let (status, body) =
            post_json("/api/v1/assessments/score", json!({ "assessment": assessment() })).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["dsch"]["overall_score"].is_number());
        assert_eq!(body["version"], "2.1.0");
        assert!(body.get("airix").is_none());
    }

    #[tokio::test]
    async fn score_route_adds_ai_modules_on_request() {
        let (status, body) = post_json(
            "/api/v1/assessments/score",
            json!({ "assessment": assessment(), "include_ai": true }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["airix"]["overall_readiness"].is_number());
        assert!(body["airs"]["overall_risk"].is_number());
        assert!(body["ai_strategy"]["aibs"]["overall_strategy"].is_number());
    }

    #[tokio::test]
    async fn mission_alignment_route_scores_the_assessment() {
        let (status, body) =
            post_json("/api/v1/assessments/aims", json!({ "assessment": assessment() })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["level"], "weak");
        assert_eq!(body["alignment_gaps"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn validate_route_reports_empty_assessments() {
        let (status, body) =
            post_json("/api/v1/assessments/validate", json!({ "id": "empty" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["is_valid"], false);
        assert_eq!(body["errors"][0], "Assessment contains no responses");
    }

    #[tokio::test]
    async fn insights_route_compares_against_benchmarks() {
        let (status, body) = post_json(
            "/api/v1/assessments/insights",
            json!({
                "scores": { "dsch": 0.9 },
                "thresholds": { "dsch": 0.6 },
                "benchmarks": { "dsch": 0.65 }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insights"][0], "Strong performance in dsch (90.0%)");
        assert_eq!(body["comparison"]["ranking"], "above");
    }

    #[tokio::test]
    async fn run_route_scores_the_lightweight_payload() {
        let (status, body) = post_json(
            "/api/v1/algorithms/run",
            json!({ "structure": { "layers": 4, "spanByMgr": [8, 8] } }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dsch"]["score"], 100.0);
        assert_eq!(body["dsch"]["ideal_span"], 8.0);
    }
}
