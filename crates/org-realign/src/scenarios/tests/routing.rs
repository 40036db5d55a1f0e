use std::sync::Arc;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::scenarios::repository::ScenarioRepository;
use crate::scenarios::roi::RoiEngine;
use crate::scenarios::router::{scenario_router, USER_HEADER};
use crate::scenarios::service::ScenarioService;

fn router_for<R: ScenarioRepository + 'static>(repository: R) -> Router {
    let service = ScenarioService::with_engine(Arc::new(repository), RoiEngine::default(), 50);
    scenario_router(Arc::new(service))
}

fn create_payload(organization_id: &str) -> Value {
    json!({
        "organization_id": organization_id,
        "name": "Advising consolidation",
        "baseline": baseline(),
        "variant": variant(),
    })
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(USER_HEADER, "planner")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn create_scenario(router: &Router, organization_id: &str) -> Value {
    let response = router
        .clone()
        .oneshot(post_json("/api/v1/scenarios", &create_payload(organization_id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json_body(response).await
}

#[tokio::test]
async fn create_route_returns_the_stored_draft() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));

    let body = create_scenario(&router, "org-http").await;
    assert_eq!(body["status"], "DRAFT");
    assert_eq!(body["created_by"], "planner");
    assert_eq!(body["cost_impact"], 60_000.0);

    let id = body["id"].as_str().unwrap();
    let response = router
        .clone()
        .oneshot(get(&format!("/api/v1/scenarios/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await["name"], "Advising consolidation");
}

#[tokio::test]
async fn unknown_scenarios_return_not_found() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));

    let response = router
        .oneshot(get("/api/v1/scenarios/scn-unknown"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json_body(response).await;
    assert_eq!(body["error"], "scenario scn-unknown not found");
}

#[tokio::test]
async fn invalid_snapshots_return_unprocessable_with_details() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));
    let payload = json!({ "organization_id": "org-http", "name": "Empty" });

    let response = router
        .oneshot(post_json("/api/v1/scenarios", &payload))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    let details = body["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert_eq!(details[0]["code"], "MISSING_ORG_CHART");
}

#[tokio::test]
async fn repository_conflict_maps_to_conflict() {
    let router = router_for(ConflictRepository);
    let response = router
        .oneshot(post_json("/api/v1/scenarios", &create_payload("org-http")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unavailable_repository_maps_to_internal_error() {
    let router = router_for(UnavailableRepository);
    let response = router
        .oneshot(get("/api/v1/scenarios/scn-000001"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn approval_route_moves_scenario_to_review() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));
    let created = create_scenario(&router, "org-http").await;
    let id = created["id"].as_str().unwrap();

    let response = router
        .clone()
        .oneshot(post_json(
            &format!("/api/v1/scenarios/{id}/approvals"),
            &json!({ "approver_id": "provost", "status": "NEEDS_INFO" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(read_json_body(response).await["status"], "PENDING");

    let response = router
        .oneshot(get(&format!("/api/v1/scenarios/{id}")))
        .await
        .unwrap();
    assert_eq!(read_json_body(response).await["status"], "UNDER_REVIEW");
}

#[tokio::test]
async fn roi_route_defaults_to_detailed_analysis() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));
    let created = create_scenario(&router, "org-http").await;
    let id = created["id"].as_str().unwrap();

    let response = router
        .clone()
        .oneshot(post_json(&format!("/api/v1/scenarios/{id}/roi"), &json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["analysis"]["calculation_type"], "DETAILED");
    assert_eq!(body["calculated_by"], "planner");
    assert!(body["analysis"]["sensitivity_analysis"].is_object());

    let response = router
        .oneshot(get(&format!("/api/v1/scenarios/{id}/roi")))
        .await
        .unwrap();
    let history = read_json_body(response).await;
    assert_eq!(history.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn delete_route_returns_no_content() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));
    let created = create_scenario(&router, "org-http").await;
    let uri = format!("/api/v1/scenarios/{}", created["id"].as_str().unwrap());

    let response = router
        .clone()
        .oneshot(Request::delete(uri.as_str()).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router.oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_route_rejects_unknown_status() {
    let (service, _) = build_service();
    let router = scenario_router(Arc::new(service));
    create_scenario(&router, "org-list-http").await;

    let response = router
        .clone()
        .oneshot(get("/api/v1/scenarios?organization_id=org-list-http&status=draft"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json_body(response).await.as_array().unwrap().len(), 1);

    let response = router
        .oneshot(get("/api/v1/scenarios?organization_id=org-list-http&status=archived"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn compare_route_runs_the_engine_without_storage() {
    let (service, repository) = build_service();
    let router = scenario_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/scenarios/compare",
            &json!({ "baseline": baseline(), "variant": variant() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["comparison"]["delta_cost"], 10_000.0);
    assert_eq!(body["metadata"]["version"], "2.3.0");
    assert!(repository.list_by_organization("org-http").unwrap().is_empty());
}
