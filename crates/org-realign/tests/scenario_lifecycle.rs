use std::sync::Arc;

use org_realign::config::ScenarioConfig;
use org_realign::scenarios::{
    ApprovalDecision, ApprovalRequest, CalculationType, CreateScenarioRequest,
    InMemoryScenarioRepository, RoiEngine, RoiRequest, ScenarioService, ScenarioStatus,
    UpdateScenarioRequest,
};
use serde_json::json;

fn request() -> CreateScenarioRequest {
    serde_json::from_value(json!({
        "organization_id": "northfield-college",
        "name": "Merge student services",
        "baseline": {
            "organization_chart": {
                "root": {
                    "id": "provost",
                    "title": "Provost",
                    "salary": 210000,
                    "direct_reports": [
                        {"id": "dir-advising", "title": "Director of Advising", "salary": 110000,
                         "direct_reports": [
                             {"id": "adv-1", "title": "Advisor", "salary": 58000},
                             {"id": "adv-2", "title": "Advisor", "salary": 58000}
                         ]},
                        {"id": "dir-records", "title": "Director of Records", "salary": 105000}
                    ]
                }
            },
            "cost_structure": {
                "total_annual_cost": 750000,
                "cost_breakdown": {"salaries": 541000, "other": 40000}
            },
            "current_metrics": {
                "total_employees": 5,
                "management_layers": 3,
                "average_span_of_control": 2.0,
                "management_ratio": 0.6
            }
        },
        "variant": {
            "proposed_chart": {
                "root": {
                    "id": "provost",
                    "title": "Provost",
                    "salary": 210000,
                    "direct_reports": [
                        {"id": "dir-student-services", "title": "Director of Student Services",
                         "salary": 120000,
                         "direct_reports": [
                             {"id": "adv-1", "title": "Advisor", "salary": 58000},
                             {"id": "adv-2", "title": "Advisor", "salary": 58000}
                         ]}
                    ]
                }
            },
            "proposed_cost_structure": {
                "total_annual_cost": 660000,
                "cost_breakdown": {"other": 40000}
            },
            "projected_metrics": {
                "total_employees": 4,
                "management_layers": 3,
                "average_span_of_control": 2.0,
                "management_ratio": 0.5
            },
            "implementation_plan": [
                {"id": "s1", "phase": 1, "description": "Combine offices", "duration": 8, "cost": 25000},
                {"id": "s2", "phase": 2, "description": "Cross-train staff", "duration": 8, "cost": 15000}
            ]
        }
    }))
    .expect("scenario request parses")
}

fn service() -> ScenarioService<InMemoryScenarioRepository> {
    let config = ScenarioConfig {
        monte_carlo_iterations: 250,
        monte_carlo_seed: Some(7),
        ..ScenarioConfig::default()
    };
    ScenarioService::new(Arc::new(InMemoryScenarioRepository::default()), &config)
}

#[test]
fn scenario_moves_from_draft_through_review_to_approval() {
    let service = service();
    let record = service.create(request(), "analyst").expect("scenario created");
    assert_eq!(record.status, ScenarioStatus::Draft);
    assert_eq!(record.cost_impact, 40_000.0);
    assert!(record.savings > 0.0);
    assert_eq!(record.timeline, "Medium-term (3-6 months)");

    let request_review = ApprovalRequest {
        approver_id: "dean".into(),
        status: ApprovalDecision::Pending,
        comments: Some("Needs budget sign-off".into()),
    };
    service
        .submit_approval(&record.id, request_review)
        .expect("review recorded");
    assert_eq!(
        service.get(&record.id).expect("stored").status,
        ScenarioStatus::UnderReview
    );

    let approve = ApprovalRequest {
        approver_id: "provost".into(),
        status: ApprovalDecision::Approved,
        comments: None,
    };
    service.submit_approval(&record.id, approve).expect("approval recorded");
    let approved = service
        .list("northfield-college", Some(ScenarioStatus::Approved), None)
        .expect("listing works");
    assert_eq!(approved.len(), 1);
    assert_eq!(service.approvals(&record.id).expect("history").len(), 2);
}

#[test]
fn reporting_tree_changes_show_up_in_the_analysis() {
    let service = service();
    let record = service.create(request(), "analyst").expect("scenario created");

    let analysis = service.analyze(&record.id).expect("analysis runs");
    let summary = &analysis.comparison.summary;
    assert_eq!(summary.total_positions.baseline, 5);
    assert_eq!(summary.total_positions.variant, 4);
    assert_eq!(summary.positions_added, 1);
    assert_eq!(summary.positions_removed, 2);
    // Both advisors now report to the new director.
    assert_eq!(summary.positions_modified, 2);
}

#[test]
fn seeded_monte_carlo_runs_are_reproducible() {
    let service = service();
    let record = service.create(request(), "analyst").expect("scenario created");
    let run = || {
        service
            .calculate_roi(
                &record.id,
                RoiRequest {
                    calculation_type: CalculationType::MonteCarlo,
                    assumptions: Default::default(),
                },
                "cfo",
            )
            .expect("roi calculated")
            .analysis
            .monte_carlo_results
            .expect("simulation results")
    };

    let first = run();
    let second = run();
    assert_eq!(first.iterations, 250);
    assert_eq!(first.roi_distribution, second.roi_distribution);
    assert!((0.0..=1.0).contains(&first.success_probability));
}

#[test]
fn updates_are_versioned_and_recalculated() {
    let service = service();
    let record = service.create(request(), "analyst").expect("scenario created");

    let mut variant = request().variant;
    variant.implementation_plan.truncate(1);
    let updated = service
        .update(
            &record.id,
            UpdateScenarioRequest {
                variant: Some(variant),
                ..UpdateScenarioRequest::default()
            },
            "analyst",
        )
        .expect("update applied");

    assert_eq!(updated.cost_impact, 25_000.0);
    assert_eq!(updated.timeline, "Short-term (1-3 months)");
    let versions = service.versions(&record.id).expect("versions");
    assert_eq!(versions.len(), 1);
    assert_eq!(versions[0].variant.implementation_plan.len(), 2);
}

#[test]
fn engine_defaults_come_from_configuration() {
    let engine = RoiEngine::from_config(&ScenarioConfig::default());
    assert_eq!(engine.monte_carlo_iterations, 10_000);
    assert_eq!(engine.seed, None);
    assert_eq!(engine.with_seed(3).seed, Some(3));
}
