use std::sync::Arc;

use axum::response::Response;
use serde_json::Value;

use crate::scenarios::domain::{
    ApprovalRecord, CostBreakdown, CostStructure, CreateScenarioRequest, ImplementationRisk,
    ImplementationStep, OrganizationChart, OrganizationalBaseline, OrganizationalVariant,
    PositionInput, RoiCalculationRecord, ScenarioId, ScenarioRecord, ScenarioVersion,
    StructureMetrics,
};
use crate::scenarios::repository::{
    InMemoryScenarioRepository, RepositoryError, ScenarioRepository,
};
use crate::scenarios::roi::RoiEngine;
use crate::scenarios::service::ScenarioService;

pub(super) fn position(id: &str, department: &str, cost: f64) -> PositionInput {
    PositionInput {
        id: Some(id.to_string()),
        title: Some("Coordinator".to_string()),
        department: Some(department.to_string()),
        level: Some(2),
        total_cost: Some(cost),
        fte: Some(1.0),
        ..PositionInput::default()
    }
}

pub(super) fn chart(positions: Vec<PositionInput>) -> OrganizationChart {
    OrganizationChart {
        positions,
        ..OrganizationChart::default()
    }
}

pub(super) fn baseline_positions() -> Vec<PositionInput> {
    vec![
        position("dean", "Academic Affairs", 180_000.0),
        position("registrar", "Student Services", 95_000.0),
        position("advisor-1", "Student Services", 60_000.0),
        position("advisor-2", "Student Services", 60_000.0),
    ]
}

pub(super) fn baseline() -> OrganizationalBaseline {
    OrganizationalBaseline {
        organization_chart: Some(chart(baseline_positions())),
        cost_structure: Some(CostStructure {
            total_annual_cost: 1_000_000.0,
            cost_breakdown: CostBreakdown {
                salaries: 395_000.0,
                other: 50_000.0,
                ..CostBreakdown::default()
            },
        }),
        current_metrics: StructureMetrics {
            total_employees: 4,
            management_layers: 3,
            average_span_of_control: 3.0,
            management_ratio: 0.25,
            ..StructureMetrics::default()
        },
    }
}

/// Merges the two advisor roles into one and adds an analyst.
pub(super) fn variant() -> OrganizationalVariant {
    let mut positions = baseline_positions();
    positions.retain(|p| p.id.as_deref() != Some("advisor-2"));
    positions.push(position("analyst", "Institutional Research", 70_000.0));

    OrganizationalVariant {
        proposed_chart: Some(chart(positions)),
        proposed_cost_structure: CostStructure {
            total_annual_cost: 900_000.0,
            cost_breakdown: CostBreakdown {
                other: 50_000.0,
                ..CostBreakdown::default()
            },
        },
        projected_metrics: StructureMetrics {
            total_employees: 4,
            management_layers: 2,
            average_span_of_control: 4.0,
            management_ratio: 0.2,
            ..StructureMetrics::default()
        },
        changes_required: Vec::new(),
        implementation_plan: vec![
            ImplementationStep {
                id: "plan-1".into(),
                phase: 1,
                description: "Consolidate advising".into(),
                duration: 6,
                cost: 40_000.0,
                risks: vec![ImplementationRisk {
                    description: "Advising backlog".into(),
                    probability: 0.4,
                    impact: 0.5,
                    mitigation: vec!["Temporary staff".into()],
                }],
            },
            ImplementationStep {
                id: "plan-2".into(),
                phase: 2,
                description: "Hire analyst".into(),
                duration: 10,
                cost: 20_000.0,
                risks: Vec::new(),
            },
        ],
    }
}

pub(super) fn create_request(organization_id: &str) -> CreateScenarioRequest {
    CreateScenarioRequest {
        organization_id: organization_id.to_string(),
        name: "Advising consolidation".to_string(),
        description: Some("Merge advising roles".to_string()),
        baseline: baseline(),
        variant: variant(),
    }
}

pub(super) fn build_service() -> (
    ScenarioService<InMemoryScenarioRepository>,
    Arc<InMemoryScenarioRepository>,
) {
    let repository = Arc::new(InMemoryScenarioRepository::default());
    let engine = RoiEngine {
        monte_carlo_iterations: 200,
        seed: Some(42),
    };
    let service = ScenarioService::with_engine(repository.clone(), engine, 50);
    (service, repository)
}

pub(super) struct ConflictRepository;

impl ScenarioRepository for ConflictRepository {
    fn insert(&self, _record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ScenarioRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError> {
        Ok(None)
    }

    fn delete(&self, _id: &ScenarioId) -> Result<(), RepositoryError> {
        Err(RepositoryError::NotFound)
    }

    fn list_by_organization(&self, _org: &str) -> Result<Vec<ScenarioRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn append_version(&self, _version: ScenarioVersion) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn versions(&self, _id: &ScenarioId) -> Result<Vec<ScenarioVersion>, RepositoryError> {
        Ok(Vec::new())
    }

    fn append_approval(&self, _approval: ApprovalRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn approvals(&self, _id: &ScenarioId) -> Result<Vec<ApprovalRecord>, RepositoryError> {
        Ok(Vec::new())
    }

    fn append_roi(&self, _calculation: RoiCalculationRecord) -> Result<(), RepositoryError> {
        Ok(())
    }

    fn roi_calculations(
        &self,
        _id: &ScenarioId,
    ) -> Result<Vec<RoiCalculationRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

fn offline<T>() -> Result<T, RepositoryError> {
    Err(RepositoryError::Unavailable("database offline".to_string()))
}

impl ScenarioRepository for UnavailableRepository {
    fn insert(&self, _record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError> {
        offline()
    }

    fn update(&self, _record: ScenarioRecord) -> Result<(), RepositoryError> {
        offline()
    }

    fn fetch(&self, _id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError> {
        offline()
    }

    fn delete(&self, _id: &ScenarioId) -> Result<(), RepositoryError> {
        offline()
    }

    fn list_by_organization(&self, _org: &str) -> Result<Vec<ScenarioRecord>, RepositoryError> {
        offline()
    }

    fn append_version(&self, _version: ScenarioVersion) -> Result<(), RepositoryError> {
        offline()
    }

    fn versions(&self, _id: &ScenarioId) -> Result<Vec<ScenarioVersion>, RepositoryError> {
        offline()
    }

    fn append_approval(&self, _approval: ApprovalRecord) -> Result<(), RepositoryError> {
        offline()
    }

    fn approvals(&self, _id: &ScenarioId) -> Result<Vec<ApprovalRecord>, RepositoryError> {
        offline()
    }

    fn append_roi(&self, _calculation: RoiCalculationRecord) -> Result<(), RepositoryError> {
        offline()
    }

    fn roi_calculations(
        &self,
        _id: &ScenarioId,
    ) -> Result<Vec<RoiCalculationRecord>, RepositoryError> {
        offline()
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
