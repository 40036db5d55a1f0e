//! Restructuring scenarios: chart flattening, structural diffing, ROI modelling, and the
//! draft/review/approval lifecycle behind the HTTP surface.

pub mod analysis;
pub mod domain;
pub mod engine;
pub mod extract;
pub mod import;
pub mod repository;
pub mod roi;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use analysis::{
    analyze_department_changes, analyze_span_of_control, comparison_summary,
    run_scenario_engine, ComparisonOverview, ComparisonRisk, DepartmentAnalysis,
    EngineMetadata, ScenarioEngineResult, SpanOfControlAnalysis, SpanStats, ENGINE_VERSION,
};
pub use domain::{
    ApprovalDecision, ApprovalRecord, ApprovalRequest, ChangeKind, CostBreakdown,
    CostStructure, CreateScenarioRequest, DepartmentInput, ImplementationRisk,
    ImplementationStep, OrgChartNode, OrganizationChart, OrganizationalBaseline,
    OrganizationalChange, OrganizationalVariant, PositionInput, RiskRating, RiskSnapshot,
    RoiCalculationRecord, RoiRequest, SalaryBand, ScenarioId, ScenarioRecord, ScenarioStatus,
    ScenarioVersion, StructureMetrics, UpdateScenarioRequest,
};
pub use engine::{
    compare_positions, compare_scenarios, structural_diff, ComparisonSummary, CostSummary,
    FieldChange, FteImpact, PositionChange, PositionTotals, ScenarioComparison,
    StructuralDiff,
};
pub use extract::{extract_positions, Position};
pub use import::{ImportedPosition, OrgUnit, PositionImport, PositionImportError, PositionImporter};
pub use repository::{InMemoryScenarioRepository, RepositoryError, ScenarioRepository};
pub use roi::{
    financial_metrics, irr, npv, AssumptionOverrides, CalculationType, FinancialMetrics,
    MonteCarloResults, RoiAnalysis, RoiAssumptions, RoiEngine, RoiRecommendation,
    SensitivityAnalysis,
};
pub use router::{scenario_router, USER_HEADER};
pub use service::{
    calculate_confidence, estimate_timeline, validate_scenario, ScenarioService,
    ScenarioServiceError, ScenarioValidation, ValidationIssue,
};
