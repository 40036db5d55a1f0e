use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::roi::{AssumptionOverrides, CalculationType, RoiAnalysis};

/// Identifier wrapper for stored scenarios.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ScenarioId(pub String);

impl std::fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One position as supplied by a caller; every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_band: Option<SalaryBand>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fte: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subordinates: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalaryBand {
    pub min: f64,
    pub max: f64,
    pub current: f64,
}

/// A department block whose positions inherit its name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DepartmentInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub positions: Vec<PositionInput>,
}

/// Node of a reporting tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrgChartNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub direct_reports: Vec<OrgChartNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_center_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overhead: Option<f64>,
}

impl OrgChartNode {
    /// Salary, benefits, and overhead of this node and everyone below it.
    pub fn total_compensation(&self) -> f64 {
        let own = self.salary.unwrap_or(0.0)
            + self.benefits.unwrap_or(0.0)
            + self.overhead.unwrap_or(0.0);
        own + self
            .direct_reports
            .iter()
            .map(OrgChartNode::total_compensation)
            .sum::<f64>()
    }
}

/// An organization chart in any of the accepted shapes: a flat position list,
/// department blocks, a reporting tree, or a mix of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationChart {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub positions: Vec<PositionInput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub departments: Vec<DepartmentInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<OrgChartNode>,
}

impl OrganizationChart {
    pub fn tree_compensation(&self) -> f64 {
        self.root
            .as_ref()
            .map_or(0.0, OrgChartNode::total_compensation)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    #[serde(default)]
    pub salaries: f64,
    #[serde(default)]
    pub benefits: f64,
    #[serde(default)]
    pub overhead: f64,
    #[serde(default)]
    pub technology: f64,
    #[serde(default)]
    pub facilities: f64,
    #[serde(default)]
    pub other: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostStructure {
    #[serde(default)]
    pub total_annual_cost: f64,
    #[serde(default)]
    pub cost_breakdown: CostBreakdown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct StructureMetrics {
    #[serde(default)]
    pub total_employees: u32,
    #[serde(default)]
    pub management_layers: u32,
    #[serde(default)]
    pub average_span_of_control: f64,
    /// Managers per individual contributor.
    #[serde(default)]
    pub management_ratio: f64,
    #[serde(default)]
    pub cost_per_employee: f64,
    #[serde(default)]
    pub total_annual_cost: f64,
    #[serde(default)]
    pub department_count: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChangeKind {
    Restructure,
    EliminatePosition,
    AddPosition,
    ChangeReporting,
    MergeDepartments,
    SplitDepartment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskRating {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalChange {
    #[serde(rename = "type")]
    pub kind: ChangeKind,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub affected_employees: Vec<String>,
    #[serde(default)]
    pub cost_impact: f64,
    #[serde(default)]
    pub timeframe: String,
    pub risk_level: RiskRating,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationRisk {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub probability: f64,
    #[serde(default)]
    pub impact: f64,
    #[serde(default)]
    pub mitigation: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImplementationStep {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub phase: u32,
    #[serde(default)]
    pub description: String,
    /// Weeks.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub cost: f64,
    #[serde(default)]
    pub risks: Vec<ImplementationRisk>,
}

/// Current-state snapshot of an organization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalBaseline {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_chart: Option<OrganizationChart>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_structure: Option<CostStructure>,
    #[serde(default)]
    pub current_metrics: StructureMetrics,
}

/// Proposed organization with the changes and plan needed to reach it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrganizationalVariant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_chart: Option<OrganizationChart>,
    #[serde(default)]
    pub proposed_cost_structure: CostStructure,
    #[serde(default)]
    pub projected_metrics: StructureMetrics,
    #[serde(default)]
    pub changes_required: Vec<OrganizationalChange>,
    #[serde(default)]
    pub implementation_plan: Vec<ImplementationStep>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScenarioStatus {
    Draft,
    UnderReview,
    Approved,
}

impl ScenarioStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "DRAFT",
            Self::UnderReview => "UNDER_REVIEW",
            Self::Approved => "APPROVED",
        }
    }

    /// Status after an approval decision is recorded.
    pub const fn after(self, decision: ApprovalDecision) -> Self {
        match decision {
            ApprovalDecision::Approved => Self::Approved,
            ApprovalDecision::Rejected => Self::Draft,
            ApprovalDecision::Pending => Self::UnderReview,
        }
    }
}

impl std::str::FromStr for ScenarioStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "DRAFT" => Ok(Self::Draft),
            "UNDER_REVIEW" => Ok(Self::UnderReview),
            "APPROVED" => Ok(Self::Approved),
            other => Err(format!("unknown scenario status `{other}`")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApprovalDecision {
    Approved,
    Rejected,
    #[serde(other)]
    Pending,
}

/// Stored scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioRecord {
    pub id: ScenarioId,
    pub organization_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub baseline: OrganizationalBaseline,
    pub variant: OrganizationalVariant,
    pub savings: f64,
    pub cost_impact: f64,
    pub timeline: String,
    pub confidence: f64,
    pub status: ScenarioStatus,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
}

/// Append-only snapshot taken before a scenario changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioVersion {
    pub id: String,
    pub scenario_id: ScenarioId,
    pub version: u32,
    pub changes: serde_json::Value,
    pub baseline: OrganizationalBaseline,
    pub variant: OrganizationalVariant,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalRecord {
    pub id: String,
    pub scenario_id: ScenarioId,
    pub approver_id: String,
    pub status: ApprovalDecision,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskSnapshot {
    pub organizational_risks: Vec<String>,
    pub implementation_risks: Vec<ImplementationRisk>,
}

/// Stored ROI run for a scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiCalculationRecord {
    pub id: String,
    pub scenario_id: ScenarioId,
    pub analysis: RoiAnalysis,
    pub risk_factors: RiskSnapshot,
    pub calculated_at: DateTime<Utc>,
    pub calculated_by: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateScenarioRequest {
    pub organization_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub baseline: OrganizationalBaseline,
    #[serde(default)]
    pub variant: OrganizationalVariant,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScenarioRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub baseline: Option<OrganizationalBaseline>,
    #[serde(default)]
    pub variant: Option<OrganizationalVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoiRequest {
    #[serde(default = "default_calculation_type")]
    pub calculation_type: CalculationType,
    #[serde(default)]
    pub assumptions: AssumptionOverrides,
}

fn default_calculation_type() -> CalculationType {
    CalculationType::Detailed
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalRequest {
    pub approver_id: String,
    pub status: ApprovalDecision,
    #[serde(default)]
    pub comments: Option<String>,
}
