use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Map, Value};

use super::analysis::{
    comparison_summary, run_scenario_engine, ComparisonOverview, ScenarioEngineResult,
};
use super::domain::{
    ApprovalDecision, ApprovalRecord, ApprovalRequest, CreateScenarioRequest,
    OrganizationalBaseline, OrganizationalVariant, RiskRating, RiskSnapshot,
    RoiCalculationRecord, RoiRequest, ScenarioId, ScenarioRecord, ScenarioStatus,
    ScenarioVersion, UpdateScenarioRequest,
};
use super::engine::{compare_scenarios, ScenarioComparison};
use super::repository::{RepositoryError, ScenarioRepository};
use super::roi::{AssumptionOverrides, CalculationType, RoiEngine};
use crate::config::ScenarioConfig;

const MINIMAL_CHANGE_WARNING: &str = "Scenario appears to make minimal organizational changes";
const DEFAULT_PLAN_WEEKS: u32 = 12;
const RISK_PROBABILITY_FLOOR: f64 = 0.3;

/// A rejected field in a create request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub field: &'static str,
    pub message: &'static str,
    pub code: &'static str,
}

/// Result of checking a baseline/variant pair before it is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScenarioValidation {
    pub errors: Vec<ValidationIssue>,
    pub warnings: Vec<&'static str>,
}

impl ScenarioValidation {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Lifecycle service for restructuring scenarios: storage, versioning, approvals and ROI.
pub struct ScenarioService<R> {
    repository: Arc<R>,
    roi: Arc<RoiEngine>,
    list_limit: usize,
}

static SCENARIO_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static VERSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static APPROVAL_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static ROI_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_id(sequence: &AtomicU64, prefix: &str) -> String {
    let id = sequence.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id:06}")
}

impl<R> ScenarioService<R>
where
    R: ScenarioRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &ScenarioConfig) -> Self {
        Self::with_engine(repository, RoiEngine::from_config(config), config.list_limit)
    }

    pub fn with_engine(repository: Arc<R>, roi: RoiEngine, list_limit: usize) -> Self {
        Self {
            repository,
            roi: Arc::new(roi),
            list_limit,
        }
    }

    /// Validate and store a new draft scenario together with its initial SIMPLE ROI run.
    pub fn create(
        &self,
        request: CreateScenarioRequest,
        created_by: &str,
    ) -> Result<ScenarioRecord, ScenarioServiceError> {
        let validation = validate_scenario(&request.baseline, &request.variant);
        if !validation.is_valid() {
            return Err(ScenarioServiceError::Validation(validation.errors));
        }
        for warning in &validation.warnings {
            tracing::warn!(organization = %request.organization_id, "{warning}");
        }

        let analysis = self.roi.calculate(
            &request.baseline,
            &request.variant,
            CalculationType::Simple,
            &AssumptionOverrides::default(),
        );
        let now = Utc::now();
        let record = ScenarioRecord {
            id: ScenarioId(next_id(&SCENARIO_SEQUENCE, "scn")),
            organization_id: request.organization_id,
            name: request.name,
            description: request.description,
            savings: analysis.financial_metrics.annual_savings,
            cost_impact: analysis.financial_metrics.initial_investment,
            timeline: estimate_timeline(&request.variant).to_string(),
            confidence: calculate_confidence(&request.baseline, &request.variant),
            status: ScenarioStatus::Draft,
            warnings: validation.warnings.iter().map(|w| w.to_string()).collect(),
            baseline: request.baseline,
            variant: request.variant,
            created_at: now,
            updated_at: now,
            created_by: created_by.to_string(),
        };

        let stored = self.repository.insert(record)?;
        self.repository.append_roi(RoiCalculationRecord {
            id: next_id(&ROI_SEQUENCE, "roi"),
            scenario_id: stored.id.clone(),
            risk_factors: extract_risk_factors(&stored.variant),
            analysis,
            calculated_at: now,
            calculated_by: created_by.to_string(),
        })?;

        tracing::info!(
            scenario = %stored.id,
            organization = %stored.organization_id,
            "scenario created"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &ScenarioId) -> Result<ScenarioRecord, ScenarioServiceError> {
        self.repository
            .fetch(id)?
            .ok_or_else(|| ScenarioServiceError::NotFound(id.clone()))
    }

    /// Newest first, optionally filtered by status. `limit` falls back to the configured page size.
    pub fn list(
        &self,
        organization_id: &str,
        status: Option<ScenarioStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<ScenarioRecord>, ScenarioServiceError> {
        let mut records: Vec<ScenarioRecord> = self
            .repository
            .list_by_organization(organization_id)?
            .into_iter()
            .filter(|record| status.map_or(true, |status| record.status == status))
            .collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        records.truncate(limit.unwrap_or(self.list_limit));
        Ok(records)
    }

    /// Snapshot the current state into the version log, then apply the update.
    pub fn update(
        &self,
        id: &ScenarioId,
        request: UpdateScenarioRequest,
        updated_by: &str,
    ) -> Result<ScenarioRecord, ScenarioServiceError> {
        let mut record = self.get(id)?;
        let changes = tracked_changes(&record, &request);
        self.append_version(&record, changes, updated_by)?;

        if let Some(name) = request.name.filter(|name| !name.is_empty()) {
            record.name = name;
        }
        if let Some(description) = request.description {
            record.description = Some(description);
        }
        let recalculate = request.baseline.is_some() || request.variant.is_some();
        if let Some(baseline) = request.baseline {
            record.baseline = baseline;
        }
        if let Some(variant) = request.variant {
            record.variant = variant;
        }

        if recalculate {
            let analysis = self.roi.calculate(
                &record.baseline,
                &record.variant,
                CalculationType::Simple,
                &AssumptionOverrides::default(),
            );
            record.savings = analysis.financial_metrics.annual_savings;
            record.cost_impact = analysis.financial_metrics.initial_investment;
            record.timeline = estimate_timeline(&record.variant).to_string();
            record.confidence = calculate_confidence(&record.baseline, &record.variant);
        }
        record.updated_at = Utc::now();

        self.repository.update(record.clone())?;
        tracing::info!(scenario = %record.id, recalculated = recalculate, "scenario updated");
        Ok(record)
    }

    pub fn delete(&self, id: &ScenarioId) -> Result<(), ScenarioServiceError> {
        match self.repository.delete(id) {
            Ok(()) => {
                tracing::info!(scenario = %id, "scenario deleted");
                Ok(())
            }
            Err(RepositoryError::NotFound) => Err(ScenarioServiceError::NotFound(id.clone())),
            Err(other) => Err(other.into()),
        }
    }

    pub fn calculate_roi(
        &self,
        id: &ScenarioId,
        request: RoiRequest,
        calculated_by: &str,
    ) -> Result<RoiCalculationRecord, ScenarioServiceError> {
        let record = self.get(id)?;
        let analysis = self.roi.calculate(
            &record.baseline,
            &record.variant,
            request.calculation_type,
            &request.assumptions,
        );
        let calculation = RoiCalculationRecord {
            id: next_id(&ROI_SEQUENCE, "roi"),
            scenario_id: record.id.clone(),
            analysis,
            risk_factors: extract_risk_factors(&record.variant),
            calculated_at: Utc::now(),
            calculated_by: calculated_by.to_string(),
        };
        self.repository.append_roi(calculation.clone())?;
        tracing::info!(
            scenario = %record.id,
            calculation = request.calculation_type.label(),
            "roi calculation stored"
        );
        Ok(calculation)
    }

    /// Newest first.
    pub fn roi_calculations(
        &self,
        id: &ScenarioId,
    ) -> Result<Vec<RoiCalculationRecord>, ScenarioServiceError> {
        self.get(id)?;
        let mut calculations = self.repository.roi_calculations(id)?;
        calculations.reverse();
        Ok(calculations)
    }

    /// Highest version first.
    pub fn versions(&self, id: &ScenarioId) -> Result<Vec<ScenarioVersion>, ScenarioServiceError> {
        self.get(id)?;
        let mut versions = self.repository.versions(id)?;
        versions.sort_by(|a, b| b.version.cmp(&a.version));
        Ok(versions)
    }

    pub fn create_version(
        &self,
        id: &ScenarioId,
        changes: Value,
        created_by: &str,
    ) -> Result<ScenarioVersion, ScenarioServiceError> {
        let record = self.get(id)?;
        self.append_version(&record, changes, created_by)
    }

    /// Newest first.
    pub fn approvals(&self, id: &ScenarioId) -> Result<Vec<ApprovalRecord>, ScenarioServiceError> {
        self.get(id)?;
        let mut approvals = self.repository.approvals(id)?;
        approvals.reverse();
        Ok(approvals)
    }

    /// Record an approval decision and move the scenario to the matching status.
    pub fn submit_approval(
        &self,
        id: &ScenarioId,
        request: ApprovalRequest,
    ) -> Result<ApprovalRecord, ScenarioServiceError> {
        let mut record = self.get(id)?;
        let now = Utc::now();
        let approval = ApprovalRecord {
            id: next_id(&APPROVAL_SEQUENCE, "apr"),
            scenario_id: record.id.clone(),
            approver_id: request.approver_id,
            status: request.status,
            comments: request.comments,
            approved_at: (request.status == ApprovalDecision::Approved).then_some(now),
            created_at: now,
        };
        self.repository.append_approval(approval.clone())?;

        let previous = record.status;
        record.status = previous.after(request.status);
        record.updated_at = now;
        self.repository.update(record)?;

        tracing::info!(
            scenario = %id,
            approver = %approval.approver_id,
            from = previous.label(),
            to = previous.after(request.status).label(),
            "approval recorded"
        );
        Ok(approval)
    }

    /// The first scenario's baseline against the second scenario's variant.
    pub fn compare(
        &self,
        first: &ScenarioId,
        second: &ScenarioId,
    ) -> Result<ScenarioComparison, ScenarioServiceError> {
        let first = self.get(first)?;
        let second = self.get(second)?;
        Ok(compare_scenarios(&first.baseline, &second.variant))
    }

    pub fn analyze(&self, id: &ScenarioId) -> Result<ScenarioEngineResult, ScenarioServiceError> {
        let record = self.get(id)?;
        Ok(run_scenario_engine(&record.baseline, &record.variant))
    }

    pub fn summary(&self, id: &ScenarioId) -> Result<ComparisonOverview, ScenarioServiceError> {
        let record = self.get(id)?;
        let comparison = compare_scenarios(&record.baseline, &record.variant);
        Ok(comparison_summary(&comparison))
    }

    fn append_version(
        &self,
        record: &ScenarioRecord,
        changes: Value,
        created_by: &str,
    ) -> Result<ScenarioVersion, ScenarioServiceError> {
        let existing = self.repository.versions(&record.id)?.len();
        let version = ScenarioVersion {
            id: next_id(&VERSION_SEQUENCE, "ver"),
            scenario_id: record.id.clone(),
            version: u32::try_from(existing).unwrap_or(u32::MAX).saturating_add(1),
            changes,
            baseline: record.baseline.clone(),
            variant: record.variant.clone(),
            created_at: Utc::now(),
            created_by: created_by.to_string(),
        };
        self.repository.append_version(version.clone())?;
        Ok(version)
    }
}

/// Blocking problems and advisory warnings for a baseline/variant pair.
pub fn validate_scenario(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> ScenarioValidation {
    let mut validation = ScenarioValidation::default();
    if baseline.organization_chart.is_none() {
        validation.errors.push(ValidationIssue {
            field: "baseline.organization_chart",
            message: "Organization chart is required",
            code: "MISSING_ORG_CHART",
        });
    }
    let valid_costs = baseline
        .cost_structure
        .as_ref()
        .is_some_and(|costs| costs.total_annual_cost > 0.0);
    if !valid_costs {
        validation.errors.push(ValidationIssue {
            field: "baseline.cost_structure",
            message: "Valid cost structure is required",
            code: "INVALID_COST_STRUCTURE",
        });
    }
    if variant.proposed_chart.is_none() {
        validation.errors.push(ValidationIssue {
            field: "variant.proposed_chart",
            message: "Proposed organization chart is required",
            code: "MISSING_PROPOSED_CHART",
        });
    }

    let current = &baseline.current_metrics;
    let projected = &variant.projected_metrics;
    if current.total_employees == projected.total_employees
        && current.management_layers == projected.management_layers
    {
        validation.warnings.push(MINIMAL_CHANGE_WARNING);
    }
    validation
}

/// Label for the plan length, counting four weeks to a month.
pub fn estimate_timeline(variant: &OrganizationalVariant) -> &'static str {
    let weeks: u32 = if variant.implementation_plan.is_empty() {
        DEFAULT_PLAN_WEEKS
    } else {
        variant
            .implementation_plan
            .iter()
            .map(|step| step.duration)
            .sum()
    };
    match weeks.div_ceil(4) {
        0..=3 => "Short-term (1-3 months)",
        4..=6 => "Medium-term (3-6 months)",
        7..=12 => "Long-term (6-12 months)",
        _ => "Extended (12+ months)",
    }
}

pub fn calculate_confidence(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> f64 {
    let mut confidence = 0.8;
    if variant.changes_required.len() > 10 {
        confidence -= 0.1;
    }
    let layers_before = i64::from(baseline.current_metrics.management_layers);
    let layers_after = i64::from(variant.projected_metrics.management_layers);
    if layers_after < layers_before - 2 {
        confidence -= 0.1;
    }
    if variant.implementation_plan.len() > 3 {
        confidence += 0.05;
    }
    f64::clamp(confidence, 0.3, 0.95)
}

fn extract_risk_factors(variant: &OrganizationalVariant) -> RiskSnapshot {
    RiskSnapshot {
        organizational_risks: variant
            .changes_required
            .iter()
            .filter(|change| change.risk_level == RiskRating::High)
            .map(|change| change.description.clone())
            .collect(),
        implementation_risks: variant
            .implementation_plan
            .iter()
            .flat_map(|step| step.risks.iter())
            .filter(|risk| risk.probability > RISK_PROBABILITY_FLOOR)
            .cloned()
            .collect(),
    }
}

fn tracked_changes(record: &ScenarioRecord, request: &UpdateScenarioRequest) -> Value {
    let mut changes = Map::new();
    if let Some(name) = request.name.as_deref() {
        if !name.is_empty() && name != record.name {
            changes.insert("name".into(), json!({ "from": record.name, "to": name }));
        }
    }
    if let Some(description) = request.description.as_deref() {
        if record.description.as_deref() != Some(description) {
            changes.insert(
                "description".into(),
                json!({ "from": record.description, "to": description }),
            );
        }
    }
    Value::Object(changes)
}

#[derive(Debug, thiserror::Error)]
pub enum ScenarioServiceError {
    #[error("validation failed: {}", describe(.0))]
    Validation(Vec<ValidationIssue>),
    #[error("scenario {0} not found")]
    NotFound(ScenarioId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

fn describe(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message)
        .collect::<Vec<_>>()
        .join(", ")
}
