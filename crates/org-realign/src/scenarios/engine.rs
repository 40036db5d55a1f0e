//! Structural diff between a baseline and a proposed organization, with cost and FTE
//! rollups and the rule-driven recommendations that follow from them.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{json, Value};

use super::domain::{OrganizationalBaseline, OrganizationalVariant};
use super::extract::{extract_positions, Position};

const COST_CHANGE_NOTICE_PERCENT: f64 = 10.0;
const COST_RISK_PERCENT: f64 = 20.0;
const WORKFORCE_REDUCTION_NOTICE: f64 = -5.0;
const WORKFORCE_RISK_SHARE: f64 = 0.2;
const MODIFIED_RISK_SHARE: f64 = 0.5;
const ADDED_RISK_SHARE: f64 = 0.3;

/// One field that differs between the two versions of a position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub from: Value,
    pub to: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PositionChange {
    Added { position: Position },
    Removed { position: Position },
    Modified { id: String, fields: Vec<FieldChange> },
}

/// Positions classified by presence and field equality. Every id lands in exactly one list.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructuralDiff {
    pub added: Vec<Position>,
    pub removed: Vec<Position>,
    pub modified: Vec<(Position, Position)>,
    pub unchanged: Vec<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionTotals {
    pub baseline: usize,
    pub variant: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub baseline_cost: f64,
    pub variant_cost: f64,
    pub absolute_change: f64,
    pub percentage_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FteImpact {
    pub baseline_fte: f64,
    pub variant_fte: f64,
    pub fte_change: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub positions_added: usize,
    pub positions_removed: usize,
    pub positions_modified: usize,
    pub total_positions: PositionTotals,
    pub cost_summary: CostSummary,
    pub fte_impact: FteImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioComparison {
    pub changes: Vec<PositionChange>,
    pub delta_cost: f64,
    pub summary: ComparisonSummary,
    pub recommendations: Vec<String>,
    pub risk_factors: Vec<String>,
}

pub fn compare_scenarios(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> ScenarioComparison {
    let before = extract_positions(baseline.organization_chart.as_ref());
    let after = extract_positions(variant.proposed_chart.as_ref());
    compare_positions(&before, &after)
}

/// Diff of two already-extracted position lists.
pub fn compare_positions(baseline: &[Position], variant: &[Position]) -> ScenarioComparison {
    let diff = structural_diff(baseline, variant);

    let baseline_cost = total_cost(baseline);
    let variant_cost = total_cost(variant);
    let delta_cost = variant_cost - baseline_cost;
    let baseline_fte = total_fte(baseline);
    let variant_fte = total_fte(variant);

    let summary = ComparisonSummary {
        positions_added: diff.added.len(),
        positions_removed: diff.removed.len(),
        positions_modified: diff.modified.len(),
        total_positions: PositionTotals {
            baseline: baseline.len(),
            variant: variant.len(),
        },
        cost_summary: CostSummary {
            baseline_cost,
            variant_cost,
            absolute_change: delta_cost,
            percentage_change: if baseline_cost > 0.0 {
                delta_cost / baseline_cost * 100.0
            } else {
                0.0
            },
        },
        fte_impact: FteImpact {
            baseline_fte,
            variant_fte,
            fte_change: variant_fte - baseline_fte,
        },
    };

    let recommendations = recommendations(&summary);
    let risk_factors = risk_factors(&summary);
    tracing::debug!(
        added = summary.positions_added,
        removed = summary.positions_removed,
        modified = summary.positions_modified,
        delta_cost,
        "scenario compared"
    );

    ScenarioComparison {
        changes: changes(&diff),
        delta_cost,
        summary,
        recommendations,
        risk_factors,
    }
}

/// Classifies positions by id. A repeated id is only considered at its first occurrence.
pub fn structural_diff(baseline: &[Position], variant: &[Position]) -> StructuralDiff {
    let base_index = first_by_id(baseline);
    let variant_index = first_by_id(variant);
    let mut diff = StructuralDiff::default();

    let mut seen = HashSet::new();
    for position in variant {
        if seen.insert(position.id.as_str()) && !base_index.contains_key(position.id.as_str()) {
            diff.added.push(position.clone());
        }
    }

    let mut seen = HashSet::new();
    for position in baseline {
        if !seen.insert(position.id.as_str()) {
            continue;
        }
        match variant_index.get(position.id.as_str()) {
            None => diff.removed.push(position.clone()),
            Some(proposed) if is_modified(position, proposed) => {
                diff.modified.push((position.clone(), (*proposed).clone()));
            }
            Some(_) => diff.unchanged.push(position.clone()),
        }
    }

    diff
}

fn first_by_id(positions: &[Position]) -> HashMap<&str, &Position> {
    let mut index = HashMap::with_capacity(positions.len());
    for position in positions {
        index.entry(position.id.as_str()).or_insert(position);
    }
    index
}

fn is_modified(before: &Position, after: &Position) -> bool {
    !field_changes(before, after).is_empty()
}

fn field_changes(before: &Position, after: &Position) -> Vec<FieldChange> {
    let mut fields = Vec::new();
    let mut compare = |field: &'static str, from: Value, to: Value| {
        if from != to {
            fields.push(FieldChange { field, from, to });
        }
    };
    compare("title", json!(before.title), json!(after.title));
    compare("department", json!(before.department), json!(after.department));
    compare("level", json!(before.level), json!(after.level));
    compare("total_cost", json!(before.total_cost), json!(after.total_cost));
    compare("fte", json!(before.fte), json!(after.fte));
    compare("reporting_to", json!(before.reporting_to), json!(after.reporting_to));
    fields
}

fn changes(diff: &StructuralDiff) -> Vec<PositionChange> {
    let added = diff.added.iter().map(|position| PositionChange::Added {
        position: position.clone(),
    });
    let removed = diff.removed.iter().map(|position| PositionChange::Removed {
        position: position.clone(),
    });
    let modified = diff
        .modified
        .iter()
        .map(|(before, after)| PositionChange::Modified {
            id: before.id.clone(),
            fields: field_changes(before, after),
        });
    added.chain(removed).chain(modified).collect()
}

pub(crate) fn total_cost(positions: &[Position]) -> f64 {
    positions.iter().map(|position| position.total_cost).sum()
}

pub(crate) fn total_fte(positions: &[Position]) -> f64 {
    positions.iter().map(|position| position.fte).sum()
}

fn recommendations(summary: &ComparisonSummary) -> Vec<String> {
    let mut out = Vec::new();
    let percent = summary.cost_summary.percentage_change;
    if percent.abs() > COST_CHANGE_NOTICE_PERCENT {
        out.push(if percent > 0.0 {
            "Significant cost increase detected. Consider phased implementation to manage budget impact."
        } else {
            "Substantial cost savings identified. Ensure quality of service is maintained during transition."
        });
    }

    let fte_change = summary.fte_impact.fte_change;
    if fte_change > 0.0 {
        out.push("Increased staffing requirements. Plan for recruitment and onboarding processes.");
    } else if fte_change < WORKFORCE_REDUCTION_NOTICE {
        out.push("Significant workforce reduction. Implement change management and support programs.");
    }

    if summary.positions_added > 5 {
        out.push("Multiple new positions created. Ensure clear role definitions and reporting structures.");
    }
    if summary.positions_removed > 3 {
        out.push("Several positions eliminated. Review workload distribution to prevent overload.");
    }
    if summary.positions_modified > 10 {
        out.push("Extensive role modifications. Provide comprehensive training and communication.");
    }
    out.into_iter().map(str::to_string).collect()
}

fn risk_factors(summary: &ComparisonSummary) -> Vec<String> {
    let mut out = Vec::new();
    let baseline_positions = summary.total_positions.baseline as f64;
    if summary.cost_summary.percentage_change > COST_RISK_PERCENT {
        out.push("High financial risk: Cost increase exceeds 20%");
    }
    if summary.fte_impact.fte_change < -WORKFORCE_RISK_SHARE * summary.fte_impact.baseline_fte {
        out.push("Operational risk: Workforce reduction exceeds 20%");
    }
    if summary.positions_modified as f64 > MODIFIED_RISK_SHARE * baseline_positions {
        out.push("Change management risk: Over 50% of positions modified");
    }
    if summary.positions_added as f64 > ADDED_RISK_SHARE * baseline_positions {
        out.push("Implementation risk: Significant new hiring required");
    }
    out.into_iter().map(str::to_string).collect()
}
