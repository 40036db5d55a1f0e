//! Department and span-of-control breakdowns layered on top of the structural diff.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::domain::{OrganizationalBaseline, OrganizationalVariant};
use super::engine::{compare_positions, total_cost, total_fte, ScenarioComparison};
use super::extract::{extract_positions, Position};

pub const ENGINE_VERSION: &str = "2.3.0";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentAnalysis {
    pub department_name: String,
    pub baseline_positions: Vec<Position>,
    pub variant_positions: Vec<Position>,
    pub cost_change: f64,
    pub fte_change: f64,
    pub structural_changes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpanStats {
    /// Mean subordinate count over positions that manage someone.
    pub average: f64,
    pub max: usize,
    /// Subordinate count to number of positions with that count.
    pub distribution: BTreeMap<usize, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpanOfControlAnalysis {
    pub baseline: SpanStats,
    pub variant: SpanStats,
    pub improvement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineMetadata {
    pub generated_at: DateTime<Utc>,
    pub version: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEngineResult {
    pub comparison: ScenarioComparison,
    pub department_analysis: Vec<DepartmentAnalysis>,
    pub span_of_control_analysis: SpanOfControlAnalysis,
    pub metadata: EngineMetadata,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonOverview {
    pub cost_impact: f64,
    pub fte_impact: f64,
    pub structural_changes: usize,
    pub risk_level: ComparisonRisk,
}

/// Full engine run: diff, department breakdown and span statistics over one extraction.
pub fn run_scenario_engine(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> ScenarioEngineResult {
    let before = extract_positions(baseline.organization_chart.as_ref());
    let after = extract_positions(variant.proposed_chart.as_ref());

    ScenarioEngineResult {
        comparison: compare_positions(&before, &after),
        department_analysis: department_changes(&before, &after),
        span_of_control_analysis: span_of_control(&before, &after),
        metadata: EngineMetadata {
            generated_at: Utc::now(),
            version: ENGINE_VERSION,
        },
    }
}

pub fn analyze_department_changes(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> Vec<DepartmentAnalysis> {
    department_changes(
        &extract_positions(baseline.organization_chart.as_ref()),
        &extract_positions(variant.proposed_chart.as_ref()),
    )
}

pub fn analyze_span_of_control(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
) -> SpanOfControlAnalysis {
    span_of_control(
        &extract_positions(baseline.organization_chart.as_ref()),
        &extract_positions(variant.proposed_chart.as_ref()),
    )
}

/// Condensed view of a comparison: more than three risk factors is high, more than one medium.
pub fn comparison_summary(comparison: &ScenarioComparison) -> ComparisonOverview {
    let risk_level = match comparison.risk_factors.len() {
        count if count > 3 => ComparisonRisk::High,
        count if count > 1 => ComparisonRisk::Medium,
        _ => ComparisonRisk::Low,
    };
    let summary = &comparison.summary;
    ComparisonOverview {
        cost_impact: comparison.delta_cost,
        fte_impact: summary.fte_impact.fte_change,
        structural_changes: summary.positions_added
            + summary.positions_removed
            + summary.positions_modified,
        risk_level,
    }
}

fn department_changes(baseline: &[Position], variant: &[Position]) -> Vec<DepartmentAnalysis> {
    let mut names: Vec<&str> = Vec::new();
    for position in baseline.iter().chain(variant) {
        if !names.contains(&position.department.as_str()) {
            names.push(&position.department);
        }
    }

    let mut analyses: Vec<DepartmentAnalysis> = names
        .into_iter()
        .map(|name| {
            let before = in_department(baseline, name);
            let after = in_department(variant, name);
            DepartmentAnalysis {
                department_name: name.to_string(),
                cost_change: total_cost(&after) - total_cost(&before),
                fte_change: total_fte(&after) - total_fte(&before),
                structural_changes: department_notes(&before, &after),
                baseline_positions: before,
                variant_positions: after,
            }
        })
        .collect();

    analyses.sort_by(|a, b| b.cost_change.abs().total_cmp(&a.cost_change.abs()));
    analyses
}

fn in_department(positions: &[Position], name: &str) -> Vec<Position> {
    positions
        .iter()
        .filter(|position| position.department == name)
        .cloned()
        .collect()
}

fn department_notes(before: &[Position], after: &[Position]) -> Vec<String> {
    let mut notes = Vec::new();
    if after.len() > before.len() {
        notes.push(format!("Added {} positions", after.len() - before.len()));
    } else if after.len() < before.len() {
        notes.push(format!("Removed {} positions", before.len() - after.len()));
    }

    let levels_before: BTreeSet<u32> = before.iter().map(|position| position.level).collect();
    let levels_after: BTreeSet<u32> = after.iter().map(|position| position.level).collect();
    if levels_before.len() != levels_after.len() {
        notes.push(format!(
            "Management levels changed from {} to {}",
            levels_before.len(),
            levels_after.len()
        ));
    }
    notes
}

fn span_of_control(baseline: &[Position], variant: &[Position]) -> SpanOfControlAnalysis {
    let baseline = span_stats(baseline);
    let variant = span_stats(variant);
    SpanOfControlAnalysis {
        improvement: variant.average - baseline.average,
        baseline,
        variant,
    }
}

pub(crate) fn span_stats(positions: &[Position]) -> SpanStats {
    let counts: Vec<usize> = positions
        .iter()
        .map(|position| position.subordinates.len())
        .collect();
    let managers: Vec<usize> = counts.iter().copied().filter(|count| *count > 0).collect();

    let average = if managers.is_empty() {
        0.0
    } else {
        managers.iter().sum::<usize>() as f64 / managers.len() as f64
    };
    let mut distribution = BTreeMap::new();
    for count in &counts {
        *distribution.entry(*count).or_insert(0) += 1;
    }

    SpanStats {
        average,
        max: counts.iter().copied().max().unwrap_or(0),
        distribution,
    }
}
