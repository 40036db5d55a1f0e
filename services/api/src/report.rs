use crate::infra::{print_json, read_json};
use clap::Args;
use org_realign::algorithms::{run_algorithms, AlgorithmPayload, AlgorithmSuite};
use org_realign::assessment::{validate_assessment, AssessmentData, OrganizationMetrics};
use org_realign::error::AppError;
use org_realign::scenarios::{
    run_scenario_engine, OrganizationalBaseline, OrganizationalVariant, PositionImporter,
    ScenarioEngineResult,
};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Assessment JSON file (id, responses, metadata)
    #[arg(long)]
    pub(crate) assessment: PathBuf,
    /// Optional organization metrics JSON file
    #[arg(long)]
    pub(crate) metrics: Option<PathBuf>,
    /// Also run the AIRIX and AIRS modules
    #[arg(long)]
    pub(crate) include_ai: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Assessment JSON file to check
    #[arg(long)]
    pub(crate) assessment: PathBuf,
}

#[derive(Args, Debug)]
pub(crate) struct CompareArgs {
    /// Baseline snapshot JSON file
    #[arg(long)]
    pub(crate) baseline: PathBuf,
    /// Proposed variant JSON file
    #[arg(long)]
    pub(crate) variant: PathBuf,
    /// Print the full engine result as JSON instead of the text report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ImportArgs {
    /// Positions CSV export
    #[arg(long)]
    pub(crate) positions: PathBuf,
    /// Optional org-unit CSV export used to name departments
    #[arg(long)]
    pub(crate) org_units: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RunArgs {
    /// Structure, culture and license payload JSON file
    #[arg(long)]
    pub(crate) payload: PathBuf,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let data: AssessmentData = read_json(&args.assessment)?;
    let metrics: OrganizationMetrics = match args.metrics {
        Some(path) => read_json(&path)?,
        None => OrganizationMetrics::default(),
    };
    let suite = AlgorithmSuite::default().with_ai_modules(args.include_ai);
    print_json(&suite.calculate(&data, &metrics))
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let data: AssessmentData = read_json(&args.assessment)?;
    print_json(&validate_assessment(&data))
}

pub(crate) fn run_compare(args: CompareArgs) -> Result<(), AppError> {
    let baseline: OrganizationalBaseline = read_json(&args.baseline)?;
    let variant: OrganizationalVariant = read_json(&args.variant)?;
    let result = run_scenario_engine(&baseline, &variant);
    if args.json {
        print_json(&result)
    } else {
        print!("{}", render_comparison(&result));
        Ok(())
    }
}

pub(crate) fn run_import(args: ImportArgs) -> Result<(), AppError> {
    let import = PositionImporter::from_paths(args.positions, args.org_units)?;
    for warning in &import.warnings {
        eprintln!("warning: {warning}");
    }
    print_json(&json!({
        "positions": import.positions.len(),
        "org_units": import.org_units.len(),
        "organization_chart": import.to_chart(),
    }))
}

pub(crate) fn run_payload(args: RunArgs) -> Result<(), AppError> {
    let payload: AlgorithmPayload = read_json(&args.payload)?;
    print_json(&run_algorithms(&payload))
}

/// Whole US dollars with thousands separators, e.g. `-$1,250`.
pub(crate) fn format_currency(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${grouped}")
}

pub(crate) fn format_percentage(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}%")
}

fn signed_currency(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", format_currency(amount))
    } else {
        format_currency(amount)
    }
}

pub(crate) fn render_comparison(result: &ScenarioEngineResult) -> String {
    let summary = &result.comparison.summary;
    let cost = &summary.cost_summary;
    let fte = &summary.fte_impact;
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "Scenario comparison (engine {})", result.metadata.version);
    let _ = writeln!(
        out,
        "- Positions: {} -> {} ({} added, {} removed, {} modified)",
        summary.total_positions.baseline,
        summary.total_positions.variant,
        summary.positions_added,
        summary.positions_removed,
        summary.positions_modified
    );
    let _ = writeln!(
        out,
        "- Annual cost: {} -> {} ({}, {})",
        format_currency(cost.baseline_cost),
        format_currency(cost.variant_cost),
        signed_currency(cost.absolute_change),
        format_percentage(cost.percentage_change, 1)
    );
    let _ = writeln!(
        out,
        "- FTE: {:.1} -> {:.1} ({:+.1})",
        fte.baseline_fte, fte.variant_fte, fte.fte_change
    );

    let span = &result.span_of_control_analysis;
    let _ = writeln!(
        out,
        "- Span of control: {:.1} -> {:.1} average direct reports",
        span.baseline.average, span.variant.average
    );

    if !result.department_analysis.is_empty() {
        let _ = writeln!(out, "Departments:");
        for department in &result.department_analysis {
            let _ = writeln!(
                out,
                "  - {}: {} cost, {:+.1} FTE",
                department.department_name,
                signed_currency(department.cost_change),
                department.fte_change
            );
        }
    }

    for (heading, lines) in [
        ("Recommendations:", &result.comparison.recommendations),
        ("Risk factors:", &result.comparison.risk_factors),
    ] {
        if lines.is_empty() {
            continue;
        }
        let _ = writeln!(out, "{heading}");
        for line in lines {
            let _ = writeln!(out, "  - {line}");
        }
    }
    out
}
