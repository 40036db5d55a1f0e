//! Return-on-investment modelling for restructuring scenarios: core financial metrics,
//! best/worst case sensitivity, and a seedable Monte Carlo simulation.

use std::collections::BTreeMap;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use super::domain::{CostStructure, OrganizationalBaseline, OrganizationalVariant};
use crate::config::ScenarioConfig;

const SPAN_GAIN_PER_POINT: f64 = 10_000.0;
const MANAGEMENT_GAIN_PER_EMPLOYEE: f64 = 5_000.0;
const IRR_INITIAL_GUESS: f64 = 0.1;
const IRR_MAX_ITERATIONS: usize = 100;
const IRR_TOLERANCE: f64 = 1e-4;
const LONG_PAYBACK_MONTHS: f64 = 36.0;
const MONTE_CARLO_CONFIDENCE: f64 = 0.95;

const SAVINGS_REALIZATION: &str = "Savings Realization Rate";
const IMPLEMENTATION_SUCCESS: &str = "Implementation Success Rate";
const DISCOUNT_RATE: &str = "Discount Rate";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoiAssumptions {
    pub discount_rate: f64,
    pub inflation_rate: f64,
    /// Years.
    pub time_horizon: u32,
    pub risk_premium: f64,
    pub implementation_success: f64,
    pub savings_realization: f64,
    #[serde(default)]
    pub custom_assumptions: BTreeMap<String, serde_json::Value>,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            discount_rate: 0.08,
            inflation_rate: 0.03,
            time_horizon: 5,
            risk_premium: 0.02,
            implementation_success: 0.85,
            savings_realization: 0.90,
            custom_assumptions: BTreeMap::new(),
        }
    }
}

/// Caller-supplied subset of [`RoiAssumptions`]; absent fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AssumptionOverrides {
    #[serde(default)]
    pub discount_rate: Option<f64>,
    #[serde(default)]
    pub inflation_rate: Option<f64>,
    #[serde(default)]
    pub time_horizon: Option<u32>,
    #[serde(default)]
    pub risk_premium: Option<f64>,
    #[serde(default)]
    pub implementation_success: Option<f64>,
    #[serde(default)]
    pub savings_realization: Option<f64>,
    #[serde(default)]
    pub custom_assumptions: Option<BTreeMap<String, serde_json::Value>>,
}

impl AssumptionOverrides {
    pub fn apply(&self, base: RoiAssumptions) -> RoiAssumptions {
        RoiAssumptions {
            discount_rate: self.discount_rate.unwrap_or(base.discount_rate),
            inflation_rate: self.inflation_rate.unwrap_or(base.inflation_rate),
            time_horizon: self.time_horizon.unwrap_or(base.time_horizon),
            risk_premium: self.risk_premium.unwrap_or(base.risk_premium),
            implementation_success: self
                .implementation_success
                .unwrap_or(base.implementation_success),
            savings_realization: self.savings_realization.unwrap_or(base.savings_realization),
            custom_assumptions: self
                .custom_assumptions
                .clone()
                .unwrap_or(base.custom_assumptions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculationType {
    Simple,
    Detailed,
    Sensitivity,
    MonteCarlo,
}

impl CalculationType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Detailed => "DETAILED",
            Self::Sensitivity => "SENSITIVITY",
            Self::MonteCarlo => "MONTE_CARLO",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FinancialMetrics {
    pub initial_investment: f64,
    pub implementation_cost: f64,
    pub annual_savings: f64,
    pub operational_cost_change: f64,
    pub roi_percentage: f64,
    /// Months; absent when the net annual benefit is not positive.
    pub payback_period: Option<f64>,
    pub npv: f64,
    pub irr: Option<f64>,
    pub break_even_point: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityVariable {
    pub name: &'static str,
    pub base_value: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub impact: Impact,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityCase {
    pub name: &'static str,
    pub variables: BTreeMap<&'static str, f64>,
    pub probability: f64,
}

/// Change of each headline metric relative to the base assumptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityResult {
    pub scenario: &'static str,
    pub roi_change: f64,
    pub npv_change: f64,
    pub payback_period_change: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityAnalysis {
    pub variables: Vec<SensitivityVariable>,
    pub scenarios: Vec<SensitivityCase>,
    pub results: Vec<SensitivityResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentiles {
    pub p5: f64,
    pub p25: f64,
    pub p75: f64,
    pub p95: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distribution {
    pub mean: f64,
    pub median: f64,
    pub standard_deviation: f64,
    pub percentiles: Percentiles,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonteCarloResults {
    pub iterations: usize,
    pub roi_distribution: Distribution,
    pub npv_distribution: Distribution,
    /// Share of runs with a positive ROI.
    pub success_probability: f64,
    pub confidence: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendationKind {
    Proceed,
    Modify,
    Reject,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiRecommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub priority: Impact,
    pub rationale: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alternative_approaches: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub risk_mitigation: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoiAnalysis {
    pub calculation_type: CalculationType,
    pub financial_metrics: FinancialMetrics,
    pub assumptions: RoiAssumptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sensitivity_analysis: Option<SensitivityAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monte_carlo_results: Option<MonteCarloResults>,
    pub recommendations: Vec<RoiRecommendation>,
}

/// ROI calculator. The seed makes Monte Carlo runs reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiEngine {
    pub monte_carlo_iterations: usize,
    pub seed: Option<u64>,
}

impl Default for RoiEngine {
    fn default() -> Self {
        Self::from_config(&ScenarioConfig::default())
    }
}

impl RoiEngine {
    pub fn from_config(config: &ScenarioConfig) -> Self {
        Self {
            monte_carlo_iterations: config.monte_carlo_iterations,
            seed: config.monte_carlo_seed,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn calculate(
        &self,
        baseline: &OrganizationalBaseline,
        variant: &OrganizationalVariant,
        calculation_type: CalculationType,
        overrides: &AssumptionOverrides,
    ) -> RoiAnalysis {
        let assumptions = overrides.apply(RoiAssumptions::default());
        let metrics = financial_metrics(baseline, variant, &assumptions);

        let sensitivity_analysis = matches!(
            calculation_type,
            CalculationType::Detailed | CalculationType::Sensitivity
        )
        .then(|| sensitivity_analysis(baseline, variant, &assumptions, &metrics));
        let monte_carlo_results = (calculation_type == CalculationType::MonteCarlo)
            .then(|| self.monte_carlo(baseline, variant, &assumptions));

        tracing::debug!(
            calculation = calculation_type.label(),
            roi = metrics.roi_percentage,
            npv = metrics.npv,
            "roi calculated"
        );

        RoiAnalysis {
            calculation_type,
            recommendations: recommendations(&metrics),
            financial_metrics: metrics,
            assumptions,
            sensitivity_analysis,
            monte_carlo_results,
        }
    }

    fn monte_carlo(
        &self,
        baseline: &OrganizationalBaseline,
        variant: &OrganizationalVariant,
        assumptions: &RoiAssumptions,
    ) -> MonteCarloResults {
        let mut rng = match self.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let iterations = self.monte_carlo_iterations.max(1);
        let mut roi = Vec::with_capacity(iterations);
        let mut npv = Vec::with_capacity(iterations);

        for _ in 0..iterations {
            let sampled = RoiAssumptions {
                savings_realization: normal(&mut rng, assumptions.savings_realization, 0.1),
                implementation_success: normal(&mut rng, assumptions.implementation_success, 0.05),
                discount_rate: normal(&mut rng, assumptions.discount_rate, 0.01),
                ..assumptions.clone()
            };
            let metrics = financial_metrics(baseline, variant, &sampled);
            roi.push(metrics.roi_percentage);
            npv.push(metrics.npv);
        }

        let positive = roi.iter().filter(|value| **value > 0.0).count();
        MonteCarloResults {
            iterations,
            roi_distribution: distribution(roi),
            npv_distribution: distribution(npv),
            success_probability: positive as f64 / iterations as f64,
            confidence: MONTE_CARLO_CONFIDENCE,
        }
    }
}

pub fn financial_metrics(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
    assumptions: &RoiAssumptions,
) -> FinancialMetrics {
    let implementation_cost = implementation_cost(variant);
    let initial_investment = implementation_cost;
    let annual_savings = annual_savings(baseline, variant, assumptions);
    let baseline_costs = baseline.cost_structure.clone().unwrap_or_default();
    let operational_cost_change = operational_cost_change(&baseline_costs, variant);
    let net_benefit = annual_savings - operational_cost_change;
    let horizon = assumptions.time_horizon;

    let payback_period = (net_benefit > 0.0).then(|| initial_investment / net_benefit * 12.0);
    let roi_percentage = if initial_investment > 0.0 {
        (net_benefit * f64::from(horizon) - initial_investment) / initial_investment * 100.0
    } else {
        0.0
    };

    FinancialMetrics {
        initial_investment,
        implementation_cost,
        annual_savings,
        operational_cost_change,
        roi_percentage,
        payback_period,
        npv: npv(initial_investment, net_benefit, assumptions.discount_rate, horizon),
        irr: irr(initial_investment, net_benefit, horizon),
        break_even_point: payback_period,
    }
}

fn implementation_cost(variant: &OrganizationalVariant) -> f64 {
    let steps: f64 = variant.implementation_plan.iter().map(|step| step.cost).sum();
    let changes: f64 = variant
        .changes_required
        .iter()
        .map(|change| change.cost_impact.abs())
        .sum();
    steps + changes
}

fn annual_savings(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
    assumptions: &RoiAssumptions,
) -> f64 {
    let compensation = |chart: Option<&super::domain::OrganizationChart>| {
        chart.map_or(0.0, |chart| chart.tree_compensation())
    };
    let salary_savings = compensation(baseline.organization_chart.as_ref())
        - compensation(variant.proposed_chart.as_ref());
    let overhead_savings = baseline
        .cost_structure
        .as_ref()
        .map_or(0.0, |costs| costs.total_annual_cost)
        - variant.proposed_cost_structure.total_annual_cost;

    let current = &baseline.current_metrics;
    let projected = &variant.projected_metrics;
    let span_gain =
        (projected.average_span_of_control - current.average_span_of_control) * SPAN_GAIN_PER_POINT;
    let management_gain = (current.management_ratio - projected.management_ratio)
        * f64::from(current.total_employees)
        * MANAGEMENT_GAIN_PER_EMPLOYEE;
    let efficiency_gains = (span_gain + management_gain).max(0.0);

    ((salary_savings + overhead_savings + efficiency_gains) * assumptions.savings_realization)
        .max(0.0)
}

fn operational_cost_change(baseline: &CostStructure, variant: &OrganizationalVariant) -> f64 {
    variant.proposed_cost_structure.cost_breakdown.other - baseline.cost_breakdown.other
}

/// Net present value of a level annual cash flow over `years`.
pub fn npv(investment: f64, annual_cash_flow: f64, discount_rate: f64, years: u32) -> f64 {
    (1..=years).fold(-investment, |total, year| {
        total + annual_cash_flow / (1.0 + discount_rate).powi(year as i32)
    })
}

/// Internal rate of return by Newton iteration; `None` when it fails to converge.
pub fn irr(investment: f64, annual_cash_flow: f64, years: u32) -> Option<f64> {
    let mut rate = IRR_INITIAL_GUESS;
    for _ in 0..IRR_MAX_ITERATIONS {
        let mut value = -investment;
        let mut derivative = 0.0;
        for year in 1..=years {
            let factor = (1.0 + rate).powi(year as i32);
            value += annual_cash_flow / factor;
            derivative -= f64::from(year) * annual_cash_flow / (factor * (1.0 + rate));
        }
        if derivative == 0.0 {
            return None;
        }

        let next = rate - value / derivative;
        if !next.is_finite() {
            return None;
        }
        if (next - rate).abs() < IRR_TOLERANCE {
            return Some(next);
        }
        rate = next;
    }
    None
}

fn sensitivity_analysis(
    baseline: &OrganizationalBaseline,
    variant: &OrganizationalVariant,
    assumptions: &RoiAssumptions,
    base: &FinancialMetrics,
) -> SensitivityAnalysis {
    let variables = vec![
        SensitivityVariable {
            name: SAVINGS_REALIZATION,
            base_value: assumptions.savings_realization,
            min_value: 0.6,
            max_value: 1.0,
            impact: Impact::High,
        },
        SensitivityVariable {
            name: IMPLEMENTATION_SUCCESS,
            base_value: assumptions.implementation_success,
            min_value: 0.7,
            max_value: 0.95,
            impact: Impact::High,
        },
        SensitivityVariable {
            name: DISCOUNT_RATE,
            base_value: assumptions.discount_rate,
            min_value: 0.05,
            max_value: 0.12,
            impact: Impact::Medium,
        },
    ];

    let scenarios = vec![
        sensitivity_case("Best Case", 0.1, &variables, Outlook::Best),
        sensitivity_case("Most Likely", 0.7, &variables, Outlook::Base),
        sensitivity_case("Worst Case", 0.2, &variables, Outlook::Worst),
    ];

    let results = scenarios
        .iter()
        .map(|scenario| {
            let value = |name: &str, fallback: f64| {
                scenario.variables.get(name).copied().unwrap_or(fallback)
            };
            let varied = RoiAssumptions {
                savings_realization: value(SAVINGS_REALIZATION, assumptions.savings_realization),
                implementation_success: value(
                    IMPLEMENTATION_SUCCESS,
                    assumptions.implementation_success,
                ),
                discount_rate: value(DISCOUNT_RATE, assumptions.discount_rate),
                ..assumptions.clone()
            };
            let metrics = financial_metrics(baseline, variant, &varied);
            SensitivityResult {
                scenario: scenario.name,
                roi_change: metrics.roi_percentage - base.roi_percentage,
                npv_change: metrics.npv - base.npv,
                payback_period_change: metrics
                    .payback_period
                    .zip(base.payback_period)
                    .map(|(varied, base)| varied - base),
            }
        })
        .collect();

    SensitivityAnalysis {
        variables,
        scenarios,
        results,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outlook {
    Best,
    Base,
    Worst,
}

/// Pins every variable to its favourable, base or unfavourable value. A lower discount
/// rate is the favourable end.
fn sensitivity_case(
    name: &'static str,
    probability: f64,
    variables: &[SensitivityVariable],
    outlook: Outlook,
) -> SensitivityCase {
    let pick = |variable: &SensitivityVariable| {
        let (favourable, unfavourable) = if variable.name == DISCOUNT_RATE {
            (variable.min_value, variable.max_value)
        } else {
            (variable.max_value, variable.min_value)
        };
        match outlook {
            Outlook::Best => favourable,
            Outlook::Base => variable.base_value,
            Outlook::Worst => unfavourable,
        }
    };
    SensitivityCase {
        name,
        probability,
        variables: variables
            .iter()
            .map(|variable| (variable.name, pick(variable)))
            .collect(),
    }
}

fn recommendations(metrics: &FinancialMetrics) -> Vec<RoiRecommendation> {
    let roi = metrics.roi_percentage;
    let mut out = vec![if roi > 20.0 {
        RoiRecommendation {
            kind: RecommendationKind::Proceed,
            priority: Impact::High,
            rationale: format!("Excellent ROI of {roi:.1}% exceeds target threshold"),
            conditions: vec![
                "Ensure implementation plan is realistic",
                "Monitor progress closely",
            ],
            alternative_approaches: Vec::new(),
            risk_mitigation: Vec::new(),
        }
    } else if roi > 10.0 {
        RoiRecommendation {
            kind: RecommendationKind::Proceed,
            priority: Impact::Medium,
            rationale: format!("Good ROI of {roi:.1}% justifies investment"),
            conditions: vec!["Review implementation risks", "Consider phased approach"],
            alternative_approaches: Vec::new(),
            risk_mitigation: Vec::new(),
        }
    } else if roi > 0.0 {
        RoiRecommendation {
            kind: RecommendationKind::Modify,
            priority: Impact::Medium,
            rationale: format!("Marginal ROI of {roi:.1}% suggests optimization needed"),
            conditions: Vec::new(),
            alternative_approaches: vec![
                "Reduce implementation costs",
                "Increase efficiency targets",
            ],
            risk_mitigation: Vec::new(),
        }
    } else {
        RoiRecommendation {
            kind: RecommendationKind::Reject,
            priority: Impact::High,
            rationale: format!("Negative ROI of {roi:.1}% does not justify investment"),
            conditions: Vec::new(),
            alternative_approaches: vec![
                "Redesign scenario",
                "Consider alternative approaches",
            ],
            risk_mitigation: Vec::new(),
        }
    }];

    if let Some(months) = metrics.payback_period.filter(|months| *months > LONG_PAYBACK_MONTHS) {
        out.push(RoiRecommendation {
            kind: RecommendationKind::Modify,
            priority: Impact::Medium,
            rationale: format!("Long payback period of {months:.1} months"),
            conditions: Vec::new(),
            alternative_approaches: Vec::new(),
            risk_mitigation: vec![
                "Accelerate benefit realization",
                "Reduce upfront costs",
            ],
        });
    }
    out
}

/// Box-Muller sample. `1 - u` keeps the logarithm's argument in (0, 1].
fn normal(rng: &mut SmallRng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen();
    let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z
}

fn distribution(mut values: Vec<f64>) -> Distribution {
    values.sort_by(f64::total_cmp);
    let count = values.len();
    let at = |share: f64| {
        let index = ((count as f64 * share).floor() as usize).min(count.saturating_sub(1));
        values.get(index).copied().unwrap_or(0.0)
    };
    let mean = crate::assessment::mean(&values);
    let variance = if count == 0 {
        0.0
    } else {
        values.iter().map(|value| (value - mean).powi(2)).sum::<f64>() / count as f64
    };

    Distribution {
        mean,
        median: at(0.5),
        standard_deviation: variance.sqrt(),
        percentiles: Percentiles {
            p5: at(0.05),
            p25: at(0.25),
            p75: at(0.75),
            p95: at(0.95),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::domain::{CostBreakdown, ImplementationStep};

    fn scenario(savings: f64, investment: f64) -> (OrganizationalBaseline, OrganizationalVariant) {
        let baseline = OrganizationalBaseline {
            cost_structure: Some(CostStructure {
                total_annual_cost: 1_000_000.0,
                cost_breakdown: CostBreakdown::default(),
            }),
            ..OrganizationalBaseline::default()
        };
        let mut variant = OrganizationalVariant::default();
        variant.proposed_cost_structure.total_annual_cost = 1_000_000.0 - savings;
        variant.implementation_plan = vec![ImplementationStep {
            id: "step-1".into(),
            cost: investment,
            duration: 8,
            ..ImplementationStep::default()
        }];
        (baseline, variant)
    }

    #[test]
    fn overrides_merge_onto_defaults() {
        let overrides = AssumptionOverrides {
            discount_rate: Some(0.1),
            ..AssumptionOverrides::default()
        };
        let merged = overrides.apply(RoiAssumptions::default());
        assert_eq!(merged.discount_rate, 0.1);
        assert_eq!(merged.time_horizon, 5);
        assert_eq!(merged.savings_realization, 0.9);
    }

    #[test]
    fn simple_metrics_follow_the_cash_flow_formulas() {
        let (baseline, variant) = scenario(200_000.0, 300_000.0);
        let analysis = RoiEngine::default().calculate(
            &baseline,
            &variant,
            CalculationType::Simple,
            &AssumptionOverrides::default(),
        );
        let metrics = analysis.financial_metrics;

        assert!((metrics.annual_savings - 180_000.0).abs() < 1e-6);
        assert!((metrics.payback_period.unwrap() - 20.0).abs() < 1e-9);
        assert!((metrics.roi_percentage - 200.0).abs() < 1e-9);
        assert_eq!(metrics.break_even_point, metrics.payback_period);
        assert!(metrics.irr.unwrap() > 0.5);
        assert!(analysis.sensitivity_analysis.is_none());
        assert_eq!(analysis.recommendations[0].kind, RecommendationKind::Proceed);
    }

    #[test]
    fn no_savings_means_no_payback_and_rejection() {
        let (baseline, variant) = scenario(0.0, 50_000.0);
        let metrics = financial_metrics(&baseline, &variant, &RoiAssumptions::default());
        assert_eq!(metrics.payback_period, None);
        assert_eq!(metrics.roi_percentage, -100.0);
        assert_eq!(recommendations(&metrics)[0].kind, RecommendationKind::Reject);
    }

    #[test]
    fn zero_investment_reports_zero_roi() {
        let (baseline, variant) = scenario(100_000.0, 0.0);
        let metrics = financial_metrics(&baseline, &variant, &RoiAssumptions::default());
        assert_eq!(metrics.roi_percentage, 0.0);
        assert_eq!(metrics.payback_period, Some(0.0));
    }

    #[test]
    fn long_payback_adds_a_modify_recommendation() {
        let (baseline, variant) = scenario(100_000.0, 400_000.0);
        let metrics = financial_metrics(&baseline, &variant, &RoiAssumptions::default());
        let recs = recommendations(&metrics);
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[1].kind, RecommendationKind::Modify);
        assert!(recs[1].rationale.starts_with("Long payback period"));
    }

    #[test]
    fn sensitivity_orders_best_above_worst() {
        let (baseline, variant) = scenario(200_000.0, 300_000.0);
        let analysis = RoiEngine::default().calculate(
            &baseline,
            &variant,
            CalculationType::Detailed,
            &AssumptionOverrides::default(),
        );
        let sensitivity = analysis.sensitivity_analysis.unwrap();
        assert_eq!(sensitivity.results.len(), 3);
        assert!(sensitivity.results[0].roi_change > 0.0);
        assert!(sensitivity.results[1].roi_change.abs() < 1e-9);
        assert!(sensitivity.results[2].npv_change < 0.0);
    }

    #[test]
    fn seeded_monte_carlo_is_reproducible() {
        let (baseline, variant) = scenario(200_000.0, 300_000.0);
        let engine = RoiEngine {
            monte_carlo_iterations: 500,
            seed: None,
        }
        .with_seed(7);
        let run = || {
            engine
                .calculate(
                    &baseline,
                    &variant,
                    CalculationType::MonteCarlo,
                    &AssumptionOverrides::default(),
                )
                .monte_carlo_results
                .unwrap()
        };
        let first = run();
        assert_eq!(first, run());
        assert_eq!(first.iterations, 500);
        assert!(first.success_probability > 0.9);
        let roi = first.roi_distribution.percentiles;
        assert!(roi.p5 <= roi.p25 && roi.p25 <= roi.p75 && roi.p75 <= roi.p95);
    }

    #[test]
    fn npv_discounts_each_year() {
        let value = npv(100.0, 110.0, 0.1, 1);
        assert!(value.abs() < 1e-9);
        assert!((irr(100.0, 110.0, 1).unwrap() - 0.1).abs() < 1e-6);
    }
}
