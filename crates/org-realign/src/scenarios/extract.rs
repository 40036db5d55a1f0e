//! Flattening of organization charts into position lists.

use serde::{Deserialize, Serialize};

use super::domain::{OrgChartNode, OrganizationChart, PositionInput, SalaryBand};

const DEFAULT_TITLE: &str = "Unknown Position";
const DEFAULT_DEPARTMENT: &str = "General";
const BENEFITS_SHARE: f64 = 0.30;
const OVERHEAD_SHARE: f64 = 0.15;
const BAND_FLOOR: f64 = 0.9;
const BAND_CEILING: f64 = 1.1;

/// A fully populated org-chart role. Reporting links are ids, resolved by lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: String,
    pub title: String,
    pub department: String,
    pub level: u32,
    pub total_cost: f64,
    pub benefits: f64,
    pub overhead: f64,
    pub salary_band: SalaryBand,
    pub fte: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reporting_to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subordinates: Vec<String>,
}

/// Flattens `chart` into positions: flat positions first, then department blocks, then
/// the reporting tree depth-first. Absent fields take defaults; present ones are kept.
pub fn extract_positions(chart: Option<&OrganizationChart>) -> Vec<Position> {
    let Some(chart) = chart else {
        return Vec::new();
    };

    let mut inputs: Vec<PositionInput> = chart.positions.clone();
    for department in &chart.departments {
        let name = department.name.as_deref().unwrap_or("Unknown");
        inputs.extend(department.positions.iter().map(|position| PositionInput {
            department: Some(name.to_string()),
            ..position.clone()
        }));
    }
    if let Some(root) = &chart.root {
        flatten_tree(root, None, 1, &mut inputs);
    }

    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| with_defaults(index, input))
        .collect()
}

/// Pushes `node` and its reports depth-first and returns the id the node ends up with, so
/// blank ids resolve to the same `pos_{index}` default in both directions of a link.
fn flatten_tree(
    node: &OrgChartNode,
    parent: Option<&str>,
    depth: u32,
    out: &mut Vec<PositionInput>,
) -> String {
    let has_cost = node.salary.is_some() || node.benefits.is_some() || node.overhead.is_some();
    let total_cost = has_cost.then(|| {
        node.salary.unwrap_or(0.0) + node.benefits.unwrap_or(0.0) + node.overhead.unwrap_or(0.0)
    });
    let non_empty = |value: &str| (!value.trim().is_empty()).then(|| value.to_string());

    let index = out.len();
    let id = non_empty(&node.id).unwrap_or_else(|| format!("pos_{index}"));
    out.push(PositionInput {
        id: Some(id.clone()),
        title: non_empty(&node.title),
        department: non_empty(&node.department),
        level: Some(node.level.unwrap_or(depth)),
        total_cost,
        benefits: node.benefits,
        overhead: node.overhead,
        salary_band: None,
        fte: None,
        reporting_to: parent.map(str::to_string),
        subordinates: None,
    });

    let subordinates = node
        .direct_reports
        .iter()
        .map(|report| flatten_tree(report, Some(&id), depth + 1, out))
        .collect();
    out[index].subordinates = Some(subordinates);
    id
}

fn with_defaults(index: usize, input: PositionInput) -> Position {
    let total_cost = input.total_cost.unwrap_or(0.0);
    Position {
        id: input.id.unwrap_or_else(|| format!("pos_{index}")),
        title: input.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        department: input
            .department
            .unwrap_or_else(|| DEFAULT_DEPARTMENT.to_string()),
        level: input.level.unwrap_or(1),
        total_cost,
        benefits: input.benefits.unwrap_or(total_cost * BENEFITS_SHARE),
        overhead: input.overhead.unwrap_or(total_cost * OVERHEAD_SHARE),
        salary_band: input.salary_band.unwrap_or(SalaryBand {
            min: total_cost * BAND_FLOOR,
            max: total_cost * BAND_CEILING,
            current: total_cost,
        }),
        fte: input.fte.unwrap_or(1.0),
        reporting_to: input.reporting_to,
        subordinates: input.subordinates.unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::domain::DepartmentInput;

    #[test]
    fn absent_fields_take_defaults() {
        let chart = OrganizationChart {
            positions: vec![PositionInput {
                total_cost: Some(100_000.0),
                ..PositionInput::default()
            }],
            ..OrganizationChart::default()
        };
        let positions = extract_positions(Some(&chart));

        let position = &positions[0];
        assert_eq!(position.id, "pos_0");
        assert_eq!(position.title, "Unknown Position");
        assert_eq!(position.department, "General");
        assert_eq!(position.level, 1);
        assert_eq!(position.fte, 1.0);
        assert!((position.benefits - 30_000.0).abs() < 1e-9);
        assert!((position.overhead - 15_000.0).abs() < 1e-9);
        assert!((position.salary_band.max - 110_000.0).abs() < 1e-9);
    }

    #[test]
    fn explicit_zero_fte_is_kept() {
        let chart = OrganizationChart {
            positions: vec![PositionInput {
                id: Some("p1".into()),
                fte: Some(0.0),
                ..PositionInput::default()
            }],
            ..OrganizationChart::default()
        };
        assert_eq!(extract_positions(Some(&chart))[0].fte, 0.0);
    }

    #[test]
    fn department_blocks_name_their_positions() {
        let chart = OrganizationChart {
            departments: vec![DepartmentInput {
                name: Some("Finance".into()),
                positions: vec![PositionInput {
                    id: Some("f1".into()),
                    department: Some("Ignored".into()),
                    ..PositionInput::default()
                }],
            }],
            ..OrganizationChart::default()
        };
        assert_eq!(extract_positions(Some(&chart))[0].department, "Finance");
    }

    #[test]
    fn trees_flatten_depth_first_with_links() {
        let chart = OrganizationChart {
            root: Some(OrgChartNode {
                id: "ceo".into(),
                title: "Chief Executive".into(),
                salary: Some(200_000.0),
                direct_reports: vec![
                    OrgChartNode {
                        id: "cfo".into(),
                        direct_reports: vec![OrgChartNode {
                            id: "analyst".into(),
                            ..OrgChartNode::default()
                        }],
                        ..OrgChartNode::default()
                    },
                    OrgChartNode {
                        id: "coo".into(),
                        ..OrgChartNode::default()
                    },
                ],
                ..OrgChartNode::default()
            }),
            ..OrganizationChart::default()
        };
        let positions = extract_positions(Some(&chart));
        let ids: Vec<&str> = positions.iter().map(|p| p.id.as_str()).collect();

        assert_eq!(ids, ["ceo", "cfo", "analyst", "coo"]);
        assert_eq!(positions[0].subordinates, ["cfo", "coo"]);
        assert_eq!(positions[2].reporting_to.as_deref(), Some("cfo"));
        assert_eq!(positions[2].level, 3);
        assert_eq!(positions[0].total_cost, 200_000.0);
        assert_eq!(positions[1].total_cost, 0.0);
    }

    #[test]
    fn blank_tree_ids_resolve_before_linking() {
        let chart = OrganizationChart {
            root: Some(OrgChartNode {
                id: "dean".into(),
                direct_reports: vec![OrgChartNode {
                    id: " ".into(),
                    direct_reports: vec![OrgChartNode {
                        id: "clerk".into(),
                        ..OrgChartNode::default()
                    }],
                    ..OrgChartNode::default()
                }],
                ..OrgChartNode::default()
            }),
            ..OrganizationChart::default()
        };
        let positions = extract_positions(Some(&chart));

        assert_eq!(positions[1].id, "pos_1");
        assert_eq!(positions[0].subordinates, ["pos_1"]);
        assert_eq!(positions[1].reporting_to.as_deref(), Some("dean"));
        assert_eq!(positions[2].reporting_to.as_deref(), Some("pos_1"));
    }

    #[test]
    fn extraction_is_repeatable() {
        let chart = OrganizationChart {
            positions: vec![PositionInput::default(), PositionInput::default()],
            ..OrganizationChart::default()
        };
        assert_eq!(extract_positions(Some(&chart)), extract_positions(Some(&chart)));
        assert!(extract_positions(None).is_empty());
    }
}
