//! CSV import of position and org-unit exports into an organization chart.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use super::domain::{OrganizationChart, PositionInput};

const POSITION_ID: &[&str] = &["position_id", "positionid", "id"];
const UNIT_ID: &[&str] = &["unit_id", "unitid", "department_id"];
const TITLE: &[&str] = &["title", "position_title", "job_title"];
const FTE: &[&str] = &["fte", "full_time_equivalent"];
const SALARY: &[&str] = &["salary", "annual_salary"];
const BENEFITS: &[&str] = &["benefits_", "benefits_percent", "benefits_percentage"];
const VACANT: &[&str] = &["vacant", "vacant_yn", "is_vacant"];

const ORG_UNIT_ID: &[&str] = &["unit_id", "unitid", "id"];
const PARENT_ID: &[&str] = &["parent_id", "parentid", "parent_unit_id"];
const UNIT_NAME: &[&str] = &["name", "unit_name", "department_name"];
const UNIT_TYPE: &[&str] = &["type", "unit_type", "department_type"];
const LOCATION: &[&str] = &["location", "office_location"];

#[derive(Debug)]
pub enum PositionImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn(&'static str),
}

impl std::fmt::Display for PositionImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionImportError::Io(err) => write!(f, "failed to read import file: {}", err),
            PositionImportError::Csv(err) => write!(f, "invalid CSV data: {}", err),
            PositionImportError::MissingColumn(column) => {
                write!(f, "required column \"{}\" not found", column)
            }
        }
    }
}

impl std::error::Error for PositionImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PositionImportError::Io(err) => Some(err),
            PositionImportError::Csv(err) => Some(err),
            PositionImportError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for PositionImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for PositionImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

/// One row of a positions export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportedPosition {
    pub position_id: String,
    pub unit_id: Option<String>,
    pub title: Option<String>,
    pub fte: Option<f64>,
    pub salary: Option<f64>,
    /// Either a fraction (0.3) or a percentage (30).
    pub benefits_percent: Option<f64>,
    pub vacant: bool,
}

impl ImportedPosition {
    pub fn benefits_fraction(&self) -> f64 {
        match self.benefits_percent {
            Some(value) if value > 1.0 => value / 100.0,
            Some(value) => value,
            None => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrgUnit {
    pub unit_id: String,
    pub parent_id: Option<String>,
    pub name: String,
    pub unit_type: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PositionImport {
    pub positions: Vec<ImportedPosition>,
    pub org_units: Vec<OrgUnit>,
    pub warnings: Vec<String>,
}

impl PositionImport {
    /// Flat-position chart. Departments come from the matching org unit's name, falling
    /// back to the raw unit id.
    pub fn to_chart(&self) -> OrganizationChart {
        let names: HashMap<&str, &str> = self
            .org_units
            .iter()
            .map(|unit| (unit.unit_id.as_str(), unit.name.as_str()))
            .collect();

        let positions = self
            .positions
            .iter()
            .map(|position| {
                let department = position.unit_id.as_deref().map(|unit| {
                    names.get(unit).copied().unwrap_or(unit).to_string()
                });
                let salary = position.salary.unwrap_or(0.0);
                let benefits = salary * position.benefits_fraction();
                PositionInput {
                    id: Some(position.position_id.clone()),
                    title: position.title.clone(),
                    department,
                    total_cost: position.salary.map(|_| salary + benefits),
                    benefits: position.salary.map(|_| benefits),
                    fte: position.fte,
                    ..PositionInput::default()
                }
            })
            .collect();

        OrganizationChart {
            positions,
            ..OrganizationChart::default()
        }
    }
}

pub struct PositionImporter;

impl PositionImporter {
    pub fn from_paths<P: AsRef<Path>>(
        positions: P,
        org_units: Option<P>,
    ) -> Result<PositionImport, PositionImportError> {
        let mut import = Self::positions_from_reader(std::fs::File::open(positions)?)?;
        if let Some(path) = org_units {
            let units = Self::org_units_from_reader(std::fs::File::open(path)?)?;
            import.org_units = units.org_units;
            import.warnings.extend(units.warnings);
        }
        Ok(import)
    }

    pub fn positions_from_reader<R: Read>(reader: R) -> Result<PositionImport, PositionImportError> {
        let mut csv_reader = reader_for(reader);
        let columns = Columns::new(csv_reader.headers()?);
        let id_column = columns
            .find(POSITION_ID)
            .ok_or(PositionImportError::MissingColumn("position_id"))?;

        let mut import = PositionImport::default();
        let mut skipped = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            let Some(position_id) = cell(&record, Some(id_column)) else {
                skipped += 1;
                continue;
            };
            import.positions.push(ImportedPosition {
                position_id,
                unit_id: cell(&record, columns.find(UNIT_ID)),
                title: cell(&record, columns.find(TITLE)),
                fte: cell(&record, columns.find(FTE)).map(|raw| number(&raw)),
                salary: cell(&record, columns.find(SALARY)).map(|raw| number(&raw)),
                benefits_percent: cell(&record, columns.find(BENEFITS)).map(|raw| number(&raw)),
                vacant: cell(&record, columns.find(VACANT)).is_some_and(|raw| flag(&raw)),
            });
        }

        if skipped > 0 {
            let warning = format!("Skipped {skipped} position rows without an id");
            tracing::warn!("{warning}");
            import.warnings.push(warning);
        }
        tracing::info!(positions = import.positions.len(), "positions imported");
        Ok(import)
    }

    pub fn org_units_from_reader<R: Read>(reader: R) -> Result<PositionImport, PositionImportError> {
        let mut csv_reader = reader_for(reader);
        let columns = Columns::new(csv_reader.headers()?);
        let id_column = columns
            .find(ORG_UNIT_ID)
            .ok_or(PositionImportError::MissingColumn("unit_id"))?;
        let name_column = columns
            .find(UNIT_NAME)
            .ok_or(PositionImportError::MissingColumn("name"))?;

        let mut import = PositionImport::default();
        let mut skipped = 0usize;
        for record in csv_reader.records() {
            let record = record?;
            let (Some(unit_id), Some(name)) = (
                cell(&record, Some(id_column)),
                cell(&record, Some(name_column)),
            ) else {
                skipped += 1;
                continue;
            };
            import.org_units.push(OrgUnit {
                unit_id,
                name,
                parent_id: cell(&record, columns.find(PARENT_ID)),
                unit_type: cell(&record, columns.find(UNIT_TYPE)),
                location: cell(&record, columns.find(LOCATION)),
            });
        }

        if skipped > 0 {
            let warning = format!("Skipped {skipped} org unit rows without an id or name");
            tracing::warn!("{warning}");
            import.warnings.push(warning);
        }
        Ok(import)
    }
}

fn reader_for<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader)
}

/// Header lookup over names lowercased with every other character turned into `_`.
struct Columns(Vec<String>);

impl Columns {
    fn new(headers: &csv::StringRecord) -> Self {
        Self(headers.iter().map(normalize_header).collect())
    }

    fn find(&self, aliases: &[&str]) -> Option<usize> {
        aliases
            .iter()
            .find_map(|alias| self.0.iter().position(|header| header == alias))
    }
}

fn normalize_header(header: &str) -> String {
    header
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

fn cell(record: &csv::StringRecord, column: Option<usize>) -> Option<String> {
    column
        .and_then(|index| record.get(index))
        .map(|value| value.trim_matches('"').trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Unparseable numbers count as zero.
fn number(raw: &str) -> f64 {
    raw.replace([',', '$', '%'], "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

fn flag(raw: &str) -> bool {
    matches!(
        raw.to_ascii_lowercase().as_str(),
        "y" | "yes" | "true" | "1"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: &str = "\
Position ID,Unit ID,Job Title,FTE,Annual Salary,Benefits Percent,Vacant_YN
P-1,U-1,Director,1,120000,30,N
P-2,U-2,Analyst,0.5,60000,0.25,yes
,U-1,Orphan,1,1000,0,N
";

    const UNITS: &str = "\
unit_id,parent_id,name,type,location
U-1,,Finance,department,HQ
U-2,U-1,,team,Remote
";

    #[test]
    fn positions_map_aliased_headers() {
        let import = PositionImporter::positions_from_reader(POSITIONS.as_bytes()).unwrap();

        assert_eq!(import.positions.len(), 2);
        let director = &import.positions[0];
        assert_eq!(director.position_id, "P-1");
        assert_eq!(director.unit_id.as_deref(), Some("U-1"));
        assert_eq!(director.title.as_deref(), Some("Director"));
        assert_eq!(director.salary, Some(120_000.0));
        assert!(!director.vacant);
        assert!(import.positions[1].vacant);
        assert_eq!(import.warnings, ["Skipped 1 position rows without an id"]);
    }

    #[test]
    fn benefits_accept_fractions_and_percentages() {
        let import = PositionImporter::positions_from_reader(POSITIONS.as_bytes()).unwrap();
        assert!((import.positions[0].benefits_fraction() - 0.30).abs() < 1e-12);
        assert!((import.positions[1].benefits_fraction() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn missing_id_column_is_an_error() {
        let result = PositionImporter::positions_from_reader("title,fte\nAnalyst,1\n".as_bytes());
        match result {
            Err(PositionImportError::MissingColumn("position_id")) => {}
            other => panic!("expected missing column error, got {other:?}"),
        }
    }

    #[test]
    fn chart_takes_department_names_from_units() {
        let mut import = PositionImporter::positions_from_reader(POSITIONS.as_bytes()).unwrap();
        let units = PositionImporter::org_units_from_reader(UNITS.as_bytes()).unwrap();
        assert_eq!(units.org_units.len(), 1);
        import.org_units = units.org_units;

        let chart = import.to_chart();
        assert_eq!(chart.positions[0].department.as_deref(), Some("Finance"));
        assert!((chart.positions[0].total_cost.unwrap() - 156_000.0).abs() < 1e-6);
        assert_eq!(chart.positions[1].department.as_deref(), Some("U-2"));
        assert_eq!(chart.positions[1].fte, Some(0.5));
    }
}
