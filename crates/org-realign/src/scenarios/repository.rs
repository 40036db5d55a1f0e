use std::collections::HashMap;
use std::sync::Mutex;

use super::domain::{
    ApprovalRecord, RoiCalculationRecord, ScenarioId, ScenarioRecord, ScenarioVersion,
};

/// Storage abstraction for scenarios and their append-only histories.
pub trait ScenarioRepository: Send + Sync {
    fn insert(&self, record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError>;
    fn update(&self, record: ScenarioRecord) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError>;
    fn delete(&self, id: &ScenarioId) -> Result<(), RepositoryError>;
    fn list_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<ScenarioRecord>, RepositoryError>;

    fn append_version(&self, version: ScenarioVersion) -> Result<(), RepositoryError>;
    /// Versions in the order they were appended.
    fn versions(&self, id: &ScenarioId) -> Result<Vec<ScenarioVersion>, RepositoryError>;
    fn append_approval(&self, approval: ApprovalRecord) -> Result<(), RepositoryError>;
    fn approvals(&self, id: &ScenarioId) -> Result<Vec<ApprovalRecord>, RepositoryError>;
    fn append_roi(&self, calculation: RoiCalculationRecord) -> Result<(), RepositoryError>;
    fn roi_calculations(
        &self,
        id: &ScenarioId,
    ) -> Result<Vec<RoiCalculationRecord>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Default)]
struct Tables {
    scenarios: HashMap<ScenarioId, ScenarioRecord>,
    versions: HashMap<ScenarioId, Vec<ScenarioVersion>>,
    approvals: HashMap<ScenarioId, Vec<ApprovalRecord>>,
    roi: HashMap<ScenarioId, Vec<RoiCalculationRecord>>,
}

/// Process-local store. Last write wins per scenario id.
#[derive(Debug, Default)]
pub struct InMemoryScenarioRepository {
    tables: Mutex<Tables>,
}

impl InMemoryScenarioRepository {
    fn with_tables<T>(&self, f: impl FnOnce(&mut Tables) -> T) -> T {
        let mut guard = self.tables.lock().expect("repository mutex poisoned");
        f(&mut guard)
    }
}

impl ScenarioRepository for InMemoryScenarioRepository {
    fn insert(&self, record: ScenarioRecord) -> Result<ScenarioRecord, RepositoryError> {
        self.with_tables(|tables| {
            if tables.scenarios.contains_key(&record.id) {
                return Err(RepositoryError::Conflict);
            }
            tables.scenarios.insert(record.id.clone(), record.clone());
            Ok(record)
        })
    }

    fn update(&self, record: ScenarioRecord) -> Result<(), RepositoryError> {
        self.with_tables(|tables| match tables.scenarios.get_mut(&record.id) {
            Some(existing) => {
                *existing = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        })
    }

    fn fetch(&self, id: &ScenarioId) -> Result<Option<ScenarioRecord>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.scenarios.get(id).cloned()))
    }

    fn delete(&self, id: &ScenarioId) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            tables.scenarios.remove(id).ok_or(RepositoryError::NotFound)?;
            tables.versions.remove(id);
            tables.approvals.remove(id);
            tables.roi.remove(id);
            Ok(())
        })
    }

    fn list_by_organization(
        &self,
        organization_id: &str,
    ) -> Result<Vec<ScenarioRecord>, RepositoryError> {
        Ok(self.with_tables(|tables| {
            tables
                .scenarios
                .values()
                .filter(|record| record.organization_id == organization_id)
                .cloned()
                .collect()
        }))
    }

    fn append_version(&self, version: ScenarioVersion) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            tables
                .versions
                .entry(version.scenario_id.clone())
                .or_default()
                .push(version);
        });
        Ok(())
    }

    fn versions(&self, id: &ScenarioId) -> Result<Vec<ScenarioVersion>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.versions.get(id).cloned().unwrap_or_default()))
    }

    fn append_approval(&self, approval: ApprovalRecord) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            tables
                .approvals
                .entry(approval.scenario_id.clone())
                .or_default()
                .push(approval);
        });
        Ok(())
    }

    fn approvals(&self, id: &ScenarioId) -> Result<Vec<ApprovalRecord>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.approvals.get(id).cloned().unwrap_or_default()))
    }

    fn append_roi(&self, calculation: RoiCalculationRecord) -> Result<(), RepositoryError> {
        self.with_tables(|tables| {
            tables
                .roi
                .entry(calculation.scenario_id.clone())
                .or_default()
                .push(calculation);
        });
        Ok(())
    }

    fn roi_calculations(
        &self,
        id: &ScenarioId,
    ) -> Result<Vec<RoiCalculationRecord>, RepositoryError> {
        Ok(self.with_tables(|tables| tables.roi.get(id).cloned().unwrap_or_default()))
    }
}
