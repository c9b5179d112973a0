use super::{sort_oldest_first, validate_id, AssessmentStore};
use crate::error::{FitnessError, Result};
use crate::types::assessment::Assessment;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local store. Backs `score --no-save`, so nothing outlives the
/// run.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Assessment>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, Assessment>> {
        // HashMap inserts are not observable half-done
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl AssessmentStore for MemoryStore {
    fn save(&self, assessment: &Assessment) -> Result<()> {
        validate_id(&assessment.id)?;
        self.entries()
            .insert(assessment.id.clone(), assessment.clone());
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Assessment> {
        validate_id(id)?;
        self.entries()
            .get(id)
            .cloned()
            .ok_or_else(|| FitnessError::AssessmentNotFound(id.to_string()))
    }

    fn list(&self) -> Result<Vec<Assessment>> {
        let mut all: Vec<_> = self.entries().values().cloned().collect();
        sort_oldest_first(&mut all);
        Ok(all)
    }
}
