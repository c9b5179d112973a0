//! Persistence for scored assessments.

pub mod file;
pub mod memory;

use crate::error::{FitnessError, Result};
use crate::types::assessment::Assessment;

pub use file::FileStore;
pub use memory::MemoryStore;

pub trait AssessmentStore: Send + Sync {
    /// Inserts or overwrites the assessment under its id.
    fn save(&self, assessment: &Assessment) -> Result<()>;

    fn get(&self, id: &str) -> Result<Assessment>;

    /// Every stored assessment, oldest first.
    fn list(&self) -> Result<Vec<Assessment>>;
}

/// Submission ids are UUIDs; anything else is rejected before it can reach
/// a lookup or a file name.
pub fn validate_id(id: &str) -> Result<()> {
    uuid::Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| FitnessError::InvalidSubmissionId(id.to_string()))
}

fn sort_oldest_first(assessments: &mut [Assessment]) {
    assessments.sort_by(|a, b| {
        a.submitted_at
            .cmp(&b.submitted_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}

#[cfg(test)]
pub(crate) fn sample_assessment() -> Assessment {
    use crate::engine::{fixtures, score_with_table};
    use crate::knowledge::{builtin_table, digest};

    let table = builtin_table();
    let answers = fixtures::quick_win();
    let scores = score_with_table(&answers, &table);
    Assessment::new(
        answers,
        scores,
        digest(&table).expect("digest"),
        table.version.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_must_be_uuids() {
        assert!(validate_id("6f1c5f5e-8a53-4c1e-9d0b-3f1a2b3c4d5e").is_ok());
        assert!(matches!(
            validate_id("../../etc/passwd"),
            Err(FitnessError::InvalidSubmissionId(_))
        ));
        assert!(validate_id("").is_err());
    }
}
