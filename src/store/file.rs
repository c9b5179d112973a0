use super::{sort_oldest_first, validate_id, AssessmentStore};
use crate::error::{FitnessError, Result};
use crate::types::assessment::Assessment;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};
use walkdir::WalkDir;

/// One pretty-printed JSON document per assessment at `<dir>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }
}

impl AssessmentStore for FileStore {
    fn save(&self, assessment: &Assessment) -> Result<()> {
        validate_id(&assessment.id)?;
        fs::create_dir_all(&self.dir)?;

        let path = self.path_for(&assessment.id);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_string_pretty(assessment)?)?;
        fs::rename(&staging, &path)?;

        info!(id = %assessment.id, path = %path.display(), "assessment saved");
        Ok(())
    }

    fn get(&self, id: &str) -> Result<Assessment> {
        validate_id(id)?;
        let path = self.path_for(id);
        if !path.exists() {
            return Err(FitnessError::AssessmentNotFound(id.to_string()));
        }
        let text = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Unreadable or foreign files in the directory are skipped with a
    /// warning.
    fn list(&self) -> Result<Vec<Assessment>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut all = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            let path = entry.path();
            let is_record = entry.file_type().is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some("json")
                && path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .is_some_and(|stem| validate_id(stem).is_ok());
            if !is_record {
                continue;
            }

            match fs::read_to_string(path)
                .map_err(FitnessError::from)
                .and_then(|text| serde_json::from_str::<Assessment>(&text).map_err(FitnessError::from))
            {
                Ok(assessment) => all.push(assessment),
                Err(e) => warn!(path = %path.display(), "skipping unreadable assessment: {e}"),
            }
        }

        sort_oldest_first(&mut all);
        Ok(all)
    }
}
