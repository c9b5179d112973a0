use crate::error::{FitnessError, Result};
use crate::types::config::FitnessConfig;
use std::path::{Path, PathBuf};
use toml::map::Map;
use toml::Value;

pub const DEFAULT_CONFIG_FILE: &str = "fitness.toml";
pub const DEFAULT_LOCAL_FILE: &str = ".fitness/local.toml";
pub const DEFAULT_GLOBAL_CONFIG_FILE: &str = ".config/fitness/config.toml";

/// Effective configuration for a project directory plus whether any config
/// file contributed to it.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfig {
    pub config: FitnessConfig,
    pub found: bool,
}

pub fn load_config(root: &Path) -> Result<LoadedConfig> {
    let global = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_GLOBAL_CONFIG_FILE));
    load_config_with_global(root, global.as_deref())
}

/// Layers global, project and local files in that order. Relative paths in
/// the result are resolved against `root`.
pub(crate) fn load_config_with_global(
    root: &Path,
    global_path: Option<&Path>,
) -> Result<LoadedConfig> {
    let mut merged = Value::Table(Map::new());
    let mut found = false;
    if let Some(path) = global_path {
        found |= merge_file_if_exists(&mut merged, path)?;
    }
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_CONFIG_FILE))?;
    found |= merge_file_if_exists(&mut merged, &root.join(DEFAULT_LOCAL_FILE))?;

    let mut config: FitnessConfig = merged
        .try_into()
        .map_err(|e: toml::de::Error| FitnessError::ConfigParse(e.to_string()))?;
    config.validate()?;
    resolve_paths(&mut config, root);

    Ok(LoadedConfig { config, found })
}

fn resolve_paths(config: &mut FitnessConfig, root: &Path) {
    let anchor = |path: &mut PathBuf| {
        if path.is_relative() {
            *path = root.join(&*path);
        }
    };
    if let Some(path) = config.rules.as_mut().and_then(|rules| rules.path.as_mut()) {
        anchor(path);
    }
    if let Some(dir) = config.store.as_mut().and_then(|store| store.dir.as_mut()) {
        anchor(dir);
    }
}

fn merge_file_if_exists(merged: &mut Value, path: &Path) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    let value = read_toml_value(path)?;
    merge_toml(merged, value);
    Ok(true)
}

fn read_toml_value(path: &Path) -> Result<Value> {
    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| FitnessError::ConfigParse(format!("{}: {}", path.display(), e)))
}

fn merge_toml(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Table(base_table), Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                match base_table.get_mut(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => {
                        base_table.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => {
            *slot = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn missing_files_give_defaults() {
        let dir = TempDir::new().expect("temp dir should be created");
        let loaded = load_config_with_global(dir.path(), None).expect("load should not fail");
        assert!(!loaded.found);
        assert!(loaded.config.rules_path().is_none());
        assert_eq!(loaded.config.output_format(), "md");
    }

    #[test]
    fn merges_global_project_and_local_in_order() {
        let root = TempDir::new().expect("root temp dir should be created");
        let global_root = TempDir::new().expect("global temp dir should be created");
        let global_path = global_root.path().join("config.toml");

        fs::write(
            &global_path,
            r#"
[logging]
level = "debug"

[narrative]
command = "global-llm"
"#,
        )
        .expect("global config should write");

        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            r#"
[rules]
path = "kb/scoring-rules.json"

[output]
format = "json"

[narrative]
command = "project-llm"
args = ["--json"]
"#,
        )
        .expect("project config should write");

        fs::create_dir_all(root.path().join(".fitness")).expect("local dir should create");
        fs::write(
            root.path().join(DEFAULT_LOCAL_FILE),
            r#"
[output]
format = "md"
"#,
        )
        .expect("local override should write");

        let loaded = load_config_with_global(root.path(), Some(&global_path))
            .expect("load should succeed");
        let cfg = loaded.config;

        assert!(loaded.found);
        assert_eq!(cfg.log_level(), "debug");
        assert_eq!(cfg.output_format(), "md");
        assert_eq!(
            cfg.rules_path().map(PathBuf::as_path),
            Some(root.path().join("kb/scoring-rules.json").as_path())
        );
        let narrative = cfg.narrative.expect("narrative section");
        assert_eq!(narrative.command, "project-llm");
        assert_eq!(narrative.args, vec!["--json".to_string()]);
    }

    #[test]
    fn absolute_store_dir_is_kept() {
        let root = TempDir::new().expect("root temp dir should be created");
        let elsewhere = TempDir::new().expect("store temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            format!("[store]\ndir = {:?}\n", elsewhere.path().display().to_string()),
        )
        .expect("project config should write");

        let loaded = load_config_with_global(root.path(), None).expect("load should succeed");
        assert_eq!(loaded.config.store_dir(), elsewhere.path());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let root = TempDir::new().expect("root temp dir should be created");
        fs::write(
            root.path().join(DEFAULT_CONFIG_FILE),
            "[output]\nformat = \"sarif\"\n",
        )
        .expect("project config should write");

        let err = load_config_with_global(root.path(), None).unwrap_err();
        assert!(err.to_string().contains("unsupported output.format"));
    }
}
