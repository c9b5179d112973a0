//! Rule table loading, fingerprinting, linting and replacement.

use crate::engine::matcher::RuleDiagnostic;
use crate::engine::RuleBook;
use crate::error::{FitnessError, Result};
use crate::types::rules::{RuleTable, CATEGORY_TITLES};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Component, Path};
use tracing::{debug, info};

const BUILTIN_RULES: &str = include_str!("../assets/scoring-rules.json");

/// Where a loaded table came from, for logs and reports.
pub const BUILTIN_SOURCE: &str = "built-in";

/// A rule table plus the facts recorded alongside every assessment scored
/// with it.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    pub table: RuleTable,
    pub digest: String,
    pub source: String,
}

pub fn parse_table(text: &str, origin: &str) -> Result<RuleTable> {
    serde_json::from_str(text).map_err(|e| FitnessError::RulesParse(format!("{origin}: {e}")))
}

pub fn load_builtin() -> Result<RuleTable> {
    parse_table(BUILTIN_RULES, BUILTIN_SOURCE)
}

pub fn load_rule_table(path: &Path) -> Result<RuleTable> {
    if !path.exists() {
        return Err(FitnessError::PathNotFound(path.display().to_string()));
    }
    let text = fs::read_to_string(path)?;
    parse_table(&text, &path.display().to_string())
}

/// Loads the configured table, or the built-in one when no path is set.
pub fn resolve(path: Option<&Path>) -> Result<LoadedTable> {
    let (table, source) = match path {
        Some(path) => (load_rule_table(path)?, path.display().to_string()),
        None => (load_builtin()?, BUILTIN_SOURCE.to_string()),
    };
    let digest = digest(&table)?;
    debug!(source = %source, digest = %digest, version = ?table.version, "rule table loaded");
    Ok(LoadedTable {
        table,
        digest,
        source,
    })
}

/// SHA-256 over the canonical serialization, so formatting-only edits to a
/// table file keep the same digest.
pub fn digest(table: &RuleTable) -> Result<String> {
    let canonical = serde_json::to_string(table)?;
    let digest = Sha256::digest(canonical.as_bytes());
    Ok(format!("{digest:x}"))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintReport {
    pub version: Option<String>,
    pub categories_found: Vec<String>,
    pub categories_missing: Vec<String>,
    pub findings: Vec<LintFinding>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LintFinding {
    pub category: String,
    pub criteria: String,
    pub problem: String,
}

impl From<&RuleDiagnostic> for LintFinding {
    fn from(diagnostic: &RuleDiagnostic) -> Self {
        Self {
            category: diagnostic.category.clone(),
            criteria: diagnostic.criteria.clone(),
            problem: diagnostic.problem.clone(),
        }
    }
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.categories_missing.is_empty() && self.findings.is_empty()
    }
}

pub fn lint(table: &RuleTable) -> LintReport {
    let (categories_found, categories_missing): (Vec<String>, Vec<String>) = CATEGORY_TITLES
        .iter()
        .map(|title| title.to_string())
        .partition(|title| table.category(title).is_some());

    let book = RuleBook::compile(table);
    let findings = book
        .diagnostics()
        .into_iter()
        // missing categories are already listed above
        .filter(|diagnostic| !diagnostic.criteria.is_empty())
        .map(LintFinding::from)
        .collect();

    LintReport {
        version: table.version.clone(),
        categories_found,
        categories_missing,
        findings,
    }
}

pub fn validate_rules_path(path: &Path) -> Result<()> {
    if path
        .components()
        .any(|component| matches!(component, Component::ParentDir))
    {
        return Err(FitnessError::ConfigParse(format!(
            "path traversal rejected: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Replaces the table at `target` with the one at `source`. The new table
/// must parse and define every category; rule-level findings are returned
/// for the caller to report. The write goes through a sibling temp file and
/// a rename so readers never see a partial table.
pub fn update(source: &Path, target: &Path) -> Result<LintReport> {
    validate_rules_path(target)?;
    if !source.exists() {
        return Err(FitnessError::PathNotFound(source.display().to_string()));
    }

    let text = fs::read_to_string(source)?;
    let table = parse_table(&text, &source.display().to_string())?;
    let report = lint(&table);
    if !report.categories_missing.is_empty() {
        return Err(FitnessError::RulesParse(format!(
            "{}: missing categories: {}",
            source.display(),
            report.categories_missing.join(", ")
        )));
    }

    if let Some(parent) = target.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let staging = target.with_extension("json.tmp");
    fs::write(&staging, &text)?;
    fs::rename(&staging, target)?;

    info!(
        target = %target.display(),
        version = ?table.version,
        digest = %digest(&table)?,
        "rule table replaced"
    );
    Ok(report)
}

#[cfg(test)]
pub(crate) fn builtin_table() -> RuleTable {
    load_builtin().expect("built-in rule table should parse")
}
