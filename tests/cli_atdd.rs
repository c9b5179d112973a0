#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

struct Project {
    home: TempDir,
    root: TempDir,
}

impl Project {
    fn new() -> Self {
        Self {
            home: TempDir::new().expect("home dir should be created"),
            root: TempDir::new().expect("project dir should be created"),
        }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn fitness(&self) -> Command {
        let mut cmd = Command::cargo_bin("fitness").expect("binary should compile");
        cmd.env("HOME", self.home.path())
            .env_remove("RUST_LOG")
            .arg("--root")
            .arg(self.root.path());
        cmd
    }

    fn write_config(&self, content: &str) {
        fs::write(self.path().join("fitness.toml"), content).expect("config should write");
    }

    /// Scores a fixture as JSON and returns the stored assessment id.
    fn score(&self, fixture: &str) -> String {
        let output = self
            .fitness()
            .arg("score")
            .arg(fixture_path(fixture))
            .args(["--format", "json"])
            .output()
            .expect("score should run");
        let parsed: Value =
            serde_json::from_slice(&output.stdout).expect("score output should be JSON");
        parsed["id"].as_str().expect("id should be a string").to_string()
    }
}

fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

#[test]
fn quick_win_scores_and_is_stored() {
    let project = Project::new();

    let output = project
        .fitness()
        .arg("score")
        .arg(fixture_path("quick_win.json"))
        .args(["--format", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let assessment: Value = serde_json::from_slice(&output).expect("output should be JSON");
    assert_eq!(assessment["scores"]["businessImpact"], 71);
    assert_eq!(assessment["scores"]["totalFeasibility"], 56);
    assert_eq!(assessment["scores"]["totalScore"], 127);
    assert_eq!(assessment["scores"]["category"], "QUICK WIN");
    assert_eq!(assessment["scores"]["color"], "green");
    assert_eq!(assessment["rulesVersion"], "2024.2");
    assert_eq!(assessment["insights"]["priority"], "Highest Priority");
    assert_eq!(
        assessment["scores"]["totalFeasibility"],
        assessment["scores"]["feasibility"].as_u64().expect("feasibility")
            + assessment["scores"]["taskComplexity"].as_u64().expect("task complexity")
    );

    let id = assessment["id"].as_str().expect("id should be present");
    assert!(project
        .path()
        .join(".fitness/assessments")
        .join(format!("{id}.json"))
        .exists());
}

#[test]
fn blocked_process_exits_with_code_2_and_lists_blockers() {
    let project = Project::new();

    project
        .fitness()
        .arg("score")
        .arg(fixture_path("blocked.json"))
        .assert()
        .code(2)
        .stdout(predicate::str::contains(
            "❌ Integration blocker: AS/400 is not cloud-based and has no API",
        ))
        .stdout(predicate::str::contains(
            "❌ Integration blocker: All systems are on internal network only",
        ))
        .stdout(predicate::str::contains("| Feasibility | 1 |"));
}

#[test]
fn unanswered_cloud_status_warns_instead_of_blocking() {
    let project = Project::new();
    let mut answers: Value = serde_json::from_str(
        &fs::read_to_string(fixture_path("quick_win.json")).expect("fixture should read"),
    )
    .expect("fixture should parse");
    answers["systems"] = serde_json::json!([{ "name": "Ledger", "hasApi": "No" }]);
    fs::write(
        project.path().join("answers.json"),
        serde_json::to_string(&answers).expect("answers should serialize"),
    )
    .expect("answers should write");

    project
        .fitness()
        .args(["score", "answers.json", "--no-save"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("⚠️ System without API: Ledger"))
        .stdout(predicate::str::contains("Integration blocker").not());
}

#[test]
fn invalid_answers_are_rejected_with_every_problem() {
    let project = Project::new();

    project
        .fitness()
        .arg("score")
        .arg(fixture_path("invalid.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("yourName is required"))
        .stderr(predicate::str::contains("teamSize must be at least 1"))
        .stderr(predicate::str::contains("impactOfDelays is required"));

    assert!(!project.path().join(".fitness/assessments").exists());
}

#[test]
fn no_save_leaves_store_untouched() {
    let project = Project::new();

    project
        .fitness()
        .arg("score")
        .arg(fixture_path("quick_win.json"))
        .arg("--no-save")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("**QUICK WIN** (green)"));

    project
        .fitness()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No assessments stored."));
}

#[test]
fn show_and_list_read_back_stored_assessments() {
    let project = Project::new();
    let id = project.score("quick_win.json");

    project
        .fitness()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("# Automation Fitness: Freight invoice matching"));

    project
        .fitness()
        .args(["list", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(format!("\"id\": \"{id}\"")));
}

#[test]
fn show_rejects_non_uuid_ids() {
    let project = Project::new();
    project
        .fitness()
        .args(["show", "../../etc/passwd"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("invalid submission id"));
}

#[test]
fn show_reports_unknown_assessment() {
    let project = Project::new();
    project
        .fitness()
        .args(["show", "6f1c5f5e-8a53-4c1e-9d0b-3f1a2b3c4d5e"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("assessment not found"));
}

#[test]
fn classify_uses_quadrant_thresholds() {
    let project = Project::new();
    project
        .fitness()
        .args(["classify", "--impact", "60", "--feasibility", "35"])
        .assert()
        .success()
        .stdout(predicate::str::contains("QUICK WIN (green)"));
    project
        .fitness()
        .args(["classify", "--impact", "59", "--feasibility", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("REVISIT (red)"));
}

#[test]
fn rules_check_passes_for_builtin_table() {
    let project = Project::new();
    project
        .fitness()
        .args(["rules", "check"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("## Findings\n\n- none"));
}

#[test]
fn rules_check_flags_malformed_criteria() {
    let project = Project::new();
    fs::write(
        project.path().join("broken.json"),
        r#"{"scoringCategories": [
            {"title": "Risk & Compliance", "rules": [{"criteria": "Error rate: <=", "score": "3 pts"}]}
        ]}"#,
    )
    .expect("rules should write");

    project
        .fitness()
        .args(["rules", "check", "--rules", "broken.json", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"categoriesMissing\""))
        .stdout(predicate::str::contains("Error rate: <="));
}

#[test]
fn rules_show_prints_table_json() {
    let project = Project::new();
    project
        .fitness()
        .args(["rules", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"scoringCategories\""))
        .stdout(predicate::str::contains("Process Categorization"));
}

#[test]
fn rules_update_installs_table_used_by_next_score() {
    let project = Project::new();
    project.write_config("[rules]\npath = \"kb/scoring-rules.json\"\n");

    let builtin = Command::cargo_bin("fitness")
        .expect("binary should compile")
        .env("HOME", project.home.path())
        .args(["rules", "show"])
        .output()
        .expect("rules show should run");
    let edited = String::from_utf8(builtin.stdout)
        .expect("utf8")
        .replace("\"version\": \"2024.2\"", "\"version\": \"2024.3\"");
    fs::write(project.path().join("incoming.json"), edited).expect("incoming should write");

    project
        .fitness()
        .args(["rules", "update", "incoming.json"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("rule table installed"));
    assert!(project.path().join("kb/scoring-rules.json").exists());

    let id = project.score("quick_win.json");
    let stored = fs::read_to_string(
        project
            .path()
            .join(".fitness/assessments")
            .join(format!("{id}.json")),
    )
    .expect("assessment should read");
    assert!(stored.contains("\"rulesVersion\": \"2024.3\""));
}

#[test]
fn rules_update_requires_configured_path() {
    let project = Project::new();
    project
        .fitness()
        .args(["rules", "update", "incoming.json"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("rules.path must be set"));
}

#[test]
fn prompt_renders_assessment_into_template() {
    let project = Project::new();
    let id = project.score("quick_win.json");

    project
        .fitness()
        .args(["prompt", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Process Name: Freight invoice matching"))
        .stdout(predicate::str::contains("\"category\":\"QUICK WIN\""));
}

#[test]
fn narrate_without_generator_is_unavailable() {
    let project = Project::new();
    let id = project.score("quick_win.json");

    project
        .fitness()
        .args(["narrate", &id])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("analysis unavailable"))
        .stderr(predicate::str::contains("no [narrative] command configured"));
}

#[cfg(unix)]
#[test]
fn narrate_stores_generated_analysis_once() {
    let project = Project::new();
    let counter = project.path().join("calls");
    let script = format!(
        "cat > /dev/null; echo x >> '{}'; printf '{{\"recommendation\":\"Quick Win\",\"confidence\":88,\"strengths\":[\"High volume\"],\"concerns\":[],\"timelineEstimate\":\"3-6 months\",\"nextSteps\":\"Pilot\"}}'",
        counter.display()
    );
    project.write_config(&format!(
        "[narrative]\ncommand = \"sh\"\nargs = [\"-c\", {script:?}]\n"
    ));
    let id = project.score("quick_win.json");

    for _ in 0..2 {
        project
            .fitness()
            .args(["narrate", &id])
            .assert()
            .code(0)
            .stdout(predicate::str::contains("Quick Win (confidence 88%)"));
    }

    let calls = fs::read_to_string(&counter).expect("counter should exist");
    assert_eq!(calls.lines().count(), 1);
}
