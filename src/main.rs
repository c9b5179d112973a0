mod cli;
mod config;
mod engine;
mod error;
mod intake;
mod knowledge;
mod narrative;
mod report;
mod store;
mod telemetry;
mod types;

use crate::error::{FitnessError, Result};
use crate::knowledge::LoadedTable;
use crate::narrative::{CommandNarrator, NarrativeGenerator, NarrativeOutcome, Unconfigured};
use crate::report::OutputFormat;
use crate::store::{AssessmentStore, FileStore, MemoryStore};
use crate::types::answers::AnswerRecord;
use crate::types::assessment::Assessment;
use crate::types::config::FitnessConfig;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// Settings shared by every command.
struct Context {
    root: PathBuf,
    config: FitnessConfig,
}

impl Context {
    fn format(&self, flag: Option<cli::ReportFormat>) -> Result<OutputFormat> {
        match flag {
            Some(cli::ReportFormat::Json) => Ok(OutputFormat::Json),
            Some(cli::ReportFormat::Md) => Ok(OutputFormat::Md),
            None => OutputFormat::parse(self.config.output_format()),
        }
    }

    /// The `--rules` override, else the configured path, else the built-in
    /// table. Read fresh on every call.
    fn rule_table(&self, flag: Option<&Path>) -> Result<LoadedTable> {
        let path = flag
            .map(|path| self.root.join(path))
            .or_else(|| self.config.rules_path().cloned());
        knowledge::resolve(path.as_deref())
    }

    fn store(&self) -> FileStore {
        FileStore::new(self.root.join(self.config.store_dir()))
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    if !cli.root.exists() {
        return Err(FitnessError::PathNotFound(cli.root.display().to_string()));
    }

    let loaded = config::load_config(&cli.root)?;
    telemetry::init(&telemetry::effective_level(
        cli.verbose,
        cli.quiet,
        loaded.config.log_level(),
    ))?;
    if !loaded.found {
        info!(root = %cli.root.display(), "no fitness.toml found, using defaults");
    }

    let ctx = Context {
        root: cli.root,
        config: loaded.config,
    };

    match cli.command {
        cli::Commands::Score(cmd) => score(&ctx, &cmd),
        cli::Commands::Show(cmd) => {
            let assessment = ctx.store().get(&cmd.id)?;
            println!("{}", report::render(&assessment, ctx.format(cmd.format)?)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::List(cmd) => {
            let assessments = ctx.store().list()?;
            println!(
                "{}",
                report::render_list(&assessments, ctx.format(cmd.format)?)?
            );
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Classify(cmd) => {
            let loaded = ctx.rule_table(cmd.rules.as_deref())?;
            let book = engine::RuleBook::compile(&loaded.table);
            let classification = book.classifier.classify(cmd.impact, cmd.feasibility);
            println!("{} ({})", classification.category, classification.color);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Rules(cmd) => rules(&ctx, cmd.action),
        cli::Commands::Prompt(cmd) => {
            let assessment = ctx.store().get(&cmd.id)?;
            let loaded = ctx.rule_table(cmd.rules.as_deref())?;
            println!("{}", prompt_for(&loaded, &assessment)?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Narrate(cmd) => narrate(&ctx, &cmd),
    }
}

fn score(ctx: &Context, cmd: &cli::ScoreCommand) -> Result<i32> {
    let path = ctx.root.join(&cmd.answers);
    if !path.exists() {
        return Err(FitnessError::PathNotFound(path.display().to_string()));
    }
    let answers: AnswerRecord = serde_json::from_str(&std::fs::read_to_string(&path)?)
        .map_err(|e| FitnessError::InvalidAnswers(vec![e.to_string()]))?;
    intake::validate(&answers)?;

    let loaded = ctx.rule_table(cmd.rules.as_deref())?;
    let book = engine::RuleBook::compile(&loaded.table);
    let diagnostics = book.diagnostics().len();
    let scores = engine::score(&answers, &book);
    let assessment = Assessment::new(answers, scores, loaded.digest, loaded.table.version);

    let store: Box<dyn AssessmentStore> = if cmd.no_save {
        info!(id = %assessment.id, "kept in memory only (--no-save)");
        Box::new(MemoryStore::new())
    } else {
        Box::new(ctx.store())
    };
    store.save(&assessment)?;
    println!("{}", report::render(&assessment, ctx.format(cmd.format)?)?);

    if diagnostics > 0 {
        warn!(count = diagnostics, "rule table has findings, run `fitness rules check`");
    }

    if assessment.scores.has_blockers() {
        Ok(exit_code::BLOCKING)
    } else if diagnostics > 0 || !assessment.scores.flags.is_empty() {
        Ok(exit_code::WARNINGS)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

fn rules(ctx: &Context, action: cli::RulesAction) -> Result<i32> {
    match action {
        cli::RulesAction::Check { rules, format } => {
            let loaded = ctx.rule_table(rules.as_deref())?;
            let lint = knowledge::lint(&loaded.table);
            println!("{}", report::render_lint(&lint, ctx.format(format)?)?);
            Ok(if lint.is_clean() {
                exit_code::SUCCESS
            } else {
                exit_code::WARNINGS
            })
        }
        cli::RulesAction::Show { rules } => {
            let loaded = ctx.rule_table(rules.as_deref())?;
            println!("{}", report::json::to_json(&loaded.table)?);
            Ok(exit_code::SUCCESS)
        }
        cli::RulesAction::Update { file } => {
            let target = ctx.config.rules_path().ok_or_else(|| {
                FitnessError::ConfigParse(
                    "rules.path must be set in fitness.toml to update the rule table".to_string(),
                )
            })?;
            let lint = knowledge::update(&ctx.root.join(file), target)?;
            println!("rule table installed at {}", target.display());
            if lint.is_clean() {
                Ok(exit_code::SUCCESS)
            } else {
                println!("{}", report::md::lint_markdown(&lint));
                Ok(exit_code::WARNINGS)
            }
        }
    }
}

fn prompt_for(loaded: &LoadedTable, assessment: &Assessment) -> Result<String> {
    let template = &loaded.table.ai_analysis_prompt;
    if template.trim().is_empty() {
        return Err(FitnessError::RulesParse(format!(
            "{}: aiAnalysisPrompt is empty",
            loaded.source
        )));
    }
    narrative::render_prompt(
        template,
        &narrative::NarrativeRequest::from_assessment(assessment),
    )
}

fn narrate(ctx: &Context, cmd: &cli::NarrateCommand) -> Result<i32> {
    let store = ctx.store();
    let loaded = ctx.rule_table(cmd.rules.as_deref())?;
    let generator: Box<dyn NarrativeGenerator> = match &ctx.config.narrative {
        Some(config) => Box::new(CommandNarrator::from_config(config)),
        None => Box::new(Unconfigured),
    };

    let outcome = narrative::ensure_narrative(
        &store,
        &cmd.id,
        &loaded.table.ai_analysis_prompt,
        generator.as_ref(),
    )?;
    match outcome {
        NarrativeOutcome::Cached(_) | NarrativeOutcome::Generated(_) => {
            let assessment = store.get(&cmd.id)?;
            println!("{}", report::render(&assessment, ctx.format(cmd.format)?)?);
            Ok(exit_code::SUCCESS)
        }
        NarrativeOutcome::Unavailable(reason) => {
            println!("{}", narrative::UNAVAILABLE);
            eprintln!("warning: {reason}");
            Ok(exit_code::WARNINGS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
