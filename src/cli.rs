use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fitness",
    version,
    about = "Rule-driven automation fitness scoring for process intake questionnaires"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Project directory holding fitness.toml and the assessment store
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate and score a questionnaire submission
    Score(ScoreCommand),
    /// Print a stored assessment
    Show(ShowCommand),
    /// List stored assessments
    List(ListCommand),
    /// Classify an impact/feasibility pair against the rule table
    Classify(ClassifyCommand),
    /// Inspect or replace the rule table
    Rules(RulesCommand),
    /// Print the narrative prompt for a stored assessment
    Prompt(PromptCommand),
    /// Generate (or fetch the cached) narrative for a stored assessment
    Narrate(NarrateCommand),
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}

#[derive(Args)]
pub struct ScoreCommand {
    /// Answers JSON file
    pub answers: PathBuf,
    /// Rule table to score against instead of the configured one
    #[arg(long)]
    pub rules: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
    /// Score without writing to the assessment store
    #[arg(long)]
    pub no_save: bool,
}

#[derive(Args)]
pub struct ShowCommand {
    pub id: String,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ListCommand {
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}

#[derive(Args)]
pub struct ClassifyCommand {
    #[arg(long)]
    pub impact: f64,
    #[arg(long)]
    pub feasibility: f64,
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Args)]
pub struct RulesCommand {
    #[command(subcommand)]
    pub action: RulesAction,
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// Lint the rule table
    Check {
        #[arg(long)]
        rules: Option<PathBuf>,
        #[arg(short, long, value_enum)]
        format: Option<ReportFormat>,
    },
    /// Print the rule table as JSON
    Show {
        #[arg(long)]
        rules: Option<PathBuf>,
    },
    /// Validate a new table and install it at the configured rules path
    Update {
        file: PathBuf,
    },
}

#[derive(Args)]
pub struct PromptCommand {
    pub id: String,
    #[arg(long)]
    pub rules: Option<PathBuf>,
}

#[derive(Args)]
pub struct NarrateCommand {
    pub id: String,
    #[arg(long)]
    pub rules: Option<PathBuf>,
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,
}
