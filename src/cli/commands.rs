//! CLI command definitions and argument parsing

use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

use crate::models::RiskLevel;

#[derive(Parser)]
#[command(name = "rulerag")]
#[command(about = "Search contract rules and assemble prompt context")]
#[command(version)]
pub struct Cli {
    /// Enable verbose debug logging (default: info level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Configuration file (default: config.toml, then config.example.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Corpus JSON file, overriding the configured path
    #[arg(long)]
    pub corpus: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank chapters against a question
    Search {
        /// Free-text question
        query: String,
        /// Maximum number of results to print
        #[arg(short, long, default_value = "10")]
        limit: usize,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Rank FAQ entries against a question
    Faq {
        /// Free-text question
        query: String,
        /// Maximum number of results to print
        #[arg(short, long, default_value = "5")]
        limit: usize,
    },
    /// Assemble the bounded prompt context for a question
    Context {
        /// Free-text question
        question: String,
        /// Character budget (default: configured max_context_length)
        #[arg(short, long)]
        budget: Option<usize>,
        /// Also list the chapters that made it into the context
        #[arg(long)]
        sources: bool,
    },
    /// Build the full model prompt for a question
    Prompt {
        /// Free-text question
        question: String,
        /// Extra reference material appended after the rules
        #[arg(short, long)]
        extra: Option<String>,
    },
    /// Show one chapter by id
    Chapter {
        /// Chapter id
        id: String,
        /// Print a summarization prompt for the chapter instead
        #[arg(long)]
        summary_prompt: bool,
        /// Word limit used by --summary-prompt
        #[arg(long, default_value = "80")]
        max_words: usize,
    },
    /// List chapters with a given risk level, in corpus order
    Risk {
        #[arg(value_enum)]
        level: RiskArg,
    },
    /// Show chapters by id, in the given order
    Related {
        /// Chapter ids
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Show corpus statistics
    Summary {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Assemble contexts for every question in a file (one per line)
    Batch {
        /// File with one question per line
        file: PathBuf,
        /// Character budget per context
        #[arg(short, long)]
        budget: Option<usize>,
    },
    /// Show current configuration
    Config,
    /// Run a smoke check over the loaded corpus and print JSON
    Selftest,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum RiskArg {
    Low,
    Medium,
    High,
}

impl From<RiskArg> for RiskLevel {
    fn from(value: RiskArg) -> Self {
        match value {
            RiskArg::Low => RiskLevel::Low,
            RiskArg::Medium => RiskLevel::Medium,
            RiskArg::High => RiskLevel::High,
        }
    }
}
