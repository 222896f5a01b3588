//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for discussion results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The full transcript followed by the summary
    Full,
    /// Only the moderator's closing summary
    Summary,
    /// JSON report
    Json,
}

/// Which moderator drives the discussion
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManagerArg {
    /// A language model decides termination, speakers and the summary
    Llm,
    /// Participants take turns in registration order until the round limit
    RoundRobin,
}

impl ManagerArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            ManagerArg::Llm => "llm",
            ManagerArg::RoundRobin => "round_robin",
        }
    }
}

/// CLI arguments for roundtable
#[derive(Parser, Debug)]
#[command(name = "roundtable")]
#[command(author, version, about = "Moderated group discussion between LLM personas")]
#[command(long_about = r#"
Roundtable runs a moderated group discussion between several LLM personas.

Each round the moderator decides:
1. Termination: has the discussion reached a conclusion?
2. Selection: which participant should speak next?
When the discussion ends (by decision or by the round limit) the moderator
writes a closing summary.

Configuration files are loaded from (in priority order):
1. --config <path>       Explicit config file
2. ./roundtable.toml     Project-level config
3. ~/.config/roundtable/config.toml   Global config

Example:
  roundtable "Create a slogan for a new electric bike."
  roundtable --topic "Urban transport" --max-rounds 6 "Should cities ban cars?"
  roundtable -p Farmer -p Economist --manager round-robin "Is rent control good policy?"
"#)]
pub struct Cli {
    /// The task that opens the discussion (defaults to the configured task)
    pub task: Option<String>,

    /// Topic the moderator keeps the discussion on
    #[arg(short, long, value_name = "TOPIC")]
    pub topic: Option<String>,

    /// Maximum number of participant turns
    #[arg(short = 'r', long, value_name = "N")]
    pub max_rounds: Option<usize>,

    /// Participants to include, by name (can be specified multiple times)
    #[arg(short, long = "participant", value_name = "NAME")]
    pub participants: Vec<String>,

    /// Model used by the moderator
    #[arg(long, value_name = "MODEL")]
    pub moderator: Option<String>,

    /// Moderator strategy
    #[arg(long, value_enum)]
    pub manager: Option<ManagerArg>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "full")]
    pub output: OutputFormat,

    /// Append a JSON Lines transcript of the discussion to this file
    #[arg(long, value_name = "PATH")]
    pub transcript: Option<PathBuf>,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Hide the moderator's termination and selection decisions
    #[arg(long)]
    pub hide_decisions: bool,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Do not print turns as they happen
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
