//! CLI argument parsing for `filmcrew`.
//!
//! Flags override `filmcrew.json`; anything left unset falls back to the
//! project config and then to built-in defaults.
use crate::config::BackendKind;
use crate::export::Platform;
use crate::format::FormatChoice;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "filmcrew",
    version,
    about = "Break screenplays down into shots and AI video prompts with a virtual film crew",
    after_help = "Commands:\n  init --project <dir>         Create scripts/, output/, agents/ and filmcrew.json\n  process <script>             Process one script into a timestamped output folder\n  batch                        Process every script in the project's scripts folder\n  doctor                       Check that the configured LM CLI is installed\n  platforms                    List export platforms\n\nExamples:\n  filmcrew init --project ./film\n  filmcrew process ./film/scripts/pilot.txt --project ./film\n  filmcrew process pilot.docx --natural-only --platform runway --platform pika\n  filmcrew batch --project ./film --backend lm\n  filmcrew doctor --lm \"llm -m gpt-4o\"",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Log debug detail to stderr (FILMCREW_LOG overrides)
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Init(InitArgs),
    Process(ProcessArgs),
    Batch(BatchArgs),
    Doctor(DoctorArgs),
    Platforms,
}

/// Init command inputs.
#[derive(Parser, Debug)]
#[command(about = "Create a film-crew project (folders, agent prompts, config)")]
pub struct InitArgs {
    /// Project root to create or update
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Overwrite an existing filmcrew.json and agent prompts
    #[arg(long)]
    pub force: bool,
}

/// Options shared by `process` and `batch`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Project root holding filmcrew.json
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// Script layout; auto detects vignette markers
    #[arg(long, value_enum, default_value_t = FormatChoice::Auto)]
    pub format: FormatChoice,

    /// Crew backend (defaults to the config's backend)
    #[arg(long, value_enum)]
    pub backend: Option<BackendKind>,

    /// LM command line for the lm backend, e.g. "claude --print"
    #[arg(long, value_name = "CMD")]
    pub lm: Option<String>,

    /// Only generate enhanced prompts (skip natural prompts)
    #[arg(long, conflicts_with = "natural_only")]
    pub enhanced_only: bool,

    /// Only generate natural prompts (skip enhanced prompts)
    #[arg(long)]
    pub natural_only: bool,

    /// Export platform; repeat for several (defaults to the config's list)
    #[arg(long = "platform", value_enum, value_name = "PLATFORM")]
    pub platforms: Vec<Platform>,

    /// Skip platform exports
    #[arg(long, conflicts_with = "platforms")]
    pub no_exports: bool,
}

/// Process command inputs.
#[derive(Parser, Debug)]
#[command(about = "Process one screenplay into a timestamped output folder")]
pub struct ProcessArgs {
    /// Script file (.txt, .pdf, .docx)
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Write here instead of a timestamped folder; must be absent or empty
    #[arg(long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Batch command inputs.
#[derive(Parser, Debug)]
#[command(about = "Process every script in the scripts folder")]
pub struct BatchArgs {
    /// Scripts folder (defaults to the config's scripts_dir)
    #[arg(long, value_name = "DIR")]
    pub scripts: Option<PathBuf>,

    #[command(flatten)]
    pub run: RunArgs,
}

/// Doctor command inputs.
#[derive(Parser, Debug)]
#[command(about = "Check that the LM CLI used by the lm backend is installed")]
pub struct DoctorArgs {
    /// Project root holding filmcrew.json
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub project: PathBuf,

    /// LM command line to check instead of the configured one
    #[arg(long, value_name = "CMD")]
    pub lm: Option<String>,
}
