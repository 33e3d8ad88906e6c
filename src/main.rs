mod cli;
mod config;
mod crew;
mod export;
mod format;
mod lm;
mod logging;
mod paths;
mod pipeline;
mod prereqs;
mod project;
mod prompts;
mod reader;
mod screenplay;
mod staging;
mod summary;
mod templates;
mod util;
mod vignette;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{BatchArgs, Command, DoctorArgs, InitArgs, ProcessArgs, RootArgs, RunArgs};
use config::{character_registry, load_config_or_default, BackendKind, FilmCrewConfig};
use crew::{CrewBackend, HeuristicBackend, LmBackend};
use paths::ProjectPaths;
use pipeline::{process_script, run_batch, Phases, ProcessOptions, ScriptResult};
use std::process::ExitCode;
use util::display_path;

fn main() -> Result<ExitCode> {
    let args = RootArgs::parse();
    logging::init(args.verbose)?;

    match args.command {
        Command::Init(args) => cmd_init(&args),
        Command::Process(args) => cmd_process(&args),
        Command::Batch(args) => cmd_batch(&args),
        Command::Doctor(args) => cmd_doctor(&args),
        Command::Platforms => {
            print!("{}", export::platform_table());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn cmd_init(args: &InitArgs) -> Result<ExitCode> {
    for path in project::init_project(&args.project, args.force)? {
        println!("wrote {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_process(args: &ProcessArgs) -> Result<ExitCode> {
    let session = Session::open(&args.run)?;
    let mut options = session.options(&args.run);
    options.output_dir = args.output.clone();
    let outcome = process_script(&args.script, &options)
        .with_context(|| format!("process {}", args.script.display()))?;
    println!(
        "{} script: {} {}, {} {}",
        outcome.format,
        outcome.units,
        unit_label(outcome.format, outcome.units),
        outcome.shots,
        shot_label(outcome.format, outcome.shots),
    );
    if outcome.agent_failures > 0 {
        println!(
            "{} agent call(s) failed; see Agent_Logs/execution_report.json",
            outcome.agent_failures
        );
    }
    println!("wrote {}", outcome.output_dir.display());
    Ok(ExitCode::SUCCESS)
}

fn cmd_batch(args: &BatchArgs) -> Result<ExitCode> {
    let session = Session::open(&args.run)?;
    let options = session.options(&args.run);
    let scripts_dir = args
        .scripts
        .clone()
        .unwrap_or_else(|| session.paths.scripts_dir(&session.config));
    let outcome = run_batch(&scripts_dir, &options)?;

    for (script, result) in &outcome.results {
        let name = display_path(script, Some(&scripts_dir));
        match result {
            ScriptResult::Published(dir) => println!("ok     {name} -> {}", dir.display()),
            ScriptResult::Failed(reason) => println!("FAILED {name}: {reason}"),
        }
    }
    println!(
        "{} of {} scripts processed; report: {}",
        outcome.succeeded(),
        outcome.results.len(),
        outcome.report_path.display()
    );
    if outcome.failed() > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn cmd_doctor(args: &DoctorArgs) -> Result<ExitCode> {
    let paths = ProjectPaths::new(args.project.clone());
    let config = load_config_or_default(paths.root())?;
    if paths.config_path().is_file() {
        println!("config: {} (ok)", paths.config_path().display());
    } else {
        println!("config: none (using defaults)");
    }
    let command = lm::resolve_lm_command(args.lm.as_deref(), config.lm_command.as_deref())?;
    println!("lm command: {}", command.display());
    let found = prereqs::ensure_lm_available(&command)?;
    println!("found {} at {}", command.program(), found.display());
    Ok(ExitCode::SUCCESS)
}

/// Loaded project state shared by `process` and `batch`.
struct Session {
    paths: ProjectPaths,
    config: FilmCrewConfig,
    characters: prompts::CharacterRegistry,
    backend: Box<dyn CrewBackend>,
}

impl Session {
    fn open(run: &RunArgs) -> Result<Self> {
        let paths = ProjectPaths::new(run.project.clone());
        let config = load_config_or_default(paths.root())?;
        let characters = character_registry(&config)?;
        let backend: Box<dyn CrewBackend> = match run.backend.unwrap_or(config.backend) {
            BackendKind::Heuristic => Box::new(HeuristicBackend),
            BackendKind::Lm => {
                let command =
                    lm::resolve_lm_command(run.lm.as_deref(), config.lm_command.as_deref())?;
                prereqs::ensure_lm_available(&command)?;
                Box::new(LmBackend::new(command, Some(paths.agents_dir())))
            }
        };
        Ok(Self {
            paths,
            config,
            characters,
            backend,
        })
    }

    fn options(&self, run: &RunArgs) -> ProcessOptions<'_> {
        let platforms = if run.no_exports {
            Vec::new()
        } else if run.platforms.is_empty() {
            self.config.platforms.clone()
        } else {
            let mut platforms = run.platforms.clone();
            platforms.sort();
            platforms.dedup();
            platforms
        };
        ProcessOptions {
            output_root: self.paths.output_dir(&self.config),
            output_dir: None,
            format: run.format,
            phases: Phases::from_flags(run.enhanced_only, run.natural_only),
            platforms,
            backend: self.backend.as_ref(),
            characters: &self.characters,
            vignette_rules: &self.config.vignette,
        }
    }
}

fn unit_label(format: format::ScriptFormat, count: usize) -> &'static str {
    match (format, count) {
        (format::ScriptFormat::Vignette, 1) => "vignette",
        (format::ScriptFormat::Vignette, _) => "vignettes",
        (_, 1) => "scene",
        _ => "scenes",
    }
}

fn shot_label(format: format::ScriptFormat, count: usize) -> &'static str {
    match (format, count) {
        (format::ScriptFormat::Vignette, 1) => "video segment",
        (format::ScriptFormat::Vignette, _) => "video segments",
        (_, 1) => "shot",
        _ => "shots",
    }
}
