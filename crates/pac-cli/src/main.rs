//! `pac` - batch front end for the governance geometry engine
//!
//! Loads a policy and a case list, then prints layouts, staircases, contours,
//! reference ticks, thresholds or assessments as text or JSON.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use pac_geometry::{
    assessment, axes, contours, layout, staircase, GeometryEngine, ThresholdTable, ViewMode,
};
use pac_model::{sample_cases, Case, CaseSet, ConfigFile};
use serde::Serialize;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

mod render;

fn cli() -> Command {
    let cases = Arg::new("cases")
        .long("cases")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON case list; the sample dataset when omitted");
    let elevated = Arg::new("elevated")
        .long("elevated")
        .action(ArgAction::SetTrue)
        .help("Show the autonomy axis: lift cases to the level they qualify for");

    Command::new("pac")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Risk-governance geometry for AI-agent deployments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .global(true)
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("Policy file (TOML, YAML or JSON by extension)"),
        )
        .arg(
            Arg::new("axis-length")
                .long("axis-length")
                .global(true)
                .value_name("S")
                .value_parser(value_parser!(f64))
                .help("Scene axis length, overrides the config file"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Output as JSON"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Debug logging, unless RUST_LOG is set"),
        )
        .subcommand(
            Command::new("layout")
                .about("Place case dots")
                .arg(cases.clone())
                .arg(elevated.clone()),
        )
        .subcommand(Command::new("staircase").about("Governance staircase panels and edges"))
        .subcommand(Command::new("contours").about("Flat-mode contours and floor"))
        .subcommand(Command::new("ticks").about("Axis ticks, lanes, bands and gate planes"))
        .subcommand(Command::new("thresholds").about("Required reliability for every cell"))
        .subcommand(
            Command::new("assess")
                .about("Status of every case against the policy")
                .arg(cases)
                .arg(elevated),
        )
        .subcommand(Command::new("samples").about("Print the curated sample dataset"))
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn load_engine(config: Option<&PathBuf>, axis_length: Option<f64>) -> Result<GeometryEngine> {
    let mut file = match config {
        Some(path) => ConfigFile::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => ConfigFile::default(),
    };
    if let Some(s) = axis_length {
        file.scene.axis_length = s;
    }
    GeometryEngine::from_config_file(&file).context("invalid scene settings")
}

fn load_cases(path: Option<&PathBuf>) -> Result<Vec<Case>> {
    let Some(path) = path else {
        return Ok(sample_cases());
    };
    read_cases(path)
}

fn read_cases(path: &Path) -> Result<Vec<Case>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read cases {}", path.display()))?;
    let set = CaseSet::from_json(&text)
        .with_context(|| format!("failed to parse cases {}", path.display()))?;
    tracing::debug!(count = set.cases.len(), path = %path.display(), "loaded cases");
    Ok(set.cases)
}

fn view_mode(args: &ArgMatches) -> ViewMode {
    if args.get_flag("elevated") {
        ViewMode::Elevated
    } else {
        ViewMode::Flat
    }
}

fn emit<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> Result<String, fmt::Error>,
) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text(value)?);
    }
    Ok(())
}

fn run(matches: &ArgMatches) -> Result<()> {
    let json = matches.get_flag("json");
    let engine = load_engine(
        matches.get_one::<PathBuf>("config"),
        matches.get_one::<f64>("axis-length").copied(),
    )?;

    match matches.subcommand() {
        Some(("layout", args)) => {
            let cases = load_cases(args.get_one::<PathBuf>("cases"))?;
            let placed = layout::resolve(&engine, &cases, view_mode(args));
            emit(json, &placed, |p| render::layout(&cases, p))
        }
        Some(("staircase", _)) => {
            let geometry = staircase::synthesize(&engine);
            emit(json, &geometry, render::staircase)
        }
        Some(("contours", _)) => {
            let contours = contours::synthesize(&engine);
            emit(json, &contours, render::contours)
        }
        Some(("ticks", _)) => {
            let reference = axes::build(&engine);
            emit(json, &reference, render::reference)
        }
        Some(("thresholds", _)) => {
            let table = ThresholdTable::new(engine.thresholds());
            emit(json, &table, |t| Ok(t.to_string()))
        }
        Some(("assess", args)) => {
            let cases = load_cases(args.get_one::<PathBuf>("cases"))?;
            let assessments = assessment::assess_all(&engine, &cases, view_mode(args));
            emit(json, &assessments, |a| render::assessments(a))
        }
        Some(("samples", _)) => {
            let set = CaseSet {
                cases: sample_cases(),
            };
            emit(json, &set, |s| render::samples(&s.cases))
        }
        Some((other, _)) => anyhow::bail!("unknown command: {other}"),
        None => anyhow::bail!("no command given"),
    }
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
