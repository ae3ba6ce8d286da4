//! chordcli - name the chord implied by sounding notes
//!
//! Subcommands:
//! - `chordcli listen` - read note events from stdin, print a label per accepted event
//! - `chordcli replay <file.mid>` - run a MIDI file through the engine
//! - `chordcli name <notes..>` - name a set of pitch classes once
//! - `chordcli tables` - build the chord tables and report defects
//! - `chordcli config` - print the effective configuration

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chord_finder::{
    parse_note_name, ChordEngine, ChordReport, ChordTables, EngineConfig, PitchClassSet, Spelling,
};
use chordconf::{ChordConfig, ConfigSources};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod protocol;
mod replay;

#[derive(Parser, Debug)]
#[command(name = "chordcli")]
#[command(about = "Name the chord implied by the notes currently sounding")]
#[command(version)]
struct Cli {
    /// Config file, used in place of ./chordfinder.toml
    #[arg(long, global = true, env = "CHORDFINDER_CONFIG")]
    config: Option<PathBuf>,

    /// Lowest pitch tracked
    #[arg(long, global = true)]
    lower: Option<u8>,

    /// Highest pitch tracked (0 means 128)
    #[arg(long, global = true)]
    upper: Option<u8>,

    /// Label printed when no notes sound
    #[arg(long, global = true)]
    default_chord: Option<String>,

    /// Spell black-key roots with sharps
    #[arg(long, global = true)]
    sharps: bool,

    /// Print JSON reports instead of labels
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read note events from stdin, one per line
    Listen,

    /// Replay note events from a Standard MIDI File
    Replay {
        /// Path to a .mid file
        file: PathBuf,

        /// Only use events on this channel (0-15)
        #[arg(short, long)]
        channel: Option<u8>,
    },

    /// Name a set of notes, given as names (C, Eb, F#) or numbers
    Name {
        #[arg(required = true)]
        notes: Vec<String>,
    },

    /// Build the chord tables and report their coverage and defects
    Tables,

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (config, sources) = ChordConfig::load_with_sources_from(cli.config.as_deref())
        .context("loading configuration")?;

    init_tracing(&config.telemetry.log_level);
    debug!(files = ?sources.files, env = ?sources.env_overrides, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Listen => {
            let mut engine = build_engine(&cli, &config)?;
            let stdin = io::stdin();
            let emitted = protocol::run(&mut engine, stdin.lock(), &mut out, cli.json)?;
            info!(emitted, "input closed");
        }
        Commands::Replay { file, channel } => {
            if channel.is_some_and(|c| c > 15) {
                bail!("channel must be between 0 and 15");
            }
            let mut engine = build_engine(&cli, &config)?;
            replay::replay_file(&mut engine, file, *channel, &mut out, cli.json)?;
        }
        Commands::Name { notes } => {
            let engine = build_engine(&cli, &config)?;
            let mut set = PitchClassSet::new();
            for note in notes {
                set.insert(parse_note_name(note)?);
            }
            write_report(&mut out, &engine.classify_set(&set), cli.json)?;
        }
        Commands::Tables => print_tables(&mut out)?,
        Commands::Config => print_config(&mut out, &cli, &config, &sources)?,
    }

    Ok(())
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file and environment values, overridden by flags.
fn engine_config(cli: &Cli, config: &ChordConfig) -> Result<EngineConfig> {
    let spelling = if cli.sharps {
        Spelling::Sharp
    } else {
        config
            .engine
            .spelling
            .parse()
            .context("engine.spelling")?
    };

    Ok(EngineConfig {
        lower_limit: cli.lower.unwrap_or(config.engine.lower_limit),
        upper_limit: cli.upper.unwrap_or(config.engine.upper_limit),
        default_chord_name: cli
            .default_chord
            .clone()
            .unwrap_or_else(|| config.engine.default_chord.clone()),
        spelling,
    })
}

fn build_engine(cli: &Cli, config: &ChordConfig) -> Result<ChordEngine> {
    let engine_config = engine_config(cli, config)?;
    let range = engine_config.range();
    let engine = ChordEngine::new(engine_config).context("invalid engine configuration")?;
    info!(lower = range.lower, upper = range.upper, "engine ready");
    Ok(engine)
}

pub(crate) fn write_report<W: Write>(out: &mut W, report: &ChordReport, json: bool) -> Result<()> {
    if json {
        writeln!(out, "{}", serde_json::to_string(report)?)?;
    } else {
        writeln!(out, "{}", report.label)?;
    }
    Ok(())
}

fn print_tables<W: Write>(out: &mut W) -> Result<()> {
    let tables = ChordTables::build();
    for stats in tables.stats() {
        writeln!(
            out,
            "{}-note table: {} of {} cells assigned",
            stats.arity, stats.assigned, stats.cells
        )?;
    }

    let defects = tables.defects();
    if defects.is_empty() {
        writeln!(out, "no defects")?;
        return Ok(());
    }
    for defect in defects {
        eprintln!("defect: {}", defect);
    }
    bail!("{} chord table defect(s)", defects.len());
}

fn print_config<W: Write>(
    out: &mut W,
    cli: &Cli,
    config: &ChordConfig,
    sources: &ConfigSources,
) -> Result<()> {
    let mut effective = config.clone();
    let engine = engine_config(cli, config)?;
    effective.engine.lower_limit = engine.lower_limit;
    effective.engine.upper_limit = engine.upper_limit;
    effective.engine.default_chord = engine.default_chord_name;
    effective.engine.spelling = engine.spelling.to_string();

    for file in &sources.files {
        writeln!(out, "# file: {}", file.display())?;
    }
    for var in &sources.env_overrides {
        writeln!(out, "# env: {}", var)?;
    }
    write!(out, "{}", effective.to_toml())?;
    Ok(())
}
