//! createsfz - build SFZ instruments from directories of samples
//!
//! Reads the note, velocity layer and round-robin variation of every sample
//! from its filename and writes an SFZ file mapping them onto the keyboard.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use createsfz::{
    build, default_output_path, parse_root_note, write_document, BuildOptions, Config,
    FilenameFormat, FormatProbe, Mapping, SampleSource,
};

#[derive(Parser)]
#[command(name = "createsfz")]
#[command(author, version, about = "Create SFZ instruments from named audio samples", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path (default: ~/.config/createsfz/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build an SFZ file from a sample directory
    Build(BuildArgs),

    /// Show how well each filename format matches a sample directory
    Probe {
        /// Directory containing the samples
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Only consider filenames containing this text
        #[arg(long)]
        filter: Option<String>,
    },

    /// List the known filename formats
    Formats,

    /// Create a default configuration file
    Init,

    /// Show the configuration file path
    ConfigPath,
}

#[derive(Args)]
struct BuildArgs {
    /// Directory containing the samples
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// Samples to map onto consecutive notes, starting at --root-note
    #[arg(value_name = "SAMPLES")]
    samples: Vec<String>,

    /// Filename format (format1, format2, pianobook); detected when omitted
    #[arg(short, long)]
    format: Option<String>,

    /// Only use filenames containing this text
    #[arg(long)]
    filter: Option<String>,

    /// Output file (default: <sample base name>.sfz)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Map samples to consecutive notes from this note (name like C3, or number)
    #[arg(short, long)]
    root_note: Option<String>,

    /// Extend the lowest note's key range this many keys downwards
    #[arg(long, value_name = "KEYS")]
    low: Option<u8>,

    /// Volume in dB for release trigger regions
    #[arg(long, value_name = "DB", allow_hyphen_values = true)]
    rt_volume: Option<f32>,

    /// Replace the output file if it already exists
    #[arg(long)]
    overwrite: bool,

    /// Print the SFZ file instead of writing it
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Init => {
            let path = Config::create_default_config_file()?;
            println!("Created default config at: {}", path.display());
            Ok(())
        }
        Commands::ConfigPath => {
            let path = Config::config_path()?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Formats => {
            list_formats();
            Ok(())
        }
        Commands::Probe { dir, filter } => {
            let config = load_config(cli.config.as_ref())?;
            run_probe(dir, filter, &config)
        }
        Commands::Build(args) => {
            let config = load_config(cli.config.as_ref())?;
            run_build(args, &config)
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config file: {}", path.display())),
        None => Ok(Config::load_or_default()),
    }
}

fn list_formats() {
    for format in FilenameFormat::ALL {
        let velocities = format.default_velocities();
        println!("{:<10} e.g. {}", format.name(), format.example());
        if !velocities.is_empty() {
            println!("{:<10} velocities: {}", "", velocities.join(", "));
        }
    }
}

fn run_probe(dir: PathBuf, filter: Option<String>, config: &Config) -> Result<()> {
    let source = SampleSource::open(&dir)?;
    let outcome = FormatProbe::new(&config.velocities, filter).run(source.files())?;
    outcome.classification.log_warnings();

    for (format, count) in &outcome.counts {
        let marker = if *format == outcome.format { "*" } else { " " };
        println!("{} {:<10} {} samples", marker, format.name(), count);
    }
    Ok(())
}

fn mapping_for(args: &BuildArgs, config: &Config) -> Result<Mapping> {
    let root_note = match &args.root_note {
        Some(note) => Some(note.clone()),
        None if !args.samples.is_empty() => Some(
            config
                .defaults
                .root_note
                .clone()
                .context("--root-note is required when listing samples explicitly")?,
        ),
        None => None,
    };

    if let Some(root_note) = root_note {
        let root_note = parse_root_note(&root_note)?;
        let samples = (!args.samples.is_empty()).then(|| args.samples.clone());
        return Ok(Mapping::Sequential { root_note, samples });
    }

    let format = match &args.format {
        Some(name) => Some(name.parse::<FilenameFormat>()?),
        None => config.default_format()?,
    };
    Ok(format.map_or(Mapping::Probe, Mapping::Format))
}

fn run_build(args: BuildArgs, config: &Config) -> Result<()> {
    let source = SampleSource::open(&args.dir)?;
    let options = BuildOptions {
        mapping: mapping_for(&args, config)?,
        filter: args.filter.clone(),
        velocities: config.velocities.clone(),
        key_range_low: args.low.unwrap_or(config.defaults.key_range_low),
        release_volume: args.rt_volume.unwrap_or(config.defaults.release_volume),
    };

    let build = build(&source, &options)
        .with_context(|| format!("Failed to build instrument from {}", args.dir.display()))?;

    if args.dry_run {
        print!("{}", build.document.render());
        return Ok(());
    }

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&build.base_name));
    let allow_overwrite = args.overwrite || config.defaults.allow_overwrite;
    write_document(&output, &build.document, allow_overwrite)?;

    let classification = &build.classification;
    if let Some(format) = build.format {
        println!("Format: {}", format);
    }
    println!(
        "{}: {} samples written to {}",
        args.dir.display(),
        classification.used.len(),
        output.display()
    );
    if !classification.skipped.is_empty() {
        println!("Skipped {} files:", classification.skipped.len());
        for skipped in &classification.skipped {
            println!("  {}: {}", skipped.filename, skipped.reason);
        }
    }
    Ok(())
}
