//! musicbox CLI — render a MIDI song as printable music box strips.

use clap::Parser;
use musicbox::{
    load_events, DirectiveLog, MusicBoxProfile, PageSetup, SongHeader, StripDocument,
};
use std::path::PathBuf;
use std::process::ExitCode;

/// Render a MIDI song as printable paper strips for a music box
#[derive(Parser)]
#[command(name = "musicbox")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input song (.mid, or .json with pre-parsed note events)
    input: PathBuf,

    /// Music box profile (JSON)
    #[arg(short, long)]
    profile: PathBuf,

    /// Output SVG file (default: input name with .svg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Song title printed on the first strip
    #[arg(long, default_value = "NO-TITLE")]
    title: String,

    /// Song author printed on the first strip
    #[arg(long, default_value = "NO-AUTHOR")]
    author: String,

    /// Page setup (JSON); unspecified fields keep their defaults
    #[arg(long)]
    page: Option<PathBuf>,

    /// Vertical gap between strips, overriding the page setup
    #[arg(long)]
    separation: Option<f64>,

    /// Lay out without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Print the generation report as JSON
    #[arg(long)]
    report: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn run(cli: Cli) -> musicbox::Result<()> {
    let profile = MusicBoxProfile::load(&cli.profile)?;
    log::info!("Loaded profile:\n{}", profile);

    let mut setup = match &cli.page {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => PageSetup::default(),
    };
    if let Some(separation) = cli.separation {
        setup.strip_separation = separation;
    }

    let events = load_events(&cli.input)?;
    let header = SongHeader {
        title: cli.title,
        author: cli.author,
    };
    let output = cli
        .output
        .unwrap_or_else(|| cli.input.with_extension("svg"));

    let report = if cli.dry_run {
        StripDocument::new(profile, setup, DirectiveLog::new()).generate(events, &header, &output)?
    } else {
        StripDocument::svg(profile, setup).generate(events, &header, &output)?
    };

    if cli.report {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        eprintln!(
            "{} strips on {} pages, {} notes placed, {} dropped",
            report.strips,
            report.pages,
            report.placed_notes,
            report.dropped.total()
        );
        if !cli.dry_run {
            eprintln!("Wrote {}", output.display());
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
