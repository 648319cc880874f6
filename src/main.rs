use anyhow::Result;
use clap::Parser;
use simplelog::{CombinedLogger, Config, LevelFilter, SharedLogger, TermLogger, WriteLogger};
use splitter::splitter_core::exif::exiftool_available;
use splitter::splitter_core::mediainfo::mediainfo_available;
use splitter::splitter_core::{Cli, LocalFs, OutputFormat, Splitter, SystemMetadata};
use std::fs::File;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize loggers
    let term_level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        term_level,
        Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )];

    if cli.log {
        loggers.push(WriteLogger::new(
            cli.log_level,
            Config::default(),
            File::create("splitter.log")?,
        ));
    }

    CombinedLogger::init(loggers)?;

    if !exiftool_available() {
        log::warn!("exiftool not found; photos and screenshots will be treated as strays");
    }
    if !mediainfo_available() {
        log::warn!("mediainfo not found; videos and screen recordings will be treated as strays");
    }

    let provider = SystemMetadata;
    let splitter = Splitter::new(cli.destinations(), cli.options(), &provider, &LocalFs);
    let outcome = splitter.run(&cli.source)?;

    // Keep stdout parseable when emitting JSON.
    for line in &outcome.diagnostics {
        match cli.output {
            OutputFormat::Text => println!("{}", line),
            OutputFormat::Json => eprintln!("{}", line),
        }
    }

    match cli.output {
        OutputFormat::Text => print!("{}", outcome.report.render_text()),
        OutputFormat::Json => println!("{}", outcome.report.render_json()?),
    }

    if !outcome.failures.is_empty() {
        eprintln!("{} files failed to copy:", outcome.failures.len());
        eprint!("{}", outcome.failures);
    }

    Ok(())
}
