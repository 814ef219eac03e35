use clap::Parser;
use log::{error, info, warn};
use std::process;
use tagcat_core::cli::discover::collect_dump_files;
use tagcat_core::cli::report::render;
use tagcat_core::cli::Cli;
use tagcat_core::{BatchDriver, DumpSource, TagDumpExtractor};

fn main() {
    let cli = Cli::parse();

    // Setup logging
    setup_logging(cli.verbose);

    // Verify directory exists
    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    let config = match cli.extractor_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Processing directory: {}", cli.directory.display());

    let files = match collect_dump_files(&cli.directory, &cli.ext) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    if files.is_empty() {
        eprintln!("Error: No '.{}' files found in directory", cli.ext);
        process::exit(1);
    }

    info!("Found {} '.{}' files", files.len(), cli.ext);

    // Read every file up front; unreadable files never reach the driver
    let mut sources = Vec::with_capacity(files.len());
    let mut unreadable = 0usize;
    for path in &files {
        match DumpSource::from_file(path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                warn!("Skipping {}", e);
                unreadable += 1;
            }
        }
    }

    let driver = BatchDriver::new(TagDumpExtractor::new(config));
    let outcome = if cli.parallel {
        driver.run_parallel(&sources)
    } else {
        driver.run(&sources)
    };

    if unreadable > 0 {
        warn!("{} files could not be read", unreadable);
    }
    if outcome.summary.skipped > 0 {
        info!(
            "{} files skipped - unrecognized format",
            outcome.summary.skipped
        );
    }

    if outcome.table.is_empty() {
        eprintln!("Error: No FUJI or DCMTK tag dumps found");
        process::exit(1);
    }

    let report = match render(&outcome, &cli.format) {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to render report: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(e) = std::fs::write(path, report) {
                error!("Failed to write {}: {}", path.display(), e);
                eprintln!("Error: Failed to write {}: {}", path.display(), e);
                process::exit(1);
            }
            info!("Report written to {}", path.display());
        }
        None => print!("{}", report),
    }
}

fn setup_logging(verbose: bool) {
    let directives = std::env::var("RUST_LOG").ok();
    logging_builder(verbose, directives.as_deref()).init();
}

/// Info level, Debug under `--verbose`; `RUST_LOG` directives take precedence
fn logging_builder(verbose: bool, directives: Option<&str>) -> env_logger::Builder {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Some(directives) = directives {
        builder.parse_filters(directives);
    }
    builder
}
