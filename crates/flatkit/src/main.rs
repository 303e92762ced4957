use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use flatkit_io_fs::{RecordCopiedFile, collect_flat, validate_bundle_path, write_bundle};

mod args;

use args::Arguments;

fn main() -> Result<ExitCode> {
    let args = Arguments::parse();
    flatkit_log::init_logging(args.verbose).context("Failed to initialize logger")?;

    let spec_options = args.to_options();
    if let Some(path_bundle) = &args.bundle {
        validate_bundle_path(path_bundle, &args.destination)?;
    }

    println!(
        "Collecting {} files from: {}",
        spec_options.extension,
        args.source.display()
    );
    println!("Destination: {}\n", args.destination.display());

    let report = collect_flat(&args.source, &args.destination, spec_options, print_copied)
        .with_context(|| format!("Collecting from {} failed", args.source.display()))?;
    log::debug!("{report}");

    for spec_error in &report.errors {
        eprintln!(
            "{} {} ({})",
            "Failed:".red().bold(),
            spec_error.path.display(),
            spec_error.exception
        );
    }
    for warning in &report.warnings {
        log::warn!("{warning}");
    }

    if let Some(path_bundle) = &args.bundle {
        let timestamp = chrono::Local::now().fixed_offset();
        let n_bundled = write_bundle(
            &report.records,
            &args.source,
            &args.destination,
            path_bundle,
            &timestamp,
        )?;
        println!("Bundle: {} ({n_bundled} files)", path_bundle.display());
    }

    println!(
        "\n{} {} files ready in '{}'.",
        "Done!".green().bold(),
        report.cnt_copied,
        args.destination.display()
    );

    if report.error_count() > 0 {
        eprintln!("{} files could not be copied.", report.error_count());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn print_copied(record: &RecordCopiedFile) {
    println!("{} {}", "Copied:".green(), record.name_resolved());
}
