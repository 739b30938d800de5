//! Register Log Annotator CLI Application
//!
//! Command-line front end for the reg-log-decoder library. It adds:
//! - Argument parsing and logging setup
//! - Optional TOML configuration
//! - Console dump of the parsed header model
//! - JSON run reports

use anyhow::{Context, Result};
use clap::Parser;
use reg_log_decoder::Decoder;
use std::path::PathBuf;

mod config;
mod report;

/// Convert logs which print register values to the macro names
#[derive(Parser, Debug)]
#[command(name = "reg-log-cli")]
#[command(about = "Convert logs which print register values to the macro names", long_about = None)]
#[command(version)]
struct Args {
    /// Path to the log file
    #[arg(value_name = "LOGFILE")]
    logfile: PathBuf,

    /// Path to the header file containing #defines (literals, BIT() and GENMASK())
    #[arg(value_name = "HEADER")]
    header: PathBuf,

    /// Path to the processed output file
    #[arg(value_name = "OUTFILE")]
    outfile: PathBuf,

    /// Path to configuration file (config.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Write a JSON run report to this file
    #[arg(long, value_name = "FILE")]
    report: Option<PathBuf>,

    /// Do not print the parsed header model
    #[arg(long)]
    no_model: bool,

    /// Verbosity level (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize logging
    init_logging(args.verbose, args.quiet);

    log::info!("Register Log Annotator v{}", env!("CARGO_PKG_VERSION"));
    log::info!("Using decoder library v{}", reg_log_decoder::VERSION);

    let app_config = match &args.config {
        Some(path) => {
            log::info!("Loading configuration from: {:?}", path);
            config::load_config(path)?
        }
        None => config::AppConfig::default(),
    };

    let plan = plan_output(&args, &app_config.output);

    let mut decoder =
        Decoder::with_config(app_config.decoder).context("Invalid decoder configuration")?;
    log::debug!("Decoder configuration: {:?}", decoder.config());

    decoder
        .load_header(&args.header)
        .with_context(|| format!("Failed to load header file: {:?}", args.header))?;

    if plan.print_model {
        for register in decoder.model().registers() {
            println!("{}", register);
        }
    }

    let stats = decoder
        .rewrite_file(&args.logfile, &args.outfile)
        .with_context(|| {
            format!(
                "Failed to rewrite {:?} into {:?}",
                args.logfile, args.outfile
            )
        })?;

    if let Some(report_path) = &plan.report {
        report::RunReport::new(
            &args.logfile,
            &args.header,
            &args.outfile,
            decoder.model().registers(),
            decoder.model_stats(),
            stats,
        )
        .write(report_path)?;
    }

    if plan.print_summary {
        println!("\n\nDONE!\nProcessed logs written to '{}'", args.outfile.display());
        println!("  {}", stats);
    }

    Ok(())
}

/// What a run prints and writes besides the output file
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputPlan {
    /// Dump every parsed register before rewriting
    print_model: bool,
    /// Print the completion message and line totals
    print_summary: bool,
    report: Option<PathBuf>,
}

/// Merge the `[output]` config table with command line flags.
///
/// `--no-model` and `--report` override the file; `-q` silences stdout.
fn plan_output(args: &Args, output: &config::OutputConfig) -> OutputPlan {
    OutputPlan {
        print_model: output.print_model && !args.no_model && !args.quiet,
        print_summary: !args.quiet,
        report: args.report.clone().or_else(|| output.report.clone()),
    }
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, quiet: bool) {
    use env_logger::Builder;
    use log::LevelFilter;
    use std::io::Write;

    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    Builder::new()
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}] {}",
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}
