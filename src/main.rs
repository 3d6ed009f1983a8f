/*!
 * Command-line interface for MergeFS
 */

use std::io;
use std::sync::Arc;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use mergefs::app::{run, RunOutcome};
use mergefs::config::{Args, Config};
use mergefs::report::Reporter;

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn progress_bar(quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(0);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} {prefix:.bold.cyan} {wide_msg:.dim.white} {pos}/{len} ({percent}%) ⏱️  Elapsed: {elapsed_precise}")
    {
        progress.set_style(style);
    }
    progress.enable_steady_tick(Duration::from_millis(100));
    progress.set_prefix("📊 Combining");
    progress
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    if let Some(shell) = args.generate {
        clap_complete::generate(shell, &mut Args::command(), "mergefs", &mut io::stdout());
        return Ok(());
    }

    init_logging(args.verbose);

    let config = Config::from_args(args);
    config.validate()?;

    let progress = progress_bar(config.quiet);
    let outcome = run(&config, Arc::new(progress.clone())).await;
    progress.finish_and_clear();

    let reporter = Reporter::new(config.report);
    match outcome {
        Ok(RunOutcome::Listed(listing)) => {
            println!("{}", reporter.render_listing(&listing)?);
        }
        Ok(RunOutcome::Combined { report, output }) => {
            if config.stdout {
                print!("{}", output);
            }
            if !config.quiet {
                eprintln!("\n{}", reporter.render_combine(&report)?);
            }
        }
        Err(e) if e.is_notice() => {
            eprintln!("⚠️  {}", e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
