/*!
 * One command-line run: load, select, combine, prefix and export
 */

use std::sync::Arc;
use std::time::Instant;

use indicatif::ProgressBar;
use tracing::{info, warn};

use crate::config::{Config, SelectMode};
use crate::error::{MergeFsError, Result};
use crate::report::{CombineReport, ListingReport};
use crate::scanner::Scanner;
use crate::session::Session;

/// What a run produced
#[derive(Debug)]
pub enum RunOutcome {
    /// Listing only, nothing combined
    Listed(ListingReport),
    /// Document combined and written
    Combined {
        report: CombineReport,
        output: String,
    },
}

/// Load the configured folder into a new session and apply the selection
pub fn load_session(config: &Config) -> Result<Session> {
    let files = Scanner::new(config.clone()).scan()?;

    let mut session = Session::with_options(config.options);
    session.load(files);

    let registry = session.registry_mut();
    match config.select {
        SelectMode::All => registry.select_all(),
        SelectMode::None => registry.select_none(),
        SelectMode::Code => registry.select_code_files(),
    }
    if !config.pick.is_empty() {
        registry.select_matching(&config.pick);
    }

    let stats = session.stats();
    info!(
        total = stats.total,
        selected = stats.selected_count,
        bytes = stats.selected_bytes,
        "Selection ready"
    );
    Ok(session)
}

/// Run the whole pipeline for a configuration
///
/// Returns `EmptySelection` when nothing ended up selected; the caller
/// treats it as a notice.
pub async fn run(config: &Config, progress: Arc<ProgressBar>) -> Result<RunOutcome> {
    let mut session = load_session(config)?;

    if config.list {
        return Ok(RunOutcome::Listed(ListingReport::new(
            session.registry(),
            config.filter,
        )));
    }

    let start_time = Instant::now();
    session.combine_with_progress(progress).await?;

    if let Some(template) = config.prompt {
        session.apply_prompt(template)?;
    }
    if config.project_context {
        session.apply_project_context()?;
    }
    if let Some(request) = &config.custom_prompt {
        session.apply_custom_prompt(request)?;
    }

    session.export(&config.output_file)?;

    if config.clip {
        match session.copy_to_clipboard() {
            Ok(()) => info!("Output copied to clipboard"),
            Err(MergeFsError::Clipboard(e)) => warn!(error = %e, "Failed to copy to clipboard"),
            Err(e) => return Err(e),
        }
    }

    let document = session.document().ok_or(MergeFsError::MissingOutput)?;
    let report = CombineReport::new(
        config.output_file.display().to_string(),
        start_time.elapsed(),
        document,
        session.stats(),
    );

    Ok(RunOutcome::Combined {
        report,
        output: document.text.clone(),
    })
}
