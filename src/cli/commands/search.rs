use crate::cli::args::SearchArgs;
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::output;
use crate::pipeline::Pipeline;
use crate::progress::{messages, ProgressManager, SearchProgress};
use crate::scrape::client::CourtClient;
use crate::store::CaseStore;
use std::sync::Arc;

/// Execute search command
pub async fn execute(args: SearchArgs, format: OutputFormat, verbose: bool) -> Result<()> {
    // Load configuration
    let config = Config::load()?;

    let store = CaseStore::open(config.db_path()?).await?;
    let client = CourtClient::new(config.search.to_client_config());
    let pipeline = Pipeline::new(Box::new(client), store);

    // Machine-readable formats are usually piped; keep the spinner out of
    // their way even on a terminal.
    let quiet = args.quiet || matches!(format, OutputFormat::Json | OutputFormat::Csv);
    let manager = Arc::new(ProgressManager::new(quiet, verbose));
    let progress = SearchProgress::new(manager, &args.term);

    let report = pipeline.run(&args.term).await?;
    progress.finish_and_clear();

    // A failed fetch leaves the archive untouched; surface it as the
    // command's error rather than pretending the run was empty.
    if let Some(err) = report.source_error {
        return Err(err.into());
    }

    match format {
        OutputFormat::Table | OutputFormat::Markdown => {
            if report.fetched() == 0 {
                println!("No cases found for '{}'.", args.term);
                return Ok(());
            }

            println!(
                "{}",
                messages::run_complete(report.written.len(), report.duplicates)
            );

            if !report.written.is_empty() {
                let output = output::format_cases(&report.written, format)?;
                println!("{}", output);
            }
        }
        OutputFormat::Json | OutputFormat::Csv => {
            let output = output::format_cases(&report.written, format)?;
            println!("{}", output);
        }
    }

    Ok(())
}
