use crate::cli::EnumerateArgs;
use crate::config::PartialEnumerationConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use crate::utils::report::{self, CageRow};
use spiralcage::engine::progress::ProgressReporter;
use spiralcage::workflows;
use tracing::{info, warn};

pub fn run(args: EnumerateArgs) -> Result<()> {
    let partial_config = match &args.config {
        Some(path) => PartialEnumerationConfig::from_file(path)?,
        None => PartialEnumerationConfig::default(),
    };
    info!("Merging configuration from file and CLI arguments...");
    let config = partial_config.merge_with_cli(&args)?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Starting {} search...", config.strategy.name());
    info!("Invoking the core enumeration workflow...");
    let result = workflows::enumerate::run(&config, &reporter)?;

    let stats = result.stats;
    println!(
        "Search complete: {} candidate(s), {} accepted, {} duplicate(s), {} invalid, {} mirror image(s).",
        stats.candidates, stats.accepted, stats.duplicates, stats.invalid, stats.enantiomorphs
    );
    if result.stopped_early {
        println!("Note: the acceptance limit was reached before the search space was exhausted.");
    }
    if result.accepted.is_empty() {
        warn!("Search completed but accepted no cages.");
        return Ok(());
    }

    let rows: Vec<CageRow> = result.accepted.iter().map(CageRow::from).collect();
    match &args.output {
        Some(path) => {
            report::write_rows_to_path(path, &rows)?;
            println!("✓ Summary of {} cage(s) written to: {}", rows.len(), path.display());
        }
        None => report::write_rows(std::io::stdout().lock(), &rows)?,
    }
    Ok(())
}
