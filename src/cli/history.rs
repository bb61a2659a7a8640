//! History subcommand implementation.

use crate::error::CliResult;
use crate::output;
use crate::storage::ReportStore;
use clap::Parser;
use console::style;

/// View and manage stored scan reports.
#[derive(Parser, Debug)]
pub struct HistoryCommand {
    /// Number of recent scans to show
    #[arg(short = 'n', long, default_value = "10")]
    pub count: usize,

    /// Show the full report for a scan ID (or unique prefix)
    #[arg(long, value_name = "ID")]
    pub show: Option<String>,

    /// Clear all scan history
    #[arg(long)]
    pub clear: bool,

    /// Delete scans older than N days
    #[arg(long, value_name = "DAYS")]
    pub prune: Option<u32>,
}

impl HistoryCommand {
    /// Execute the history command.
    pub fn execute(&self, quiet: bool) -> CliResult<()> {
        let store = ReportStore::new()?;

        if self.clear {
            let removed = store.clear()?;
            if !quiet {
                output::print_info(&format!("Removed {} stored scans", removed));
            }
            return Ok(());
        }

        if let Some(days) = self.prune {
            let removed = store.prune(chrono::Duration::days(i64::from(days)))?;
            if !quiet {
                output::print_info(&format!("Pruned {} scans older than {} days", removed, days));
            }
            return Ok(());
        }

        if let Some(prefix) = &self.show {
            let record = store.find_by_prefix(prefix)?;
            output::print_plain(&record)?;
            return Ok(());
        }

        let records = store.list_recent(self.count)?;
        if records.is_empty() {
            println!("No stored scans.");
            return Ok(());
        }

        for record in records {
            println!(
                "{}  {}",
                style(record.id.short()).dim(),
                record.report.summary()
            );
        }
        Ok(())
    }
}
