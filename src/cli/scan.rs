//! Scan subcommand implementation.

use crate::cli::OutputFormat;
use crate::config::AppSettings;
use crate::dispatch::scan_progress_bar;
use crate::error::{CliError, CliResult};
use crate::output;
use crate::session::ScanSession;
use crate::storage::{ReportStore, ScanRecord};
use crate::types::PortSpec;
use clap::Parser;
use std::time::Duration;

/// Scan a target for open ports.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Target to scan (IP address or hostname)
    #[arg(value_name = "TARGET")]
    pub target: String,

    /// Ports to scan, e.g. "80", "79-82", "22,80,8000-9000"
    /// (default from settings, initially 1-1000)
    #[arg(short, long)]
    pub ports: Option<String>,

    /// Maximum number of concurrent probes
    #[arg(short = 'c', long)]
    pub concurrency: Option<usize>,

    /// Per-probe connection timeout in milliseconds
    #[arg(short = 't', long)]
    pub timeout: Option<u64>,

    /// Output format for results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,

    /// Don't persist the scan report
    #[arg(long)]
    pub no_save: bool,
}

impl ScanCommand {
    /// Execute the scan command.
    pub async fn execute(&self, verbose: bool, quiet: bool) -> CliResult<()> {
        let settings = AppSettings::load_or_default();

        let ports_str = self.ports.as_deref().unwrap_or(&settings.default_ports);
        let spec: PortSpec = ports_str.parse()?;
        let ports = spec.ports();
        if ports.is_empty() {
            return Err(CliError::Other("no ports to scan".to_string()));
        }

        let concurrency = self.concurrency.unwrap_or(settings.default_concurrency);
        let timeout_ms = self.timeout.unwrap_or(settings.default_timeout_ms);

        if !quiet && self.output == OutputFormat::Plain {
            output::print_scan_header(&self.target, ports.len());
        }

        let mut session = ScanSession::new()
            .with_concurrency(concurrency)
            .with_timeout(Duration::from_millis(timeout_ms));

        // Progress bars and JSON/CSV output don't mix.
        if verbose && !quiet && self.output == OutputFormat::Plain {
            session = session.with_progress(scan_progress_bar(ports.len()));
        }

        let report = session.run(&self.target, &ports).await?;
        let record = ScanRecord::new(report);

        if !self.no_save {
            let store = ReportStore::new()?;
            store.save(&record)?;
            if !quiet && self.output == OutputFormat::Plain {
                output::print_info(&format!("Scan saved as {}", record.id.short()));
            }
        }

        output::print_results(&record, self.output)?;
        Ok(())
    }
}
