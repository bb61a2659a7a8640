//! Plain text output formatting.
//!
//! Human-readable output with console colors.

use crate::storage::ScanRecord;
use console::style;
use std::io::{self, Write};

const RULE: &str = "───────────────────────────────────────────────────────";
const BANNER: &str = "═══════════════════════════════════════════════════════";

/// Print a record in human-readable form.
pub fn print_plain(record: &ScanRecord) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let report = &record.report;

    writeln!(out)?;
    writeln!(out, "{}", style(BANNER).cyan())?;
    writeln!(out, "              {} Scan Report", style("Sounder").cyan().bold())?;
    writeln!(out, "{}", style(BANNER).cyan())?;
    writeln!(out)?;

    writeln!(out, "  {} {}", style("Target:").bold(), report.target)?;
    if let Some(range) = report.range {
        writeln!(out, "  {} {}", style("Ports:").bold(), range)?;
    }
    writeln!(
        out,
        "  {} {}",
        style("Scan ID:").bold(),
        style(record.id.short()).dim()
    )?;
    writeln!(
        out,
        "  {} {}",
        style("Completed:").bold(),
        report.completed_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  {} {} ports scanned in {:.2}s",
        style("Statistics:").bold(),
        report.total_ports_scanned,
        report.duration_ms as f64 / 1000.0
    )?;
    writeln!(
        out,
        "               {} open, {} closed, {} unreachable",
        style(report.open_count()).green().bold(),
        style(report.closed).red(),
        style(report.unreachable).yellow()
    )?;
    writeln!(out)?;

    if report.open.is_empty() {
        writeln!(out, "  {}", style("No open ports found.").dim())?;
    } else {
        writeln!(out, "  {}", style(RULE).dim())?;
        writeln!(
            out,
            "  {:>6}  {:^10}  {}",
            style("PORT").bold(),
            style("STATE").bold(),
            style("SERVICE").bold()
        )?;
        writeln!(out, "  {}", style(RULE).dim())?;

        for result in &report.open {
            writeln!(
                out,
                "  {:>6}  {:^10}  {}",
                result.port,
                style("open").green().bold(),
                result.service_label()
            )?;
        }

        writeln!(out, "  {}", style(RULE).dim())?;
    }

    writeln!(out)?;
    Ok(())
}

/// Print a scan header before scanning begins.
pub fn print_scan_header(target: &str, ports: usize) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("Sounder").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Target: {}",
        style("•").dim(),
        style(target).white().bold()
    );
    println!(
        "{} Probing {} ports...",
        style("•").dim(),
        style(ports).white().bold()
    );
    println!();
}

/// Print an error message to stderr.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message to stderr.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
