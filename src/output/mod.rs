//! Output formatting for scan results.
//!
//! Renderers over a persisted `ScanRecord`: plain text for humans, JSON and
//! CSV for machines.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::print_csv;
pub use json_format::print_json;
pub use plain::{print_error, print_info, print_plain, print_scan_header, print_warning};

use crate::cli::OutputFormat;
use crate::storage::ScanRecord;
use std::io;

/// Print a record in the requested format.
pub fn print_results(record: &ScanRecord, format: OutputFormat) -> io::Result<()> {
    match format {
        OutputFormat::Plain => plain::print_plain(record),
        OutputFormat::Json => json_format::print_json(record),
        OutputFormat::Csv => csv_format::print_csv(record),
    }
}
