//! CSV output formatting.

use crate::storage::ScanRecord;
use std::io;

/// Print the open ports of a record as CSV.
pub fn print_csv(record: &ScanRecord) -> io::Result<()> {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    wtr.write_record(["port", "status", "service"])?;
    for result in &record.report.open {
        wtr.write_record([
            result.port.to_string().as_str(),
            &result.outcome.to_string(),
            result.service_label(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
