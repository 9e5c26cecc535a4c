//! CSV export of selected clients

use anyhow::Result;
use balance_core::Record;
use balance_core::records::decimal_text;
use balance_core::render::ColumnHeaders;
use csv::Writer;
use std::io::Write;
use std::path::Path;

/// Write `records` to a CSV file at `path`
pub fn export_csv(path: &Path, records: &[&Record], headers: &ColumnHeaders) -> Result<()> {
    let wtr = Writer::from_path(path)?;
    write_records(wtr, records, headers)?;
    println!("  Exported {} client(s) to {}", records.len(), path.display());
    Ok(())
}

/// Write the header row and one row per record. Balances are plain numbers.
fn write_records<W: Write>(mut wtr: Writer<W>, records: &[&Record], headers: &ColumnHeaders) -> Result<()> {
    wtr.write_record([&headers.id, &headers.name, &headers.agent, &headers.balance])?;

    for record in records {
        let balance = record.balance.map(decimal_text).unwrap_or_default();
        wtr.write_record([
            record.id.as_str(),
            record.name.as_deref().unwrap_or(""),
            record.agent_display.as_str(),
            balance.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
