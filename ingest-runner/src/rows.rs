//! Input table reader
//!
//! Reads the CSV listing the files to upload. Expected header:
//! `filepath,orderId,orderItemId,make,model,serial,nNumber`.

use anyhow::{Context, Result};
use ingest_core::domain::row::UploadRow;
use std::io::Read;
use std::path::Path;

/// Reads every row of the CSV at `path`, in file order
pub fn read_rows(path: &Path) -> Result<Vec<UploadRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open input table {}", path.display()))?;

    read_rows_from(file).with_context(|| format!("Failed to read input table {}", path.display()))
}

/// Reads rows from any CSV source
pub fn read_rows_from<R: Read>(reader: R) -> Result<Vec<UploadRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in reader.deserialize::<UploadRow>().enumerate() {
        let row = match record {
            Ok(row) => row,
            Err(err) => {
                // Quoted fields may span lines, so prefer the reader's position
                let line = err
                    .position()
                    .map(csv::Position::line)
                    .unwrap_or(index as u64 + 2);
                return Err(err).with_context(|| format!("Invalid record on line {}", line));
            }
        };
        rows.push(row);
    }

    Ok(rows)
}
