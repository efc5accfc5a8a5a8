//! Output dataset and report file writers

use crate::consolidation::ReportLine;
use crate::error::{ReportError, Result};
use csv::Writer;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Write report lines as a BNMCODE,AMTIND,AMOUNT dataset to any writer
pub fn write_lines_to<W: Write>(writer: W, lines: &[ReportLine]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);
    if lines.is_empty() {
        // Keep the header so downstream jobs still see the columns
        csv_writer.write_record(["BNMCODE", "AMTIND", "AMOUNT"])?;
    }
    for line in lines {
        csv_writer.serialize(line)?;
    }
    csv_writer.flush().map_err(|e| ReportError::io("<writer>", e))
}

/// Write report lines to a CSV file, creating parent directories
pub fn write_lines_csv<P: AsRef<Path>>(path: P, lines: &[ReportLine]) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    let file = File::create(path).map_err(|e| ReportError::io(path, e))?;
    write_lines_to(file, lines)
}

/// Write rendered report text, creating parent directories
pub fn write_text<P: AsRef<Path>>(path: P, text: &str) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, text).map_err(|e| ReportError::io(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))
        }
        _ => Ok(()),
    }
}
