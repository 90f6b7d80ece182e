//! Delimited numeric tables for final strategies.
//!
//! One line per source element, comma-separated, every value written as
//! `%.18e` (`1.000000000000000000e+00`). Nineteen significant digits make the
//! round trip through [`read_strategy`] exact, and the output is byte-stable
//! for identical inputs.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use nalgebra::DMatrix;

use crate::error::{Error, Result};
use crate::strategy::{ReceiverStrategy, SenderStrategy};

pub const DELIMITER: char = ',';

/// `%.18e` with a signed, at least two-digit exponent.
pub fn format_value(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".to_string() } else { "-inf".to_string() };
    }
    let s = format!("{x:.18e}");
    match s.split_once('e').and_then(|(m, e)| e.parse::<i32>().ok().map(|e| (m, e))) {
        Some((mantissa, exp)) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

pub fn write_strategy<W: Write>(mut writer: W, matrix: &DMatrix<f64>) -> Result<()> {
    for row in matrix.row_iter() {
        let line: Vec<String> = row.iter().map(|&x| format_value(x)).collect();
        writeln!(writer, "{}", line.join(&DELIMITER.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_strategy_file(path: impl AsRef<Path>, matrix: &DMatrix<f64>) -> Result<()> {
    write_strategy(BufWriter::new(File::create(path)?), matrix)
}

/// Parse a table written by [`write_strategy`]. Blank lines are skipped.
pub fn read_strategy<R: BufRead>(reader: R) -> Result<DMatrix<f64>> {
    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row = line
            .split(DELIMITER)
            .map(|field| {
                field.trim().parse::<f64>().map_err(|e| Error::Parse {
                    line: i + 1,
                    message: format!("`{}`: {e}", field.trim()),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(Error::Parse {
                    line: i + 1,
                    message: format!("expected {} columns, found {}", first.len(), row.len()),
                });
            }
        }
        rows.push(row);
    }
    let cols = rows.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(Error::Parse { line: 1, message: "empty table".to_string() });
    }
    Ok(DMatrix::from_row_iterator(rows.len(), cols, rows.into_iter().flatten()))
}

pub fn read_strategy_file(path: impl AsRef<Path>) -> Result<DMatrix<f64>> {
    read_strategy(BufReader::new(File::open(path)?))
}

/// `%Y%m%d-%H%M%S` stamp used as the output prefix when none is given.
pub fn timestamp_prefix(at: &NaiveDateTime) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

/// Write `<prefix>-sender.csv` and `<prefix>-receiver.csv`.
pub fn export_strategies(
    prefix: &str,
    sender: &SenderStrategy,
    receiver: &ReceiverStrategy,
) -> Result<(PathBuf, PathBuf)> {
    let sender_path = PathBuf::from(format!("{prefix}-sender.csv"));
    let receiver_path = PathBuf::from(format!("{prefix}-receiver.csv"));
    write_strategy_file(&sender_path, sender.values())?;
    write_strategy_file(&receiver_path, receiver.values())?;
    Ok((sender_path, receiver_path))
}
