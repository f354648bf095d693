//! CSV journal export reader.
//!
//! Expected header: `id,symbol,opened,closed,balance,size,result`. Empty
//! `closed`, `balance` and `result` cells are read as null.

use crate::domain::error::JournalError;
use crate::domain::trade::{Trade, TradeResult};
use crate::domain::value_parser::{parse_decimal, parse_instant};
use std::fs;
use std::path::Path;

pub fn read_trades<P: AsRef<Path>>(path: P) -> Result<Vec<Trade>, JournalError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| JournalError::TradeImport {
        record: 0,
        reason: format!("failed to read {}: {}", path.display(), e),
    })?;
    parse_trades(&content)
}

pub fn parse_trades(content: &str) -> Result<Vec<Trade>, JournalError> {
    let mut rdr = csv::Reader::from_reader(content.as_bytes());
    let mut trades = Vec::new();

    for (i, result) in rdr.records().enumerate() {
        let record_no = i + 1;
        let record = result.map_err(|e| JournalError::TradeImport {
            record: record_no,
            reason: format!("CSV parse error: {}", e),
        })?;

        let id_str = cell(&record, record_no, 0, "id")?;
        let id: i64 = id_str.parse().map_err(|_| invalid(record_no, "id", id_str))?;

        let symbol = cell(&record, record_no, 1, "symbol")?.to_string();

        let opened_str = cell(&record, record_no, 2, "opened")?;
        let opened =
            parse_instant(opened_str).ok_or_else(|| invalid(record_no, "opened", opened_str))?;

        let closed = optional(cell(&record, record_no, 3, "closed")?, parse_instant)
            .map_err(|v| invalid(record_no, "closed", v))?;

        let balance = optional(cell(&record, record_no, 4, "balance")?, parse_decimal)
            .map_err(|v| invalid(record_no, "balance", v))?;

        let size_str = cell(&record, record_no, 5, "size")?;
        let size = parse_decimal(size_str).ok_or_else(|| invalid(record_no, "size", size_str))?;

        let result = optional(cell(&record, record_no, 6, "result")?, TradeResult::from_name)
            .map_err(|v| invalid(record_no, "result", v))?;

        trades.push(Trade {
            id,
            symbol,
            opened,
            closed,
            balance,
            size,
            result,
        });
    }

    Ok(trades)
}

fn cell<'r>(
    record: &'r csv::StringRecord,
    record_no: usize,
    index: usize,
    name: &str,
) -> Result<&'r str, JournalError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| JournalError::TradeImport {
            record: record_no,
            reason: format!("missing {} column", name),
        })
}

fn invalid(record_no: usize, name: &str, value: &str) -> JournalError {
    JournalError::TradeImport {
        record: record_no,
        reason: format!("invalid {} value '{}'", name, value),
    }
}

/// Empty cell is `None`; a non-empty cell that does not parse returns it as
/// the error.
fn optional<T>(value: &str, parse: impl FnOnce(&str) -> Option<T>) -> Result<Option<T>, &str> {
    if value.is_empty() {
        return Ok(None);
    }
    parse(value).map(Some).ok_or(value)
}
