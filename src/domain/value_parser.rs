//! Typed parsing of raw comparison values.
//!
//! Every parser understands the null literal: when a clause is marked literal
//! and its value is exactly [`NULL_LITERAL`], the value parses to `None`, but
//! only for nullable properties. Anything else is parsed with the type's own
//! grammar. [`ValueParser::can_parse`] is always equivalent to `parse(..).is_ok()`.

use crate::domain::error::ValueParseError;
use crate::domain::trade::TradeResult;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

pub const NULL_LITERAL: &str = "null";

const NAIVE_DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

pub fn is_null_literal(raw: &str, is_literal: bool) -> bool {
    is_literal && raw == NULL_LITERAL
}

pub trait ValueParser {
    type Value;

    /// `Ok(None)` is the null literal.
    fn parse(&self, raw: &str, is_literal: bool) -> Result<Option<Self::Value>, ValueParseError>;

    fn can_parse(&self, raw: &str, is_literal: bool) -> bool {
        self.parse(raw, is_literal).is_ok()
    }
}

fn parse_with<T>(
    raw: &str,
    is_literal: bool,
    nullable: bool,
    expected: &'static str,
    native: impl FnOnce(&str) -> Option<T>,
) -> Result<Option<T>, ValueParseError> {
    if raw.trim().is_empty() {
        return Err(ValueParseError::Empty);
    }
    if is_null_literal(raw, is_literal) {
        return if nullable {
            Ok(None)
        } else {
            Err(ValueParseError::NullNotAllowed)
        };
    }
    native(raw.trim())
        .map(Some)
        .ok_or_else(|| ValueParseError::Invalid {
            expected,
            raw: raw.to_string(),
        })
}

#[derive(Debug, Clone, Copy)]
pub struct DecimalParser {
    pub nullable: bool,
}

impl ValueParser for DecimalParser {
    type Value = Decimal;

    fn parse(&self, raw: &str, is_literal: bool) -> Result<Option<Decimal>, ValueParseError> {
        parse_with(raw, is_literal, self.nullable, "decimal number", parse_decimal)
    }
}

/// Plain decimal notation: an optional sign, digits and one optional point.
/// Digit separators such as `1_000` are not accepted.
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if s.contains('_') {
        return None;
    }
    Decimal::from_str(s).ok()
}

#[derive(Debug, Clone, Copy)]
pub struct InstantParser {
    pub nullable: bool,
}

impl ValueParser for InstantParser {
    type Value = DateTime<Utc>;

    fn parse(&self, raw: &str, is_literal: bool) -> Result<Option<DateTime<Utc>>, ValueParseError> {
        parse_with(raw, is_literal, self.nullable, "ISO-8601 timestamp", parse_instant)
    }
}

/// RFC 3339 with an offset, a naive date-time read as UTC, or a bare date at
/// midnight UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[derive(Debug, Clone, Copy)]
pub struct ResultParser {
    pub nullable: bool,
}

impl ValueParser for ResultParser {
    type Value = TradeResult;

    fn parse(&self, raw: &str, is_literal: bool) -> Result<Option<TradeResult>, ValueParseError> {
        parse_with(raw, is_literal, self.nullable, "trade result", TradeResult::from_name)
    }
}
