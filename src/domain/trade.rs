//! Trade records and the view returned to callers.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// Outcome of a finished trade, ranked worst to best.
///
/// Relational filters and sorting use [`TradeResult::index`], never the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TradeResult {
    Loss,
    BreakEven,
    Mediocre,
    Win,
}

impl TradeResult {
    pub const ALL: [TradeResult; 4] = [
        TradeResult::Loss,
        TradeResult::BreakEven,
        TradeResult::Mediocre,
        TradeResult::Win,
    ];

    pub fn index(self) -> i32 {
        match self {
            TradeResult::Loss => 0,
            TradeResult::BreakEven => 1,
            TradeResult::Mediocre => 2,
            TradeResult::Win => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TradeResult::Loss => "Loss",
            TradeResult::BreakEven => "BreakEven",
            TradeResult::Mediocre => "Mediocre",
            TradeResult::Win => "Win",
        }
    }

    /// Case-insensitive lookup by variant name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for TradeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: i64,
    pub symbol: String,
    pub opened: DateTime<Utc>,
    pub closed: Option<DateTime<Utc>>,
    pub balance: Option<Decimal>,
    pub size: Decimal,
    pub result: Option<TradeResult>,
}

/// Outward representation of a trade in a search page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeView {
    pub id: i64,
    pub symbol: String,
    pub opened: DateTime<Utc>,
    pub closed: Option<DateTime<Utc>>,
    pub balance: Option<Decimal>,
    pub size: Decimal,
    pub result: Option<TradeResult>,
}

impl From<&Trade> for TradeView {
    fn from(trade: &Trade) -> Self {
        Self {
            id: trade.id,
            symbol: trade.symbol.clone(),
            opened: trade.opened,
            closed: trade.closed,
            balance: trade.balance,
            size: trade.size,
            result: trade.result,
        }
    }
}
