#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use std::cell::Cell;
use tradejournal::adapters::memory_store::InMemoryTradeStore;
use tradejournal::domain::error::JournalError;
use tradejournal::domain::filter_registry::Predicate;
use tradejournal::domain::query::{FilterClause, PageRequest};
use tradejournal::domain::sort_registry::TradeOrdering;
pub use tradejournal::domain::trade::{Trade, TradeResult};
use tradejournal::ports::trade_store::TradeStore;

/// Wraps an in-memory store and records how often each port method is hit.
pub struct RecordingStore {
    pub inner: InMemoryTradeStore,
    pub count_calls: Cell<usize>,
    pub find_calls: Cell<usize>,
    pub failure: Option<String>,
}

impl RecordingStore {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self {
            inner: InMemoryTradeStore::new(trades),
            count_calls: Cell::new(0),
            find_calls: Cell::new(0),
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::new(Vec::new())
        }
    }

    fn fail(&self) -> Result<(), JournalError> {
        match &self.failure {
            Some(reason) => Err(JournalError::Database {
                reason: reason.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TradeStore for RecordingStore {
    fn count(&self, filter: &Predicate) -> Result<usize, JournalError> {
        self.count_calls.set(self.count_calls.get() + 1);
        self.fail()?;
        self.inner.count(filter)
    }

    fn find(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<Vec<Trade>, JournalError> {
        self.find_calls.set(self.find_calls.get() + 1);
        self.fail()?;
        self.inner.find(filter, page, ordering)
    }
}

pub fn instant(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
}

pub fn dec(value: i64) -> Decimal {
    Decimal::new(value, 0)
}

pub fn make_trade(id: i64, balance: Option<i64>, size: i64) -> Trade {
    Trade {
        id,
        symbol: format!("SYM{id}"),
        opened: instant(2024, 1, 1) + chrono::Duration::days(id),
        closed: None,
        balance: balance.map(dec),
        size: dec(size),
        result: None,
    }
}

/// Fifteen closed trades: balance `50 * id`, size `(7 * id) % 16` (all distinct).
pub fn fifteen_trades() -> Vec<Trade> {
    (1..=15)
        .map(|id| Trade {
            closed: Some(instant(2024, 3, 1) + chrono::Duration::days(id)),
            result: Some(TradeResult::Win),
            ..make_trade(id, Some(50 * id), (7 * id) % 16)
        })
        .collect()
}

/// Journal with open trades, missing balances and missing results mixed in.
pub fn mixed_trades() -> Vec<Trade> {
    vec![
        Trade {
            closed: Some(instant(2024, 2, 10)),
            result: Some(TradeResult::Loss),
            ..make_trade(1, Some(-80), 4)
        },
        Trade {
            closed: None,
            result: None,
            ..make_trade(2, None, 2)
        },
        Trade {
            closed: Some(instant(2024, 2, 12)),
            result: Some(TradeResult::Win),
            ..make_trade(3, Some(240), 6)
        },
        Trade {
            closed: Some(instant(2024, 2, 15)),
            result: None,
            ..make_trade(4, None, 1)
        },
        Trade {
            closed: None,
            result: Some(TradeResult::BreakEven),
            ..make_trade(5, Some(0), 3)
        },
        Trade {
            closed: Some(instant(2024, 2, 20)),
            result: Some(TradeResult::Mediocre),
            ..make_trade(6, Some(35), 5)
        },
    ]
}

pub fn ids<'a>(trades: impl IntoIterator<Item = &'a Trade>) -> Vec<i64> {
    trades.into_iter().map(|t| t.id).collect()
}

/// Clauses that each pass validation on their own.
pub fn valid_clauses() -> Vec<FilterClause> {
    vec![
        FilterClause::new("Opened", "ge", "2024-01-03"),
        FilterClause::new("Opened", "lt", "2024-01-06T12:00:00Z"),
        FilterClause::new("Closed", "le", "2024-02-14"),
        FilterClause::new("Closed", "ne", "2024-02-12"),
        FilterClause::null("Closed", "eq"),
        FilterClause::null("Closed", "ne"),
        FilterClause::new("Balance", "gt", "0"),
        FilterClause::new("Balance", "eq", "35"),
        FilterClause::null("Balance", "eq"),
        FilterClause::new("Size", "ge", "3"),
        FilterClause::new("Size", "ne", "6"),
        FilterClause::new("Result", "ge", "BreakEven"),
        FilterClause::new("Result", "lt", "win"),
        FilterClause::null("Result", "ne"),
    ]
}
