//! In-process trade store.

use crate::domain::error::JournalError;
use crate::domain::filter_registry::Predicate;
use crate::domain::query::PageRequest;
use crate::domain::sort_registry::TradeOrdering;
use crate::domain::trade::Trade;
use crate::ports::trade_store::TradeStore;

#[derive(Debug, Clone, Default)]
pub struct InMemoryTradeStore {
    trades: Vec<Trade>,
}

impl InMemoryTradeStore {
    pub fn new(trades: Vec<Trade>) -> Self {
        Self { trades }
    }
}

pub fn count_matching(trades: &[Trade], filter: &Predicate) -> usize {
    trades.iter().filter(|t| filter.matches(t)).count()
}

/// Filters, sorts and slices `trades` into the requested page.
pub fn select_page(
    trades: &[Trade],
    filter: &Predicate,
    page: PageRequest,
    ordering: &TradeOrdering,
) -> Vec<Trade> {
    let mut matched: Vec<&Trade> = trades.iter().filter(|t| filter.matches(t)).collect();
    ordering.sort(&mut matched);
    matched
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .cloned()
        .collect()
}

impl TradeStore for InMemoryTradeStore {
    fn count(&self, filter: &Predicate) -> Result<usize, JournalError> {
        Ok(count_matching(&self.trades, filter))
    }

    fn find(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<Vec<Trade>, JournalError> {
        Ok(select_page(&self.trades, filter, page, ordering))
    }
}
