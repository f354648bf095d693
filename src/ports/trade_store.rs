//! Trade storage port trait.

use crate::domain::error::JournalError;
use crate::domain::filter_registry::Predicate;
use crate::domain::query::PageRequest;
use crate::domain::sort_registry::TradeOrdering;
use crate::domain::trade::Trade;

/// Storage collaborator queried by the search orchestrator. Errors are passed
/// through to the caller unchanged.
pub trait TradeStore {
    /// Number of trades matching `filter`.
    fn count(&self, filter: &Predicate) -> Result<usize, JournalError>;

    /// One page of the matching trades, ordered by `ordering`.
    fn find(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<Vec<Trade>, JournalError>;

    /// Total count plus the requested page. The page is only fetched when the
    /// count is non-zero. Stores whose `count` and `find` may observe different
    /// data override this to answer both from one read.
    fn fetch_page(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<(usize, Vec<Trade>), JournalError> {
        let total = self.count(filter)?;
        if total == 0 {
            return Ok((0, Vec::new()));
        }
        Ok((total, self.find(filter, page, ordering)?))
    }
}
