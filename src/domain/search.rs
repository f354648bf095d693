//! Trade search orchestration.
//!
//! `validate -> compose predicate -> compose ordering -> count -> find -> map`.
//! A zero count returns an empty page without asking the store for items
//! (see [`TradeStore::fetch_page`]).

use crate::domain::config_validation::{validate_search_config, DEFAULT_MAX_PAGE_SIZE, DEFAULT_SORT};
use crate::domain::error::{JournalError, QueryError};
use crate::domain::query::{Page, SearchRequest, SortClause};
use crate::domain::query_composer::{parse_sort_spec, QueryComposer};
use crate::domain::query_validation::validate_request;
use crate::domain::trade::TradeView;
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_store::TradeStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_page_size: u32,
    pub default_sort: Vec<SortClause>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE as u32,
            default_sort: vec![SortClause::desc("Opened")],
        }
    }
}

impl SearchSettings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, JournalError> {
        validate_search_config(config)?;

        let max_page_size = config.get_int("search", "max_page_size", DEFAULT_MAX_PAGE_SIZE);
        let spec = config
            .get_string("search", "default_sort")
            .unwrap_or_else(|| DEFAULT_SORT.to_string());
        let default_sort = parse_sort_spec(&spec).map_err(|reason| JournalError::ConfigInvalid {
            section: "search".into(),
            key: "default_sort".into(),
            reason,
        })?;

        Ok(Self {
            max_page_size: u32::try_from(max_page_size).map_err(|_| JournalError::ConfigInvalid {
                section: "search".into(),
                key: "max_page_size".into(),
                reason: "max_page_size is out of range".into(),
            })?,
            default_sort,
        })
    }
}

/// Search entry point. Holds the registries, built once; `Send + Sync` and
/// cheap to share between concurrent requests.
#[derive(Debug, Clone)]
pub struct TradeSearch {
    composer: QueryComposer,
    max_page_size: u32,
}

impl TradeSearch {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            composer: QueryComposer::new(settings.default_sort),
            max_page_size: settings.max_page_size,
        }
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }

    pub fn search(
        &self,
        store: &dyn TradeStore,
        request: &SearchRequest,
    ) -> Result<Page<TradeView>, JournalError> {
        let page = validate_request(request, self.composer.sorts(), self.max_page_size)
            .inspect_err(|errors| tracing::warn!(%errors, "rejected trade search"))?;

        let predicate = self
            .composer
            .compose_filters(&request.filter)
            .inspect_err(log_internal)?;
        let ordering = self
            .composer
            .compose_sort(&request.sort)
            .inspect_err(log_internal)?;

        tracing::debug!(
            filters = request.filter.len(),
            %ordering,
            page = page.page,
            page_size = page.page_size,
            "searching trades"
        );

        let (total_count, trades) = store.fetch_page(&predicate, page, &ordering)?;
        if total_count == 0 {
            return Ok(Page::empty(page));
        }

        Ok(Page {
            items: trades.iter().map(TradeView::from).collect(),
            total_count,
            page: page.page,
            page_size: page.page_size,
        })
    }
}

impl Default for TradeSearch {
    fn default() -> Self {
        Self::new(SearchSettings::default())
    }
}

fn log_internal(err: &QueryError) {
    tracing::error!(error = %err, "validated search request could not be composed");
}
