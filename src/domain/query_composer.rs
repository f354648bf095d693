//! Composes validated clauses into a predicate and an ordering.

use crate::domain::error::QueryError;
use crate::domain::filter_registry::{FilterRegistry, Predicate};
use crate::domain::query::{FilterClause, SortClause};
use crate::domain::sort_registry::{SortDirection, SortRegistry, TradeOrdering};

#[derive(Debug, Clone)]
pub struct QueryComposer {
    filters: FilterRegistry,
    sorts: SortRegistry,
    default_sort: Vec<SortClause>,
}

impl QueryComposer {
    pub fn new(default_sort: Vec<SortClause>) -> Self {
        Self {
            filters: FilterRegistry::new(),
            sorts: SortRegistry::new(),
            default_sort,
        }
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    pub fn sorts(&self) -> &SortRegistry {
        &self.sorts
    }

    /// AND of every clause, folded from match-all.
    pub fn compose_filters(&self, clauses: &[FilterClause]) -> Result<Predicate, QueryError> {
        clauses
            .iter()
            .try_fold(Predicate::match_all(), |predicate, clause| {
                let builder = self
                    .filters
                    .find(&clause.property_name, &clause.operator)
                    .ok_or_else(|| QueryError::UnregisteredFilter {
                        property: clause.property_name.clone(),
                        operator: clause.operator.clone(),
                    })?;
                let next = builder.build(&clause.comparison_value, clause.is_literal)?;
                Ok(predicate.and(next))
            })
    }

    /// Keys in clause order; no clauses means the default ordering.
    pub fn compose_sort(&self, clauses: &[SortClause]) -> Result<TradeOrdering, QueryError> {
        let clauses = if clauses.is_empty() {
            self.default_sort.as_slice()
        } else {
            clauses
        };
        let keys = clauses
            .iter()
            .map(|clause| {
                self.sorts
                    .find(&clause.property)
                    .map(|b| b.build(SortDirection::from_ascending(clause.ascending)))
                    .ok_or_else(|| QueryError::UnknownSortProperty {
                        property: clause.property.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(TradeOrdering::new(keys))
    }
}

impl Default for QueryComposer {
    fn default() -> Self {
        Self::new(vec![SortClause::desc("Opened")])
    }
}

/// Parses a sort list such as `Opened:desc, Size:asc`. A missing direction
/// means ascending.
pub fn parse_sort_spec(spec: &str) -> Result<Vec<SortClause>, String> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (property, direction) = match part.split_once(':') {
                Some((p, d)) => (p.trim(), d.trim()),
                None => (part, "asc"),
            };
            if property.is_empty() {
                return Err(format!("missing property in '{part}'"));
            }
            match direction.to_ascii_lowercase().as_str() {
                "asc" => Ok(SortClause::asc(property)),
                "desc" => Ok(SortClause::desc(property)),
                other => Err(format!("invalid sort direction '{other}' in '{part}'")),
            }
        })
        .collect()
}
