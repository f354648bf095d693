//! Search request and paged result shapes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterClause {
    pub property_name: String,
    pub operator: String,
    pub comparison_value: String,
    #[serde(default)]
    pub is_literal: bool,
}

impl FilterClause {
    pub fn new(property: &str, operator: &str, value: &str) -> Self {
        Self {
            property_name: property.to_string(),
            operator: operator.to_string(),
            comparison_value: value.to_string(),
            is_literal: false,
        }
    }

    /// Clause compared against the null literal.
    pub fn null(property: &str, operator: &str) -> Self {
        Self {
            is_literal: true,
            ..Self::new(property, operator, crate::domain::value_parser::NULL_LITERAL)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortClause {
    pub property: String,
    #[serde(default = "default_ascending")]
    pub ascending: bool,
}

fn default_ascending() -> bool {
    true
}

impl SortClause {
    pub fn asc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            ascending: true,
        }
    }

    pub fn desc(property: &str) -> Self {
        Self {
            property: property.to_string(),
            ascending: false,
        }
    }
}

/// Raw, unvalidated request as deserialized from the caller. Page numbers are
/// signed so out-of-range input survives deserialization and is reported by
/// validation instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
    #[serde(default)]
    pub sort: Vec<SortClause>,
    #[serde(default)]
    pub filter: Vec<FilterClause>,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for SearchRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
            sort: Vec::new(),
            filter: Vec::new(),
        }
    }
}

impl SearchRequest {
    pub fn with_filter(mut self, clause: FilterClause) -> Self {
        self.filter.push(clause);
        self
    }

    pub fn with_sort(mut self, clause: SortClause) -> Self {
        self.sort.push(clause);
        self
    }

    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }
}

/// Validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn offset(&self) -> usize {
        (self.page as usize - 1) * self.page_size as usize
    }

    pub fn limit(&self) -> usize {
        self.page_size as usize
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_count: usize,
    pub page: u32,
    pub page_size: u32,
}

impl<T> Page<T> {
    pub fn empty(request: PageRequest) -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
            page: request.page,
            page_size: request.page_size,
        }
    }
}
