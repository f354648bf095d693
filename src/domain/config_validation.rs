//! Configuration validation.
//!
//! Checks the `[search]` and `[sqlite]` sections before anything is built from
//! them.

use crate::domain::error::JournalError;
use crate::domain::query_composer::parse_sort_spec;
use crate::domain::sort_registry::SortRegistry;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MAX_PAGE_SIZE: i64 = 100;
pub const DEFAULT_SORT: &str = "Opened:desc";
pub const DEFAULT_POOL_SIZE: i64 = 4;

pub fn validate_search_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_max_page_size(config)?;
    validate_default_sort(config)?;
    Ok(())
}

pub fn validate_sqlite_config(config: &dyn ConfigPort) -> Result<(), JournalError> {
    validate_sqlite_path(config)?;
    validate_pool_size(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> JournalError {
    JournalError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn validate_max_page_size(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let value = config.get_int("search", "max_page_size", DEFAULT_MAX_PAGE_SIZE);
    if value < 1 || value > i64::from(u32::MAX) {
        return Err(invalid(
            "search",
            "max_page_size",
            "max_page_size must be a positive integer",
        ));
    }
    Ok(())
}

fn validate_default_sort(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let spec = config
        .get_string("search", "default_sort")
        .unwrap_or_else(|| DEFAULT_SORT.to_string());
    let clauses = parse_sort_spec(&spec).map_err(|reason| invalid("search", "default_sort", reason))?;

    let sorts = SortRegistry::new();
    if let Some(unknown) = clauses.iter().find(|c| !sorts.matches(&c.property)) {
        return Err(invalid(
            "search",
            "default_sort",
            format!("unknown sort property '{}'", unknown.property),
        ));
    }
    Ok(())
}

fn validate_sqlite_path(config: &dyn ConfigPort) -> Result<(), JournalError> {
    match config.get_string("sqlite", "path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(JournalError::ConfigMissing {
            section: "sqlite".to_string(),
            key: "path".to_string(),
        }),
    }
}

fn validate_pool_size(config: &dyn ConfigPort) -> Result<(), JournalError> {
    let value = config.get_int("sqlite", "pool_size", DEFAULT_POOL_SIZE);
    if value < 1 || value > i64::from(u32::MAX) {
        return Err(invalid(
            "sqlite",
            "pool_size",
            "pool_size must be at least 1",
        ));
    }
    Ok(())
}
