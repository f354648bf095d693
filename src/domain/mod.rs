//! Core domain types and the trade query engine.

pub mod config_validation;
pub mod error;
pub mod filter_registry;
pub mod operator;
pub mod property;
pub mod query;
pub mod query_composer;
pub mod query_validation;
pub mod search;
pub mod sort_registry;
pub mod trade;
pub mod value_parser;
