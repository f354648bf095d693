//! SQLite trade store.
//!
//! Rows are loaded through an r2d2 pool and the composed predicate and ordering
//! are applied in process.

use crate::adapters::memory_store::{count_matching, select_page};
use crate::domain::config_validation::{validate_sqlite_config, DEFAULT_POOL_SIZE};
use crate::domain::error::JournalError;
use crate::domain::filter_registry::Predicate;
use crate::domain::query::PageRequest;
use crate::domain::sort_registry::TradeOrdering;
use crate::domain::trade::{Trade, TradeResult};
use crate::domain::value_parser::parse_instant;
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_store::TradeStore;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use rust_decimal::Decimal;
use std::str::FromStr;

pub struct SqliteTradeStore {
    pool: Pool<SqliteConnectionManager>,
}

impl SqliteTradeStore {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, JournalError> {
        validate_sqlite_config(config)?;

        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| JournalError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", DEFAULT_POOL_SIZE) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, JournalError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(pool_error)?;

        Ok(Self { pool })
    }

    fn connection(&self) -> Result<PooledConnection<SqliteConnectionManager>, JournalError> {
        self.pool.get().map_err(pool_error)
    }

    pub fn initialize_schema(&self) -> Result<(), JournalError> {
        let conn = self.connection()?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS trades (
                id INTEGER PRIMARY KEY,
                symbol TEXT NOT NULL,
                opened TEXT NOT NULL,
                closed TEXT,
                balance TEXT,
                size TEXT NOT NULL,
                result TEXT
            );
            CREATE INDEX IF NOT EXISTS idx_trades_opened ON trades(opened);",
        )
        .map_err(query_error)?;

        Ok(())
    }

    pub fn insert_trades(&self, trades: &[Trade]) -> Result<(), JournalError> {
        let mut conn = self.connection()?;
        let tx = conn.transaction().map_err(query_error)?;

        for trade in trades {
            tx.execute(
                "INSERT OR REPLACE INTO trades (id, symbol, opened, closed, balance, size, result)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    trade.id,
                    trade.symbol,
                    trade.opened.to_rfc3339(),
                    trade.closed.map(|c| c.to_rfc3339()),
                    trade.balance.map(|b| b.to_string()),
                    trade.size.to_string(),
                    trade.result.map(TradeResult::name),
                ],
            )
            .map_err(query_error)?;
        }

        tx.commit().map_err(query_error)?;
        tracing::debug!(count = trades.len(), "inserted trades");

        Ok(())
    }

    pub fn load_trades(&self) -> Result<Vec<Trade>, JournalError> {
        let conn = self.connection()?;

        let query = "SELECT id, symbol, opened, closed, balance, size, result
                     FROM trades
                     ORDER BY id ASC";

        let mut stmt = conn.prepare(query).map_err(query_error)?;

        let rows = stmt
            .query_map([], |row| {
                let opened: String = row.get(2)?;
                let closed: Option<String> = row.get(3)?;
                let balance: Option<String> = row.get(4)?;
                let size: String = row.get(5)?;
                let result: Option<String> = row.get(6)?;

                Ok(Trade {
                    id: row.get(0)?,
                    symbol: row.get(1)?,
                    opened: instant_column(&opened)?,
                    closed: closed.as_deref().map(instant_column).transpose()?,
                    balance: balance.as_deref().map(decimal_column).transpose()?,
                    size: decimal_column(&size)?,
                    result: result.as_deref().map(result_column).transpose()?,
                })
            })
            .map_err(query_error)?;

        let mut trades = Vec::new();
        for row in rows {
            trades.push(row.map_err(query_error)?);
        }

        Ok(trades)
    }
}

impl TradeStore for SqliteTradeStore {
    fn count(&self, filter: &Predicate) -> Result<usize, JournalError> {
        let trades = self.load_trades()?;
        Ok(count_matching(&trades, filter))
    }

    fn find(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<Vec<Trade>, JournalError> {
        let trades = self.load_trades()?;
        Ok(select_page(&trades, filter, page, ordering))
    }

    /// One `SELECT` serves both the count and the page, so an import running
    /// between them cannot make the total disagree with the items.
    fn fetch_page(
        &self,
        filter: &Predicate,
        page: PageRequest,
        ordering: &TradeOrdering,
    ) -> Result<(usize, Vec<Trade>), JournalError> {
        let trades = self.load_trades()?;
        let total = count_matching(&trades, filter);
        if total == 0 {
            return Ok((0, Vec::new()));
        }
        Ok((total, select_page(&trades, filter, page, ordering)))
    }
}

fn pool_error(e: r2d2::Error) -> JournalError {
    JournalError::Database {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> JournalError {
    JournalError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn conversion_error(value: &str, expected: &str) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        value.len(),
        rusqlite::types::Type::Text,
        format!("'{value}' is not a valid {expected}").into(),
    )
}

fn instant_column(value: &str) -> rusqlite::Result<chrono::DateTime<chrono::Utc>> {
    parse_instant(value).ok_or_else(|| conversion_error(value, "timestamp"))
}

fn decimal_column(value: &str) -> rusqlite::Result<Decimal> {
    Decimal::from_str(value).map_err(|_| conversion_error(value, "decimal"))
}

fn result_column(value: &str) -> rusqlite::Result<TradeResult> {
    TradeResult::from_name(value).ok_or_else(|| conversion_error(value, "trade result"))
}
