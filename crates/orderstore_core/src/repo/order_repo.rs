//! Order repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical `orders` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Order::validate()` before SQL mutations.
//! - Targeted updates that match zero rows fail with `NotFound`; reads
//!   that match zero rows return `None`.
//! - Read paths must reject invalid persisted state instead of masking it.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::order::{Order, OrderId, OrderValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const ORDER_SELECT_SQL: &str = "SELECT id, description, status FROM orders";

const ORDERS_TABLE: &str = "orders";
const REQUIRED_COLUMNS: &[&str] = &["id", "description", "status"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for order persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(OrderValidationError),
    Db(DbError),
    NotFound(OrderId),
    /// Full replace was attempted on an order that was never persisted.
    MissingId,
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "order not found: {id}"),
            Self::MissingId => write!(f, "order has no id; persist it before updating"),
            Self::InvalidData(message) => write!(f, "invalid persisted order data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OrderValidationError> for RepoError {
    fn from(value: OrderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for order CRUD and status updates.
///
/// One internal routine backs `update_status`; `try_update_status` is a
/// delegating adapter kept so callers migrating from raise-style APIs find
/// both entry points.
pub trait OrderRepository {
    /// Persists a new order and returns the stored entity with its id set.
    fn create_order(&self, order: &Order) -> RepoResult<Order>;

    /// Returns the matching order, or `None` on miss. Never a not-found
    /// error.
    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>>;

    /// Returns all orders.
    fn list_orders(&self) -> RepoResult<Vec<Order>>;

    /// Full replace of a row by id. Fails with `NotFound` when the id is
    /// absent.
    fn update_order(&self, order: &Order) -> RepoResult<Order>;

    /// Removes a row and reports whether one was removed. No error on miss.
    fn delete_order(&self, id: OrderId) -> RepoResult<bool>;

    /// Status-only update matching on primary key.
    ///
    /// # Contract
    /// - Executes `UPDATE orders SET status = ?1 WHERE id = ?2`.
    /// - Zero rows affected fails with `NotFound`, unlike the soft `false`
    ///   of `delete_order`.
    fn update_status(&self, id: OrderId, new_status: &str) -> RepoResult<bool>;

    /// Same update as `update_status`, surfaced as an explicit value for
    /// callers that branch on the outcome. Pure delegation, no extra logic.
    fn try_update_status(&self, id: OrderId, new_status: &str) -> Result<bool, RepoError> {
        self.update_status(id, new_status)
    }
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    /// Wraps a connection after verifying it carries the expected schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not match
    ///   the latest migration.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the `orders`
    ///   schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        if !table_exists(conn, ORDERS_TABLE)? {
            return Err(RepoError::MissingRequiredTable(ORDERS_TABLE));
        }

        let columns = table_columns(conn, ORDERS_TABLE)?;
        for &column in REQUIRED_COLUMNS {
            if !columns.iter().any(|name| name.as_str() == column) {
                return Err(RepoError::MissingRequiredColumn {
                    table: ORDERS_TABLE,
                    column,
                });
            }
        }

        Ok(Self { conn })
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn create_order(&self, order: &Order) -> RepoResult<Order> {
        order.validate()?;

        // A NULL id lets the rowid engine assign the primary key.
        self.conn.execute(
            "INSERT INTO orders (id, description, status) VALUES (?1, ?2, ?3);",
            params![order.id, order.description.as_deref(), order.status.as_str()],
        )?;

        let id = order
            .id
            .unwrap_or_else(|| self.conn.last_insert_rowid());

        Ok(Order {
            id: Some(id),
            description: order.description.clone(),
            status: order.status.clone(),
        })
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ORDER_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_order_row(row)?));
        }

        Ok(None)
    }

    fn list_orders(&self) -> RepoResult<Vec<Order>> {
        // Ordered by id for deterministic output; callers must not rely on it.
        let mut stmt = self
            .conn
            .prepare(&format!("{ORDER_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next()? {
            orders.push(parse_order_row(row)?);
        }

        Ok(orders)
    }

    fn update_order(&self, order: &Order) -> RepoResult<Order> {
        order.validate()?;
        let id = order.id.ok_or(RepoError::MissingId)?;

        let changed = self.conn.execute(
            "UPDATE orders SET description = ?1, status = ?2 WHERE id = ?3;",
            params![order.description.as_deref(), order.status.as_str(), id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(order.clone())
    }

    fn delete_order(&self, id: OrderId) -> RepoResult<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM orders WHERE id = ?1;", params![id])?;

        Ok(removed > 0)
    }

    fn update_status(&self, id: OrderId, new_status: &str) -> RepoResult<bool> {
        if new_status.trim().is_empty() {
            return Err(OrderValidationError::BlankStatus.into());
        }

        let changed = self.conn.execute(
            "UPDATE orders SET status = ?1 WHERE id = ?2;",
            params![new_status, id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(true)
    }
}

fn parse_order_row(row: &Row<'_>) -> RepoResult<Order> {
    let order = Order {
        id: Some(row.get("id")?),
        description: row.get("description")?,
        status: row.get("status")?,
    };
    order.validate()?;
    Ok(order)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        params![table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    let mut columns = Vec::new();
    while let Some(row) = rows.next()? {
        columns.push(row.get("name")?);
    }
    Ok(columns)
}
