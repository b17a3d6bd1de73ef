//! Order domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the `orders` table.
//! - Provide the non-blank-status validation every write path runs.
//!
//! # Invariants
//! - `id` is `None` only before first persistence; the store assigns one.
//! - `status` must never be blank once the record reaches storage.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of a persisted order.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type OrderId = i64;

/// Canonical record for one row of the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Primary key. `None` until the store assigns a rowid on insert;
    /// callers may also supply one up front.
    pub id: Option<OrderId>,
    /// Free-text description, nullable in storage.
    pub description: Option<String>,
    /// Lifecycle status label. Must be non-blank.
    pub status: String,
}

impl Order {
    /// Creates an unpersisted order; the store assigns the id on insert.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            id: None,
            description: None,
            status: status.into(),
        }
    }

    /// Creates an order with a caller-provided primary key.
    ///
    /// Used when identity already exists externally (imports, fixtures).
    pub fn with_id(id: OrderId, status: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            description: None,
            status: status.into(),
        }
    }

    /// Checks the single application-level constraint: status is non-blank.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        if self.status.trim().is_empty() {
            return Err(OrderValidationError::BlankStatus);
        }
        Ok(())
    }
}

/// Violation of an order invariant detected before persistence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderValidationError {
    BlankStatus,
}

impl Display for OrderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankStatus => write!(f, "order status must not be blank"),
        }
    }
}

impl Error for OrderValidationError {}
