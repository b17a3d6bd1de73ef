//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the order store contract consumed by host applications.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Repository writes must enforce `Order::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod order_repo;
