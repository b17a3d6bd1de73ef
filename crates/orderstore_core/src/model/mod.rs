//! Domain model for order persistence.
//!
//! # Responsibility
//! - Define the canonical order record shared by all persistence paths.
//!
//! # Invariants
//! - Every persisted order carries a unique integer id and a non-blank
//!   status.

pub mod order;
