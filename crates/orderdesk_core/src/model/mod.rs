//! Customer/order domain model.
//!
//! # Responsibility
//! - Define the two record shapes persisted by the store.
//! - Own field-level validation that every write path must run.
//!
//! # Invariants
//! - Every record is identified by a stable UUID assigned at creation.
//! - An order always belongs to exactly one customer.

pub mod customer;
pub mod order;
