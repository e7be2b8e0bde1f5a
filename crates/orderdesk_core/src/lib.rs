//! Core domain logic for OrderDesk.
//! This crate is the single source of truth for customer/order invariants.

pub mod attachment;
pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;

pub use attachment::{import_attachment, import_attachment_file, Attachment, AttachmentError};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel};
pub use model::customer::{Customer, CustomerDraft, CustomerField, CustomerId};
pub use model::order::{
    Order, OrderDraft, OrderField, OrderId, OrderValidationError, QUANTITY_MAX, QUANTITY_MIN,
};
pub use query::{filter_fulfilled, filter_open, search_by_product, BoardSection, OrderBoard, OrderSort};
pub use repo::customer_repo::{CustomerDeleteMode, CustomerRepository, SqliteCustomerRepository};
pub use repo::order_repo::{OrderRepository, SqliteOrderRepository};
pub use repo::{RepoError, RepoResult};
pub use service::customer_service::CustomerService;
pub use service::order_service::{OrderCreation, OrderService};
pub use service::{ServiceError, ServiceResult};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
