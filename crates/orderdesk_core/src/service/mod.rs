//! Core use-case services.
//!
//! # Responsibility
//! - Expose explicit command functions (create, edit one field, toggle,
//!   delete) over the repositories.
//! - Return read-back records so callers never hold state the store rejected.

use crate::model::customer::CustomerId;
use crate::model::order::{OrderId, OrderValidationError};
use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod customer_service;
pub mod order_service;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Use-case level error shared by customer and order services.
#[derive(Debug)]
pub enum ServiceError {
    Validation(OrderValidationError),
    CustomerNotFound(CustomerId),
    OrderNotFound(OrderId),
    CustomerHasOrders {
        customer_id: CustomerId,
        order_count: u32,
    },
    /// Storage failure; the requested change was not applied.
    Repo(RepoError),
    /// A write succeeded but the record could not be read back.
    InconsistentState(&'static str),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::CustomerNotFound(id) => write!(f, "customer not found: {id}"),
            Self::OrderNotFound(id) => write!(f, "order not found: {id}"),
            Self::CustomerHasOrders {
                customer_id,
                order_count,
            } => write!(
                f,
                "customer {customer_id} cannot be deleted while it has {order_count} order(s)"
            ),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent state: {details}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<OrderValidationError> for ServiceError {
    fn from(value: OrderValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::Validation(err),
            RepoError::CustomerNotFound(id) => Self::CustomerNotFound(id),
            RepoError::OrderNotFound(id) => Self::OrderNotFound(id),
            RepoError::CustomerHasOrders {
                customer_id,
                order_count,
            } => Self::CustomerHasOrders {
                customer_id,
                order_count,
            },
            other => Self::Repo(other),
        }
    }
}
