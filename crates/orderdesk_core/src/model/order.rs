//! Order record and its validation rules.
//!
//! # Invariants
//! - `product_name` is never blank after trimming.
//! - `quantity` stays within `QUANTITY_MIN..=QUANTITY_MAX`; out-of-range input
//!   is rejected, never clamped.
//! - `pdf_data` is stored verbatim; the core never inspects it.

use crate::attachment::Attachment;
use crate::model::customer::CustomerId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable order identity.
pub type OrderId = Uuid;

pub const QUANTITY_MIN: u16 = 1;
pub const QUANTITY_MAX: u16 = 100;

/// Field-level validation failure for orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderValidationError {
    BlankProductName,
    QuantityOutOfRange(i64),
}

impl Display for OrderValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProductName => write!(f, "product_name must not be blank"),
            Self::QuantityOutOfRange(value) => write!(
                f,
                "quantity {value} is outside {QUANTITY_MIN}..={QUANTITY_MAX}"
            ),
        }
    }
}

impl Error for OrderValidationError {}

/// An order placed by one customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub product_name: String,
    pub quantity: u16,
    /// Unix epoch milliseconds.
    pub order_date: i64,
    pub is_fulfilled: bool,
    /// Raw attachment bytes (normally a PDF).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_data: Option<Vec<u8>>,
}

impl Order {
    /// Builds an open order for `customer_id` from a validated draft.
    ///
    /// The draft is validated here so an invalid order value never exists.
    pub fn new(customer_id: CustomerId, draft: OrderDraft) -> Result<Self, OrderValidationError> {
        let quantity = validate_quantity(i64::from(draft.quantity))?;
        let product_name = validate_product_name(&draft.product_name)?;
        Ok(Self {
            id: Uuid::new_v4(),
            customer_id,
            product_name,
            quantity,
            order_date: draft.order_date.unwrap_or_else(now_epoch_ms),
            is_fulfilled: false,
            pdf_data: draft.attachment.map(Attachment::into_bytes),
        })
    }

    /// Re-checks persisted or edited state before it is written.
    pub fn validate(&self) -> Result<(), OrderValidationError> {
        validate_product_name(&self.product_name)?;
        validate_quantity(i64::from(self.quantity))?;
        Ok(())
    }

    /// Applies one field edit after validating the new value.
    ///
    /// On error the order is left untouched.
    pub fn apply(&mut self, field: OrderField) -> Result<(), OrderValidationError> {
        match field {
            OrderField::ProductName(value) => {
                self.product_name = validate_product_name(&value)?;
            }
            OrderField::Quantity(value) => self.quantity = validate_quantity(value)?,
            OrderField::OrderDate(value) => self.order_date = value,
            OrderField::Attachment(value) => self.pdf_data = value.map(Attachment::into_bytes),
        }
        Ok(())
    }

    pub fn has_attachment(&self) -> bool {
        self.pdf_data.is_some()
    }
}

/// Input for creating an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderDraft {
    pub product_name: String,
    pub quantity: u16,
    /// Defaults to "now" when `None`.
    pub order_date: Option<i64>,
    pub attachment: Option<Attachment>,
}

impl OrderDraft {
    /// Draft with the form defaults: quantity 1, today, no attachment.
    pub fn new(product_name: impl Into<String>) -> Self {
        Self {
            product_name: product_name.into(),
            quantity: QUANTITY_MIN,
            order_date: None,
            attachment: None,
        }
    }
}

/// One editable order field together with its new value.
///
/// Fulfilment has its own command (`set_order_fulfilled`) because it is a
/// status toggle rather than a form edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderField {
    ProductName(String),
    /// Wide type so out-of-range input can be reported as given.
    Quantity(i64),
    OrderDate(i64),
    Attachment(Option<Attachment>),
}

impl OrderField {
    /// Column name used in logs.
    pub fn column(&self) -> &'static str {
        match self {
            Self::ProductName(_) => "product_name",
            Self::Quantity(_) => "quantity",
            Self::OrderDate(_) => "order_date",
            Self::Attachment(_) => "pdf_data",
        }
    }
}

fn validate_product_name(value: &str) -> Result<String, OrderValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(OrderValidationError::BlankProductName);
    }
    Ok(trimmed.to_string())
}

fn validate_quantity(value: i64) -> Result<u16, OrderValidationError> {
    match u16::try_from(value) {
        Ok(quantity) if (QUANTITY_MIN..=QUANTITY_MAX).contains(&quantity) => Ok(quantity),
        _ => Err(OrderValidationError::QuantityOutOfRange(value)),
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_millis() as i64)
}
