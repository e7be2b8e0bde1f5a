//! Order use-case service.
//!
//! # Responsibility
//! - Create orders from form drafts, optionally importing an attachment.
//! - Apply single-field edits and the fulfilment toggle with immediate saves.
//! - Serve the customer's order list and the open/fulfilled board.
//!
//! # Invariants
//! - New orders are always open (`is_fulfilled = false`).
//! - A failed attachment import never blocks order creation.
//! - Deletion takes an `OrderId`; board positions must be resolved through
//!   `OrderBoard::order_id_at` first.

use crate::attachment::{Attachment, AttachmentError};
use crate::model::customer::CustomerId;
use crate::model::order::{Order, OrderDraft, OrderField, OrderId};
use crate::query::{OrderBoard, OrderSort};
use crate::repo::order_repo::OrderRepository;
use crate::service::{ServiceError, ServiceResult};
use log::{info, warn};

/// Result of creating an order whose attachment came from an external source.
#[derive(Debug)]
pub struct OrderCreation {
    pub order: Order,
    /// Set when the attachment could not be read; the order exists without it.
    pub attachment_error: Option<AttachmentError>,
}

/// Order service facade over a repository implementation.
pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an open order for an existing customer.
    ///
    /// # Errors
    /// - `Validation` for a blank product name or quantity outside 1..=100.
    /// - `CustomerNotFound` when the customer does not exist.
    pub fn create_order(&self, customer_id: CustomerId, draft: OrderDraft) -> ServiceResult<Order> {
        let order = Order::new(customer_id, draft)?;
        let id = self.repo.create_order(&order)?;
        info!(
            "event=order_create module=service status=ok order_id={id} customer_id={customer_id} has_attachment={}",
            order.has_attachment()
        );
        self.read_back(id, "created order not found in read-back")
    }

    /// Creates an order using the outcome of an attachment import.
    ///
    /// A failed import is reported in `OrderCreation::attachment_error` and
    /// the order is created without attachment.
    pub fn create_order_with_attachment(
        &self,
        customer_id: CustomerId,
        mut draft: OrderDraft,
        imported: Result<Attachment, AttachmentError>,
    ) -> ServiceResult<OrderCreation> {
        let attachment_error = match imported {
            Ok(attachment) => {
                draft.attachment = Some(attachment);
                None
            }
            Err(err) => {
                warn!(
                    "event=order_create module=service status=degraded customer_id={customer_id} reason=attachment_unreadable"
                );
                Some(err)
            }
        };

        let order = self.create_order(customer_id, draft)?;
        Ok(OrderCreation {
            order,
            attachment_error,
        })
    }

    pub fn get_order(&self, id: OrderId) -> ServiceResult<Option<Order>> {
        Ok(self.repo.get_order(id)?)
    }

    /// Changes one field and saves immediately.
    ///
    /// Invalid values are rejected before anything is written.
    pub fn update_order_field(&self, id: OrderId, field: OrderField) -> ServiceResult<Order> {
        let column = field.column();
        let mut order = self.load(id)?;
        order.apply(field)?;
        self.repo.update_order(&order)?;
        info!("event=order_update module=service status=ok order_id={id} field={column}");
        self.read_back(id, "updated order not found in read-back")
    }

    /// Sets the fulfilment flag. Repeating the current value writes nothing.
    pub fn set_order_fulfilled(&self, id: OrderId, is_fulfilled: bool) -> ServiceResult<Order> {
        let changed = self.repo.set_order_fulfilled(id, is_fulfilled)?;
        if changed {
            info!(
                "event=order_fulfilled module=service status=ok order_id={id} is_fulfilled={is_fulfilled}"
            );
        }
        self.read_back(id, "toggled order not found in read-back")
    }

    pub fn delete_order(&self, id: OrderId) -> ServiceResult<()> {
        self.repo.delete_order(id)?;
        info!("event=order_delete module=service status=ok order_id={id}");
        Ok(())
    }

    /// Returns the attachment stored on an order, byte for byte.
    pub fn order_attachment(&self, id: OrderId) -> ServiceResult<Option<Attachment>> {
        let order = self.load(id)?;
        Ok(order.pdf_data.map(Attachment::from_bytes))
    }

    /// Lists exactly the orders owned by `customer_id`.
    pub fn orders_for_customer(
        &self,
        customer_id: CustomerId,
        sort: OrderSort,
    ) -> ServiceResult<Vec<Order>> {
        Ok(self.repo.list_orders_for_customer(customer_id, sort)?)
    }

    /// Builds the open/fulfilled board for the customer detail screen.
    ///
    /// Each section keeps the `OpenFirstNewest` order (newest first).
    pub fn order_board(&self, customer_id: CustomerId, search: &str) -> ServiceResult<OrderBoard> {
        let orders = self
            .repo
            .list_orders_for_customer(customer_id, OrderSort::OpenFirstNewest)?;
        Ok(OrderBoard::build(orders, search))
    }

    fn load(&self, id: OrderId) -> ServiceResult<Order> {
        self.repo.get_order(id)?.ok_or(ServiceError::OrderNotFound(id))
    }

    fn read_back(&self, id: OrderId, details: &'static str) -> ServiceResult<Order> {
        self.repo
            .get_order(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
