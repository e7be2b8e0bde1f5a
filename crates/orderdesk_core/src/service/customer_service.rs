//! Customer use-case service.
//!
//! # Invariants
//! - Edits are applied to a copy; the copy is returned only after the store
//!   accepted it.
//! - `no_show_count` is never changed here.

use crate::model::customer::{Customer, CustomerDraft, CustomerField, CustomerId};
use crate::repo::customer_repo::{CustomerDeleteMode, CustomerRepository};
use crate::service::{ServiceError, ServiceResult};
use log::info;

/// Customer service facade over a repository implementation.
pub struct CustomerService<R: CustomerRepository> {
    repo: R,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a customer from form input and returns the stored record.
    pub fn create_customer(&self, draft: CustomerDraft) -> ServiceResult<Customer> {
        let customer = Customer::new(draft);
        let id = self.repo.create_customer(&customer)?;
        info!("event=customer_create module=service status=ok customer_id={id}");
        self.read_back(id, "created customer not found in read-back")
    }

    pub fn get_customer(&self, id: CustomerId) -> ServiceResult<Option<Customer>> {
        Ok(self.repo.get_customer(id)?)
    }

    /// Lists all customers by name (case-insensitive), then id.
    pub fn list_customers(&self) -> ServiceResult<Vec<Customer>> {
        Ok(self.repo.list_customers()?)
    }

    /// Changes one field and saves immediately.
    pub fn update_customer_field(
        &self,
        id: CustomerId,
        field: CustomerField,
    ) -> ServiceResult<Customer> {
        let column = field.column();
        let mut customer = self.load(id)?;
        customer.apply(field);
        self.repo.update_customer(&customer)?;
        info!("event=customer_update module=service status=ok customer_id={id} field={column}");
        self.read_back(id, "updated customer not found in read-back")
    }

    /// Replaces all editable fields in one save.
    pub fn edit_customer(&self, id: CustomerId, draft: CustomerDraft) -> ServiceResult<Customer> {
        let mut customer = self.load(id)?;
        customer.apply_draft(draft);
        self.repo.update_customer(&customer)?;
        info!("event=customer_update module=service status=ok customer_id={id} field=all");
        self.read_back(id, "edited customer not found in read-back")
    }

    /// Deletes a customer; returns the number of orders removed with it.
    pub fn delete_customer(&self, id: CustomerId, mode: CustomerDeleteMode) -> ServiceResult<u32> {
        Ok(self.repo.delete_customer(id, mode)?)
    }

    fn load(&self, id: CustomerId) -> ServiceResult<Customer> {
        self.repo
            .get_customer(id)?
            .ok_or(ServiceError::CustomerNotFound(id))
    }

    fn read_back(&self, id: CustomerId, details: &'static str) -> ServiceResult<Customer> {
        self.repo
            .get_customer(id)?
            .ok_or(ServiceError::InconsistentState(details))
    }
}
