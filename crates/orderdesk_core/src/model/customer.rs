//! Customer record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable customer identity.
pub type CustomerId = Uuid;

/// A customer and their contact details.
///
/// Orders are not embedded; they reference the customer through
/// `Order::customer_id` and are loaded through the order repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    /// Counter kept for a future no-show rule. No operation changes it yet.
    pub no_show_count: u32,
}

impl Customer {
    /// Creates a customer with a fresh identity from draft fields.
    pub fn new(draft: CustomerDraft) -> Self {
        Self::with_id(Uuid::new_v4(), draft)
    }

    /// Creates a customer with a caller-provided identity.
    pub fn with_id(id: CustomerId, draft: CustomerDraft) -> Self {
        Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            notes: draft.notes,
            no_show_count: 0,
        }
    }

    /// Applies a single-field edit in place.
    pub fn apply(&mut self, field: CustomerField) {
        match field {
            CustomerField::Name(value) => self.name = value,
            CustomerField::Phone(value) => self.phone = value,
            CustomerField::Email(value) => self.email = value,
            CustomerField::Notes(value) => self.notes = value,
        }
    }

    /// Replaces all editable text fields, keeping identity and counters.
    pub fn apply_draft(&mut self, draft: CustomerDraft) {
        self.name = draft.name;
        self.phone = draft.phone;
        self.email = draft.email;
        self.notes = draft.notes;
    }
}

/// Editable customer fields as entered in a form. Absent values stay blank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerDraft {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

/// One editable customer field together with its new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerField {
    Name(String),
    Phone(String),
    Email(String),
    Notes(String),
}

impl CustomerField {
    /// Column name used in logs and SQL.
    pub fn column(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Phone(_) => "phone",
            Self::Email(_) => "email",
            Self::Notes(_) => "notes",
        }
    }
}
