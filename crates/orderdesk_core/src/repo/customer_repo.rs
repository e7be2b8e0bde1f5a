//! Customer repository contract and SQLite implementation.
//!
//! # Invariants
//! - Customer listing is deterministic: `name COLLATE NOCASE ASC, uuid ASC`.
//! - Deleting a customer never leaves orders pointing at it: either its orders
//!   go with it in the same transaction, or the delete is refused.

use crate::model::customer::{Customer, CustomerId};
use crate::repo::{ensure_table_ready, parse_uuid, RepoError, RepoResult};
use log::info;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const CUSTOMER_COLUMNS: &[&str] = &[
    "uuid",
    "name",
    "phone",
    "email",
    "notes",
    "no_show_count",
    "created_at",
    "updated_at",
];

const CUSTOMER_SELECT_SQL: &str = "SELECT
    uuid,
    name,
    phone,
    email,
    notes,
    no_show_count
FROM customers";

/// What happens to a customer's orders when the customer is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CustomerDeleteMode {
    /// Delete the customer together with all of their orders.
    #[default]
    Cascade,
    /// Refuse the delete while the customer still has orders.
    RejectIfOrders,
}

/// Repository interface for customer records.
pub trait CustomerRepository {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId>;
    /// Rewrites all editable fields of an existing customer.
    fn update_customer(&self, customer: &Customer) -> RepoResult<()>;
    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>>;
    fn list_customers(&self) -> RepoResult<Vec<Customer>>;
    /// Deletes a customer and returns how many orders were removed with it.
    fn delete_customer(&self, id: CustomerId, mode: CustomerDeleteMode) -> RepoResult<u32>;
}

/// SQLite-backed customer repository.
pub struct SqliteCustomerRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCustomerRepository<'conn> {
    /// Wraps a migrated connection; rejects connections with a stale schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "customers", CUSTOMER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn create_customer(&self, customer: &Customer) -> RepoResult<CustomerId> {
        self.conn.execute(
            "INSERT INTO customers (
                uuid,
                name,
                phone,
                email,
                notes,
                no_show_count
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                customer.id.to_string(),
                customer.name.as_str(),
                customer.phone.as_str(),
                customer.email.as_str(),
                customer.notes.as_str(),
                customer.no_show_count,
            ],
        )?;

        Ok(customer.id)
    }

    fn update_customer(&self, customer: &Customer) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE customers
             SET
                name = ?2,
                phone = ?3,
                email = ?4,
                notes = ?5,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                customer.id.to_string(),
                customer.name.as_str(),
                customer.phone.as_str(),
                customer.email.as_str(),
                customer.notes.as_str(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::CustomerNotFound(customer.id));
        }
        Ok(())
    }

    fn get_customer(&self, id: CustomerId) -> RepoResult<Option<Customer>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CUSTOMER_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_customer_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_customers(&self) -> RepoResult<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "{CUSTOMER_SELECT_SQL} ORDER BY name COLLATE NOCASE ASC, uuid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut customers = Vec::new();
        while let Some(row) = rows.next()? {
            customers.push(parse_customer_row(row)?);
        }
        Ok(customers)
    }

    fn delete_customer(&self, id: CustomerId, mode: CustomerDeleteMode) -> RepoResult<u32> {
        let id_text = id.to_string();
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let exists = tx
            .query_row(
                "SELECT 1 FROM customers WHERE uuid = ?1;",
                [id_text.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if exists.is_none() {
            return Err(RepoError::CustomerNotFound(id));
        }

        let order_count: u32 = tx.query_row(
            "SELECT COUNT(*) FROM orders WHERE customer_uuid = ?1;",
            [id_text.as_str()],
            |row| row.get(0),
        )?;
        if mode == CustomerDeleteMode::RejectIfOrders && order_count > 0 {
            return Err(RepoError::CustomerHasOrders {
                customer_id: id,
                order_count,
            });
        }

        tx.execute(
            "DELETE FROM orders WHERE customer_uuid = ?1;",
            [id_text.as_str()],
        )?;
        tx.execute("DELETE FROM customers WHERE uuid = ?1;", [id_text.as_str()])?;
        tx.commit()?;

        info!(
            "event=customer_delete module=repo status=ok mode={mode:?} removed_orders={order_count}"
        );
        Ok(order_count)
    }
}

fn parse_customer_row(row: &Row<'_>) -> RepoResult<Customer> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "customers.uuid")?;

    let raw_count: i64 = row.get("no_show_count")?;
    let no_show_count = u32::try_from(raw_count).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid no_show_count `{raw_count}` in customers.no_show_count"
        ))
    })?;

    Ok(Customer {
        id,
        name: row.get("name")?,
        phone: row.get("phone")?,
        email: row.get("email")?,
        notes: row.get("notes")?,
        no_show_count,
    })
}
