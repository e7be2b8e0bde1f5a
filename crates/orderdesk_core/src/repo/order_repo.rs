//! Order repository contract and SQLite implementation.
//!
//! # Invariants
//! - Orders are only inserted for customers that exist at insert time.
//! - Listing is scoped to one customer and ordered by an explicit
//!   [`OrderSort`], always tie-broken by `uuid ASC`.
//! - `pdf_data` round-trips byte for byte.

use crate::model::customer::CustomerId;
use crate::model::order::{Order, OrderId};
use crate::query::OrderSort;
use crate::repo::{ensure_table_ready, parse_uuid, RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

const ORDER_COLUMNS: &[&str] = &[
    "uuid",
    "customer_uuid",
    "product_name",
    "quantity",
    "order_date",
    "is_fulfilled",
    "pdf_data",
    "created_at",
    "updated_at",
];

const ORDER_SELECT_SQL: &str = "SELECT
    uuid,
    customer_uuid,
    product_name,
    quantity,
    order_date,
    is_fulfilled,
    pdf_data
FROM orders";

/// Repository interface for order records.
pub trait OrderRepository {
    /// Inserts an order; fails with `CustomerNotFound` for an unknown owner.
    fn create_order(&self, order: &Order) -> RepoResult<OrderId>;
    /// Rewrites product, quantity, date, status and attachment of an order.
    fn update_order(&self, order: &Order) -> RepoResult<()>;
    /// Sets the fulfilment flag. Returns `false` when it already had that value
    /// and nothing was written.
    fn set_order_fulfilled(&self, id: OrderId, is_fulfilled: bool) -> RepoResult<bool>;
    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>>;
    fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
        sort: OrderSort,
    ) -> RepoResult<Vec<Order>>;
    fn delete_order(&self, id: OrderId) -> RepoResult<()>;
}

/// SQLite-backed order repository.
pub struct SqliteOrderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteOrderRepository<'conn> {
    /// Wraps a migrated connection; rejects connections with a stale schema.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table_ready(conn, "orders", ORDER_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl OrderRepository for SqliteOrderRepository<'_> {
    fn create_order(&self, order: &Order) -> RepoResult<OrderId> {
        order.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO orders (
                uuid,
                customer_uuid,
                product_name,
                quantity,
                order_date,
                is_fulfilled,
                pdf_data
            )
            SELECT ?1, ?2, ?3, ?4, ?5, ?6, ?7
            WHERE EXISTS (SELECT 1 FROM customers WHERE uuid = ?2);",
            params![
                order.id.to_string(),
                order.customer_id.to_string(),
                order.product_name.as_str(),
                order.quantity,
                order.order_date,
                bool_to_int(order.is_fulfilled),
                order.pdf_data.as_deref(),
            ],
        )?;

        if inserted == 0 {
            return Err(RepoError::CustomerNotFound(order.customer_id));
        }
        Ok(order.id)
    }

    fn update_order(&self, order: &Order) -> RepoResult<()> {
        order.validate()?;

        let changed = self.conn.execute(
            "UPDATE orders
             SET
                product_name = ?2,
                quantity = ?3,
                order_date = ?4,
                is_fulfilled = ?5,
                pdf_data = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1;",
            params![
                order.id.to_string(),
                order.product_name.as_str(),
                order.quantity,
                order.order_date,
                bool_to_int(order.is_fulfilled),
                order.pdf_data.as_deref(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::OrderNotFound(order.id));
        }
        Ok(())
    }

    fn set_order_fulfilled(&self, id: OrderId, is_fulfilled: bool) -> RepoResult<bool> {
        let id_text = id.to_string();
        let changed = self.conn.execute(
            "UPDATE orders
             SET
                is_fulfilled = ?2,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?1
               AND is_fulfilled <> ?2;",
            params![id_text.as_str(), bool_to_int(is_fulfilled)],
        )?;
        if changed > 0 {
            return Ok(true);
        }

        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM orders WHERE uuid = ?1;",
                [id_text.as_str()],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        match exists {
            Some(_) => Ok(false),
            None => Err(RepoError::OrderNotFound(id)),
        }
    }

    fn get_order(&self, id: OrderId) -> RepoResult<Option<Order>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ORDER_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(parse_order_row(row)?)),
            None => Ok(None),
        }
    }

    fn list_orders_for_customer(
        &self,
        customer_id: CustomerId,
        sort: OrderSort,
    ) -> RepoResult<Vec<Order>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ORDER_SELECT_SQL} WHERE customer_uuid = ?1 ORDER BY {};",
            order_by_clause(sort)
        ))?;
        let mut rows = stmt.query([customer_id.to_string()])?;
        let mut orders = Vec::new();
        while let Some(row) = rows.next()? {
            orders.push(parse_order_row(row)?);
        }
        Ok(orders)
    }

    fn delete_order(&self, id: OrderId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM orders WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::OrderNotFound(id));
        }
        Ok(())
    }
}

fn order_by_clause(sort: OrderSort) -> &'static str {
    match sort {
        OrderSort::OpenFirstNewest => "is_fulfilled ASC, order_date DESC, uuid ASC",
        OrderSort::NewestFirst => "order_date DESC, uuid ASC",
    }
}

fn parse_order_row(row: &Row<'_>) -> RepoResult<Order> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid(&uuid_text, "orders.uuid")?;
    let customer_text: String = row.get("customer_uuid")?;
    let customer_id = parse_uuid(&customer_text, "orders.customer_uuid")?;

    let raw_quantity: i64 = row.get("quantity")?;
    let quantity = u16::try_from(raw_quantity).map_err(|_| {
        RepoError::InvalidData(format!("invalid quantity `{raw_quantity}` in orders.quantity"))
    })?;

    let is_fulfilled = match row.get::<_, i64>("is_fulfilled")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_fulfilled value `{other}` in orders.is_fulfilled"
            )));
        }
    };

    let order = Order {
        id,
        customer_id,
        product_name: row.get("product_name")?,
        quantity,
        order_date: row.get("order_date")?,
        is_fulfilled,
        pdf_data: row.get("pdf_data")?,
    };
    order.validate()?;
    Ok(order)
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
