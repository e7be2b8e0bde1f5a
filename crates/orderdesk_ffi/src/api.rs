//! FFI use-case API for the mobile UI.
//!
//! # Responsibility
//! - Expose customer/order commands and queries to Dart via FRB.
//! - Turn core errors into user-visible messages instead of silent logs.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Ids cross the boundary as UTF-8 UUID strings.
//! - Mutations are addressed by id; list positions never reach the core.

use log::warn;
use orderdesk_core::db::open_db;
use orderdesk_core::{
    core_version as core_version_inner, import_attachment_file,
    init_logging as init_logging_inner, ping as ping_inner, Attachment, Customer,
    CustomerDeleteMode, CustomerDraft, CustomerField, CustomerService, Order, OrderDraft,
    OrderField, OrderService, OrderSort, SqliteCustomerRepository, SqliteOrderRepository,
};
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "orderdesk.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes core logging once per process.
///
/// Returns an empty string on success and the error message otherwise.
/// Repeating the call with the same `level + log_dir` is a no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic response envelope for commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    pub ok: bool,
    /// Id of the created/affected record.
    pub id: Option<String>,
    /// Human-readable outcome, shown to the user on failure.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, id: String) -> Self {
        Self {
            ok: true,
            id: Some(id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            id: None,
            message: message.into(),
        }
    }
}

/// Customer row for list/detail screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerItem {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub no_show_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerListResponse {
    pub ok: bool,
    pub items: Vec<CustomerItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerResponse {
    pub ok: bool,
    pub customer: Option<CustomerItem>,
    pub message: String,
}

/// Order row. Attachment bytes are fetched separately via `order_attachment`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    pub id: String,
    pub customer_id: String,
    pub product_name: String,
    pub quantity: u16,
    pub order_date_ms: i64,
    pub is_fulfilled: bool,
    pub has_attachment: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResponse {
    pub ok: bool,
    pub order: Option<OrderItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderListResponse {
    pub ok: bool,
    pub items: Vec<OrderItem>,
    pub message: String,
}

/// Open/fulfilled sections of the customer detail screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBoardResponse {
    pub ok: bool,
    pub open: Vec<OrderItem>,
    pub fulfilled: Vec<OrderItem>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentResponse {
    pub ok: bool,
    pub bytes: Option<Vec<u8>>,
    pub message: String,
}

/// Creates a customer. Absent fields are passed as empty strings.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_create(name: String, phone: String, email: String, notes: String) -> ActionResponse {
    let draft = CustomerDraft {
        name,
        phone,
        email,
        notes,
    };
    let result = with_connection(|conn| {
        customer_service(conn)?
            .create_customer(draft)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(customer) => ActionResponse::success("Customer saved.", customer.id.to_string()),
        Err(err) => ActionResponse::failure(format!("customer_create failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn customer_get(customer_id: String) -> CustomerResponse {
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            customer_service(conn)?
                .get_customer(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("customer not found: {id}"))
        })
    });
    match result {
        Ok(customer) => CustomerResponse {
            ok: true,
            customer: Some(to_customer_item(customer)),
            message: String::new(),
        },
        Err(err) => CustomerResponse {
            ok: false,
            customer: None,
            message: format!("customer_get failed: {err}"),
        },
    }
}

/// Saves the whole edit form in one write.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_edit(
    customer_id: String,
    name: String,
    phone: String,
    email: String,
    notes: String,
) -> ActionResponse {
    let draft = CustomerDraft {
        name,
        phone,
        email,
        notes,
    };
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            customer_service(conn)?
                .edit_customer(id, draft)
                .map_err(|err| err.to_string())
        })
    });
    customer_action("customer_edit", "Changes saved.", result)
}

/// Saves one field of the customer detail screen.
///
/// `field` is one of `name|phone|email|notes`.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_update_field(customer_id: String, field: String, value: String) -> ActionResponse {
    let result = parse_customer_field(&field, value).and_then(|field| {
        let id = parse_id(&customer_id)?;
        with_connection(|conn| {
            customer_service(conn)?
                .update_customer_field(id, field)
                .map_err(|err| err.to_string())
        })
    });
    customer_action("customer_update_field", "Customer saved.", result)
}

/// Lists customers by name.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_list() -> CustomerListResponse {
    let result = with_connection(|conn| {
        customer_service(conn)?
            .list_customers()
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(customers) => {
            let items = customers
                .into_iter()
                .map(to_customer_item)
                .collect::<Vec<_>>();
            let message = format!("{} customer(s).", items.len());
            CustomerListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => CustomerListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("customer_list failed: {err}"),
        },
    }
}

/// Deletes a customer.
///
/// With `delete_orders = false` the delete is refused while orders exist.
#[flutter_rust_bridge::frb(sync)]
pub fn customer_delete(customer_id: String, delete_orders: bool) -> ActionResponse {
    let mode = if delete_orders {
        CustomerDeleteMode::Cascade
    } else {
        CustomerDeleteMode::RejectIfOrders
    };
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            customer_service(conn)?
                .delete_customer(id, mode)
                .map_err(|err| err.to_string())
        })
        .map(|removed| (id, removed))
    });
    match result {
        Ok((id, removed)) => ActionResponse::success(
            format!("Customer deleted with {removed} order(s)."),
            id.to_string(),
        ),
        Err(err) => ActionResponse::failure(format!("customer_delete failed: {err}")),
    }
}

/// Creates an open order, optionally attaching the PDF at `pdf_path`.
///
/// An unreadable PDF does not block creation; the response stays `ok` and
/// the message says the order was saved without attachment.
#[flutter_rust_bridge::frb(sync)]
pub fn order_create(
    customer_id: String,
    product_name: String,
    quantity: u16,
    order_date_ms: Option<i64>,
    pdf_path: Option<String>,
) -> ActionResponse {
    let draft = OrderDraft {
        product_name,
        quantity,
        order_date: order_date_ms,
        attachment: None,
    };
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            let service = order_service(conn)?;
            let picked = pdf_path.as_deref().map(str::trim).filter(|path| !path.is_empty());
            let created = match picked {
                Some(path) => service
                    .create_order_with_attachment(id, draft, import_attachment_file(path))
                    .map(|creation| (creation.order, creation.attachment_error)),
                None => service.create_order(id, draft).map(|order| (order, None)),
            };
            created.map_err(|err| err.to_string())
        })
    });
    match result {
        Ok((order, None)) => ActionResponse::success("Order saved.", order.id.to_string()),
        Ok((order, Some(err))) => ActionResponse::success(
            format!("Order saved without attachment: {err}"),
            order.id.to_string(),
        ),
        Err(err) => ActionResponse::failure(format!("order_create failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn order_get(order_id: String) -> OrderResponse {
    let result = parse_id(&order_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .get_order(id)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("order not found: {id}"))
        })
    });
    match result {
        Ok(order) => OrderResponse {
            ok: true,
            order: Some(to_order_item(&order)),
            message: String::new(),
        },
        Err(err) => OrderResponse {
            ok: false,
            order: None,
            message: format!("order_get failed: {err}"),
        },
    }
}

/// Sets the "fulfilled" toggle. Repeating the same value is harmless.
#[flutter_rust_bridge::frb(sync)]
pub fn order_set_fulfilled(order_id: String, is_fulfilled: bool) -> ActionResponse {
    let result = parse_id(&order_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .set_order_fulfilled(id, is_fulfilled)
                .map_err(|err| err.to_string())
        })
    });
    order_action("order_set_fulfilled", "Status saved.", result)
}

#[flutter_rust_bridge::frb(sync)]
pub fn order_update_product_name(order_id: String, product_name: String) -> ActionResponse {
    update_order_field(
        "order_update_product_name",
        &order_id,
        OrderField::ProductName(product_name),
    )
}

/// Rejects values outside 1..=100 without touching the stored order.
#[flutter_rust_bridge::frb(sync)]
pub fn order_update_quantity(order_id: String, quantity: i64) -> ActionResponse {
    update_order_field(
        "order_update_quantity",
        &order_id,
        OrderField::Quantity(quantity),
    )
}

#[flutter_rust_bridge::frb(sync)]
pub fn order_update_date(order_id: String, order_date_ms: i64) -> ActionResponse {
    update_order_field(
        "order_update_date",
        &order_id,
        OrderField::OrderDate(order_date_ms),
    )
}

/// Replaces (`Some`) or removes (`None`) the order's attachment bytes.
#[flutter_rust_bridge::frb(sync)]
pub fn order_set_attachment(order_id: String, bytes: Option<Vec<u8>>) -> ActionResponse {
    update_order_field(
        "order_set_attachment",
        &order_id,
        OrderField::Attachment(bytes.map(Attachment::from_bytes)),
    )
}

/// Deletes one order by id.
#[flutter_rust_bridge::frb(sync)]
pub fn order_delete(order_id: String) -> ActionResponse {
    let result = parse_id(&order_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .delete_order(id)
                .map_err(|err| err.to_string())
        })
        .map(|()| id)
    });
    match result {
        Ok(id) => ActionResponse::success("Order deleted.", id.to_string()),
        Err(err) => ActionResponse::failure(format!("order_delete failed: {err}")),
    }
}

/// Lists a customer's orders.
///
/// `newest_first = false` lists open orders first (default screen order).
#[flutter_rust_bridge::frb(sync)]
pub fn order_list(customer_id: String, newest_first: bool) -> OrderListResponse {
    let sort = if newest_first {
        OrderSort::NewestFirst
    } else {
        OrderSort::OpenFirstNewest
    };
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .orders_for_customer(id, sort)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(orders) => {
            let items = orders.iter().map(to_order_item).collect::<Vec<_>>();
            let message = format!("{} order(s).", items.len());
            OrderListResponse {
                ok: true,
                items,
                message,
            }
        }
        Err(err) => OrderListResponse {
            ok: false,
            items: Vec::new(),
            message: format!("order_list failed: {err}"),
        },
    }
}

/// Returns the open/fulfilled sections filtered by `search`.
#[flutter_rust_bridge::frb(sync)]
pub fn order_board(customer_id: String, search: String) -> OrderBoardResponse {
    let result = parse_id(&customer_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .order_board(id, search.as_str())
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(board) => OrderBoardResponse {
            ok: true,
            open: board.open.iter().map(to_order_item).collect(),
            fulfilled: board.fulfilled.iter().map(to_order_item).collect(),
            message: String::new(),
        },
        Err(err) => OrderBoardResponse {
            ok: false,
            open: Vec::new(),
            fulfilled: Vec::new(),
            message: format!("order_board failed: {err}"),
        },
    }
}

/// Returns the stored attachment bytes for the PDF viewer.
#[flutter_rust_bridge::frb(sync)]
pub fn order_attachment(order_id: String) -> AttachmentResponse {
    let result = parse_id(&order_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .order_attachment(id)
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(Some(attachment)) => AttachmentResponse {
            ok: true,
            bytes: Some(attachment.into_bytes()),
            message: String::new(),
        },
        Ok(None) => AttachmentResponse {
            ok: true,
            bytes: None,
            message: "No PDF attached.".to_string(),
        },
        Err(err) => AttachmentResponse {
            ok: false,
            bytes: None,
            message: format!("order_attachment failed: {err}"),
        },
    }
}

fn update_order_field(operation: &str, order_id: &str, field: OrderField) -> ActionResponse {
    let result = parse_id(order_id).and_then(|id| {
        with_connection(|conn| {
            order_service(conn)?
                .update_order_field(id, field)
                .map_err(|err| err.to_string())
        })
    });
    order_action(operation, "Order saved.", result)
}

fn customer_action(
    operation: &str,
    message: &str,
    result: Result<Customer, String>,
) -> ActionResponse {
    match result {
        Ok(customer) => ActionResponse::success(message, customer.id.to_string()),
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

fn order_action(operation: &str, message: &str, result: Result<Order, String>) -> ActionResponse {
    match result {
        Ok(order) => ActionResponse::success(message, order.id.to_string()),
        Err(err) => ActionResponse::failure(format!("{operation} failed: {err}")),
    }
}

/// `ORDERDESK_DB_PATH` when set, otherwise a file in the temp directory.
fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ORDERDESK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_connection<T>(f: impl FnOnce(&Connection) -> Result<T, String>) -> Result<T, String> {
    let conn = open_db(resolve_db_path()).map_err(|err| {
        warn!("event=ffi_db_open module=ffi status=error");
        format!("DB open failed: {err}")
    })?;
    f(&conn)
}

fn customer_service(
    conn: &Connection,
) -> Result<CustomerService<SqliteCustomerRepository<'_>>, String> {
    SqliteCustomerRepository::try_new(conn)
        .map(CustomerService::new)
        .map_err(|err| format!("customer repo init failed: {err}"))
}

fn order_service(conn: &Connection) -> Result<OrderService<SqliteOrderRepository<'_>>, String> {
    SqliteOrderRepository::try_new(conn)
        .map(OrderService::new)
        .map_err(|err| format!("order repo init failed: {err}"))
}

fn parse_id(value: &str) -> Result<Uuid, String> {
    Uuid::parse_str(value.trim()).map_err(|_| format!("invalid id `{value}`"))
}

fn parse_customer_field(field: &str, value: String) -> Result<CustomerField, String> {
    match field.trim() {
        "name" => Ok(CustomerField::Name(value)),
        "phone" => Ok(CustomerField::Phone(value)),
        "email" => Ok(CustomerField::Email(value)),
        "notes" => Ok(CustomerField::Notes(value)),
        other => Err(format!(
            "unknown customer field `{other}`; expected name|phone|email|notes"
        )),
    }
}

fn to_customer_item(customer: Customer) -> CustomerItem {
    CustomerItem {
        id: customer.id.to_string(),
        name: customer.name,
        phone: customer.phone,
        email: customer.email,
        notes: customer.notes,
        no_show_count: customer.no_show_count,
    }
}

fn to_order_item(order: &Order) -> OrderItem {
    OrderItem {
        id: order.id.to_string(),
        customer_id: order.customer_id.to_string(),
        product_name: order.product_name.clone(),
        quantity: order.quantity,
        order_date_ms: order.order_date,
        is_fulfilled: order.is_fulfilled,
        has_attachment: order.has_attachment(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, customer_create, customer_delete, customer_get, customer_list,
        customer_update_field, init_logging, order_attachment, order_board, order_create,
        order_delete, order_get, order_list, order_set_attachment, order_set_fulfilled,
        order_update_quantity, ping,
    };
    use orderdesk_core::db::open_db;
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn customer_create_then_get_and_list() {
        let name = unique_token("customer");
        let created = customer_create(
            name.clone(),
            "0176 1234".to_string(),
            String::new(),
            String::new(),
        );
        assert!(created.ok, "{}", created.message);
        let id = created.id.expect("create should return id");

        let fetched = customer_get(id.clone());
        assert!(fetched.ok, "{}", fetched.message);
        let customer = fetched.customer.expect("customer should exist");
        assert_eq!(customer.name, name);
        assert_eq!(customer.phone, "0176 1234");
        assert_eq!(customer.no_show_count, 0);

        let listed = customer_list();
        assert!(listed.ok, "{}", listed.message);
        assert!(listed.items.iter().any(|item| item.id == id));
    }

    #[test]
    fn customer_update_field_rejects_unknown_field() {
        let created = new_customer("field");
        let response = customer_update_field(created, "fax".to_string(), "1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unknown customer field"));
    }

    #[test]
    fn customer_get_rejects_malformed_id() {
        let response = customer_get("not-a-uuid".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid id"));
    }

    #[test]
    fn order_create_defaults_to_open_and_toggles() {
        let customer_id = new_customer("order");
        let created = order_create(customer_id.clone(), "Brot".to_string(), 3, Some(1_700_000_000_000), None);
        assert!(created.ok, "{}", created.message);
        let order_id = created.id.expect("order create should return id");

        let order = order_get(order_id.clone()).order.expect("order should exist");
        assert_eq!(order.customer_id, customer_id);
        assert_eq!(order.quantity, 3);
        assert!(!order.is_fulfilled);
        assert!(!order.has_attachment);

        let toggled = order_set_fulfilled(order_id.clone(), true);
        assert!(toggled.ok, "{}", toggled.message);
        let board = order_board(customer_id, String::new());
        assert!(board.open.is_empty());
        assert_eq!(board.fulfilled.len(), 1);
        assert_eq!(board.fulfilled[0].id, order_id);
    }

    #[test]
    fn order_create_with_unreadable_pdf_still_saves() {
        let customer_id = new_customer("pdf-missing");
        let missing = std::env::temp_dir().join(unique_token("missing")).join("order.pdf");
        let created = order_create(
            customer_id,
            "Kuchen".to_string(),
            1,
            None,
            Some(missing.display().to_string()),
        );
        assert!(created.ok, "{}", created.message);
        assert!(created.message.contains("without attachment"));

        let order_id = created.id.expect("order create should return id");
        let attachment = order_attachment(order_id);
        assert!(attachment.ok, "{}", attachment.message);
        assert!(attachment.bytes.is_none());
    }

    #[test]
    fn order_set_attachment_round_trips_bytes() {
        let customer_id = new_customer("pdf");
        let order_id = order_create(customer_id, "Torte".to_string(), 2, None, None)
            .id
            .expect("order create should return id");
        let bytes = b"%PDF-1.4\n\x00\xff binary".to_vec();

        let saved = order_set_attachment(order_id.clone(), Some(bytes.clone()));
        assert!(saved.ok, "{}", saved.message);
        assert_eq!(order_attachment(order_id.clone()).bytes, Some(bytes));

        let cleared = order_set_attachment(order_id.clone(), None);
        assert!(cleared.ok, "{}", cleared.message);
        assert!(order_attachment(order_id).bytes.is_none());
    }

    #[test]
    fn order_update_quantity_rejects_out_of_range() {
        let customer_id = new_customer("quantity");
        let order_id = order_create(customer_id, "Semmel".to_string(), 5, None, None)
            .id
            .expect("order create should return id");

        let response = order_update_quantity(order_id.clone(), 101);
        assert!(!response.ok);
        let order = order_get(order_id).order.expect("order should exist");
        assert_eq!(order.quantity, 5);
    }

    #[test]
    fn customer_delete_respects_mode() {
        let customer_id = new_customer("delete");
        let order_id = order_create(customer_id.clone(), "Brezel".to_string(), 1, None, None)
            .id
            .expect("order create should return id");

        let rejected = customer_delete(customer_id.clone(), false);
        assert!(!rejected.ok);
        assert!(order_get(order_id.clone()).ok);

        let deleted = customer_delete(customer_id.clone(), true);
        assert!(deleted.ok, "{}", deleted.message);
        assert!(!customer_get(customer_id.clone()).ok);
        assert!(!order_get(order_id.clone()).ok);

        let conn = open_db(super::resolve_db_path()).expect("open db");
        let remaining: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM orders WHERE customer_uuid = ?1",
                [customer_id.as_str()],
                |row| row.get(0),
            )
            .expect("count orders");
        assert_eq!(remaining, 0);
    }

    #[test]
    fn order_delete_removes_only_target() {
        let customer_id = new_customer("order-delete");
        let keep = order_create(customer_id.clone(), "A".to_string(), 1, Some(1_000), None)
            .id
            .expect("order create should return id");
        let removed = order_create(customer_id.clone(), "B".to_string(), 1, Some(2_000), None)
            .id
            .expect("order create should return id");

        assert!(order_delete(removed.clone()).ok);
        let listed = order_list(customer_id, true);
        assert!(listed.ok, "{}", listed.message);
        let ids = listed.items.iter().map(|item| item.id.as_str()).collect::<Vec<_>>();
        assert_eq!(ids, vec![keep.as_str()]);
        assert!(!order_delete(removed).ok);
    }

    fn new_customer(prefix: &str) -> String {
        let created = customer_create(unique_token(prefix), String::new(), String::new(), String::new());
        assert!(created.ok, "{}", created.message);
        created.id.expect("customer create should return id")
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
