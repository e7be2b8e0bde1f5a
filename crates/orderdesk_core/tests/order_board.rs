use orderdesk_core::db::open_db_in_memory;
use orderdesk_core::{
    BoardSection, CustomerDraft, CustomerService, OrderDraft, OrderService, OrderSort,
    SqliteCustomerRepository, SqliteOrderRepository,
};

fn dated(product: &str, order_date: i64) -> OrderDraft {
    OrderDraft {
        order_date: Some(order_date),
        ..OrderDraft::new(product)
    }
}

#[test]
fn delete_by_board_position_targets_the_filtered_section() {
    let conn = open_db_in_memory().unwrap();
    let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());
    let orders = OrderService::new(SqliteOrderRepository::try_new(&conn).unwrap());
    let anna = customers.create_customer(CustomerDraft::default()).unwrap();

    let o1 = orders.create_order(anna.id, dated("Lampe", 300)).unwrap();
    let o2 = orders.create_order(anna.id, dated("Regal", 200)).unwrap();
    let o3 = orders.create_order(anna.id, dated("Sofa", 100)).unwrap();
    orders.set_order_fulfilled(o2.id, true).unwrap();

    let board = orders.order_board(anna.id, "").unwrap();
    let open_ids: Vec<_> = board.open.iter().map(|order| order.id).collect();
    assert_eq!(open_ids, vec![o1.id, o3.id]);

    let target = board.order_id_at(BoardSection::Open, 1).unwrap();
    assert_eq!(target, o3.id);
    orders.delete_order(target).unwrap();

    let remaining: Vec<_> = orders
        .orders_for_customer(anna.id, OrderSort::default())
        .unwrap()
        .into_iter()
        .map(|order| order.id)
        .collect();
    assert_eq!(remaining, vec![o1.id, o2.id]);
}

#[test]
fn board_search_filters_both_sections_case_insensitively() {
    let conn = open_db_in_memory().unwrap();
    let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());
    let orders = OrderService::new(SqliteOrderRepository::try_new(&conn).unwrap());
    let anna = customers.create_customer(CustomerDraft::default()).unwrap();

    let set = orders.create_order(anna.id, dated("Stuhl 4er Set", 300)).unwrap();
    orders.create_order(anna.id, dated("Tisch", 200)).unwrap();
    let done = orders.create_order(anna.id, dated("Barstuhl", 100)).unwrap();
    orders.set_order_fulfilled(done.id, true).unwrap();

    let board = orders.order_board(anna.id, "stuhl").unwrap();
    assert_eq!(board.open.len(), 1);
    assert_eq!(board.open[0].id, set.id);
    assert_eq!(board.fulfilled.len(), 1);
    assert_eq!(board.fulfilled[0].id, done.id);

    let everything = orders.order_board(anna.id, "").unwrap();
    assert_eq!(everything.open.len() + everything.fulfilled.len(), 3);
}

#[test]
fn board_sections_are_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());
    let orders = OrderService::new(SqliteOrderRepository::try_new(&conn).unwrap());
    let anna = customers.create_customer(CustomerDraft::default()).unwrap();

    let older = orders.create_order(anna.id, dated("alt", 1_000)).unwrap();
    let newer = orders.create_order(anna.id, dated("neu", 2_000)).unwrap();

    let board = orders.order_board(anna.id, "").unwrap();
    assert_eq!(board.order_id_at(BoardSection::Open, 0), Some(newer.id));
    assert_eq!(board.order_id_at(BoardSection::Open, 1), Some(older.id));
    assert!(board.section(BoardSection::Fulfilled).is_empty());
}

#[test]
fn board_for_customer_without_orders_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let customers = CustomerService::new(SqliteCustomerRepository::try_new(&conn).unwrap());
    let orders = OrderService::new(SqliteOrderRepository::try_new(&conn).unwrap());
    let anna = customers.create_customer(CustomerDraft::default()).unwrap();

    assert!(orders.order_board(anna.id, "tisch").unwrap().is_empty());
}
