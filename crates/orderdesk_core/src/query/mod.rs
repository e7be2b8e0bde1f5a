//! Order query layer.
//!
//! # Responsibility
//! - Name the supported sort policies for a customer's order list.
//! - Filter orders by fulfilment status and product search text.
//! - Build the open/fulfilled board shown on the customer detail screen.
//!
//! # Invariants
//! - Every filter returns an order-preserving subsequence of its input.
//! - An empty (or whitespace-only) search matches every order.
//! - Board positions resolve to stable `OrderId`s; callers delete by id,
//!   never by position.

use crate::model::order::{Order, OrderId};

/// Sort policy for a customer's orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderSort {
    /// Open orders before fulfilled ones, newest order date first in each.
    #[default]
    OpenFirstNewest,
    /// Newest order date first, regardless of status.
    NewestFirst,
}

/// Board section an order is listed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardSection {
    Open,
    Fulfilled,
}

pub fn filter_open(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| !order.is_fulfilled)
        .cloned()
        .collect()
}

pub fn filter_fulfilled(orders: &[Order]) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| order.is_fulfilled)
        .cloned()
        .collect()
}

/// Keeps orders whose product name contains `query`, ignoring case.
///
/// Case folding uses Unicode lowercase, so `"stuhl"` matches
/// `"Stuhl 4er Set"` and `"ÄRMEL"` matches `"ärmel"`.
pub fn search_by_product(orders: &[Order], query: &str) -> Vec<Order> {
    let needle = normalize_search(query);
    orders
        .iter()
        .filter(|order| matches_product(order, needle.as_deref()))
        .cloned()
        .collect()
}

/// Open and fulfilled orders of one customer after search filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBoard {
    pub open: Vec<Order>,
    pub fulfilled: Vec<Order>,
}

impl OrderBoard {
    /// Partitions `orders` by status and applies `search` to both halves.
    ///
    /// Input order is kept inside each section.
    pub fn build(orders: Vec<Order>, search: &str) -> Self {
        let needle = normalize_search(search);
        let (fulfilled, open): (Vec<Order>, Vec<Order>) = orders
            .into_iter()
            .filter(|order| matches_product(order, needle.as_deref()))
            .partition(|order| order.is_fulfilled);
        Self { open, fulfilled }
    }

    pub fn section(&self, section: BoardSection) -> &[Order] {
        match section {
            BoardSection::Open => &self.open,
            BoardSection::Fulfilled => &self.fulfilled,
        }
    }

    /// Maps a row position of the displayed (filtered) section to an order id.
    pub fn order_id_at(&self, section: BoardSection, position: usize) -> Option<OrderId> {
        self.section(section).get(position).map(|order| order.id)
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty() && self.fulfilled.is_empty()
    }
}

// Whitespace only decides blankness; a non-blank query is matched as typed.
fn normalize_search(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}

fn matches_product(order: &Order, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => order.product_name.to_lowercase().contains(needle),
    }
}
