//! Flutter-facing bindings for OrderDesk.

pub mod api;
