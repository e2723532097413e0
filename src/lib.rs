//! Loyalty backend: users scan products and receipts, earn health points on
//! qualifying purchases and redeem them for rewards. The points ledger is
//! append-only and the balance is always the ledger's running sum.

pub mod app;
pub mod auth;
pub mod cart;
pub mod config;
pub mod error;
pub mod items;
pub mod points;
pub mod rewards;
pub mod scan;
pub mod state;
pub mod users;
