pub mod client;
pub mod config;
pub mod order;
pub mod result;
pub mod trade;
pub mod ui;
