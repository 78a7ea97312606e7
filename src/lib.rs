//! Keyboard-driven order entry for the Alpaca trading API.
//!
//! Each key press runs one action through an [`dispatcher::AppContext`]:
//! `b` buys after confirming the latest price, `s`/`c`/`p`/`t` sell a fixed
//! demo lot, every other key does nothing.

pub mod alpaca;
pub mod datastructures;
pub mod dispatcher;
pub mod terminal;
