//! # swap-orderbook-rs
//!
//! A merged, human-readable view of the two order lists of a two-asset
//! `OrderBookSwap` contract.
//!
//! The contract keeps one list per direction, and each list describes its
//! amounts relative to its own selling side:
//!
//! | Direction | Tag | Selling | Buying | Contract call |
//! |-----------|-----|---------|--------|---------------|
//! | A4B | Green | Green | Orange | `getAllOrdersAforB()` |
//! | B4A | Orange | Orange | Green | `getAllOrdersBforA()` |
//!
//! [`book::normalize`] reprojects both onto `{green_amount, orange_amount}`,
//! drops filled orders, and [`book::merge`] concatenates A4B then B4A.
//! [`OrderBook`] memoizes each direction and gates the table on a
//! [`view::FetchState`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use swap_orderbook_rs::{JsonRpcApi, OrderBook};
//! use swap_orderbook_rs::source::{fetch_orders, OrderBookSwap};
//! use swap_orderbook_rs::view::render_text;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rpc = JsonRpcApi::new("http://127.0.0.1:8545");
//!     let swap = OrderBookSwap::new(rpc, "0x5FbDB2315678afecb367f032d93F642f64180aa3")?;
//!
//!     let state = fetch_orders(&swap).await;
//!     let mut book = OrderBook::new();
//!     println!("{}", render_text(&book.view(&state)));
//!     Ok(())
//! }
//! ```
//!
//! ## CLI Usage
//!
//! ```bash
//! # Read the contract on a local node
//! cargo run --release -- --contract 0x5FbDB2315678afecb367f032d93F642f64180aa3
//!
//! # Render a saved snapshot as JSON rows
//! cargo run --release -- --snapshot orders.json --json
//!
//! # Poll every 10 seconds and keep a snapshot on disk
//! cargo run --release -- --contract <addr> --watch 10 --save orders.json
//! ```

pub mod book;
pub mod config;
pub mod models;
pub mod rpc;
pub mod source;
pub mod utils;
pub mod view;

pub use book::{merge, normalize, OrderBook};
pub use models::{Direction, DisplayOrder, OrderSnapshot, OrderType, RawOrder};
pub use rpc::JsonRpcApi;
pub use source::snapshot::{load_snapshot, save_snapshot};
pub use source::OrderSource;
pub use view::{FetchState, Rendered};
