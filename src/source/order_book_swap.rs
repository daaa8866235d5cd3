//! OrderBookSwap: reads both order lists straight from the contract.
//!
//! The contract exposes one view function per direction, each returning the
//! full `Order[]` history (filled orders included):
//!   - `getAllOrdersAforB()` → selector 0x572242bf
//!   - `getAllOrdersBforA()` → selector 0x1fd33128
//!
//! Calls go through `eth_call`, so nothing is signed or sent on chain.

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use super::abi::{decode_hex, decode_orders};
use super::OrderSource;
use crate::models::{Direction, RawOrder};
use crate::rpc::JsonRpcApi;

const IDENTIFIER: &str = "OrderBookSwap";
const GET_ALL_ORDERS_A_FOR_B: &str = "0x572242bf";
const GET_ALL_ORDERS_B_FOR_A: &str = "0x1fd33128";

pub struct OrderBookSwap {
    rpc: JsonRpcApi,
    address: String,
}

impl OrderBookSwap {
    pub fn new(rpc: JsonRpcApi, address: &str) -> Result<Self> {
        if !crate::utils::is_address(address) {
            return Err(anyhow!("invalid contract address: {}", address));
        }
        Ok(Self {
            rpc,
            address: crate::utils::normalize_address(address),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

pub fn selector(direction: Direction) -> &'static str {
    match direction {
        Direction::AForB => GET_ALL_ORDERS_A_FOR_B,
        Direction::BForA => GET_ALL_ORDERS_B_FOR_A,
    }
}

/// Decode one `eth_call` result. An empty `0x` result means there is no
/// contract code at the address, which is reported as "unavailable".
pub fn orders_from_call_result(result: &str) -> Result<Option<Vec<RawOrder>>> {
    let bytes = decode_hex(result)?;
    if bytes.is_empty() {
        return Ok(None);
    }
    decode_orders(&bytes).map(Some)
}

#[async_trait]
impl OrderSource for OrderBookSwap {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    async fn raw_orders(&self, direction: Direction) -> Result<Option<Vec<RawOrder>>> {
        let result = self.rpc.eth_call(&self.address, selector(direction)).await?;
        let orders = orders_from_call_result(&result)
            .map_err(|e| anyhow!("{} {} decode error: {}", IDENTIFIER, direction.label(), e))?;
        match &orders {
            Some(o) => log::info!("[order_book_swap] {} returned {} orders", direction.label(), o.len()),
            None => log::warn!("[order_book_swap] no contract code at {}", self.address),
        }
        Ok(orders)
    }
}
