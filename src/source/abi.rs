//! Solidity ABI helpers for decoding `OrderBookSwap` view-call results.
//!
//! Only the shapes the contract returns are supported: a dynamic array of
//! static `Order` tuples.
//!
//!   word 0          offset of the array (normally 0x20)
//!   word off        element count n
//!   words off+1..   n × [address trader, uint256 sellingAmount,
//!                        uint256 buyingAmount, bool orderFilled]

use anyhow::{anyhow, Result};

use crate::models::RawOrder;

pub const WORD: usize = 32;
const ORDER_WORDS: usize = 4;

/// Decode a `0x…` hex string into bytes.
pub fn decode_hex(data: &str) -> Result<Vec<u8>> {
    let bare = data.strip_prefix("0x").unwrap_or(data);
    hex::decode(bare).map_err(|e| anyhow!("invalid hex return data: {}", e))
}

/// Borrow the 32-byte word at word index `index`.
pub fn word(data: &[u8], index: usize) -> Result<&[u8]> {
    let start = index * WORD;
    data.get(start..start.saturating_add(WORD))
        .ok_or_else(|| anyhow!("return data truncated: no word at index {} ({} bytes)", index, data.len()))
}

/// Read a word as a `usize` (offsets and lengths). Fails if it does not fit.
pub fn word_to_usize(w: &[u8]) -> Result<usize> {
    let (high, low) = w.split_at(WORD - 8);
    if high.iter().any(|b| *b != 0) {
        return Err(anyhow!("word too large for usize: 0x{}", hex::encode(w)));
    }
    let mut buf = [0u8; 8];
    buf.copy_from_slice(low);
    usize::try_from(u64::from_be_bytes(buf)).map_err(|e| anyhow!("word too large for usize: {}", e))
}

/// Read an `address` word (left-padded to 32 bytes) as lowercase `0x` hex.
pub fn word_to_address(w: &[u8]) -> Result<String> {
    let (pad, addr) = w.split_at(WORD - 20);
    if pad.iter().any(|b| *b != 0) {
        return Err(anyhow!("dirty address padding: 0x{}", hex::encode(w)));
    }
    Ok(format!("0x{}", hex::encode(addr)))
}

/// Read a `bool` word. Only 0 and 1 are valid encodings.
pub fn word_to_bool(w: &[u8]) -> Result<bool> {
    match word_to_usize(w) {
        Ok(0) => Ok(false),
        Ok(1) => Ok(true),
        _ => Err(anyhow!("invalid bool word: 0x{}", hex::encode(w))),
    }
}

/// Render a big-endian unsigned integer of any width as a decimal string.
pub fn uint_to_decimal(bytes: &[u8]) -> String {
    let mut digits: Vec<u8> = Vec::new(); // little-endian base-10 digits
    for &byte in bytes {
        // digits = digits * 256 + byte
        let mut carry = byte as u32;
        for d in digits.iter_mut() {
            let v = (*d as u32) * 256 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }
    if digits.is_empty() {
        return "0".to_string();
    }
    digits.iter().rev().map(|d| char::from(b'0' + d)).collect()
}

/// Decode the return data of `getAllOrdersAforB()` / `getAllOrdersBforA()`.
pub fn decode_orders(data: &[u8]) -> Result<Vec<RawOrder>> {
    let offset = word_to_usize(word(data, 0)?)?;
    if offset % WORD != 0 {
        return Err(anyhow!("array offset {} is not word aligned", offset));
    }
    let base = offset / WORD;
    let len = word_to_usize(word(data, base)?)?;

    let needed = len
        .checked_mul(ORDER_WORDS)
        .and_then(|words| words.checked_add(base + 1))
        .and_then(|words| words.checked_mul(WORD))
        .ok_or_else(|| anyhow!("array length overflow: {}", len))?;
    if needed > data.len() {
        return Err(anyhow!(
            "return data truncated: {} orders need {} bytes, got {}",
            len,
            needed,
            data.len()
        ));
    }

    (0..len)
        .map(|i| {
            let first = base + 1 + i * ORDER_WORDS;
            Ok(RawOrder {
                trader: word_to_address(word(data, first)?)
                    .map_err(|e| anyhow!("order {} trader: {}", i, e))?,
                selling_amount: uint_to_decimal(word(data, first + 1)?),
                buying_amount: uint_to_decimal(word(data, first + 2)?),
                order_filled: word_to_bool(word(data, first + 3)?)
                    .map_err(|e| anyhow!("order {} orderFilled: {}", i, e))?,
            })
        })
        .collect()
}
