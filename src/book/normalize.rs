//! Order normalization: reprojects a raw A4B or B4A list onto Green/Orange amounts.
//!
//! Raw orders describe amounts relative to their own selling side:
//!   - A4B (Green for Orange): selling = Green, buying = Orange
//!   - B4A (Orange for Green): selling = Orange, buying = Green
//!
//! `normalize` hides that orientation so both lists can share one table.

use crate::models::{Direction, DisplayOrder, RawOrder};
use crate::source::abi::uint_to_decimal;

/// Normalize one raw order list.
///
/// Filled orders are dropped before mapping, so `id` is the position within
/// the open orders only. An absent list yields an empty result.
pub fn normalize(raw: Option<&[RawOrder]>, direction: Direction) -> Vec<DisplayOrder> {
    let raw = match raw {
        Some(r) => r,
        None => return Vec::new(),
    };

    raw.iter()
        .filter(|order| !order.order_filled)
        .enumerate()
        .map(|(id, order)| {
            let selling = parse_amount(&order.selling_amount);
            let buying = parse_amount(&order.buying_amount);
            let (green_amount, orange_amount) = match direction {
                Direction::AForB => (selling, buying),
                Direction::BForA => (buying, selling),
            };
            DisplayOrder {
                id,
                order_type: direction.order_type(),
                trader: order.trader.clone(),
                green_amount,
                orange_amount,
                is_filled: order.order_filled,
            }
        })
        .collect()
}

/// Convert an amount string to `f64`, returning `0.0` when it is not a number.
///
/// Accepts surrounding whitespace, decimal and exponent notation, `0x`/`0o`/`0b`
/// integer prefixes and `Infinity`. An empty string is zero.
pub fn parse_amount(s: &str) -> f64 {
    let n = to_number(s);
    if n.is_nan() {
        0.0
    } else {
        n
    }
}

fn to_number(s: &str) -> f64 {
    // U+FEFF counts as whitespace for numeric strings but not for str::trim
    let s = s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if s.len() > 2 && s.as_bytes()[0] == b'0' {
        let radix = match s.as_bytes()[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return parse_radix(&s[2..], radix);
        }
    }

    // f64::from_str also takes "inf" and "nan", which are not numbers here
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Digits are collected as an exact big-endian integer first, then converted
/// through its decimal form so the result is rounded once.
fn parse_radix(digits: &str, radix: u32) -> f64 {
    let mut bytes: Vec<u8> = Vec::new(); // big-endian
    for c in digits.chars() {
        let mut carry = match c.to_digit(radix) {
            Some(d) => d,
            None => return f64::NAN,
        };
        // bytes = bytes * radix + digit
        for b in bytes.iter_mut().rev() {
            let v = (*b as u32) * radix + carry;
            *b = (v & 0xff) as u8;
            carry = v >> 8;
        }
        while carry > 0 {
            bytes.insert(0, (carry & 0xff) as u8);
            carry >>= 8;
        }
    }
    uint_to_decimal(&bytes).parse::<f64>().unwrap_or(f64::NAN)
}
