use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which of the two contract order lists an order came from.
///
/// The lists share one struct shape, but `selling_amount` / `buying_amount`
/// point in opposite directions along the Green/Orange axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// A4B: sells Green, wants Orange (`getAllOrdersAforB`).
    AForB,
    /// B4A: sells Orange, wants Green (`getAllOrdersBforA`).
    BForA,
}

impl Direction {
    /// Both directions, in the order they are displayed.
    pub const ALL: [Direction; 2] = [Direction::AForB, Direction::BForA];

    pub fn order_type(&self) -> OrderType {
        match self {
            Direction::AForB => OrderType::Green,
            Direction::BForA => OrderType::Orange,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Direction::AForB => "A4B",
            Direction::BForA => "B4A",
        }
    }
}

/// Display tag for a normalized order. Green = A4B, Orange = B4A.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Green,
    Orange,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Green => "Green",
            OrderType::Orange => "Orange",
        }
    }
}

/// An order as the contract returns it, relative to its own selling side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub trader: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub selling_amount: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub buying_amount: String,
    pub order_filled: bool,
}

impl RawOrder {
    pub fn new(trader: &str, selling_amount: &str, buying_amount: &str, order_filled: bool) -> Self {
        Self {
            trader: trader.to_string(),
            selling_amount: selling_amount.to_string(),
            buying_amount: buying_amount.to_string(),
            order_filled,
        }
    }
}

/// Amounts arrive either as decimal strings (bignums) or plain JSON numbers.
/// Anything else (`null`, booleans, objects, a missing key) loads as an empty string, which
/// normalizes to zero for that field alone.
fn deserialize_amount<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum A {
        Str(String),
        Int(u64),
        Float(f64),
        Other(serde::de::IgnoredAny),
    }
    let a = A::deserialize(deserializer)?;
    Ok(match a {
        A::Str(s) => s,
        A::Int(n) => n.to_string(),
        A::Float(f) => f.to_string(),
        A::Other(_) => String::new(),
    })
}

/// A direction-agnostic order, ready to be shown in the merged table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOrder {
    /// Position within the filtered list of its own direction. Not unique
    /// across the merged view.
    pub id: usize,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub trader: String,
    pub green_amount: f64,
    pub orange_amount: f64,
    pub is_filled: bool,
}

/// Raw order lists for both directions as of one fetch.
///
/// `None` means the list was unavailable. The `Arc` allocation identifies
/// the snapshot for memoization, so an unchanged list should keep its `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    #[serde(default)]
    pub a4b: Option<Arc<Vec<RawOrder>>>,
    #[serde(default)]
    pub b4a: Option<Arc<Vec<RawOrder>>>,
}

impl OrderSnapshot {
    pub fn new(a4b: Option<Vec<RawOrder>>, b4a: Option<Vec<RawOrder>>) -> Self {
        Self {
            a4b: a4b.map(Arc::new),
            b4a: b4a.map(Arc::new),
        }
    }

    pub fn get(&self, direction: Direction) -> Option<&Arc<Vec<RawOrder>>> {
        match direction {
            Direction::AForB => self.a4b.as_ref(),
            Direction::BForA => self.b4a.as_ref(),
        }
    }

    /// Keep the previous `Arc` for every direction whose contents did not change.
    pub fn reuse_unchanged(mut self, previous: &OrderSnapshot) -> Self {
        fn keep(next: &mut Option<Arc<Vec<RawOrder>>>, prev: &Option<Arc<Vec<RawOrder>>>) {
            if let (Some(n), Some(p)) = (next.as_ref(), prev.as_ref()) {
                if n == p {
                    *next = Some(Arc::clone(p));
                }
            }
        }
        keep(&mut self.a4b, &previous.a4b);
        keep(&mut self.b4a, &previous.b4a);
        self
    }
}
