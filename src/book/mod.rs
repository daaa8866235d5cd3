use std::sync::Arc;

use crate::models::{Direction, DisplayOrder, OrderSnapshot, RawOrder};
use crate::view::{FetchState, Rendered};

pub mod memo;
pub mod merge;
pub mod normalize;

pub use memo::Memo;
pub use merge::merge;
pub use normalize::{normalize, parse_amount};

/// Merged Green/Orange order book.
///
/// Holds one memo per direction so a new A4B list never recomputes the B4A
/// view (and vice versa). Feed it the latest fetch state and it returns what
/// should be shown.
#[derive(Debug, Default)]
pub struct OrderBook {
    a4b: Memo<Vec<RawOrder>, Vec<DisplayOrder>>,
    b4a: Memo<Vec<RawOrder>, Vec<DisplayOrder>>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalized view of one direction, reused while its snapshot `Arc` is unchanged.
    pub fn orders(&mut self, snapshot: &OrderSnapshot, direction: Direction) -> Arc<Vec<DisplayOrder>> {
        let memo = match direction {
            Direction::AForB => &mut self.a4b,
            Direction::BForA => &mut self.b4a,
        };
        memo.get(snapshot.get(direction), |raw| {
            normalize(raw.map(|r| r.as_slice()), direction)
        })
    }

    /// Decide what to show for a fetch state: loading, error or the merged table.
    pub fn view(&mut self, state: &FetchState<OrderSnapshot>) -> Rendered {
        match state {
            FetchState::Pending => Rendered::Loading,
            FetchState::Failed(e) => Rendered::Error(e.clone()),
            FetchState::Ready(snapshot) => {
                let a4b = self.orders(snapshot, Direction::AForB);
                let b4a = self.orders(snapshot, Direction::BForA);
                Rendered::Table(merge(&a4b, &b4a))
            }
        }
    }

    /// Recomputation counts for (A4B, B4A).
    pub fn computations(&self) -> (usize, usize) {
        (self.a4b.computations(), self.b4a.computations())
    }
}
