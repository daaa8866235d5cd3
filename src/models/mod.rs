pub mod order;

pub use order::{Direction, DisplayOrder, OrderSnapshot, OrderType, RawOrder};
