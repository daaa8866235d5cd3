use async_trait::async_trait;
use tokio::try_join;

use crate::models::{Direction, OrderSnapshot, RawOrder};
use crate::view::FetchState;

pub mod abi;
pub mod order_book_swap;
pub mod snapshot;

pub use order_book_swap::OrderBookSwap;
pub use snapshot::SnapshotSource;

/// Where raw order lists come from.
///
/// `Ok(None)` means the list is not available (yet); the view treats it as
/// empty. `Err` is a real fetch failure and turns the whole view into an
/// error indicator.
#[async_trait]
pub trait OrderSource: Send + Sync {
    fn identifier(&self) -> &str;

    async fn raw_orders(&self, direction: Direction) -> Result<Option<Vec<RawOrder>>, anyhow::Error>;

    /// Both directions as one snapshot. The default reads them concurrently;
    /// sources that hold both lists in one place should read it once.
    async fn snapshot(&self) -> Result<OrderSnapshot, anyhow::Error> {
        let (a4b, b4a) = try_join!(
            self.raw_orders(Direction::AForB),
            self.raw_orders(Direction::BForA),
        )?;
        Ok(OrderSnapshot::new(a4b, b4a))
    }
}

/// Fetch one snapshot of both directions from `source`.
pub async fn fetch_snapshot(source: &dyn OrderSource) -> Result<OrderSnapshot, anyhow::Error> {
    let snapshot = source.snapshot().await?;
    log::debug!(
        "[{}] fetched a4b={:?} b4a={:?}",
        source.identifier(),
        snapshot.a4b.as_ref().map(|o| o.len()),
        snapshot.b4a.as_ref().map(|o| o.len())
    );
    Ok(snapshot)
}

/// Fetch both directions and settle into a `FetchState`. Never fails.
pub async fn fetch_orders(source: &dyn OrderSource) -> FetchState<OrderSnapshot> {
    let result = fetch_snapshot(source).await;
    if let Err(e) = &result {
        log::error!("[{}] order fetch failed: {:#}", source.identifier(), e);
    }
    FetchState::from_result(result)
}
