use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::OrderSource;
use crate::models::{Direction, OrderSnapshot, RawOrder};

const IDENTIFIER: &str = "snapshot";

/// Write both raw order lists to `path` as pretty JSON
/// (`{"a4b": [...] | null, "b4a": [...] | null}`).
pub fn save_snapshot(snapshot: &OrderSnapshot, path: &str) -> Result<()> {
    let file = File::create(path)
        .map_err(|e| anyhow!("cannot create order snapshot {}: {}", path, e))?;
    serde_json::to_writer_pretty(BufWriter::new(file), snapshot)
        .map_err(|e| anyhow!("cannot write order snapshot {}: {}", path, e))?;
    let a4b = snapshot.a4b.as_ref().map(|o| o.len());
    let b4a = snapshot.b4a.as_ref().map(|o| o.len());
    log::debug!("[snapshot] wrote {} (a4b={:?} b4a={:?})", path, a4b, b4a);
    Ok(())
}

/// Read an order snapshot written by `save_snapshot` (or by hand).
/// A missing or `null` direction loads as unavailable.
pub fn load_snapshot(path: &str) -> Result<OrderSnapshot> {
    let file =
        File::open(path).map_err(|e| anyhow!("cannot open order snapshot {}: {}", path, e))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| anyhow!("cannot parse order snapshot {}: {}", path, e))
}

/// Serves order lists from a JSON snapshot file.
///
/// The file is read once per fetch, so both directions always come from the
/// same version of the file, and `--watch` still picks up edits.
pub struct SnapshotSource {
    path: String,
    loads: AtomicUsize,
}

impl SnapshotSource {
    pub fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            loads: AtomicUsize::new(0),
        }
    }

    /// Number of times the file has been read.
    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }

    async fn load(&self) -> Result<OrderSnapshot> {
        let n = self.loads.fetch_add(1, Ordering::Relaxed) + 1;
        log::debug!("[snapshot] load #{} from {}", n, self.path);
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || load_snapshot(&path)).await?
    }
}

#[async_trait]
impl OrderSource for SnapshotSource {
    fn identifier(&self) -> &str {
        IDENTIFIER
    }

    async fn raw_orders(&self, direction: Direction) -> Result<Option<Vec<RawOrder>>> {
        let snapshot = self.load().await?;
        Ok(snapshot.get(direction).map(|orders| Vec::clone(orders)))
    }

    async fn snapshot(&self) -> Result<OrderSnapshot> {
        self.load().await
    }
}
