use std::time::Duration;

use swap_orderbook_rs::config::{parse_args, Command, Config, SourceConfig, CONTRACT_ENV, RPC_URL_ENV};
use swap_orderbook_rs::source::{fetch_orders, OrderBookSwap, OrderSource, SnapshotSource};
use swap_orderbook_rs::view::{render_json, render_text, FetchState};
use swap_orderbook_rs::{save_snapshot, JsonRpcApi, OrderBook, OrderSnapshot};

fn print_usage(bin: &str) {
    eprintln!("Usage:");
    eprintln!(
        "  {} [--contract <address>] [--rpc <url>] [--snapshot <file>] [--save <file>] [--json] [--watch <secs>]",
        bin
    );
    eprintln!();
    eprintln!("  --contract  OrderBookSwap address (or set {})", CONTRACT_ENV);
    eprintln!("  --rpc       JSON-RPC endpoint (or set {}, default http://127.0.0.1:8545)", RPC_URL_ENV);
    eprintln!("  --snapshot  read orders from a JSON snapshot instead of the chain");
    eprintln!("  --save      write the fetched raw orders to a JSON snapshot");
    eprintln!("  --json      print rows as JSON");
    eprintln!("  --watch     re-fetch every <secs> seconds");
    eprintln!();
    eprintln!("  Example:");
    eprintln!("    {} --contract 0x5FbDB2315678afecb367f032d93F642f64180aa3", bin);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let raw_args: Vec<String> = std::env::args().collect();
    let bin = raw_args.first().map(String::as_str).unwrap_or("swap-orderbook-rs");

    let config = match parse_args(raw_args.get(1..).unwrap_or(&[]), |k| std::env::var(k).ok()) {
        Ok(Command::Run(config)) => config,
        Ok(Command::Help) => {
            print_usage(bin);
            return Ok(());
        }
        Err(e) => {
            eprintln!("{}", e);
            print_usage(bin);
            std::process::exit(1);
        }
    };

    let source: Box<dyn OrderSource> = match &config.source {
        SourceConfig::Contract { rpc_url, address } => {
            log::info!("Reading OrderBookSwap at {} via {}", address, rpc_url);
            Box::new(OrderBookSwap::new(JsonRpcApi::new(rpc_url), address)?)
        }
        SourceConfig::Snapshot { path } => {
            log::info!("Reading orders from snapshot {}", path);
            Box::new(SnapshotSource::new(path))
        }
    };

    let ok = run(source.as_ref(), &config).await?;
    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Fetch, render and (in watch mode) repeat. Returns false if the last fetch failed.
async fn run(source: &dyn OrderSource, config: &Config) -> Result<bool, Box<dyn std::error::Error>> {
    let mut book = OrderBook::new();
    let mut previous: Option<OrderSnapshot> = None;
    let mut interval = config
        .watch
        .map(|secs| tokio::time::interval(Duration::from_secs(secs)));

    if !config.json {
        eprintln!("{}", render_text(&book.view(&FetchState::Pending)));
    }

    loop {
        if let Some(interval) = interval.as_mut() {
            interval.tick().await;
        }

        let state = match fetch_orders(source).await {
            FetchState::Ready(snapshot) => {
                // Unchanged lists keep their Arc so the memo skips them
                let snapshot = match &previous {
                    Some(prev) => snapshot.reuse_unchanged(prev),
                    None => snapshot,
                };
                if let Some(path) = &config.save {
                    save_snapshot(&snapshot, path)?;
                    log::info!("Saved snapshot to {}", path);
                }
                previous = Some(snapshot.clone());
                FetchState::Ready(snapshot)
            }
            other => other,
        };

        let rendered = book.view(&state);
        if config.json {
            println!("{}", render_json(&rendered)?);
        } else {
            println!("{}", render_text(&rendered));
        }
        let (a4b, b4a) = book.computations();
        log::debug!("normalizations so far: a4b={} b4a={}", a4b, b4a);

        if interval.is_none() {
            return Ok(!state.is_error());
        }
    }
}
