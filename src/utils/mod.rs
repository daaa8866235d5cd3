pub fn remove_trailing_slash(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Lowercase an address and make sure it carries the `0x` prefix.
pub fn normalize_address(address: &str) -> String {
    let trimmed = address.trim();
    let bare = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    format!("0x{}", bare.to_ascii_lowercase())
}

/// True for a `0x`-prefixed 20-byte hex address.
pub fn is_address(address: &str) -> bool {
    let bare = match address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")) {
        Some(b) => b,
        None => return false,
    };
    bare.len() == 40 && hex::decode(bare).is_ok()
}

pub async fn retry<T, E, F, Fut>(retries: u32, base_delay_ms: u64, f: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
{
    retry_if(retries, base_delay_ms, f, |_| true).await
}

/// Like `retry`, but gives up immediately on errors `should_retry` rejects.
pub async fn retry_if<T, E, F, Fut, P>(
    mut retries: u32,
    base_delay_ms: u64,
    mut f: F,
    should_retry: P,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Debug,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0u32;
    loop {
        match f().await {
            Ok(result) => return Ok(result),
            Err(e) if retries == 0 || !should_retry(&e) => return Err(e),
            Err(e) => {
                // Exponential backoff: base_delay * 2^attempt, capped at 30s
                let delay = (base_delay_ms * (1u64 << attempt.min(5))).min(30_000);
                log::warn!(
                    "[retry] attempt {} failed ({:?}), retrying in {}ms...",
                    attempt + 1,
                    e,
                    delay
                );
                tokio::time::sleep(tokio::time::Duration::from_millis(delay)).await;
                retries -= 1;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_remove_trailing_slash() {
        assert_eq!(remove_trailing_slash("http://node:8545/"), "http://node:8545");
        assert_eq!(remove_trailing_slash("http://node:8545"), "http://node:8545");
    }

    #[test]
    fn test_normalize_address() {
        assert_eq!(normalize_address("0xABCDef"), "0xabcdef");
        assert_eq!(normalize_address(" ABCD "), "0xabcd");
        assert_eq!(normalize_address("0XAB"), "0xab");
    }

    #[test]
    fn test_is_address() {
        assert!(is_address("0x5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_address("5FbDB2315678afecb367f032d93F642f64180aa3"));
        assert!(!is_address("0x5FbDB2315678afecb367f032d93F642f64180a"));
        assert!(!is_address("0xZZbDB2315678afecb367f032d93F642f64180aa3"));
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = retry(3, 1, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(format!("fail {}", n))
            } else {
                Ok(n)
            }
        })
        .await;
        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_if_stops_on_rejected_error() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = retry_if(
            5,
            1,
            || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err("fatal")
            },
            |e| *e != "fatal",
        )
        .await;
        assert_eq!(result, Err("fatal"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_gives_up_when_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<(), &str> = retry(2, 1, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("down")
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
