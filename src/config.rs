use anyhow::{anyhow, Result};

pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8545";
pub const RPC_URL_ENV: &str = "ORDERBOOK_RPC_URL";
pub const CONTRACT_ENV: &str = "ORDERBOOK_CONTRACT";

/// Where orders are read from.
#[derive(Debug, Clone, PartialEq)]
pub enum SourceConfig {
    Contract { rpc_url: String, address: String },
    Snapshot { path: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source: SourceConfig,
    /// Write the fetched raw snapshot here.
    pub save: Option<String>,
    pub json: bool,
    /// Re-fetch interval in seconds.
    pub watch: Option<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Run(Config),
    Help,
}

/// Parse CLI flags (without the binary name). `env` looks up environment
/// variables, so tests can pass a closure instead of touching the process env.
pub fn parse_args<F>(args: &[String], env: F) -> Result<Command>
where
    F: Fn(&str) -> Option<String>,
{
    let mut rpc_url: Option<String> = None;
    let mut contract: Option<String> = None;
    let mut snapshot: Option<String> = None;
    let mut save: Option<String> = None;
    let mut json = false;
    let mut watch: Option<u64> = None;

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "-h" | "--help" => return Ok(Command::Help),
            "--json" => json = true,
            "--rpc" | "--contract" | "--snapshot" | "--save" | "--watch" => {
                i += 1;
                let value = args
                    .get(i)
                    .cloned()
                    .ok_or_else(|| anyhow!("{} requires a value", flag))?;
                match flag {
                    "--rpc" => rpc_url = Some(value),
                    "--contract" => contract = Some(value),
                    "--snapshot" => snapshot = Some(value),
                    "--save" => save = Some(value),
                    _ => {
                        let secs: u64 = value
                            .parse()
                            .map_err(|_| anyhow!("--watch expects whole seconds, got '{}'", value))?;
                        if secs == 0 {
                            return Err(anyhow!("--watch interval must be at least 1 second"));
                        }
                        watch = Some(secs);
                    }
                }
            }
            other => return Err(anyhow!("unknown argument '{}'", other)),
        }
        i += 1;
    }

    let source = match snapshot {
        Some(path) => {
            if contract.is_some() || rpc_url.is_some() {
                return Err(anyhow!("--snapshot cannot be combined with --rpc or --contract"));
            }
            SourceConfig::Snapshot { path }
        }
        None => {
            let address = contract.or_else(|| env(CONTRACT_ENV)).ok_or_else(|| {
                anyhow!("no contract address: pass --contract or set {}", CONTRACT_ENV)
            })?;
            let rpc_url = rpc_url
                .or_else(|| env(RPC_URL_ENV))
                .unwrap_or_else(|| DEFAULT_RPC_URL.to_string());
            SourceConfig::Contract { rpc_url, address }
        }
    };

    Ok(Command::Run(Config {
        source,
        save,
        json,
        watch,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|a| a.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_contract_with_default_rpc() {
        let cmd = parse_args(&args(&["--contract", "0xabc"]), no_env).unwrap();
        assert_eq!(
            cmd,
            Command::Run(Config {
                source: SourceConfig::Contract {
                    rpc_url: DEFAULT_RPC_URL.to_string(),
                    address: "0xabc".to_string(),
                },
                save: None,
                json: false,
                watch: None,
            })
        );
    }

    #[test]
    fn test_env_fallbacks() {
        let env = |k: &str| match k {
            CONTRACT_ENV => Some("0xenv".to_string()),
            RPC_URL_ENV => Some("http://node:8545".to_string()),
            _ => None,
        };
        match parse_args(&args(&["--json", "--watch", "5"]), env).unwrap() {
            Command::Run(cfg) => {
                assert_eq!(
                    cfg.source,
                    SourceConfig::Contract {
                        rpc_url: "http://node:8545".to_string(),
                        address: "0xenv".to_string(),
                    }
                );
                assert!(cfg.json);
                assert_eq!(cfg.watch, Some(5));
            }
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_flags_override_env() {
        let env = |_: &str| Some("from-env".to_string());
        match parse_args(&args(&["--contract", "0xflag", "--rpc", "http://flag"]), env).unwrap() {
            Command::Run(cfg) => assert_eq!(
                cfg.source,
                SourceConfig::Contract {
                    rpc_url: "http://flag".to_string(),
                    address: "0xflag".to_string(),
                }
            ),
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_snapshot_and_save() {
        let cmd = parse_args(&args(&["--snapshot", "orders.json", "--save", "out.json"]), no_env).unwrap();
        match cmd {
            Command::Run(cfg) => {
                assert_eq!(cfg.source, SourceConfig::Snapshot { path: "orders.json".to_string() });
                assert_eq!(cfg.save.as_deref(), Some("out.json"));
            }
            Command::Help => panic!("unexpected help"),
        }
    }

    #[test]
    fn test_errors() {
        assert!(parse_args(&args(&[]), no_env).is_err());
        assert!(parse_args(&args(&["--contract"]), no_env).is_err());
        assert!(parse_args(&args(&["--bogus"]), no_env).is_err());
        assert!(parse_args(&args(&["--contract", "0x1", "--watch", "0"]), no_env).is_err());
        assert!(parse_args(&args(&["--contract", "0x1", "--watch", "soon"]), no_env).is_err());
        assert!(parse_args(&args(&["--snapshot", "a.json", "--contract", "0x1"]), no_env).is_err());
    }

    #[test]
    fn test_help() {
        assert_eq!(parse_args(&args(&["--json", "-h"]), no_env).unwrap(), Command::Help);
    }
}
