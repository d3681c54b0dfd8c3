/// Default per-request RPC timeout
pub const DEFAULT_RPC_TIMEOUT_MS: u64 = 10_000;

/// Default location of the networks file
pub const DEFAULT_CONFIG_PATH: &str = "./config/networks.json";
