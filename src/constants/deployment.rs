/// Constructor argument used when deploying a fresh Greeter on an ephemeral chain.
pub const DEFAULT_GREETING: &str = "Hello, Hardhat!";

/// Method and argument estimated when none are given on the command line.
pub const DEFAULT_METHOD: &str = "setGreeting";
pub const DEFAULT_METHOD_ARG: &str = "Hola, mundo!";

/// Maximum time to wait for a deployment receipt (2 minutes)
pub const DEFAULT_DEPLOY_CONFIRMATION_TIMEOUT_MS: u64 = 120_000;

/// Interval between deployment receipt polls
pub const DEFAULT_DEPLOY_POLL_INTERVAL_MS: u64 = 1_000;

/// Public Hardhat development mnemonic, used when no deployer key is configured.
pub const DEFAULT_DEV_MNEMONIC: &str = "test test test test test test test test test test test junk";
