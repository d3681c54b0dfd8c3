use alloy::primitives::{address, Address};

/// OVM GasPriceOracle predeploy, identical on every OP Stack chain.
pub const OVM_GAS_PRICE_ORACLE_ADDRESS: Address =
    address!("420000000000000000000000000000000000000F");

/// Greeter instance maintained on OP Mainnet.
pub const OPTIMISM_MAINNET_GREETER_ADDRESS: Address =
    address!("3810B272B40bb01d9eb63fD3a3b935011A40Fa71");

pub const OPTIMISM_MAINNET_CHAIN_ID: u64 = 10;
pub const OPTIMISM_GOERLI_CHAIN_ID: u64 = 420;
pub const OPTIMISM_KOVAN_CHAIN_ID: u64 = 69;
/// Chain id of the local OP devnet started from the optimism monorepo `ops/` setup.
pub const OPTIMISM_DEVNET_CHAIN_ID: u64 = 17;
pub const OPTIMISM_SEPOLIA_CHAIN_ID: u64 = 11_155_420;
