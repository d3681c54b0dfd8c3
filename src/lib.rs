//! Rollup transaction fee estimation.
//!
//! Given a connection to an OP Stack chain, resolves the target contract (attaching to a known
//! deployment or deploying a fresh one), builds the unsigned call transaction and quotes its
//! total fee: L2 execution plus the L1 data fee reported by the chain's gas price oracle.

pub mod config;
pub mod constants;
pub mod logging;
pub mod models;
pub mod services;
pub mod utils;
