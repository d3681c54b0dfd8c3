//! Constants shared across the estimator.

mod deployment;
pub use deployment::*;

mod logging;
pub use logging::*;

mod network;
pub use network::*;

mod rpc;
pub use rpc::*;
