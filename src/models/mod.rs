mod error;
pub use error::*;

mod network_profile;
pub use network_profile::*;

mod contract;
pub use contract::*;

mod transaction;
pub use transaction::*;

mod fee_quote;
pub use fee_quote::*;
