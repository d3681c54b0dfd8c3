//! This module contains services related to rollup fee estimation.
pub mod fee_estimator;
pub mod l1_fee_oracle;

pub use fee_estimator::*;
pub use l1_fee_oracle::*;
