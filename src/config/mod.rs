//! Configuration for the estimator: environment settings and the networks file.

mod config_file;
pub use config_file::*;

mod estimator_config;
pub use estimator_config::*;
