//! # Services Module
//!
//! Chain access and the estimation pipeline built on top of it.

pub mod provider;

pub mod network_resolver;

pub mod contract_resolver;

pub mod transaction_builder;

pub mod gas;

pub mod report;

pub mod quote_service;
