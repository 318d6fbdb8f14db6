//! Gas Estimate Server - HTTP API for Ethereum priority fee tiers

pub mod api;
pub mod cli;
pub mod config;
pub mod provider;
pub mod server;
pub mod service;
