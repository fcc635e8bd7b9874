//! dyndns-client: Dynamic DNS update client
//!
//! A library for discovering the host's public IPv4/IPv6 addresses and
//! keeping a dynv6-style DNS record in sync with them.

pub mod config;
pub mod cycle;
pub mod network;
pub mod provider;
pub mod service;
pub mod state;
pub mod transport;
