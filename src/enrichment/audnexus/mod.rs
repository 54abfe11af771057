//! Audnexus API integration
//!
//! Audnexus aggregates Audible catalog data and is the usual fallback when
//! Audimeta has nothing for an ASIN.
//! API docs: https://audnex.us/

mod adapter;
mod client;
pub mod dto;

pub use adapter::to_metadata;
pub use client::AudnexusClient;
