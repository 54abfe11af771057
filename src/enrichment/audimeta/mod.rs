//! Audimeta API integration
//!
//! Audimeta mirrors the Audible catalog and is the preferred metadata source.
//! API docs: https://audimeta.de/api-docs

mod adapter;
mod client;
pub mod dto;

pub use adapter::to_metadata;
pub use client::AudimetaClient;
