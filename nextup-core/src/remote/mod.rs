//! Remote catalog access: DTOs, the paginated client, and its retry policy.

pub mod client;
pub mod dto;
pub mod retry;

pub use client::{CatalogClient, CatalogPage, CatalogSource, RemoteError};
pub use retry::RetryPolicy;
