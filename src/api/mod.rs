//! Remote catalog service access
//!
//! This module is the only place that knows how to talk to the creature
//! catalog service. It exposes:
//!
//! - **`types`**: wire-format records (`Creature`, error bodies)
//! - **`error`**: `ApiError`, the failure states of a service call
//! - **`client`**: the `CatalogClient` trait and its HTTP implementation
//!
//! Everything above this layer consumes `dyn CatalogClient`, so tests and
//! demos can substitute an in-memory service.

pub mod client;
pub mod error;
pub mod types;

pub use client::{CatalogClient, HttpCatalogClient};
pub use error::ApiError;
pub use types::{Creature, QueryParams};
