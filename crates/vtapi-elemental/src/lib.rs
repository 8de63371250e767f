//! Elemental Conductor transcoding provider.
//!
//! This crate provides:
//! - Job request construction for the Conductor XML API
//! - A signed HTTP client for jobs, presets and nodes
//! - Native status mapping and preset conversion
//! - The `elementalconductor` provider and its registry factory

pub mod auth;
pub mod builder;
pub mod client;
pub mod error;
pub mod presets;
pub mod provider;
pub mod status;
pub mod types;

/// Name the provider is registered under.
pub const NAME: &str = "elementalconductor";

pub use builder::{build_job, JobSettings};
pub use client::{ElementalApi, ElementalClient};
pub use error::{ElementalError, ElementalResult};
pub use provider::{factory, ElementalConductorProvider};
pub use status::STATUS_TABLE;
