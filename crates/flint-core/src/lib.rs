//! Flint Core - Foundational types for the Flint buff engine
//!
//! This crate provides the core types that all other Flint crates depend on:
//! - `EntityId` - Host-supplied entity handles
//! - `BuffId` - Per-system buff handles
//! - Error types and Result alias

mod error;
mod id;

pub use error::{FlintError, Result};
pub use id::{BuffId, EntityId};
