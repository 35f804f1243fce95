//! Shared types for the kit label printer
//!
//! Domain model and request/response types used by both the label server
//! and any client talking to it.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use models::{Catalog, CatalogError, CatalogResult, Kit, MoveDirection, Part, PartSummary};
pub use serde::{Deserialize, Serialize};
