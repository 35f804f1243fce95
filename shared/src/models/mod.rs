//! Data models
//!
//! - [`Part`] - one printable label entry
//! - [`Kit`] - ordered parts of one kit
//! - [`Catalog`] - every kit, in file order

pub mod catalog;
pub mod part;

pub use catalog::{Catalog, CatalogError, CatalogResult, Kit, MoveDirection};
pub use part::{Part, PartSummary};
