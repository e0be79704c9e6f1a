//! Foundation types for graphsniper.
//!
//! This crate provides the data model shared by the extraction, formatting
//! and pipeline crates.
//!
//! # Type Categories
//!
//! - **Operation types**: [`OperationKind`], [`RawOperation`]
//! - **Endpoint types**: [`Endpoint`]
//! - **Result types**: [`DocumentResult`]

mod document;
mod endpoint;
mod operation;

pub use document::{DocumentResult, OperationMap};
pub use endpoint::Endpoint;
pub use operation::{OperationKind, RawOperation};
