//! The graphsniper extraction and aggregation engine.
//!
//! A list of document URLs goes in; a [`FinalSchema`] comes out.
//!
//! 1. [`Pipeline`] runs a [`DocumentProcessor`] per URL on a bounded pool.
//! 2. Each processor fetches, beautifies, optionally persists, and extracts
//!    one document into a `DocumentResult`.
//! 3. Results are folded into an [`AggregateState`] by a single merge loop.
//! 4. [`FinalSchema::from_state`] formats every unique operation once.
//!
//! Cross-document deduplication is first-seen wins. With
//! [`MergeOrder::Completion`] (the default) "first" means first to finish,
//! so when two documents define the same operation name with different
//! bodies the winner can change between runs.

mod aggregate;
mod beautify;
mod persist;
mod pipeline;
mod processor;
mod schema;

pub use aggregate::AggregateState;
pub use beautify::{Beautify, Passthrough};
pub use persist::{persist_name, Discard, DirectoryStore, Persist};
pub use pipeline::{MergeOrder, Pipeline, PipelineObserver, DEFAULT_WORKERS};
pub use processor::DocumentProcessor;
pub use schema::{FinalSchema, OperationEntry};
