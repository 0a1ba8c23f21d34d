//! # helios-array
//!
//! Minimal labelled-array engine: named-dimension arrays, broadcasting,
//! partition metadata and a deferred computation graph.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["DataArray (eager)"] -->|".chunk()"| B["DataArray (deferred + Chunks)"]
//!     B -->|".affine() / .binary()"| B
//!     B -->|"Node::MapBlocks / GroupReduce"| B
//!     B -->|".compute()"| A
//!     C["Reducer"] --> B
//! ```
//!
//! Partitioned arrays never hold values: every operation adds a [`Node`],
//! and evaluation happens only in [`DataArray::compute`]. Tests can inspect
//! [`Node::kinds`] to check that nothing was evaluated.
//!
//! ## Quick Start
//!
//! ```ignore
//! use helios_array::{BinaryOp, DataArray};
//!
//! let a = DataArray::from_vec("time", vec![1.0, 2.0, 3.0]).chunk("time", 2)?;
//! let b = a.affine(2.0, 0.0);            // deferred
//! let c = b.compute()?;                  // eager
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `array` | `DataArray` and auxiliary coordinates |
//! | `broadcast` | Alignment and broadcasting by dimension name |
//! | `chunks` | Partition metadata |
//! | `dataset` | Named collections of arrays |
//! | `node` | Deferred graph nodes and their evaluation |
//! | `reduce` | Reducer trait and built-in reductions |
//! | `error` | Error types |

mod array;
mod broadcast;
mod chunks;
mod dataset;
mod error;
mod node;
mod reduce;

pub use array::{Coordinate, DataArray};
pub use broadcast::Broadcast;
pub use chunks::Chunks;
pub use dataset::Dataset;
pub use error::ArrayError;
pub use node::{BinaryOp, Node, NodeKind, reduce_ranges};
pub use reduce::{ReduceFn, Reducer, Reduction};
