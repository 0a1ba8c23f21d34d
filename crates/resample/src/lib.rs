//! # helios-resample
//!
//! Resample-and-reduce along a time dimension that picks its execution mode
//! from the partitioning of the input.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["ResampleSpec + Options"] --> B["plan_strategy()"]
//!     C["DataArray / Dataset"] --> B
//!     B -->|"Eager, unpartitioned"| D["reduce_ranges() now"]
//!     B -->|"Eager, partitioned"| E["Node::GroupReduce"]
//!     B -->|"Blockwise"| F["Rechunk to groups"] --> G["Node::MapBlocks"]
//! ```
//!
//! Block-wise plans fall back to eager (with an `info!` event) when the
//! reducer is not declared block-wise safe or the axis has no groups.
//! Partitioned inputs always yield deferred outputs.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use helios_array::Reduction;
//! use helios_resample::{Options, ResampleSpec, resample_map};
//!
//! let spec = ResampleSpec::new("time", "MS", Arc::new(Reduction::Mean))?;
//! let mut options = Options::new();
//! let monthly = {
//!     let scoped = options.set(Some(true));
//!     resample_map(&tas, &spec, &scoped)?
//! };
//! let values = monthly.compute()?;
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `dispatch` | `Resample` trait and `resample_map` |
//! | `options` | Execution-mode flag and its scoped override |
//! | `request` | Resample requests |
//! | `strategy` | Execution-mode selection |
//! | `error` | Error types |

mod dispatch;
mod error;
mod options;
mod request;
mod strategy;

pub use dispatch::{Resample, resample_map};
pub use error::ResampleError;
pub use options::{Options, OptionsGuard};
pub use request::ResampleSpec;
pub use strategy::{Strategy, plan_strategy};
