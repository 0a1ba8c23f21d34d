//! Resample-and-reduce dispatch over eager and partitioned inputs.

use std::ops::Range;
use std::sync::Arc;

use helios_array::{ArrayError, Chunks, DataArray, Dataset, Node, reduce_ranges};
use helios_calendar::TimeAxis;
use tracing::{debug, info};

use crate::error::ResampleError;
use crate::options::Options;
use crate::request::ResampleSpec;
use crate::strategy::{Strategy, plan_strategy};

/// Containers that can be resampled along a time dimension.
pub trait Resample: Sized {
    /// Groups `self` along `spec.dim()` into bins of `spec.freq()` and
    /// reduces each bin with `spec.reducer()`.
    ///
    /// Partitioned inputs stay deferred: the result holds a graph that is
    /// evaluated by `compute()`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::MissingTimeCoordinate`] if the dimension has
    /// no time coordinate, and array errors for a missing dimension or a
    /// reducer of the wrong shape.
    fn resample_map(&self, spec: &ResampleSpec, options: &Options) -> Result<Self, ResampleError>;
}

/// Resamples `obj` according to `spec`, picking the execution mode from
/// `spec`, `options` and the partitioning of `obj`.
///
/// # Errors
///
/// See [`Resample::resample_map`].
pub fn resample_map<T: Resample>(
    obj: &T,
    spec: &ResampleSpec,
    options: &Options,
) -> Result<T, ResampleError> {
    obj.resample_map(spec, options)
}

impl Resample for DataArray {
    #[tracing::instrument(skip_all, fields(dim = spec.dim(), freq = %spec.freq(), reducer = spec.reducer().name()))]
    fn resample_map(&self, spec: &ResampleSpec, options: &Options) -> Result<Self, ResampleError> {
        let strategy = plan_strategy(
            self.chunks_along(spec.dim()),
            spec.map_blocks(),
            options.map_blocks(),
        );
        resample_array(self, spec, strategy, None)
    }
}

impl Resample for Dataset {
    #[tracing::instrument(skip_all, fields(dim = spec.dim(), freq = %spec.freq(), reducer = spec.reducer().name()))]
    fn resample_map(&self, spec: &ResampleSpec, options: &Options) -> Result<Self, ResampleError> {
        let strategy = plan_strategy(
            self.chunks_along(spec.dim()),
            spec.map_blocks(),
            options.map_blocks(),
        );
        let shared_time = self.iter().find_map(|(_, var)| var.time_axis(spec.dim()));

        let mut out = Dataset::new();
        for (name, var) in self.iter() {
            let var = if var.has_dim(spec.dim()) {
                resample_array(var, spec, strategy, shared_time)?
            } else {
                debug!(var = name, "no resampled dimension, passing through");
                var.clone()
            };
            out.insert(name, var)?;
        }
        Ok(out)
    }
}

/// Resamples one array with a strategy already planned for its container.
fn resample_array(
    array: &DataArray,
    spec: &ResampleSpec,
    planned: Strategy,
    shared_time: Option<&TimeAxis>,
) -> Result<DataArray, ResampleError> {
    let dim = spec.dim();
    let axis = array.axis_of(dim)?;
    let time = array
        .time_axis(dim)
        .or(shared_time)
        .ok_or_else(|| ResampleError::MissingTimeCoordinate {
            dim: dim.to_string(),
        })?;

    let groups = time.group_by(spec.freq());
    let labels = time.group_labels(&groups)?;
    let ranges: Vec<Range<usize>> = groups.iter().map(|g| g.range()).collect();
    let strategy = effective_strategy(planned, spec, ranges.len());

    let reducer = Arc::clone(spec.reducer());
    let mut shape = array.shape().to_vec();
    shape[axis] = ranges.len();
    debug!(
        %strategy,
        groups = ranges.len(),
        partitioned = array.chunks().is_some(),
        "resample plan"
    );

    let reduced = match (strategy, array.chunks()) {
        (Strategy::Eager, None) => {
            let data = reduce_ranges(array.values()?, axis, &ranges, reducer.as_ref(), false)?;
            DataArray::new(array.dims().to_vec(), data)?
        }
        (Strategy::Eager, Some(chunks)) => {
            let node = Arc::new(Node::GroupReduce {
                input: array.to_node(),
                axis,
                groups: ranges.clone(),
                reducer,
            });
            let chunks = replace_axis_blocks(chunks, axis, vec![ranges.len()], &shape, dim)?;
            DataArray::from_node(array.dims().to_vec(), shape, node, chunks)?
        }
        (Strategy::Blockwise, _) => {
            let lengths = ranges.iter().map(|r| r.len()).collect();
            let rechunked = array.clone().rechunk(dim, lengths)?;
            let node = Arc::new(Node::MapBlocks {
                input: rechunked.to_node(),
                axis,
                blocks: ranges.clone(),
                reducer,
            });
            let chunks = rechunked
                .chunks()
                .cloned()
                .unwrap_or_else(|| Chunks::single(array.shape()));
            let chunks = replace_axis_blocks(&chunks, axis, vec![1; ranges.len()], &shape, dim)?;
            DataArray::from_node(array.dims().to_vec(), shape, node, chunks)?
        }
    };

    let mut out = reduced.with_time(dim, labels)?;
    if let Some(name) = array.name() {
        out = out.with_name(name);
    }
    if let Some(units) = array.units() {
        out = out.with_units(units);
    }
    for (name, coord) in array.coords() {
        if coord.dim() != dim {
            out = out.with_coord(name, coord.clone())?;
        }
    }
    Ok(out)
}

/// Downgrades a block-wise plan the reducer or the axis cannot support.
fn effective_strategy(planned: Strategy, spec: &ResampleSpec, n_groups: usize) -> Strategy {
    if planned != Strategy::Blockwise {
        return planned;
    }
    if !spec.reducer().is_blockwise_safe() {
        info!(
            reducer = spec.reducer().name(),
            "reducer is not block-wise safe, falling back to eager resampling"
        );
        return Strategy::Eager;
    }
    if n_groups == 0 {
        info!(dim = spec.dim(), "no groups along dimension, falling back to eager resampling");
        return Strategy::Eager;
    }
    Strategy::Blockwise
}

fn replace_axis_blocks(
    chunks: &Chunks,
    axis: usize,
    blocks: Vec<usize>,
    shape: &[usize],
    dim: &str,
) -> Result<Chunks, ArrayError> {
    let mut sizes = chunks.sizes().to_vec();
    sizes[axis] = blocks;
    Chunks::from_sizes(shape, sizes).ok_or_else(|| ArrayError::InvalidChunks {
        dim: dim.to_string(),
        reason: "output blocks do not match the resampled shape".to_string(),
    })
}
