//! Deferred computation graph.
//!
//! Deferred arrays hold an [`Arc<Node>`]. Building arrays only adds nodes;
//! values are produced by [`Node::evaluate`], which callers reach through
//! [`DataArray::compute`](crate::DataArray::compute).

use std::ops::Range;
use std::sync::Arc;

use ndarray::{ArrayD, Axis, Slice, Zip};
use rayon::prelude::*;
use tracing::debug_span;

use crate::broadcast::align_to;
use crate::error::ArrayError;
use crate::reduce::Reducer;

/// Elementwise binary operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Sub,
    /// `a * b`
    Mul,
    /// `a / b`
    Div,
}

impl BinaryOp {
    /// Applies the operation to two scalars.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => a / b,
        }
    }
}

/// One node of a deferred computation.
#[derive(Debug)]
pub enum Node {
    /// Concrete data held by a partitioned array.
    Source(ArrayD<f64>),
    /// `input * scale + offset`.
    Affine {
        /// Operand.
        input: Arc<Node>,
        /// Multiplicative factor.
        scale: f64,
        /// Additive offset.
        offset: f64,
    },
    /// Broadcast elementwise operation between two operands.
    Binary {
        /// Operation.
        op: BinaryOp,
        /// Left operand.
        left: Arc<Node>,
        /// Dimension names of the left operand.
        left_dims: Vec<String>,
        /// Right operand.
        right: Arc<Node>,
        /// Dimension names of the right operand.
        right_dims: Vec<String>,
        /// Output dimension names.
        dims: Vec<String>,
        /// Output shape.
        shape: Vec<usize>,
    },
    /// Repartitioning; values pass through unchanged.
    Rechunk {
        /// Operand.
        input: Arc<Node>,
    },
    /// Independent reduction of each block along `axis`, evaluated in
    /// parallel and reassembled in block order.
    MapBlocks {
        /// Operand.
        input: Arc<Node>,
        /// Reduced axis.
        axis: usize,
        /// Index ranges of the blocks along `axis`.
        blocks: Vec<Range<usize>>,
        /// Reduction applied to each block.
        reducer: Arc<dyn Reducer>,
    },
    /// Reduction of each group along `axis`, evaluated on the whole operand.
    GroupReduce {
        /// Operand.
        input: Arc<Node>,
        /// Reduced axis.
        axis: usize,
        /// Index ranges of the groups along `axis`.
        groups: Vec<Range<usize>>,
        /// Reduction applied to each group.
        reducer: Arc<dyn Reducer>,
    },
}

/// Discriminant of a [`Node`], used to inspect graphs without evaluating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// [`Node::Source`]
    Source,
    /// [`Node::Affine`]
    Affine,
    /// [`Node::Binary`]
    Binary,
    /// [`Node::Rechunk`]
    Rechunk,
    /// [`Node::MapBlocks`]
    MapBlocks,
    /// [`Node::GroupReduce`]
    GroupReduce,
}

impl Node {
    /// Returns the kind of this node.
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Source(_) => NodeKind::Source,
            Self::Affine { .. } => NodeKind::Affine,
            Self::Binary { .. } => NodeKind::Binary,
            Self::Rechunk { .. } => NodeKind::Rechunk,
            Self::MapBlocks { .. } => NodeKind::MapBlocks,
            Self::GroupReduce { .. } => NodeKind::GroupReduce,
        }
    }

    /// Direct operands of this node.
    pub fn inputs(&self) -> Vec<&Arc<Node>> {
        match self {
            Self::Source(_) => Vec::new(),
            Self::Affine { input, .. }
            | Self::Rechunk { input }
            | Self::MapBlocks { input, .. }
            | Self::GroupReduce { input, .. } => vec![input],
            Self::Binary { left, right, .. } => vec![left, right],
        }
    }

    /// Kinds of all nodes of the graph rooted here, in depth-first pre-order.
    pub fn kinds(&self) -> Vec<NodeKind> {
        let mut out = vec![self.kind()];
        for input in self.inputs() {
            out.extend(input.kinds());
        }
        out
    }

    /// Evaluates the graph rooted at this node.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::ReducerShape`] if a reducer returns a block of
    /// the wrong shape, or a shape error if operands cannot be broadcast.
    pub fn evaluate(&self) -> Result<ArrayD<f64>, ArrayError> {
        match self {
            Self::Source(data) => Ok(data.clone()),
            Self::Affine {
                input,
                scale,
                offset,
            } => {
                let (scale, offset) = (*scale, *offset);
                Ok(input.evaluate()?.mapv_into(|v| v * scale + offset))
            }
            Self::Binary {
                op,
                left,
                left_dims,
                right,
                right_dims,
                dims,
                shape,
            } => {
                let mut l = align_to(left.evaluate()?, left_dims, dims, shape)?;
                let r = align_to(right.evaluate()?, right_dims, dims, shape)?;
                Zip::from(&mut l).and(&r).for_each(|a, &b| *a = op.apply(*a, b));
                Ok(l)
            }
            Self::Rechunk { input } => input.evaluate(),
            Self::MapBlocks {
                input,
                axis,
                blocks,
                reducer,
            } => {
                let _span = debug_span!("map_blocks", reducer = reducer.name(), n_blocks = blocks.len())
                    .entered();
                reduce_ranges(&input.evaluate()?, *axis, blocks, reducer.as_ref(), true)
            }
            Self::GroupReduce {
                input,
                axis,
                groups,
                reducer,
            } => {
                let _span = debug_span!("group_reduce", reducer = reducer.name(), n_groups = groups.len())
                    .entered();
                reduce_ranges(&input.evaluate()?, *axis, groups, reducer.as_ref(), false)
            }
        }
    }
}

/// Reduces each index range of `data` along `axis` and stacks the results in
/// range order, giving one entry per range along `axis`.
///
/// # Errors
///
/// Returns [`ArrayError::ReducerShape`] if `reducer` does not remove exactly
/// `axis`.
pub fn reduce_ranges(
    data: &ArrayD<f64>,
    axis: usize,
    ranges: &[Range<usize>],
    reducer: &dyn Reducer,
    parallel: bool,
) -> Result<ArrayD<f64>, ArrayError> {
    let mut expected = data.shape().to_vec();
    expected.remove(axis);

    let reduce_one = |range: &Range<usize>| -> Result<ArrayD<f64>, ArrayError> {
        let block = data.slice_axis(Axis(axis), Slice::from(range.clone()));
        let out = reducer.reduce(block, Axis(axis));
        if out.shape() != expected.as_slice() {
            return Err(ArrayError::ReducerShape {
                reducer: reducer.name().to_string(),
                expected: expected.clone(),
                got: out.shape().to_vec(),
            });
        }
        Ok(out.insert_axis(Axis(axis)))
    };

    let parts: Vec<ArrayD<f64>> = if parallel {
        ranges.par_iter().map(|r| reduce_one(r)).collect::<Result<_, _>>()?
    } else {
        ranges.iter().map(reduce_one).collect::<Result<_, _>>()?
    };

    if parts.is_empty() {
        let mut shape = expected;
        shape.insert(axis, 0);
        return Ok(ArrayD::zeros(shape));
    }
    let views: Vec<_> = parts.iter().map(|p| p.view()).collect();
    Ok(ndarray::concatenate(Axis(axis), &views)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reduce::{ReduceFn, Reduction};
    use ndarray::Array2;

    fn source(rows: usize, cols: usize) -> Arc<Node> {
        let data = Array2::from_shape_fn((rows, cols), |(i, j)| (i * cols + j) as f64).into_dyn();
        Arc::new(Node::Source(data))
    }

    #[test]
    fn kinds_are_preorder() {
        let src = source(2, 2);
        let affine = Arc::new(Node::Affine {
            input: Arc::clone(&src),
            scale: 2.0,
            offset: 0.0,
        });
        let node = Node::Rechunk { input: affine };
        assert_eq!(
            node.kinds(),
            vec![NodeKind::Rechunk, NodeKind::Affine, NodeKind::Source]
        );
    }

    #[test]
    fn affine_evaluates() {
        let node = Node::Affine {
            input: source(1, 3),
            scale: 2.0,
            offset: 1.0,
        };
        let out = node.evaluate().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![1.0, 3.0, 5.0]);
    }

    #[test]
    fn binary_broadcasts_by_name() {
        let left = Arc::new(Node::Source(ndarray::arr1(&[1.0, 2.0]).into_dyn()));
        let right = Arc::new(Node::Source(ndarray::arr1(&[10.0, 20.0, 30.0]).into_dyn()));
        let node = Node::Binary {
            op: BinaryOp::Add,
            left,
            left_dims: vec!["y".to_string()],
            right,
            right_dims: vec!["x".to_string()],
            dims: vec!["x".to_string(), "y".to_string()],
            shape: vec![3, 2],
        };
        let out = node.evaluate().unwrap();
        assert_eq!(out.shape(), &[3, 2]);
        assert_eq!(out[[2, 1]], 32.0);
        assert_eq!(out[[0, 0]], 11.0);
    }

    #[test]
    fn map_blocks_matches_group_reduce() {
        let ranges = vec![0..3, 3..3, 3..8, 8..10];
        let reducer: Arc<dyn Reducer> = Arc::new(Reduction::Sum);
        let blocks = Node::MapBlocks {
            input: source(10, 3),
            axis: 0,
            blocks: ranges.clone(),
            reducer: Arc::clone(&reducer),
        };
        let groups = Node::GroupReduce {
            input: source(10, 3),
            axis: 0,
            groups: ranges,
            reducer,
        };
        let a = blocks.evaluate().unwrap();
        let b = groups.evaluate().unwrap();
        assert_eq!(a.shape(), &[4, 3]);
        assert_eq!(a, b);
        assert_eq!(a[[1, 0]], 0.0);
        // rows 0..3 of column 0: 0 + 3 + 6
        assert_eq!(a[[0, 0]], 9.0);
    }

    #[test]
    fn reduce_along_inner_axis() {
        let out = reduce_ranges(
            &source(2, 4).evaluate().unwrap(),
            1,
            &[0..2, 2..4],
            &Reduction::Max,
            true,
        )
        .unwrap();
        assert_eq!(out.shape(), &[2, 2]);
        assert_eq!(out[[0, 0]], 1.0);
        assert_eq!(out[[1, 1]], 7.0);
    }

    #[test]
    fn no_ranges_gives_empty_axis() {
        let out = reduce_ranges(&source(4, 2).evaluate().unwrap(), 0, &[], &Reduction::Mean, false)
            .unwrap();
        assert_eq!(out.shape(), &[0, 2]);
    }

    #[derive(Debug)]
    struct KeepAxis;

    impl Reducer for KeepAxis {
        fn reduce(&self, block: ndarray::ArrayViewD<'_, f64>, _axis: Axis) -> ArrayD<f64> {
            block.to_owned()
        }

        fn name(&self) -> &str {
            "keep"
        }
    }

    #[test]
    fn reducer_shape_is_checked() {
        let err = reduce_ranges(&source(4, 2).evaluate().unwrap(), 0, &[0..4], &KeepAxis, false)
            .unwrap_err();
        assert_eq!(
            err,
            ArrayError::ReducerShape {
                reducer: "keep".to_string(),
                expected: vec![2],
                got: vec![4, 2],
            }
        );
    }

    #[test]
    fn closure_reducer_in_blocks() {
        let first = ReduceFn::new("first", true, |lane| lane.iter().next().copied().unwrap_or(f64::NAN));
        let node = Node::MapBlocks {
            input: source(6, 1),
            axis: 0,
            blocks: vec![0..2, 2..6],
            reducer: Arc::new(first),
        };
        let out = node.evaluate().unwrap();
        assert_eq!(out.iter().copied().collect::<Vec<_>>(), vec![0.0, 2.0]);
    }
}
