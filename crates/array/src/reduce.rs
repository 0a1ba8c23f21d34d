//! Reduction functions applied to one resampling group at a time.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use ndarray::{ArrayD, ArrayView1, ArrayViewD, Axis};

use crate::error::ArrayError;

/// A side-effect-free reduction along one axis.
///
/// `reduce` receives the slice of one group (possibly empty along `axis`)
/// and returns the array with `axis` removed. Implementations must apply
/// their own convention to empty groups.
pub trait Reducer: Send + Sync + fmt::Debug {
    /// Reduces `block` along `axis`.
    fn reduce(&self, block: ArrayViewD<'_, f64>, axis: Axis) -> ArrayD<f64>;

    /// Short name used in logs and errors.
    fn name(&self) -> &str;

    /// Whether the reducer yields exactly one value per group and carries no
    /// state across groups, so groups may be reduced in separate blocks.
    fn is_blockwise_safe(&self) -> bool {
        true
    }
}

/// Built-in NaN-propagating reductions.
///
/// Empty groups yield NaN for `Mean`, `Min` and `Max`, and 0 for `Sum` and
/// `Count`. `Count` counts non-NaN values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reduction {
    /// Arithmetic mean.
    Mean,
    /// Sum.
    Sum,
    /// Minimum.
    Min,
    /// Maximum.
    Max,
    /// Number of valid values.
    Count,
}

impl Reduction {
    /// Reduces a single lane.
    pub fn reduce_lane(self, lane: ArrayView1<'_, f64>) -> f64 {
        match self {
            Self::Mean if lane.is_empty() => f64::NAN,
            Self::Mean => lane.sum() / lane.len() as f64,
            Self::Sum => lane.sum(),
            Self::Min => extremum(lane, f64::min),
            Self::Max => extremum(lane, f64::max),
            Self::Count => lane.iter().filter(|v| !v.is_nan()).count() as f64,
        }
    }
}

fn extremum(lane: ArrayView1<'_, f64>, pick: fn(f64, f64) -> f64) -> f64 {
    lane.iter()
        .try_fold(None, |acc: Option<f64>, &v| {
            if v.is_nan() {
                return Err(());
            }
            Ok(Some(acc.map_or(v, |a| pick(a, v))))
        })
        .ok()
        .flatten()
        .unwrap_or(f64::NAN)
}

impl Reducer for Reduction {
    fn reduce(&self, block: ArrayViewD<'_, f64>, axis: Axis) -> ArrayD<f64> {
        block.map_axis(axis, |lane| self.reduce_lane(lane))
    }

    fn name(&self) -> &str {
        match self {
            Self::Mean => "mean",
            Self::Sum => "sum",
            Self::Min => "min",
            Self::Max => "max",
            Self::Count => "count",
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Reduction {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mean" => Ok(Self::Mean),
            "sum" => Ok(Self::Sum),
            "min" => Ok(Self::Min),
            "max" => Ok(Self::Max),
            "count" => Ok(Self::Count),
            _ => Err(ArrayError::UnknownReduction {
                label: s.to_string(),
            }),
        }
    }
}

type LaneFn = dyn Fn(ArrayView1<'_, f64>) -> f64 + Send + Sync;

/// A reducer built from a closure over one lane.
///
/// The caller declares whether the closure is block-wise safe; the
/// dispatcher never infers it.
#[derive(Clone)]
pub struct ReduceFn {
    name: String,
    blockwise_safe: bool,
    f: Arc<LaneFn>,
}

impl ReduceFn {
    /// Wraps `f` under `name`.
    pub fn new<F>(name: impl Into<String>, blockwise_safe: bool, f: F) -> Self
    where
        F: Fn(ArrayView1<'_, f64>) -> f64 + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            blockwise_safe,
            f: Arc::new(f),
        }
    }
}

impl fmt::Debug for ReduceFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReduceFn")
            .field("name", &self.name)
            .field("blockwise_safe", &self.blockwise_safe)
            .finish_non_exhaustive()
    }
}

impl Reducer for ReduceFn {
    fn reduce(&self, block: ArrayViewD<'_, f64>, axis: Axis) -> ArrayD<f64> {
        block.map_axis(axis, |lane| (self.f)(lane))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_blockwise_safe(&self) -> bool {
        self.blockwise_safe
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{Array1, Array2, array};

    fn empty() -> Array1<f64> {
        Array1::zeros(0)
    }

    #[test]
    fn empty_group_conventions() {
        let e = empty();
        assert!(Reduction::Mean.reduce_lane(e.view()).is_nan());
        assert!(Reduction::Min.reduce_lane(e.view()).is_nan());
        assert!(Reduction::Max.reduce_lane(e.view()).is_nan());
        assert_eq!(Reduction::Sum.reduce_lane(e.view()), 0.0);
        assert_eq!(Reduction::Count.reduce_lane(e.view()), 0.0);
    }

    #[test]
    fn lane_values() {
        let a = array![3.0, 1.0, 2.0];
        assert_relative_eq!(Reduction::Mean.reduce_lane(a.view()), 2.0);
        assert_relative_eq!(Reduction::Sum.reduce_lane(a.view()), 6.0);
        assert_relative_eq!(Reduction::Min.reduce_lane(a.view()), 1.0);
        assert_relative_eq!(Reduction::Max.reduce_lane(a.view()), 3.0);
        assert_relative_eq!(Reduction::Count.reduce_lane(a.view()), 3.0);
    }

    #[test]
    fn nan_propagates_except_count() {
        let a = array![1.0, f64::NAN, 2.0];
        assert!(Reduction::Mean.reduce_lane(a.view()).is_nan());
        assert!(Reduction::Max.reduce_lane(a.view()).is_nan());
        assert!(Reduction::Min.reduce_lane(a.view()).is_nan());
        assert_eq!(Reduction::Count.reduce_lane(a.view()), 2.0);
    }

    #[test]
    fn reduce_along_axis() {
        let a = Array2::from_shape_vec((2, 3), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
            .unwrap()
            .into_dyn();
        let out = Reduction::Sum.reduce(a.view(), Axis(1));
        assert_eq!(out.shape(), &[2]);
        assert_eq!(out.as_slice().unwrap(), &[6.0, 15.0]);
    }

    #[test]
    fn reduce_empty_block_keeps_other_axes() {
        let a = ArrayD::<f64>::zeros(vec![0, 4]);
        let out = Reduction::Mean.reduce(a.view(), Axis(0));
        assert_eq!(out.shape(), &[4]);
        assert!(out.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn closure_reducer_declares_safety() {
        let range = ReduceFn::new("range", false, |lane| {
            Reduction::Max.reduce_lane(lane) - Reduction::Min.reduce_lane(lane)
        });
        assert!(!range.is_blockwise_safe());
        assert_eq!(range.name(), "range");
        let out = range.reduce(array![1.0, 5.0, 2.0].into_dyn().view(), Axis(0));
        assert_eq!(out.into_raw_vec_and_offset().0, vec![4.0]);
    }

    #[test]
    fn parse_names() {
        assert_eq!("mean".parse::<Reduction>(), Ok(Reduction::Mean));
        assert_eq!("MAX".parse::<Reduction>(), Ok(Reduction::Max));
        assert_eq!(
            "median".parse::<Reduction>(),
            Err(ArrayError::UnknownReduction {
                label: "median".to_string()
            })
        );
    }
}
