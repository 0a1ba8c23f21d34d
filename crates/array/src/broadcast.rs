//! Broadcasting of labelled arrays by dimension name.

use std::collections::BTreeMap;

use helios_calendar::TimeAxis;
use ndarray::{ArrayD, Axis, ErrorKind, ShapeError};

use crate::array::{Coordinate, DataArray};
use crate::chunks::Chunks;
use crate::error::ArrayError;

/// Transposes and broadcasts `data`, labelled `src_dims`, to the layout
/// `(out_dims, out_shape)`. Every name of `src_dims` must appear in
/// `out_dims`.
pub(crate) fn align_to(
    data: ArrayD<f64>,
    src_dims: &[String],
    out_dims: &[String],
    out_shape: &[usize],
) -> Result<ArrayD<f64>, ArrayError> {
    let perm: Vec<usize> = out_dims
        .iter()
        .filter_map(|d| src_dims.iter().position(|s| s == d))
        .collect();
    if perm.len() != src_dims.len() {
        return Err(ShapeError::from_kind(ErrorKind::IncompatibleLayout).into());
    }
    let mut aligned = data.permuted_axes(perm);
    for (i, d) in out_dims.iter().enumerate() {
        if !src_dims.contains(d) {
            aligned = aligned.insert_axis(Axis(i));
        }
    }
    if aligned.shape() == out_shape {
        return Ok(aligned);
    }
    aligned
        .broadcast(out_shape)
        .map(|view| view.to_owned())
        .ok_or_else(|| ShapeError::from_kind(ErrorKind::IncompatibleShape).into())
}

/// Joint layout of several arrays broadcast against each other.
///
/// Dimensions are ordered by first appearance. Shared dimensions must have
/// equal lengths. Partition metadata is taken, per dimension, from the first
/// partitioned input carrying that dimension, so shape-preserving results keep
/// the partitioning of their inputs.
#[derive(Debug, Clone)]
pub(crate) struct Layout {
    pub(crate) dims: Vec<String>,
    pub(crate) shape: Vec<usize>,
    pub(crate) chunks: Option<Chunks>,
    pub(crate) time: Option<(String, TimeAxis)>,
    pub(crate) coords: BTreeMap<String, Coordinate>,
}

impl Layout {
    pub(crate) fn of(arrays: &[&DataArray]) -> Result<Self, ArrayError> {
        let mut dims: Vec<String> = Vec::new();
        let mut shape: Vec<usize> = Vec::new();
        for array in arrays {
            for (d, &n) in array.dims().iter().zip(array.shape()) {
                match dims.iter().position(|x| x == d) {
                    Some(i) if shape[i] != n => {
                        return Err(ArrayError::DimensionSizeMismatch {
                            dim: d.clone(),
                            left: shape[i],
                            right: n,
                        });
                    }
                    Some(_) => {}
                    None => {
                        dims.push(d.clone());
                        shape.push(n);
                    }
                }
            }
        }

        let chunks = if arrays.iter().any(|a| a.chunks().is_some()) {
            let sizes = dims
                .iter()
                .zip(&shape)
                .map(|(d, &n)| {
                    arrays
                        .iter()
                        .find_map(|a| {
                            let chunks = a.chunks()?;
                            let axis = a.dims().iter().position(|x| x == d)?;
                            Some(chunks.blocks(axis).to_vec())
                        })
                        .unwrap_or_else(|| vec![n])
                })
                .collect();
            Chunks::from_sizes(&shape, sizes)
        } else {
            None
        };

        let mut times = arrays.iter().filter_map(|a| a.time());
        let time = times.next().map(|(dim, axis)| (dim.to_string(), axis.clone()));
        if let Some((_, first)) = &time {
            for (_, axis) in times {
                first.ensure_compatible(axis)?;
            }
        }

        let mut coords = BTreeMap::new();
        for array in arrays {
            for (name, coord) in array.coords() {
                coords.entry(name.to_string()).or_insert_with(|| coord.clone());
            }
        }

        Ok(Self {
            dims,
            shape,
            chunks,
            time,
            coords,
        })
    }
}

/// Several arrays materialised and broadcast to a common layout.
///
/// Used by numeric kernels that combine inputs elementwise with
/// [`ndarray::Zip`]. Deferred inputs are evaluated.
#[derive(Debug, Clone)]
pub struct Broadcast {
    layout: Layout,
    values: Vec<ArrayD<f64>>,
}

impl Broadcast {
    /// Broadcasts `arrays` against each other.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionSizeMismatch`] if a shared dimension
    /// has different lengths, [`ArrayError::Calendar`] if the time
    /// coordinates use different calendars, or an evaluation error from a
    /// deferred input.
    pub fn new(arrays: &[&DataArray]) -> Result<Self, ArrayError> {
        let layout = Layout::of(arrays)?;
        let values = arrays
            .iter()
            .map(|a| align_to(a.to_array()?, a.dims(), &layout.dims, &layout.shape))
            .collect::<Result<_, _>>()?;
        Ok(Self { layout, values })
    }

    /// Output dimension names.
    pub fn dims(&self) -> &[String] {
        &self.layout.dims
    }

    /// Output shape.
    pub fn shape(&self) -> &[usize] {
        &self.layout.shape
    }

    /// Broadcast values, in input order.
    pub fn values(&self) -> &[ArrayD<f64>] {
        &self.values
    }

    /// Wraps `data`, which must have the output shape, into a [`DataArray`]
    /// carrying the joint coordinates and partition metadata.
    ///
    /// # Errors
    ///
    /// Returns a shape error if `data` does not have the output shape.
    pub fn finish(&self, data: ArrayD<f64>) -> Result<DataArray, ArrayError> {
        if data.shape() != self.layout.shape.as_slice() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        Ok(DataArray::assemble(self.layout.clone(), data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_calendar::{CalendarDateTime, CalendarSystem};
    use ndarray::{arr1, arr2};

    fn daily(cal: CalendarSystem, n: usize) -> TimeAxis {
        TimeAxis::daily(cal, CalendarDateTime::new(cal, 2000, 1, 1).unwrap(), n).unwrap()
    }

    #[test]
    fn align_transposes_and_expands() {
        let data = arr2(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).into_dyn();
        let src = vec!["y".to_string(), "x".to_string()];
        let out = vec!["x".to_string(), "t".to_string(), "y".to_string()];
        let aligned = align_to(data, &src, &out, &[3, 2, 2]).unwrap();
        assert_eq!(aligned.shape(), &[3, 2, 2]);
        assert_eq!(aligned[[2, 1, 1]], 6.0);
        assert_eq!(aligned[[0, 0, 1]], 4.0);
    }

    #[test]
    fn align_rejects_missing_source_dim() {
        let data = arr1(&[1.0]).into_dyn();
        let err = align_to(data, &["z".to_string()], &["x".to_string()], &[1]);
        assert!(matches!(err, Err(ArrayError::Shape(_))));
    }

    #[test]
    fn dims_ordered_by_first_appearance() {
        let a = DataArray::from_vec("time", vec![0.0; 4]);
        let b = DataArray::from_vec("lat", vec![0.0; 3]);
        let joint = Broadcast::new(&[&a, &b]).unwrap();
        assert_eq!(joint.dims(), &["time".to_string(), "lat".to_string()]);
        assert_eq!(joint.shape(), &[4, 3]);
        assert_eq!(joint.values()[1].shape(), &[4, 3]);
    }

    #[test]
    fn scalar_broadcasts() {
        let a = DataArray::from_vec("x", vec![1.0, 2.0]);
        let s = DataArray::scalar(10.0);
        let joint = Broadcast::new(&[&a, &s]).unwrap();
        assert_eq!(joint.values()[1].iter().copied().collect::<Vec<_>>(), vec![10.0, 10.0]);
    }

    #[test]
    fn size_mismatch_fails() {
        let a = DataArray::from_vec("x", vec![0.0; 2]);
        let b = DataArray::from_vec("x", vec![0.0; 3]);
        assert_eq!(
            Broadcast::new(&[&a, &b]).unwrap_err(),
            ArrayError::DimensionSizeMismatch {
                dim: "x".to_string(),
                left: 2,
                right: 3,
            }
        );
    }

    #[test]
    fn calendar_mismatch_fails() {
        let a = DataArray::from_vec("time", vec![0.0; 3])
            .with_time("time", daily(CalendarSystem::Standard, 3))
            .unwrap();
        let b = DataArray::from_vec("time", vec![0.0; 3])
            .with_time("time", daily(CalendarSystem::Day360, 3))
            .unwrap();
        assert!(matches!(
            Broadcast::new(&[&a, &b]),
            Err(ArrayError::Calendar(_))
        ));
    }

    #[test]
    fn partitioning_is_carried_per_dimension() {
        let a = DataArray::from_vec("time", vec![0.0; 6]).chunk("time", 4).unwrap();
        let b = DataArray::from_vec("lat", vec![0.0; 2]);
        let layout = Layout::of(&[&a, &b]).unwrap();
        let chunks = layout.chunks.unwrap();
        assert_eq!(chunks.blocks(0), &[4, 2]);
        assert_eq!(chunks.blocks(1), &[2]);
    }
}
