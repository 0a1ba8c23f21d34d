//! Labelled n-dimensional arrays with optional partitioning and deferral.

use std::collections::BTreeMap;
use std::sync::Arc;

use helios_calendar::TimeAxis;
use ndarray::{Array1, ArrayD, IxDyn, Zip};

use crate::broadcast::{Layout, align_to};
use crate::chunks::Chunks;
use crate::error::ArrayError;
use crate::node::{BinaryOp, Node};

/// A 1-D auxiliary coordinate bound to one dimension (e.g. `lat`).
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    dim: String,
    values: Array1<f64>,
    units: Option<String>,
}

impl Coordinate {
    /// Creates a coordinate along `dim`.
    pub fn new(dim: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            dim: dim.into(),
            values: Array1::from(values),
            units: None,
        }
    }

    /// Sets the unit label.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Dimension the coordinate is bound to.
    pub fn dim(&self) -> &str {
        &self.dim
    }

    /// Coordinate values.
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Unit label, if any.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }
}

#[derive(Debug, Clone)]
enum Payload {
    Eager(ArrayD<f64>),
    Deferred(Arc<Node>),
}

/// A named-dimension array of `f64`.
///
/// The payload is either concrete (`eager`) or a deferred [`Node`] graph.
/// Partitioned arrays (those with [`Chunks`]) are always deferred; operations
/// on them build graph nodes and keep the partitioning, and values are only
/// produced by [`compute`](Self::compute).
#[derive(Debug, Clone)]
pub struct DataArray {
    name: Option<String>,
    dims: Vec<String>,
    shape: Vec<usize>,
    payload: Payload,
    chunks: Option<Chunks>,
    units: Option<String>,
    time: Option<(String, TimeAxis)>,
    coords: BTreeMap<String, Coordinate>,
}

impl DataArray {
    /// Creates an eager array from data and dimension names.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionCount`] if the number of names differs
    /// from the number of axes, or [`ArrayError::DuplicateDimension`].
    pub fn new<I, S>(dims: I, data: ArrayD<f64>) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(ArrayError::DimensionCount {
                expected: data.ndim(),
                got: dims.len(),
            });
        }
        check_unique(&dims)?;
        Ok(Self {
            name: None,
            shape: data.shape().to_vec(),
            dims,
            payload: Payload::Eager(data),
            chunks: None,
            units: None,
            time: None,
            coords: BTreeMap::new(),
        })
    }

    /// Creates a 1-D eager array.
    pub fn from_vec(dim: impl Into<String>, values: Vec<f64>) -> Self {
        let n = values.len();
        Self {
            name: None,
            dims: vec![dim.into()],
            shape: vec![n],
            payload: Payload::Eager(Array1::from(values).into_dyn()),
            chunks: None,
            units: None,
            time: None,
            coords: BTreeMap::new(),
        }
    }

    /// Creates a 0-dimensional array.
    pub fn scalar(value: f64) -> Self {
        Self {
            name: None,
            dims: Vec::new(),
            shape: Vec::new(),
            payload: Payload::Eager(ArrayD::from_elem(IxDyn(&[]), value)),
            chunks: None,
            units: None,
            time: None,
            coords: BTreeMap::new(),
        }
    }

    /// Creates a deferred array from a graph node.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidChunks`] if `chunks` does not describe
    /// `shape`, or the errors of [`new`](Self::new) for bad names.
    pub fn from_node<I, S>(
        dims: I,
        shape: Vec<usize>,
        node: Arc<Node>,
        chunks: Chunks,
    ) -> Result<Self, ArrayError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != shape.len() {
            return Err(ArrayError::DimensionCount {
                expected: shape.len(),
                got: dims.len(),
            });
        }
        check_unique(&dims)?;
        check_chunks(&dims, &shape, &chunks)?;
        Ok(Self {
            name: None,
            dims,
            shape,
            payload: Payload::Deferred(node),
            chunks: Some(chunks),
            units: None,
            time: None,
            coords: BTreeMap::new(),
        })
    }

    /// Builds an array from a broadcast layout and matching data.
    pub(crate) fn assemble(layout: Layout, data: ArrayD<f64>) -> Self {
        let payload = match &layout.chunks {
            Some(_) => Payload::Deferred(Arc::new(Node::Source(data))),
            None => Payload::Eager(data),
        };
        Self {
            name: None,
            dims: layout.dims,
            shape: layout.shape,
            payload,
            chunks: layout.chunks,
            units: None,
            time: layout.time,
            coords: layout.coords,
        }
    }

    /// Sets the variable name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the `units` attribute.
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    /// Clears the `units` attribute.
    pub fn without_units(mut self) -> Self {
        self.units = None;
        self
    }

    /// Binds a time coordinate to `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionNotFound`] or
    /// [`ArrayError::CoordinateLength`] if the axis does not fit `dim`.
    pub fn with_time(mut self, dim: impl Into<String>, axis: TimeAxis) -> Result<Self, ArrayError> {
        let dim = dim.into();
        let expected = self.len_of(&dim)?;
        if axis.len() != expected {
            return Err(ArrayError::CoordinateLength {
                name: dim,
                expected,
                got: axis.len(),
            });
        }
        self.time = Some((dim, axis));
        Ok(self)
    }

    /// Attaches an auxiliary coordinate under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionNotFound`] or
    /// [`ArrayError::CoordinateLength`] if the coordinate does not fit.
    pub fn with_coord(mut self, name: impl Into<String>, coord: Coordinate) -> Result<Self, ArrayError> {
        let name = name.into();
        let expected = self.len_of(&coord.dim)?;
        if coord.values.len() != expected {
            return Err(ArrayError::CoordinateLength {
                name,
                expected,
                got: coord.values.len(),
            });
        }
        self.coords.insert(name, coord);
        Ok(self)
    }

    // --- Accessors ---

    /// Variable name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Dimension names.
    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    /// Shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.shape.iter().product()
    }

    /// Returns `true` if the array has no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether the array has dimension `dim`.
    pub fn has_dim(&self, dim: &str) -> bool {
        self.dims.iter().any(|d| d == dim)
    }

    /// Position of `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionNotFound`] if absent.
    pub fn axis_of(&self, dim: &str) -> Result<usize, ArrayError> {
        self.dims
            .iter()
            .position(|d| d == dim)
            .ok_or_else(|| ArrayError::DimensionNotFound {
                dim: dim.to_string(),
            })
    }

    /// Length of `dim`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionNotFound`] if absent.
    pub fn len_of(&self, dim: &str) -> Result<usize, ArrayError> {
        Ok(self.shape[self.axis_of(dim)?])
    }

    /// The `units` attribute.
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    /// Time coordinate and the dimension it is bound to.
    pub fn time(&self) -> Option<(&str, &TimeAxis)> {
        self.time.as_ref().map(|(d, a)| (d.as_str(), a))
    }

    /// Time coordinate bound to `dim`, if any.
    pub fn time_axis(&self, dim: &str) -> Option<&TimeAxis> {
        self.time
            .as_ref()
            .filter(|(d, _)| d == dim)
            .map(|(_, a)| a)
    }

    /// Auxiliary coordinate `name`.
    pub fn coord(&self, name: &str) -> Option<&Coordinate> {
        self.coords.get(name)
    }

    /// All auxiliary coordinates, ordered by name.
    pub fn coords(&self) -> impl Iterator<Item = (&str, &Coordinate)> {
        self.coords.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Auxiliary coordinate `name` as a 1-D array carrying its units.
    pub fn coord_array(&self, name: &str) -> Option<DataArray> {
        let coord = self.coords.get(name)?;
        let mut out = DataArray::from_vec(coord.dim.clone(), coord.values.to_vec());
        out.units = coord.units.clone();
        Some(out)
    }

    /// Partition metadata; `None` for unpartitioned arrays.
    pub fn chunks(&self) -> Option<&Chunks> {
        self.chunks.as_ref()
    }

    /// Block sizes along `dim`; `None` for unpartitioned arrays.
    pub fn chunks_along(&self, dim: &str) -> Option<&[usize]> {
        let axis = self.axis_of(dim).ok()?;
        self.chunks.as_ref().map(|c| c.blocks(axis))
    }

    /// Whether the payload is a deferred graph.
    pub fn is_deferred(&self) -> bool {
        matches!(self.payload, Payload::Deferred(_))
    }

    /// Root of the deferred graph, if any.
    pub fn node(&self) -> Option<&Arc<Node>> {
        match &self.payload {
            Payload::Deferred(node) => Some(node),
            Payload::Eager(_) => None,
        }
    }

    /// Concrete values of an eager array.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::NotMaterialized`] for deferred arrays.
    pub fn values(&self) -> Result<&ArrayD<f64>, ArrayError> {
        match &self.payload {
            Payload::Eager(data) => Ok(data),
            Payload::Deferred(_) => Err(ArrayError::NotMaterialized),
        }
    }

    // --- Evaluation ---

    /// Concrete values, evaluating the graph of a deferred array.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn to_array(&self) -> Result<ArrayD<f64>, ArrayError> {
        match &self.payload {
            Payload::Eager(data) => Ok(data.clone()),
            Payload::Deferred(node) => node.evaluate(),
        }
    }

    /// Materialises the array: evaluates the graph and drops partitioning.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    #[tracing::instrument(skip_all, fields(name = self.name.as_deref(), deferred = self.is_deferred()))]
    pub fn compute(&self) -> Result<Self, ArrayError> {
        let data = self.to_array()?;
        Ok(Self {
            payload: Payload::Eager(data),
            chunks: None,
            ..self.clone()
        })
    }

    /// The graph node of this array, wrapping eager data in a source node.
    pub fn to_node(&self) -> Arc<Node> {
        match &self.payload {
            Payload::Deferred(node) => Arc::clone(node),
            Payload::Eager(data) => Arc::new(Node::Source(data.clone())),
        }
    }

    // --- Partitioning ---

    /// Partitions `dim` into blocks of `size` elements (the last may be
    /// shorter). Other dimensions keep their partitioning, or get a single
    /// block.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidChunks`] if `size` is zero, or
    /// [`ArrayError::DimensionNotFound`].
    pub fn chunk(self, dim: &str, size: usize) -> Result<Self, ArrayError> {
        if size == 0 {
            return Err(ArrayError::InvalidChunks {
                dim: dim.to_string(),
                reason: "block size must be >= 1".to_string(),
            });
        }
        let len = self.len_of(dim)?;
        self.rechunk(dim, Chunks::regular_blocks(len, size))
    }

    /// Repartitions `dim` into the given block sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidChunks`] if the blocks do not sum to the
    /// length of `dim`, or [`ArrayError::DimensionNotFound`].
    pub fn rechunk(self, dim: &str, blocks: Vec<usize>) -> Result<Self, ArrayError> {
        let axis = self.axis_of(dim)?;
        let total: usize = blocks.iter().sum();
        if total != self.shape[axis] {
            return Err(ArrayError::InvalidChunks {
                dim: dim.to_string(),
                reason: format!("blocks sum to {total}, dimension has {}", self.shape[axis]),
            });
        }
        let chunks = self
            .chunks
            .clone()
            .unwrap_or_else(|| Chunks::single(&self.shape))
            .with_axis(axis, blocks);
        let node = match self.payload {
            Payload::Deferred(input) => Arc::new(Node::Rechunk { input }),
            Payload::Eager(data) => Arc::new(Node::Source(data)),
        };
        Ok(Self {
            payload: Payload::Deferred(node),
            chunks: Some(chunks),
            ..self
        })
    }

    /// Applies the partitioning `chunks` (when given) to this array, making it
    /// deferred.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::InvalidChunks`] if `chunks` does not describe the
    /// shape.
    pub fn with_chunks(self, chunks: Option<Chunks>) -> Result<Self, ArrayError> {
        let Some(chunks) = chunks else {
            return Ok(self);
        };
        check_chunks(&self.dims, &self.shape, &chunks)?;
        let node = self.to_node();
        Ok(Self {
            payload: Payload::Deferred(node),
            chunks: Some(chunks),
            ..self
        })
    }

    // --- Elementwise ---

    /// `self * scale + offset`, keeping all metadata.
    ///
    /// Deferred arrays get an affine node; eager arrays are computed
    /// immediately.
    pub fn affine(&self, scale: f64, offset: f64) -> Self {
        let payload = match &self.payload {
            Payload::Eager(data) => Payload::Eager(data.mapv(|v| v * scale + offset)),
            Payload::Deferred(input) => Payload::Deferred(Arc::new(Node::Affine {
                input: Arc::clone(input),
                scale,
                offset,
            })),
        };
        Self {
            payload,
            ..self.clone()
        }
    }

    /// Elementwise `self op other`, broadcasting by dimension name.
    ///
    /// The result is deferred if either operand is, and carries the joint
    /// partitioning, time coordinate and auxiliary coordinates. Units and
    /// name are left unset.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionSizeMismatch`] or
    /// [`ArrayError::Calendar`] if the operands cannot be combined.
    pub fn binary(&self, other: &DataArray, op: BinaryOp) -> Result<Self, ArrayError> {
        let layout = Layout::of(&[self, other])?;
        if self.is_deferred() || other.is_deferred() {
            let node = Arc::new(Node::Binary {
                op,
                left: self.to_node(),
                left_dims: self.dims.clone(),
                right: other.to_node(),
                right_dims: other.dims.clone(),
                dims: layout.dims.clone(),
                shape: layout.shape.clone(),
            });
            let chunks = layout
                .chunks
                .clone()
                .unwrap_or_else(|| Chunks::single(&layout.shape));
            let out = DataArray::from_node(layout.dims.clone(), layout.shape.clone(), node, chunks)?;
            return Ok(Self {
                time: layout.time,
                coords: layout.coords,
                ..out
            });
        }
        let mut left = align_to(self.to_array()?, &self.dims, &layout.dims, &layout.shape)?;
        let right = align_to(other.to_array()?, &other.dims, &layout.dims, &layout.shape)?;
        Zip::from(&mut left).and(&right).for_each(|a, &b| *a = op.apply(*a, b));
        Ok(DataArray::assemble(layout, left))
    }
}

fn check_unique(dims: &[String]) -> Result<(), ArrayError> {
    for (i, d) in dims.iter().enumerate() {
        if dims[..i].contains(d) {
            return Err(ArrayError::DuplicateDimension { dim: d.clone() });
        }
    }
    Ok(())
}

fn check_chunks(dims: &[String], shape: &[usize], chunks: &Chunks) -> Result<(), ArrayError> {
    if chunks.ndim() != shape.len() {
        return Err(ArrayError::InvalidChunks {
            dim: dims.join(","),
            reason: format!("{} axes of blocks for {} dimensions", chunks.ndim(), shape.len()),
        });
    }
    for (axis, (dim, &n)) in dims.iter().zip(shape).enumerate() {
        let total: usize = chunks.blocks(axis).iter().sum();
        if total != n {
            return Err(ArrayError::InvalidChunks {
                dim: dim.clone(),
                reason: format!("blocks sum to {total}, dimension has {n}"),
            });
        }
    }
    Ok(())
}
