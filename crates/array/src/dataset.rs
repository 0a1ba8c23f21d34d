//! Named collections of arrays sharing dimensions.

use std::collections::BTreeMap;

use crate::array::DataArray;
use crate::error::ArrayError;

/// A set of named [`DataArray`] variables.
///
/// Variables sharing a dimension name agree on its length, and their time
/// coordinates use one calendar.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    vars: BTreeMap<String, DataArray>,
}

impl Dataset {
    /// Creates an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces variable `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ArrayError::DimensionSizeMismatch`] if a shared dimension
    /// has a different length, or [`ArrayError::Calendar`] if the time
    /// coordinate uses another calendar than the existing variables.
    pub fn insert(&mut self, name: impl Into<String>, array: DataArray) -> Result<(), ArrayError> {
        let name = name.into();
        for (other_name, other) in &self.vars {
            if *other_name == name {
                continue;
            }
            for (dim, &n) in array.dims().iter().zip(array.shape()) {
                if let Ok(m) = other.len_of(dim)
                    && m != n
                {
                    return Err(ArrayError::DimensionSizeMismatch {
                        dim: dim.clone(),
                        left: m,
                        right: n,
                    });
                }
            }
            if let (Some((_, a)), Some((_, b))) = (other.time(), array.time()) {
                a.ensure_compatible(b)?;
            }
        }
        self.vars.insert(name, array);
        Ok(())
    }

    /// Builder form of [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// See [`insert`](Self::insert).
    pub fn with_var(mut self, name: impl Into<String>, array: DataArray) -> Result<Self, ArrayError> {
        self.insert(name, array)?;
        Ok(self)
    }

    /// Variable `name`.
    pub fn get(&self, name: &str) -> Option<&DataArray> {
        self.vars.get(name)
    }

    /// Variables ordered by name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataArray)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Variable names in order.
    pub fn names(&self) -> Vec<&str> {
        self.vars.keys().map(String::as_str).collect()
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Returns `true` if the dataset has no variables.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Whether any variable is partitioned.
    pub fn is_partitioned(&self) -> bool {
        self.vars.values().any(|v| v.chunks().is_some())
    }

    /// Block sizes along `dim` of the variable split into the most blocks
    /// there, or `None` if no variable is partitioned along `dim`.
    ///
    /// Ties go to the first variable in name order.
    pub fn chunks_along(&self, dim: &str) -> Option<&[usize]> {
        self.vars
            .values()
            .filter_map(|v| v.chunks_along(dim))
            .fold(None, |best: Option<&[usize]>, blocks| match best {
                Some(b) if b.len() >= blocks.len() => Some(b),
                _ => Some(blocks),
            })
    }

    /// Materialises every variable.
    ///
    /// # Errors
    ///
    /// Propagates evaluation errors.
    pub fn compute(&self) -> Result<Self, ArrayError> {
        let vars = self
            .vars
            .iter()
            .map(|(k, v)| Ok((k.clone(), v.compute()?)))
            .collect::<Result<_, ArrayError>>()?;
        Ok(Self { vars })
    }
}
