//! Resample requests.

use std::sync::Arc;

use helios_array::Reducer;
use helios_calendar::Frequency;

use crate::error::ResampleError;

/// A resample-and-reduce request: which dimension, which bins, which
/// reduction, and an optional execution-mode override.
///
/// The frequency label is parsed on construction, so an unknown label fails
/// before any data is touched.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use helios_array::Reduction;
/// use helios_resample::ResampleSpec;
///
/// let spec = ResampleSpec::new("time", "MS", Arc::new(Reduction::Mean))
///     .unwrap()
///     .with_map_blocks(false);
/// assert_eq!(spec.map_blocks(), Some(false));
/// assert!(ResampleSpec::new("time", "W", Arc::new(Reduction::Mean)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ResampleSpec {
    dim: String,
    freq: Frequency,
    reducer: Arc<dyn Reducer>,
    map_blocks: Option<bool>,
}

impl ResampleSpec {
    /// Creates a request for `dim` binned by the frequency `freq`.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidConfig`] for an empty dimension name
    /// and [`ResampleError::Calendar`] for an unknown frequency label.
    pub fn new(
        dim: impl Into<String>,
        freq: &str,
        reducer: Arc<dyn Reducer>,
    ) -> Result<Self, ResampleError> {
        let freq = freq.parse()?;
        Self::with_frequency(dim, freq, reducer)
    }

    /// Creates a request from an already parsed frequency.
    ///
    /// # Errors
    ///
    /// Returns [`ResampleError::InvalidConfig`] for an empty dimension name.
    pub fn with_frequency(
        dim: impl Into<String>,
        freq: Frequency,
        reducer: Arc<dyn Reducer>,
    ) -> Result<Self, ResampleError> {
        let dim = dim.into();
        if dim.trim().is_empty() {
            return Err(ResampleError::InvalidConfig {
                reason: "dimension name is empty".to_string(),
            });
        }
        Ok(Self {
            dim,
            freq,
            reducer,
            map_blocks: None,
        })
    }

    /// Overrides the execution mode for this request only.
    pub fn with_map_blocks(mut self, flag: bool) -> Self {
        self.map_blocks = Some(flag);
        self
    }

    // --- Accessors ---

    /// Returns the resampled dimension.
    pub fn dim(&self) -> &str {
        &self.dim
    }

    /// Returns the bin frequency.
    pub fn freq(&self) -> Frequency {
        self.freq
    }

    /// Returns the reducer.
    pub fn reducer(&self) -> &Arc<dyn Reducer> {
        &self.reducer
    }

    /// Returns the per-request execution-mode override.
    pub fn map_blocks(&self) -> Option<bool> {
        self.map_blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_array::Reduction;
    use helios_calendar::CalendarError;

    #[test]
    fn parses_frequency_up_front() {
        let s = ResampleSpec::new("time", "QS-DEC", Arc::new(Reduction::Sum)).unwrap();
        assert_eq!(s.dim(), "time");
        assert_eq!(s.freq(), Frequency::QuarterStart { anchor: 12 });
        assert_eq!(s.reducer().name(), "sum");
        assert_eq!(s.map_blocks(), None);
    }

    #[test]
    fn unknown_frequency_fails() {
        let err = ResampleSpec::new("time", "W", Arc::new(Reduction::Mean)).unwrap_err();
        assert_eq!(
            err,
            ResampleError::Calendar(CalendarError::UnknownFrequency {
                label: "W".to_string(),
            })
        );
    }

    #[test]
    fn empty_dim_fails() {
        assert!(matches!(
            ResampleSpec::new(" ", "MS", Arc::new(Reduction::Mean)),
            Err(ResampleError::InvalidConfig { .. })
        ));
    }
}
