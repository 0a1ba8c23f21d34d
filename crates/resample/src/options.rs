//! Dispatcher options and their scoped override.

use std::ops::{Deref, DerefMut};

/// Options consulted by [`resample_map`](crate::resample_map).
///
/// Passed explicitly to every call; there is no process-wide state.
///
/// # Example
///
/// ```
/// use helios_resample::Options;
///
/// let mut opts = Options::new();
/// {
///     let scoped = opts.set(Some(false));
///     assert_eq!(scoped.map_blocks(), Some(false));
/// }
/// assert_eq!(opts.map_blocks(), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    resample_map_blocks: Option<bool>,
}

impl Options {
    /// Creates options with automatic execution-mode selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution-mode flag: `Some(true)` prefers block-wise,
    /// `Some(false)` forces eager, `None` decides from the partitioning.
    pub fn with_map_blocks(mut self, flag: Option<bool>) -> Self {
        self.resample_map_blocks = flag;
        self
    }

    /// Returns the execution-mode flag.
    pub fn map_blocks(&self) -> Option<bool> {
        self.resample_map_blocks
    }

    /// Overrides the execution-mode flag until the returned guard is
    /// dropped, which restores the previous value on every exit path.
    pub fn set(&mut self, flag: Option<bool>) -> OptionsGuard<'_> {
        let previous = std::mem::replace(&mut self.resample_map_blocks, flag);
        tracing::trace!(?previous, ?flag, "overriding resample_map_blocks");
        OptionsGuard {
            options: self,
            previous,
        }
    }
}

/// Scoped override created by [`Options::set`].
#[derive(Debug)]
pub struct OptionsGuard<'a> {
    options: &'a mut Options,
    previous: Option<bool>,
}

impl Deref for OptionsGuard<'_> {
    type Target = Options;

    fn deref(&self) -> &Options {
        self.options
    }
}

impl DerefMut for OptionsGuard<'_> {
    fn deref_mut(&mut self) -> &mut Options {
        self.options
    }
}

impl Drop for OptionsGuard<'_> {
    fn drop(&mut self) {
        self.options.resample_map_blocks = self.previous;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        assert_eq!(Options::new().map_blocks(), None);
        assert_eq!(Options::default(), Options::new());
    }

    #[test]
    fn builder() {
        let o = Options::new().with_map_blocks(Some(true));
        assert_eq!(o.map_blocks(), Some(true));
    }

    #[test]
    fn guard_restores_on_drop() {
        let mut o = Options::new().with_map_blocks(Some(true));
        {
            let g = o.set(Some(false));
            assert_eq!(g.map_blocks(), Some(false));
        }
        assert_eq!(o.map_blocks(), Some(true));
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut o = Options::new();
        {
            let mut outer = o.set(Some(true));
            {
                let inner = outer.set(Some(false));
                assert_eq!(inner.map_blocks(), Some(false));
            }
            assert_eq!(outer.map_blocks(), Some(true));
        }
        assert_eq!(o.map_blocks(), None);
    }

    #[test]
    fn guard_restores_after_early_return() {
        fn failing(o: &mut Options) -> Result<(), String> {
            let g = o.set(Some(false));
            if g.map_blocks() == Some(false) {
                return Err("bail".to_string());
            }
            Ok(())
        }
        let mut o = Options::new();
        assert!(failing(&mut o).is_err());
        assert_eq!(o.map_blocks(), None);
    }
}
