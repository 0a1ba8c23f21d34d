//! Execution-mode selection.

use std::fmt;

/// How a resample-and-reduce is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Group and reduce the whole operand at once.
    Eager,
    /// Repartition so each block is one group, then reduce blocks
    /// independently.
    Blockwise,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eager => f.write_str("eager"),
            Self::Blockwise => f.write_str("blockwise"),
        }
    }
}

/// Picks the execution mode.
///
/// `blocks` are the block sizes along the resampled dimension, `None` when
/// the input is not partitioned along it. The flag is `override_flag`,
/// falling back to `default_flag`:
///
/// | flag | result |
/// |------|--------|
/// | `Some(false)` | `Eager` |
/// | `Some(true)` | `Blockwise` when partitioned along the dimension |
/// | `None` | `Blockwise` when partitioned into more than one block |
pub fn plan_strategy(
    blocks: Option<&[usize]>,
    override_flag: Option<bool>,
    default_flag: Option<bool>,
) -> Strategy {
    match (override_flag.or(default_flag), blocks) {
        (Some(false), _) | (_, None) => Strategy::Eager,
        (Some(true), Some(_)) => Strategy::Blockwise,
        (None, Some(b)) if b.len() > 1 => Strategy::Blockwise,
        (None, Some(_)) => Strategy::Eager,
    }
}
