//! Partition metadata: block sizes per dimension.

use std::ops::Range;

/// Block sizes along every axis of a partitioned array.
///
/// Axis `i` holds a sequence of block lengths summing to the length of that
/// axis. Zero-length blocks are allowed; they arise when a resampling bin
/// holds no samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunks {
    sizes: Vec<Vec<usize>>,
}

impl Chunks {
    /// One block spanning each axis of `shape`.
    pub fn single(shape: &[usize]) -> Self {
        Self {
            sizes: shape.iter().map(|&n| vec![n]).collect(),
        }
    }

    /// Builds chunks from explicit block sizes per axis.
    ///
    /// Returns `None` if the number of axes or any axis total does not match
    /// `shape`.
    pub fn from_sizes(shape: &[usize], sizes: Vec<Vec<usize>>) -> Option<Self> {
        let valid = sizes.len() == shape.len()
            && sizes
                .iter()
                .zip(shape)
                .all(|(blocks, &n)| blocks.iter().sum::<usize>() == n);
        valid.then_some(Self { sizes })
    }

    /// Blocks of at most `size` elements covering an axis of length `len`.
    ///
    /// A zero-length axis yields a single empty block.
    pub fn regular_blocks(len: usize, size: usize) -> Vec<usize> {
        if len == 0 || size == 0 {
            return vec![len];
        }
        let mut blocks = vec![size; len / size];
        if len % size != 0 {
            blocks.push(len % size);
        }
        blocks
    }

    /// Returns the number of axes.
    pub fn ndim(&self) -> usize {
        self.sizes.len()
    }

    /// Block sizes along `axis`.
    pub fn blocks(&self, axis: usize) -> &[usize] {
        &self.sizes[axis]
    }

    /// Number of blocks along `axis`.
    pub fn nblocks(&self, axis: usize) -> usize {
        self.sizes[axis].len()
    }

    /// Block sizes for all axes.
    pub fn sizes(&self) -> &[Vec<usize>] {
        &self.sizes
    }

    /// Index ranges of the blocks along `axis`.
    pub fn ranges(&self, axis: usize) -> Vec<Range<usize>> {
        let mut start = 0;
        self.sizes[axis]
            .iter()
            .map(|&len| {
                let r = start..start + len;
                start += len;
                r
            })
            .collect()
    }

    /// Returns a copy with the blocks along `axis` replaced.
    pub(crate) fn with_axis(&self, axis: usize, blocks: Vec<usize>) -> Self {
        let mut sizes = self.sizes.clone();
        sizes[axis] = blocks;
        Self { sizes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regular_blocks_with_remainder() {
        assert_eq!(Chunks::regular_blocks(365, 60), vec![60, 60, 60, 60, 60, 60, 5]);
        assert_eq!(Chunks::regular_blocks(120, 60), vec![60, 60]);
        assert_eq!(Chunks::regular_blocks(10, 60), vec![10]);
        assert_eq!(Chunks::regular_blocks(0, 60), vec![0]);
    }

    #[test]
    fn from_sizes_validates_totals() {
        assert!(Chunks::from_sizes(&[4, 2], vec![vec![2, 2], vec![2]]).is_some());
        assert!(Chunks::from_sizes(&[4, 2], vec![vec![2, 1], vec![2]]).is_none());
        assert!(Chunks::from_sizes(&[4, 2], vec![vec![4]]).is_none());
    }

    #[test]
    fn ranges_are_contiguous() {
        let chunks = Chunks::from_sizes(&[7], vec![vec![3, 0, 4]]).unwrap();
        assert_eq!(chunks.ranges(0), vec![0..3, 3..3, 3..7]);
        assert_eq!(chunks.nblocks(0), 3);
    }

    #[test]
    fn single_block_per_axis() {
        let chunks = Chunks::single(&[5, 3]);
        assert_eq!(chunks.blocks(0), &[5]);
        assert_eq!(chunks.blocks(1), &[3]);
        assert_eq!(chunks.ndim(), 2);
    }
}
