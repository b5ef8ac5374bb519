//! Overflow-checked size arithmetic for array allocations.
//!
//! The guards here run before any allocator call: a computation that would
//! wrap the `usize` range is reported as [`SizeOverflow`] and the request
//! never reaches the heap.

use thiserror::Error;

/// Which term of a composite size computation wrapped the `usize` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SizeOverflow {
    /// `n_blocks * block_size` exceeded `usize::MAX`.
    #[error("block count times block size exceeds the size range")]
    Product,
    /// The product fit, but adding the extra byte count wrapped.
    #[error("extra byte count wraps the computed array size")]
    Extra,
}

/// Computes `n_blocks * block_size`, rejecting products that wrap.
///
/// A zero factor is a legal input: the product is zero and the caller's
/// zero-size path takes over from there.
pub fn array_size(n_blocks: usize, block_size: usize) -> Result<usize, SizeOverflow> {
    n_blocks.checked_mul(block_size).ok_or(SizeOverflow::Product)
}

/// Computes `n_blocks * block_size + extra`, rejecting either step that wraps.
///
/// The multiplication is checked first; the additive term is only examined
/// once the product is known to fit.
pub fn array_size_with_extra(
    n_blocks: usize,
    block_size: usize,
    extra: usize,
) -> Result<usize, SizeOverflow> {
    let product = array_size(n_blocks, block_size)?;
    product.checked_add(extra).ok_or(SizeOverflow::Extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_size_basic() {
        assert_eq!(array_size(10, 4), Ok(40));
    }

    #[test]
    fn test_array_size_zero_factors() {
        assert_eq!(array_size(0, 16), Ok(0));
        assert_eq!(array_size(16, 0), Ok(0));
        assert_eq!(array_size(0, 0), Ok(0));
    }

    #[test]
    fn test_array_size_fits_exactly_at_max() {
        assert_eq!(array_size(usize::MAX, 1), Ok(usize::MAX));
        assert_eq!(array_size(1, usize::MAX), Ok(usize::MAX));
        assert_eq!(array_size(usize::MAX / 2, 2), Ok(usize::MAX - 1));
    }

    #[test]
    fn test_array_size_rejects_wrapping_product() {
        assert_eq!(array_size(usize::MAX, 2), Err(SizeOverflow::Product));
        assert_eq!(array_size(usize::MAX / 2 + 1, 2), Err(SizeOverflow::Product));
        assert_eq!(
            array_size(usize::MAX, usize::MAX),
            Err(SizeOverflow::Product)
        );
    }

    #[test]
    fn test_array_size_with_extra_basic() {
        assert_eq!(array_size_with_extra(4, 4, 16), Ok(32));
        assert_eq!(array_size_with_extra(4, 4, 0), Ok(16));
    }

    #[test]
    fn test_array_size_with_extra_fits_exactly_at_max() {
        assert_eq!(
            array_size_with_extra(usize::MAX / 2, 2, 1),
            Ok(usize::MAX)
        );
        assert_eq!(array_size_with_extra(1, usize::MAX, 0), Ok(usize::MAX));
    }

    #[test]
    fn test_array_size_with_extra_rejects_additive_wraparound() {
        assert_eq!(
            array_size_with_extra(4, 4, usize::MAX - 8),
            Err(SizeOverflow::Extra)
        );
        assert_eq!(
            array_size_with_extra(1, usize::MAX, 1),
            Err(SizeOverflow::Extra)
        );
    }

    #[test]
    fn test_array_size_with_extra_reports_product_first() {
        // The multiplicative guard fires before the extra term is looked at.
        assert_eq!(
            array_size_with_extra(usize::MAX, 2, usize::MAX),
            Err(SizeOverflow::Product)
        );
    }
}
