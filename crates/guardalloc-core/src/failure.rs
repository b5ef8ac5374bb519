//! Fatal failure taxonomy for the allocation layer.
//!
//! Exactly two conditions are unrecoverable: the underlying allocator
//! refusing a non-zero request, and a size computation wrapping the `usize`
//! range. Neither is ever returned to a caller as a value — the allocation
//! layer prints the `Display` form of the record and aborts. The type exists
//! so the diagnostic line has a single definition that tests and the fixture
//! harness can assert against.

use thiserror::Error;

/// A condition the allocation layer treats as unrecoverable.
///
/// `op` names the public operation the caller invoked; the remaining fields
/// are the sizes that produced the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocFailure {
    /// The underlying allocator returned null for a non-zero request.
    #[error("{op}: panic: unable to allocate {n_bytes} bytes")]
    Exhausted {
        op: &'static str,
        n_bytes: usize,
    },
    /// A block-count times block-size computation wrapped the size range.
    #[error("{op}: overflow allocating {n_blocks}*{block_size} bytes")]
    ArrayOverflow {
        op: &'static str,
        n_blocks: usize,
        block_size: usize,
    },
    /// An array-plus-extra computation wrapped, in either its multiplicative
    /// or its additive step.
    #[error("{op}: overflow allocating {n_blocks}*{block_size} + {extra} bytes")]
    ArrayExtraOverflow {
        op: &'static str,
        n_blocks: usize,
        block_size: usize,
        extra: usize,
    },
}

impl AllocFailure {
    /// The public operation this diagnostic is attributed to.
    pub fn op(&self) -> &'static str {
        match self {
            AllocFailure::Exhausted { op, .. }
            | AllocFailure::ArrayOverflow { op, .. }
            | AllocFailure::ArrayExtraOverflow { op, .. } => op,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exhausted_display() {
        let failure = AllocFailure::Exhausted {
            op: "alloc",
            n_bytes: 42,
        };
        assert_eq!(
            failure.to_string(),
            "alloc: panic: unable to allocate 42 bytes"
        );
    }

    #[test]
    fn test_array_overflow_display() {
        let failure = AllocFailure::ArrayOverflow {
            op: "alloc_array",
            n_blocks: usize::MAX,
            block_size: 2,
        };
        assert_eq!(
            failure.to_string(),
            format!("alloc_array: overflow allocating {}*2 bytes", usize::MAX)
        );
    }

    #[test]
    fn test_array_extra_overflow_display() {
        let failure = AllocFailure::ArrayExtraOverflow {
            op: "alloc_array_extra",
            n_blocks: 4,
            block_size: 4,
            extra: usize::MAX - 8,
        };
        assert_eq!(
            failure.to_string(),
            format!(
                "alloc_array_extra: overflow allocating 4*4 + {} bytes",
                usize::MAX - 8
            )
        );
    }

    #[test]
    fn test_op_accessor() {
        let failure = AllocFailure::ArrayOverflow {
            op: "realloc_array",
            n_blocks: 3,
            block_size: 7,
        };
        assert_eq!(failure.op(), "realloc_array");
    }
}
