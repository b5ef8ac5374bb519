//! Fatal scenarios the fixture binary can drive.
//!
//! Each scenario calls one public allocation operation with inputs that
//! must trip its fatal path. The expected stderr diagnostic is derived from
//! the same [`AllocFailure`] values the allocation layer prints, so the
//! fixture tests assert the exact public diagnostic contract.

use clap::ValueEnum;
use guardalloc_core::AllocFailure;

/// A request no allocator can satisfy: past any internal padding guard,
/// far beyond the addressable range on every supported platform.
pub const EXHAUSTION_BYTES: usize = usize::MAX - 4096;

/// A fatal path the fixture binary executes in its own process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// `alloc` against an unsatisfiable byte count.
    AllocExhausted,
    /// `alloc_zeroed` against an unsatisfiable byte count.
    AllocZeroedExhausted,
    /// `realloc` from nothing to an unsatisfiable byte count.
    ReallocExhausted,
    /// `alloc_array` whose product wraps the size range.
    ArrayProductOverflow,
    /// `alloc_array_zeroed` whose product wraps the size range.
    ArrayZeroedProductOverflow,
    /// `realloc_array` whose product wraps the size range.
    ReallocArrayProductOverflow,
    /// `alloc_array_extra` whose additive tail wraps the computed size.
    ArrayExtraWraparound,
    /// `alloc_array_extra` whose product already wraps.
    ArrayExtraProductOverflow,
}

impl Scenario {
    /// Executes the scenario. Every arm must abort the process; returning
    /// from this function is a fixture failure the binary reports.
    pub fn run(self) {
        match self {
            Scenario::AllocExhausted => {
                let _ = guardalloc::alloc(EXHAUSTION_BYTES);
            }
            Scenario::AllocZeroedExhausted => {
                let _ = guardalloc::alloc_zeroed(EXHAUSTION_BYTES);
            }
            Scenario::ReallocExhausted => {
                // SAFETY: no prior block is involved.
                let _ = unsafe { guardalloc::realloc(None, EXHAUSTION_BYTES) };
            }
            Scenario::ArrayProductOverflow => {
                let _ = guardalloc::alloc_array(usize::MAX, 2);
            }
            Scenario::ArrayZeroedProductOverflow => {
                let _ = guardalloc::alloc_array_zeroed(usize::MAX, 2);
            }
            Scenario::ReallocArrayProductOverflow => {
                // SAFETY: no prior block is involved.
                let _ = unsafe { guardalloc::realloc_array(None, usize::MAX, 2) };
            }
            Scenario::ArrayExtraWraparound => {
                let _ = guardalloc::alloc_array_extra(4, 4, usize::MAX - 8);
            }
            Scenario::ArrayExtraProductOverflow => {
                let _ = guardalloc::alloc_array_extra(usize::MAX, 2, 1);
            }
        }
    }

    /// The diagnostic the allocation layer must print for this scenario.
    pub fn expected_failure(self) -> AllocFailure {
        match self {
            Scenario::AllocExhausted => AllocFailure::Exhausted {
                op: "alloc",
                n_bytes: EXHAUSTION_BYTES,
            },
            Scenario::AllocZeroedExhausted => AllocFailure::Exhausted {
                op: "alloc_zeroed",
                n_bytes: EXHAUSTION_BYTES,
            },
            Scenario::ReallocExhausted => AllocFailure::Exhausted {
                op: "realloc",
                n_bytes: EXHAUSTION_BYTES,
            },
            Scenario::ArrayProductOverflow => AllocFailure::ArrayOverflow {
                op: "alloc_array",
                n_blocks: usize::MAX,
                block_size: 2,
            },
            Scenario::ArrayZeroedProductOverflow => AllocFailure::ArrayOverflow {
                op: "alloc_array_zeroed",
                n_blocks: usize::MAX,
                block_size: 2,
            },
            Scenario::ReallocArrayProductOverflow => AllocFailure::ArrayOverflow {
                op: "realloc_array",
                n_blocks: usize::MAX,
                block_size: 2,
            },
            Scenario::ArrayExtraWraparound => AllocFailure::ArrayExtraOverflow {
                op: "alloc_array_extra",
                n_blocks: 4,
                block_size: 4,
                extra: usize::MAX - 8,
            },
            Scenario::ArrayExtraProductOverflow => AllocFailure::ArrayExtraOverflow {
                op: "alloc_array_extra",
                n_blocks: usize::MAX,
                block_size: 2,
                extra: 1,
            },
        }
    }

    /// The kebab-case name the fixture binary accepts for this scenario.
    pub fn cli_name(self) -> &'static str {
        match self {
            Scenario::AllocExhausted => "alloc-exhausted",
            Scenario::AllocZeroedExhausted => "alloc-zeroed-exhausted",
            Scenario::ReallocExhausted => "realloc-exhausted",
            Scenario::ArrayProductOverflow => "array-product-overflow",
            Scenario::ArrayZeroedProductOverflow => "array-zeroed-product-overflow",
            Scenario::ReallocArrayProductOverflow => "realloc-array-product-overflow",
            Scenario::ArrayExtraWraparound => "array-extra-wraparound",
            Scenario::ArrayExtraProductOverflow => "array-extra-product-overflow",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_names_match_value_enum_names() {
        for scenario in Scenario::value_variants() {
            let possible = scenario
                .to_possible_value()
                .expect("no skipped variants in Scenario");
            assert_eq!(possible.get_name(), scenario.cli_name());
        }
    }

    #[test]
    fn test_expected_failures_name_the_invoked_operation() {
        assert_eq!(Scenario::AllocExhausted.expected_failure().op(), "alloc");
        assert_eq!(
            Scenario::ReallocArrayProductOverflow.expected_failure().op(),
            "realloc_array"
        );
        assert_eq!(
            Scenario::ArrayExtraWraparound.expected_failure().op(),
            "alloc_array_extra"
        );
    }

    #[test]
    fn test_exhaustion_request_is_nonzero() {
        // The exhaustion scenarios must exercise the allocator, not the
        // zero-size sentinel path.
        assert!(EXHAUSTION_BYTES > 0);
    }
}
