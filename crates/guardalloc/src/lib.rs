//! # guardalloc
//!
//! Fail-fast, overflow-checked wrappers around the platform heap.
//!
//! Every operation in this crate upholds three guarantees:
//!
//! - a zero-size request returns `None` without invoking the allocator,
//! - a non-zero request the allocator cannot satisfy aborts the process
//!   with a diagnostic instead of returning an error value,
//! - array size computations (block count × block size, optionally plus an
//!   extra byte count) are overflow-checked before any allocation is
//!   attempted.
//!
//! Blocks are handed out as `Option<NonNull<u8>>`: the caller exclusively
//! owns a `Some` result and must pass it back to [`release`] (or to
//! [`realloc`] with a zero size) exactly once. The layer itself keeps no
//! state between calls and adds no locking; thread-safety is exactly that
//! of the platform allocator underneath.

mod fatal;
mod sys;

use std::ffi::{CStr, c_char, c_void};
use std::ptr::NonNull;

use guardalloc_core::{AllocFailure, array_size, array_size_with_extra};

/// Non-zero allocation through the platform heap; null is fatal.
fn checked_alloc(op: &'static str, n_bytes: usize) -> NonNull<u8> {
    debug_assert!(n_bytes > 0);
    // SAFETY: plain size-in, pointer-out call into the platform heap.
    let mem = unsafe { sys::heap_alloc(n_bytes) };
    match NonNull::new(mem.cast::<u8>()) {
        Some(block) => block,
        None => fatal::die(AllocFailure::Exhausted { op, n_bytes }),
    }
}

/// Non-zero zero-filled allocation through the platform heap; null is fatal.
fn checked_alloc_zeroed(op: &'static str, n_bytes: usize) -> NonNull<u8> {
    debug_assert!(n_bytes > 0);
    // SAFETY: plain size-in, pointer-out call into the platform heap.
    let mem = unsafe { sys::heap_alloc_zeroed(n_bytes) };
    match NonNull::new(mem.cast::<u8>()) {
        Some(block) => block,
        None => fatal::die(AllocFailure::Exhausted { op, n_bytes }),
    }
}

// ---------------------------------------------------------------------------
// alloc / alloc_zeroed
// ---------------------------------------------------------------------------

/// Allocates `n_bytes` of uninitialized memory.
///
/// Returns `None` when `n_bytes` is zero, without invoking the underlying
/// allocator. A non-zero request the allocator cannot satisfy aborts the
/// process; callers never see a failure value.
///
/// The returned block is owned by the caller and must be passed to
/// [`release`] exactly once.
pub fn alloc(n_bytes: usize) -> Option<NonNull<u8>> {
    if n_bytes == 0 {
        return None;
    }
    Some(checked_alloc("alloc", n_bytes))
}

/// Allocates `n_bytes` with every byte initialized to zero.
///
/// Same contract as [`alloc`], but routed through the allocator's
/// zero-filling entry rather than allocate-then-clear.
pub fn alloc_zeroed(n_bytes: usize) -> Option<NonNull<u8>> {
    if n_bytes == 0 {
        return None;
    }
    Some(checked_alloc_zeroed("alloc_zeroed", n_bytes))
}

// ---------------------------------------------------------------------------
// realloc
// ---------------------------------------------------------------------------

/// Resizes `block` to `n_bytes`, preserving contents up to the smaller of
/// the old and new sizes.
///
/// - `None` as input behaves like [`alloc`]`(n_bytes)`.
/// - A zero `n_bytes` releases `block` (when present) and returns `None`.
///   The resize primitive is never consulted for this case; its zero-size
///   behavior varies by platform, so the branch is taken here.
/// - A failed resize aborts the process; the old block is never returned.
///
/// # Safety
///
/// `block` must be `None` or a block previously returned by this layer and
/// not yet released. The input block must not be used after this call.
pub unsafe fn realloc(block: Option<NonNull<u8>>, n_bytes: usize) -> Option<NonNull<u8>> {
    if n_bytes == 0 {
        if let Some(old) = block {
            // SAFETY: caller guarantees `old` is live and owned by this heap.
            unsafe { sys::heap_release(old.as_ptr().cast::<c_void>()) };
        }
        return None;
    }
    let old = block.map_or(std::ptr::null_mut(), |b| b.as_ptr().cast::<c_void>());
    // SAFETY: caller guarantees `old` is null or live and owned by this heap.
    let mem = unsafe { sys::heap_resize(old, n_bytes) };
    match NonNull::new(mem.cast::<u8>()) {
        Some(moved) => Some(moved),
        None => fatal::die(AllocFailure::Exhausted {
            op: "realloc",
            n_bytes,
        }),
    }
}

// ---------------------------------------------------------------------------
// array variants
// ---------------------------------------------------------------------------

/// Allocates `n_blocks * block_size` bytes, aborting if the product wraps.
///
/// A zero product takes [`alloc`]'s zero-size path and returns `None`.
pub fn alloc_array(n_blocks: usize, block_size: usize) -> Option<NonNull<u8>> {
    match array_size(n_blocks, block_size) {
        Ok(total) => alloc(total),
        Err(_) => fatal::die(AllocFailure::ArrayOverflow {
            op: "alloc_array",
            n_blocks,
            block_size,
        }),
    }
}

/// Allocates `n_blocks * block_size + extra` bytes, aborting if either the
/// product or the additive tail wraps.
pub fn alloc_array_extra(n_blocks: usize, block_size: usize, extra: usize) -> Option<NonNull<u8>> {
    match array_size_with_extra(n_blocks, block_size, extra) {
        Ok(total) => alloc(total),
        Err(_) => fatal::die(AllocFailure::ArrayExtraOverflow {
            op: "alloc_array_extra",
            n_blocks,
            block_size,
            extra,
        }),
    }
}

/// Zero-filled counterpart of [`alloc_array`].
pub fn alloc_array_zeroed(n_blocks: usize, block_size: usize) -> Option<NonNull<u8>> {
    match array_size(n_blocks, block_size) {
        Ok(total) => alloc_zeroed(total),
        Err(_) => fatal::die(AllocFailure::ArrayOverflow {
            op: "alloc_array_zeroed",
            n_blocks,
            block_size,
        }),
    }
}

/// Resizes `block` to hold `n_blocks * block_size` bytes, aborting if the
/// product wraps.
///
/// # Safety
///
/// Same contract as [`realloc`].
pub unsafe fn realloc_array(
    block: Option<NonNull<u8>>,
    n_blocks: usize,
    block_size: usize,
) -> Option<NonNull<u8>> {
    match array_size(n_blocks, block_size) {
        // SAFETY: forwarded caller contract.
        Ok(total) => unsafe { realloc(block, total) },
        Err(_) => fatal::die(AllocFailure::ArrayOverflow {
            op: "realloc_array",
            n_blocks,
            block_size,
        }),
    }
}

// ---------------------------------------------------------------------------
// duplication helpers
// ---------------------------------------------------------------------------

/// Duplicates a C string, terminator included, into fresh storage.
///
/// The copy occupies a distinct region of `len + 1` bytes and is never
/// null; the only failure path is the exhaustion abort shared with
/// [`alloc`]. Release the copy with [`release`] after casting back to a
/// byte pointer.
pub fn strdup(text: &CStr) -> NonNull<c_char> {
    let source = text.to_bytes_with_nul();
    // to_bytes_with_nul is at least the terminator, so the request is
    // always non-zero.
    let block = checked_alloc("strdup", source.len());
    // SAFETY: `block` is valid for `source.len()` bytes and a fresh
    // allocation cannot overlap `source`.
    unsafe {
        std::ptr::copy_nonoverlapping(source.as_ptr(), block.as_ptr(), source.len());
    }
    block.cast::<c_char>()
}

/// Duplicates `source` into fresh storage.
///
/// An empty source returns `None` without reading, per the zero-size
/// contract of [`alloc`].
pub fn memdup(source: &[u8]) -> Option<NonNull<u8>> {
    if source.is_empty() {
        return None;
    }
    let block = checked_alloc("memdup", source.len());
    // SAFETY: `block` is valid for `source.len()` bytes and a fresh
    // allocation cannot overlap `source`.
    unsafe {
        std::ptr::copy_nonoverlapping(source.as_ptr(), block.as_ptr(), source.len());
    }
    Some(block)
}

// ---------------------------------------------------------------------------
// release
// ---------------------------------------------------------------------------

/// Returns `block` to the platform heap.
///
/// Accepts `None` as a no-op so call sites can hand back whatever an
/// allocation operation produced.
///
/// # Safety
///
/// `block` must be `None` or a block previously returned by this layer and
/// not yet released.
pub unsafe fn release(block: Option<NonNull<u8>>) {
    if let Some(live) = block {
        // SAFETY: caller guarantees `live` is owned by this heap and still live.
        unsafe { sys::heap_release(live.as_ptr().cast::<c_void>()) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_zero_is_none() {
        assert!(alloc(0).is_none());
        assert!(alloc_zeroed(0).is_none());
    }

    #[test]
    fn test_alloc_array_zero_factor_is_none() {
        assert!(alloc_array(0, 16).is_none());
        assert!(alloc_array(16, 0).is_none());
        assert!(alloc_array_zeroed(0, 32).is_none());
        assert!(alloc_array_extra(0, 0, 0).is_none());
    }

    #[test]
    fn test_realloc_none_to_zero_is_none() {
        // SAFETY: no prior block, nothing allocated.
        assert!(unsafe { realloc(None, 0) }.is_none());
    }

    #[test]
    fn test_realloc_array_none_with_zero_product_is_none() {
        // SAFETY: no prior block, nothing allocated.
        assert!(unsafe { realloc_array(None, 0, 128) }.is_none());
    }

    #[test]
    fn test_release_none_is_noop() {
        // SAFETY: releasing nothing.
        unsafe { release(None) };
    }

    #[test]
    fn test_memdup_empty_is_none() {
        assert!(memdup(&[]).is_none());
    }
}
