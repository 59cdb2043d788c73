//! Stack growth for the recursive parser and printer.
//!
//! Type text nests arbitrarily deep (`ref<box<ref<...>>>`), so both walks
//! grow the stack on demand instead of overflowing.

/// Grow the stack when less than this remains.
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
pub(crate) fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
