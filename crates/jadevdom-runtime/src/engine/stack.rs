//! On-demand stack growth for the recursive passes over expression trees.

/// Headroom that must remain before a nested step runs on the current stack.
const RED_ZONE: usize = 64 * 1024;

/// Size of each extra stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

pub(crate) fn grow<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
