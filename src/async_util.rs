//! Utilities for asynchronous wake handling.

// Re-export AtomicWaker from futures-util for internal crate use. It is the
// single-outstanding notification handle both the queue and channel cores
// suspend on.
pub(crate) use futures_util::task::AtomicWaker;
