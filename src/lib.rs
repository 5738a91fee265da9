//! Asynchronous single-producer/single-consumer channels and closeable
//! queues for in-process pipelines.
//!
//! Weir provides two layered building blocks. The [`queue`] module holds the
//! core primitive: a closeable FIFO ([`queue::Queue`]) with direct
//! enqueue/dequeue access and mutually-exclusive streaming views. The
//! [`channel`] module wraps that buffering discipline behind a
//! `Sender`/`Receiver` endpoint pair, in unbounded and capacity-bounded
//! flavors; the bounded flavor applies backpressure to the producer.

pub mod channel;
pub mod error;
pub mod queue;

// Internal utilities - not part of public API but exposed for crate use
mod async_util;

// Public re-exports for convenience
pub use error::{DequeueError, EnqueueError, RecvError, SendError};
