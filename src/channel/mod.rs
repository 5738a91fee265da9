//! Single-producer/single-consumer channels.
//!
//! A channel is a [`Sender`]/[`Receiver`] pair over one FIFO buffer plus a
//! hand-off slot: the one value the receive side holds ready for delivery.
//! [`unbounded`] channels admit every send immediately; [`bounded`] channels
//! cap the in-flight count (buffered values plus the occupied hand-off
//! slot) and suspend the producer until a receive frees a unit of capacity.
//!
//! Exactly one producer task and one consumer task are assumed per channel.
//! Neither endpoint is cloneable; both are `Send`, so the two halves can
//! live on different tasks.
//!
//! ```
//! use futures::StreamExt;
//!
//! # futures::executor::block_on(async {
//! let (tx, rx) = weir::channel::unbounded();
//! tx.send(1).await.unwrap();
//! tx.send(2).await.unwrap();
//! tx.close();
//! let values: Vec<i32> = rx.collect().await;
//! assert_eq!(values, vec![1, 2]);
//! # });
//! ```

mod receiver;
mod sender;
mod shared;

pub use receiver::{Receiver, RecvFuture};
pub use sender::{SendFuture, Sender};

use shared::ChannelShared;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Creates an unbounded channel. Sends always complete immediately; only
/// the receive side ever suspends.
pub fn unbounded<T>() -> (Sender<T>, Receiver<T>) {
  channel_with_capacity(None)
}

/// Creates a bounded channel holding at most `capacity` values in flight:
/// buffered values plus the one the receive side holds out for delivery.
///
/// # Panics
///
/// Panics if `capacity` is 0.
pub fn bounded<T>(capacity: usize) -> (Sender<T>, Receiver<T>) {
  assert!(capacity > 0, "bounded channel capacity must be greater than 0");
  channel_with_capacity(Some(capacity))
}

fn channel_with_capacity<T>(capacity: Option<usize>) -> (Sender<T>, Receiver<T>) {
  let shared = Arc::new(ChannelShared::new(capacity));
  (
    Sender {
      shared: Arc::clone(&shared),
      closed: AtomicBool::new(false),
    },
    Receiver {
      shared,
      closed: AtomicBool::new(false),
    },
  )
}
