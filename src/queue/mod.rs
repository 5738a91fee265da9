//! A closeable FIFO queue with two mutually-exclusive access modes.
//!
//! [`Queue`] is the buffering core underneath every channel in this crate.
//! It can be driven directly ([`Queue::enqueue`] / [`Queue::dequeue`]) or
//! through its streaming views ([`Queue::readable`] / [`Queue::writable`]).
//! The two modes are exclusive per direction: once a view is attached, the
//! direct call on that side fails with a `Locked` error, because the view
//! drives the queue itself and a concurrent direct call would race it for
//! the same buffered values.

mod shared;
mod views;

pub use views::{Readable, Writable};

use crate::error::{DequeueError, EnqueueError};
use shared::QueueShared;

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// A closeable FIFO queue.
///
/// `Queue` is a cheaply cloneable handle; the producing and consuming sides
/// of one pipeline each keep a clone of the same queue. Exactly one task is
/// expected on each side at a time.
///
/// Values are delivered in insertion order. Closing is monotonic: buffered
/// values remain dequeueable afterwards, and once the queue is both closed
/// and drained every further dequeue fails with [`DequeueError::Closed`].
pub struct Queue<T> {
  shared: Arc<QueueShared<T>>,
}

impl<T> Queue<T> {
  /// Creates an empty, open queue.
  pub fn new() -> Self {
    Queue {
      shared: Arc::new(QueueShared::new()),
    }
  }

  /// The number of buffered values.
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  /// Returns `true` if no values are buffered.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether the queue has been closed.
  pub fn is_closed(&self) -> bool {
    self.shared.is_closed()
  }

  /// Appends a value to the queue. Never blocks.
  ///
  /// Fails with [`EnqueueError::Locked`] once the writable view has been
  /// attached, and with [`EnqueueError::Closed`] once the queue is closed.
  /// The rejected value rides back inside the error.
  pub fn enqueue(&self, value: T) -> Result<(), EnqueueError<T>> {
    {
      let mut inner = self.shared.inner.lock();
      if inner.write_locked {
        return Err(EnqueueError::Locked(value));
      }
      if inner.closed {
        return Err(EnqueueError::Closed(value));
      }
      inner.items.push_back(value);
    }
    self.shared.item_waker.wake();
    Ok(())
  }

  /// Removes and returns the oldest buffered value, waiting while the queue
  /// is empty and open.
  ///
  /// Fails with [`DequeueError::Locked`] once the readable view has been
  /// attached, and with [`DequeueError::Closed`] once the queue is closed
  /// and drained.
  pub fn dequeue(&self) -> DequeueFuture<'_, T> {
    DequeueFuture {
      shared: &self.shared,
      locked: self.shared.inner.lock().read_locked,
    }
  }

  /// Closes the queue. Idempotent. Already-buffered values stay
  /// dequeueable; further enqueues fail.
  pub fn close(&self) {
    self.shared.close_internal();
  }

  /// Attaches the streaming read view.
  ///
  /// From this point on, direct [`dequeue`](Queue::dequeue) calls fail with
  /// [`DequeueError::Locked`]. The attachment is permanent for the life of
  /// the queue.
  ///
  /// # Panics
  ///
  /// Panics if a readable view was already attached.
  pub fn readable(&self) -> Readable<T> {
    let mut inner = self.shared.inner.lock();
    assert!(!inner.read_locked, "readable view already attached");
    inner.read_locked = true;
    drop(inner);
    Readable::new(Arc::clone(&self.shared))
  }

  /// Attaches the streaming write view.
  ///
  /// From this point on, direct [`enqueue`](Queue::enqueue) calls fail with
  /// [`EnqueueError::Locked`]. Closing the view closes the queue.
  ///
  /// # Panics
  ///
  /// Panics if a writable view was already attached.
  pub fn writable(&self) -> Writable<T> {
    let mut inner = self.shared.inner.lock();
    assert!(!inner.write_locked, "writable view already attached");
    inner.write_locked = true;
    drop(inner);
    Writable::new(Arc::clone(&self.shared))
  }
}

impl<T> Clone for Queue<T> {
  fn clone(&self) -> Self {
    Queue {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<T> Default for Queue<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> fmt::Debug for Queue<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Queue").field("shared", &self.shared).finish()
  }
}

// --- Future ---

#[must_use = "futures do nothing unless you .await or poll them"]
pub struct DequeueFuture<'a, T> {
  shared: &'a QueueShared<T>,
  locked: bool,
}

impl<'a, T> Future for DequeueFuture<'a, T> {
  type Output = Result<T, DequeueError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    if self.locked {
      return Poll::Ready(Err(DequeueError::Locked));
    }
    self.shared.poll_dequeue_internal(cx)
  }
}
