//! Streaming views over a [`Queue`](super::Queue).

use super::shared::QueueShared;
use crate::error::EnqueueError;

use futures_core::Stream;
use futures_sink::Sink;
use std::fmt;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

/// The streaming read view of a queue.
///
/// Yields buffered values in FIFO order and ends once the queue is closed
/// and drained: closure is a normal end of stream here, not an error.
pub struct Readable<T> {
  shared: Arc<QueueShared<T>>,
}

impl<T> Readable<T> {
  pub(super) fn new(shared: Arc<QueueShared<T>>) -> Self {
    Readable { shared }
  }
}

impl<T> Stream for Readable<T> {
  type Item = T;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    match self.shared.poll_dequeue_internal(cx) {
      Poll::Ready(Ok(value)) => Poll::Ready(Some(value)),
      Poll::Ready(Err(_)) => Poll::Ready(None),
      Poll::Pending => Poll::Pending,
    }
  }
}

impl<T> fmt::Debug for Readable<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Readable").field("shared", &self.shared).finish()
  }
}

/// The streaming write view of a queue.
///
/// The queue buffer is unbounded, so the sink is always ready and writes
/// land immediately. Closing the sink closes the underlying queue.
pub struct Writable<T> {
  shared: Arc<QueueShared<T>>,
}

impl<T> Writable<T> {
  pub(super) fn new(shared: Arc<QueueShared<T>>) -> Self {
    Writable { shared }
  }
}

impl<T> Sink<T> for Writable<T> {
  type Error = EnqueueError<T>;

  fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn start_send(self: Pin<&mut Self>, item: T) -> Result<(), Self::Error> {
    self.shared.enqueue_internal(item).map_err(EnqueueError::Closed)
  }

  fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    Poll::Ready(Ok(()))
  }

  fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
    self.shared.close_internal();
    Poll::Ready(Ok(()))
  }
}

impl<T> fmt::Debug for Writable<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Writable").field("shared", &self.shared).finish()
  }
}
