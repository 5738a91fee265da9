use super::shared::ChannelShared;
use crate::error::RecvError;

use futures_core::Stream;
use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// The receiving half of a channel.
///
/// Dropping the receiver abandons the channel: undelivered values are
/// discarded and any suspended or later send fails with
/// [`SendError::Disconnected`](crate::error::SendError::Disconnected).
#[derive(Debug)]
pub struct Receiver<T> {
  pub(crate) shared: Arc<ChannelShared<T>>,
  pub(crate) closed: AtomicBool,
}

impl<T> Receiver<T> {
  /// Receives the next value, waiting while the channel is empty and open.
  ///
  /// Returns [`RecvError::Closed`] once the channel is closed and drained.
  /// That condition is terminal: every later call fails the same way.
  pub fn recv(&self) -> RecvFuture<'_, T> {
    RecvFuture { receiver: self }
  }

  /// Abandons the receive side. Idempotent.
  ///
  /// Undelivered values are discarded; the producer is woken so a send in
  /// flight fails instead of hanging.
  pub fn close(&self) {
    if self
      .closed
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
      .is_ok()
    {
      self.shared.abandon_receiver();
    }
  }

  /// Returns `true` once the channel is closed and fully drained, i.e. the
  /// terminal state in which every receive reports end-of-data.
  pub fn is_closed(&self) -> bool {
    let inner = self.shared.inner.lock();
    inner.closed && inner.lookahead.is_none() && inner.items.is_empty()
  }

  /// The number of undelivered values (buffered plus the one held out for
  /// delivery).
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  /// Returns `true` if no values are awaiting delivery.
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The in-flight ceiling, or `None` for an unbounded channel.
  pub fn capacity(&self) -> Option<usize> {
    self.shared.capacity
  }
}

impl<T> Drop for Receiver<T> {
  fn drop(&mut self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.shared.abandon_receiver();
    }
  }
}

// --- Future ---

#[must_use = "futures do nothing unless you .await or poll them"]
#[derive(Debug)]
pub struct RecvFuture<'a, T> {
  receiver: &'a Receiver<T>,
}

impl<'a, T> Future for RecvFuture<'a, T> {
  type Output = Result<T, RecvError>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    if self.receiver.closed.load(Ordering::Relaxed) {
      return Poll::Ready(Err(RecvError::Closed));
    }
    self.receiver.shared.poll_recv_internal(cx)
  }
}

impl<T> Stream for Receiver<T> {
  type Item = T;

  fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
    let this = self.get_mut();
    if this.closed.load(Ordering::Relaxed) {
      return Poll::Ready(None);
    }
    match this.shared.poll_recv_internal(cx) {
      Poll::Ready(Ok(value)) => Poll::Ready(Some(value)),
      Poll::Ready(Err(_)) => Poll::Ready(None),
      Poll::Pending => Poll::Pending,
    }
  }
}
