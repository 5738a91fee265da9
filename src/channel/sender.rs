use super::shared::ChannelShared;
use crate::error::SendError;

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

/// The sending half of a channel.
///
/// Dropping the sender closes the channel: buffered values stay deliverable
/// and the receiver observes end-of-data once they are drained.
#[derive(Debug)]
pub struct Sender<T> {
  pub(crate) shared: Arc<ChannelShared<T>>,
  pub(crate) closed: AtomicBool,
}

impl<T> Sender<T> {
  /// Sends a value into the channel.
  ///
  /// The returned future completes immediately on an unbounded channel. On
  /// a bounded channel it waits while the channel is at capacity, then
  /// buffers the value after a single backpressure wake.
  pub fn send(&self, value: T) -> SendFuture<'_, T> {
    SendFuture {
      sender: self,
      value: Some(value),
      waited: false,
    }
  }

  /// Closes the channel. Idempotent.
  ///
  /// Already-buffered values remain receivable; later sends fail with
  /// [`SendError::Closed`]. Closing after the receiver was dropped is an
  /// expected race and a no-op.
  pub fn close(&self) {
    if self
      .closed
      .compare_exchange(false, true, Ordering::AcqRel, Ordering::Relaxed)
      .is_ok()
    {
      self.shared.close_channel();
    }
  }

  /// Returns `true` once no further send can succeed, because the channel
  /// was closed or the receiver is gone.
  pub fn is_closed(&self) -> bool {
    let inner = self.shared.inner.lock();
    inner.closed || inner.receiver_gone
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

impl<T> Drop for Sender<T> {
  fn drop(&mut self) {
    if !self.closed.swap(true, Ordering::AcqRel) {
      self.shared.close_channel();
    }
  }
}

// --- Future ---

#[must_use = "futures do nothing unless you .await or poll them"]
pub struct SendFuture<'a, T> {
  sender: &'a Sender<T>,
  value: Option<T>,
  waited: bool,
}

impl<'a, T: Unpin> Future for SendFuture<'a, T> {
  type Output = Result<(), SendError<T>>;

  fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
    let this = self.get_mut();
    this
      .sender
      .shared
      .poll_send_internal(cx, &mut this.value, &mut this.waited)
  }
}
