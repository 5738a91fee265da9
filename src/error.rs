// src/error.rs

use core::fmt;

/// Error returned by a direct `enqueue` on a [`Queue`](crate::queue::Queue)
/// when the value could not be accepted. The value is handed back inside the
/// variant.
#[derive(PartialEq, Eq, Clone)]
pub enum EnqueueError<T> {
  /// The queue is closed and accepts no further values.
  /// The value being enqueued is returned.
  Closed(T),
  /// The writable view is attached, so direct `enqueue` is unavailable.
  /// The value being enqueued is returned.
  Locked(T),
}

impl<T> EnqueueError<T> {
  /// Consumes the error, returning the value that failed to enqueue.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      EnqueueError::Closed(v) => v,
      EnqueueError::Locked(v) => v,
    }
  }
}

impl<T> fmt::Debug for EnqueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnqueueError::Closed(_) => write!(f, "EnqueueError::Closed(..)"),
      EnqueueError::Locked(_) => write!(f, "EnqueueError::Locked(..)"),
    }
  }
}

impl<T> fmt::Display for EnqueueError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EnqueueError::Closed(_) => f.write_str("queue closed"),
      EnqueueError::Locked(_) => {
        f.write_str("enqueue is not available while the writable view is attached")
      }
    }
  }
}

impl<T> std::error::Error for EnqueueError<T> {}

/// Error returned by a direct `dequeue` on a [`Queue`](crate::queue::Queue).
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DequeueError {
  /// The queue is closed and drained; no value will ever arrive.
  Closed,
  /// The readable view is attached, so direct `dequeue` is unavailable.
  Locked,
}

impl std::error::Error for DequeueError {}
impl fmt::Display for DequeueError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      DequeueError::Closed => write!(f, "queue closed"),
      DequeueError::Locked => {
        write!(f, "dequeue is not available while the readable view is attached")
      }
    }
  }
}

/// Error returned by `send` operations on a channel. The value that could
/// not be delivered is handed back inside the variant.
#[derive(PartialEq, Eq, Clone)]
pub enum SendError<T> {
  /// The channel is closed; no further sends are admitted.
  /// The value being sent is returned.
  Closed(T),
  /// The receiver was dropped, so the value would never be delivered.
  /// The value being sent is returned.
  Disconnected(T),
}

impl<T> SendError<T> {
  /// Consumes the error, returning the value that failed to send.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      SendError::Closed(v) => v,
      SendError::Disconnected(v) => v,
    }
  }
}

impl<T> fmt::Debug for SendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendError::Closed(_) => write!(f, "SendError::Closed(..)"),
      SendError::Disconnected(_) => write!(f, "SendError::Disconnected(..)"),
    }
  }
}

impl<T> fmt::Display for SendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendError::Closed(_) => f.write_str("channel closed"),
      SendError::Disconnected(_) => f.write_str("channel disconnected (receiver dropped)"),
    }
  }
}

impl<T> std::error::Error for SendError<T> {}

/// Error returned by `recv` operations on a channel.
///
/// `Closed` is the expected terminal condition of every channel, not a bug:
/// streaming adapters translate it into a normal end of stream.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecvError {
  /// The channel is closed and drained; no value will ever arrive.
  Closed,
}

impl std::error::Error for RecvError {}
impl fmt::Display for RecvError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecvError::Closed => write!(f, "channel closed (drained and the send side is gone)"),
    }
  }
}
