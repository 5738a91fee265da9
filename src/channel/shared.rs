use crate::async_util::AtomicWaker;
use crate::error::{RecvError, SendError};

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::task::{Context, Poll};

/// Values truly in the system when `buffered` values sit behind an occupied
/// hand-off slot: the buffer plus the one value mid-delivery.
///
/// The naive `buffered >= capacity` admission test under-counts by one and
/// silently lets a channel exceed its declared capacity.
#[inline]
pub(crate) fn in_flight_count(buffered: usize) -> usize {
  buffered + 1
}

/// Shared state behind a `Sender`/`Receiver` pair.
pub(crate) struct ChannelShared<T> {
  pub(crate) inner: Mutex<ChannelInner<T>>,
  /// `None` for an unbounded channel, the in-flight ceiling otherwise.
  pub(crate) capacity: Option<usize>,
  /// "value available" notification for a suspended receive.
  pub(crate) recv_waker: AtomicWaker,
  /// "capacity freed" notification for a send suspended on admission.
  pub(crate) send_waker: AtomicWaker,
}

pub(crate) struct ChannelInner<T> {
  /// Values buffered behind the hand-off slot.
  pub(crate) items: VecDeque<T>,
  /// The one value the receive side holds ready for delivery. Every value
  /// passes through this slot, so `lookahead.is_none()` implies `items` is
  /// empty.
  pub(crate) lookahead: Option<T>,
  pub(crate) closed: bool,
  pub(crate) receiver_gone: bool,
}

impl<T> ChannelInner<T> {
  /// Stores an admitted value, keeping the slot-occupancy invariant.
  fn place(&mut self, value: T) {
    if self.lookahead.is_none() {
      debug_assert!(self.items.is_empty());
      self.lookahead = Some(value);
    } else {
      self.items.push_back(value);
    }
  }
}

impl<T> fmt::Debug for ChannelShared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let inner = self.inner.lock();
    f.debug_struct("ChannelShared")
      .field("capacity", &self.capacity)
      .field("buffered", &inner.items.len())
      .field("lookahead_occupied", &inner.lookahead.is_some())
      .field("closed", &inner.closed)
      .field("receiver_gone", &inner.receiver_gone)
      .finish_non_exhaustive()
  }
}

impl<T> ChannelShared<T> {
  pub(crate) fn new(capacity: Option<usize>) -> Self {
    ChannelShared {
      inner: Mutex::new(ChannelInner {
        items: VecDeque::new(),
        lookahead: None,
        closed: false,
        receiver_gone: false,
      }),
      capacity,
      recv_waker: AtomicWaker::new(),
      send_waker: AtomicWaker::new(),
    }
  }

  /// Whether a send may buffer another value behind an occupied hand-off
  /// slot without reaching the in-flight ceiling.
  #[inline]
  pub(crate) fn admits(&self, buffered: usize) -> bool {
    match self.capacity {
      Some(capacity) => in_flight_count(buffered) < capacity,
      None => true,
    }
  }

  /// Core send poll loop.
  ///
  /// `value` is taken out on completion. `waited` records that this send
  /// already suspended on the backpressure waker once; after that single
  /// wake the send proceeds unconditionally rather than re-running the
  /// admission test (one admission attempt per send).
  pub(crate) fn poll_send_internal(
    &self,
    cx: &mut Context<'_>,
    value: &mut Option<T>,
    waited: &mut bool,
  ) -> Poll<Result<(), SendError<T>>> {
    loop {
      {
        let mut inner = self.inner.lock();
        if inner.receiver_gone {
          let v = value.take().expect("SendFuture polled after completion");
          return Poll::Ready(Err(SendError::Disconnected(v)));
        }
        if inner.closed {
          let v = value.take().expect("SendFuture polled after completion");
          return Poll::Ready(Err(SendError::Closed(v)));
        }
        if *waited || inner.lookahead.is_none() || self.admits(inner.items.len()) {
          let v = value.take().expect("SendFuture polled after completion");
          inner.place(v);
          drop(inner);
          self.recv_waker.wake();
          return Poll::Ready(Ok(()));
        }
      }

      self.send_waker.register(cx.waker());

      // Critical re-check after registration: a receive, close, or receiver
      // drop may have raced in.
      let inner = self.inner.lock();
      if inner.receiver_gone
        || inner.closed
        || inner.lookahead.is_none()
        || self.admits(inner.items.len())
      {
        continue;
      }
      log::trace!(
        "send suspended at capacity ({} in flight)",
        in_flight_count(inner.items.len())
      );
      *waited = true;
      return Poll::Pending;
    }
  }

  /// Core receive poll loop. Delivering a value refills the hand-off slot
  /// from the buffer front and wakes one suspended producer.
  pub(crate) fn poll_recv_internal(&self, cx: &mut Context<'_>) -> Poll<Result<T, RecvError>> {
    loop {
      {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.lookahead.take() {
          inner.lookahead = inner.items.pop_front();
          drop(inner);
          self.send_waker.wake();
          return Poll::Ready(Ok(value));
        }
        debug_assert!(inner.items.is_empty());
        if inner.closed {
          return Poll::Ready(Err(RecvError::Closed));
        }
      }

      self.recv_waker.register(cx.waker());

      // Critical re-check after registration.
      let inner = self.inner.lock();
      if inner.lookahead.is_none() && !inner.closed {
        return Poll::Pending;
      }
    }
  }

  /// Marks the channel closed. Buffered values stay deliverable. Safe to
  /// call any number of times, including after the receive side is gone.
  pub(crate) fn close_channel(&self) {
    {
      let mut inner = self.inner.lock();
      if inner.closed {
        return;
      }
      inner.closed = true;
    }
    log::trace!("channel closed by the send side");
    self.recv_waker.wake();
    self.send_waker.wake();
  }

  /// Marks the receive side gone and discards undelivered values. A
  /// suspended send is woken so it can fail instead of hanging forever.
  pub(crate) fn abandon_receiver(&self) {
    let discarded;
    {
      let mut inner = self.inner.lock();
      if inner.receiver_gone {
        return;
      }
      inner.receiver_gone = true;
      discarded = (inner.lookahead.take(), std::mem::take(&mut inner.items));
    }
    log::trace!(
      "receive side abandoned, discarding {} undelivered value(s)",
      discarded.1.len() + usize::from(discarded.0.is_some())
    );
    drop(discarded);
    self.send_waker.wake();
    self.recv_waker.wake();
  }

  /// Undelivered values: buffered plus the occupied hand-off slot.
  pub(crate) fn len(&self) -> usize {
    let inner = self.inner.lock();
    inner.items.len() + usize::from(inner.lookahead.is_some())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn in_flight_counts_the_hand_off_slot() {
    assert_eq!(in_flight_count(0), 1);
    assert_eq!(in_flight_count(4), 5);
  }

  #[test]
  fn admission_boundaries() {
    let shared: ChannelShared<u32> = ChannelShared::new(Some(5));
    // capacity - 2 buffered: 4 in flight, one unit spare
    assert!(shared.admits(3));
    // capacity - 1 buffered: admitting would reach the ceiling
    assert!(!shared.admits(4));
    // at and beyond the ceiling
    assert!(!shared.admits(5));
    assert!(!shared.admits(6));
  }

  #[test]
  fn capacity_one_admits_nothing_behind_the_slot() {
    let shared: ChannelShared<u32> = ChannelShared::new(Some(1));
    assert!(!shared.admits(0));
  }

  #[test]
  fn unbounded_always_admits() {
    let shared: ChannelShared<u32> = ChannelShared::new(None);
    assert!(shared.admits(0));
    assert!(shared.admits(usize::MAX - 1));
  }
}
