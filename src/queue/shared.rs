use crate::async_util::AtomicWaker;
use crate::error::DequeueError;

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::task::{Context, Poll};

/// Shared state behind every [`Queue`](super::Queue) handle and its
/// streaming views.
pub(crate) struct QueueShared<T> {
  pub(crate) inner: Mutex<QueueInner<T>>,
  /// At most one outstanding "value available" notification handle.
  /// Registered lazily when a dequeue suspends, consumed by `wake`, and
  /// re-registered on the next suspension.
  pub(crate) item_waker: AtomicWaker,
}

pub(crate) struct QueueInner<T> {
  pub(crate) items: VecDeque<T>,
  pub(crate) closed: bool,
  /// The readable view has been attached; direct dequeue is locked out.
  pub(crate) read_locked: bool,
  /// The writable view has been attached; direct enqueue is locked out.
  pub(crate) write_locked: bool,
}

impl<T> fmt::Debug for QueueShared<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let inner = self.inner.lock();
    f.debug_struct("QueueShared")
      .field("len", &inner.items.len())
      .field("closed", &inner.closed)
      .field("read_locked", &inner.read_locked)
      .field("write_locked", &inner.write_locked)
      .finish_non_exhaustive()
  }
}

impl<T> QueueShared<T> {
  pub(crate) fn new() -> Self {
    QueueShared {
      inner: Mutex::new(QueueInner {
        items: VecDeque::new(),
        closed: false,
        read_locked: false,
        write_locked: false,
      }),
      item_waker: AtomicWaker::new(),
    }
  }

  /// Appends `value` and wakes a suspended dequeue. Skips the direct-mode
  /// lock check: both `Queue::enqueue` and the writable view funnel through
  /// here after their own checks.
  pub(crate) fn enqueue_internal(&self, value: T) -> Result<(), T> {
    {
      let mut inner = self.inner.lock();
      if inner.closed {
        return Err(value);
      }
      inner.items.push_back(value);
    }
    self.item_waker.wake();
    Ok(())
  }

  /// Core dequeue poll loop shared by `DequeueFuture` and the readable view.
  ///
  /// The buffer is re-checked after the waker is registered so an enqueue or
  /// close landing between the first check and the registration is never
  /// lost.
  pub(crate) fn poll_dequeue_internal(&self, cx: &mut Context<'_>) -> Poll<Result<T, DequeueError>> {
    loop {
      {
        let mut inner = self.inner.lock();
        if let Some(value) = inner.items.pop_front() {
          return Poll::Ready(Ok(value));
        }
        if inner.closed {
          return Poll::Ready(Err(DequeueError::Closed));
        }
      }

      self.item_waker.register(cx.waker());

      // Critical re-check after registration.
      let inner = self.inner.lock();
      if inner.items.is_empty() && !inner.closed {
        return Poll::Pending;
      }
      // State changed under us; take another trip through the loop.
    }
  }

  /// Marks the queue closed and wakes a suspended dequeue so it can observe
  /// closure. Safe to call any number of times.
  pub(crate) fn close_internal(&self) {
    {
      let mut inner = self.inner.lock();
      if inner.closed {
        return;
      }
      inner.closed = true;
    }
    log::trace!("queue closed");
    self.item_waker.wake();
  }

  pub(crate) fn len(&self) -> usize {
    self.inner.lock().items.len()
  }

  pub(crate) fn is_closed(&self) -> bool {
    self.inner.lock().closed
  }
}
