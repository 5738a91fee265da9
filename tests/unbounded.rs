use futures::StreamExt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use weir::channel;
use weir::error::{RecvError, SendError};

#[tokio::test]
async fn unbounded_smoke() {
  let (tx, rx) = channel::unbounded();
  tx.send(10).await.unwrap();
  assert_eq!(rx.recv().await, Ok(10));
}

#[tokio::test]
async fn unbounded_fifo_order() {
  let (tx, rx) = channel::unbounded();
  for i in 1..=3 {
    tx.send(i).await.unwrap();
  }
  tx.close();

  let values: Vec<i32> = rx.collect().await;
  assert_eq!(values, vec![1, 2, 3]);
}

#[tokio::test]
async fn unbounded_end_of_data_repeats() {
  let (tx, rx) = channel::unbounded();
  tx.send(1).await.unwrap();
  tx.close();

  assert_eq!(rx.recv().await, Ok(1));
  assert_eq!(rx.recv().await, Err(RecvError::Closed));
  assert_eq!(rx.recv().await, Err(RecvError::Closed));
}

#[tokio::test]
async fn unbounded_recv_waits_for_send() {
  let (tx, rx) = channel::unbounded();

  let mut pending = rx.recv();
  assert!(timeout(Duration::from_millis(100), &mut pending).await.is_err());

  tx.send(1).await.unwrap();
  let value = timeout(Duration::from_millis(100), &mut pending)
    .await
    .expect("pending recv should resolve after the send");
  assert_eq!(value, Ok(1));
}

#[tokio::test]
async fn unbounded_sender_drop_closes() {
  let (tx, rx) = channel::unbounded();
  tx.send("a").await.unwrap();
  tx.send("b").await.unwrap();
  drop(tx);

  assert_eq!(rx.recv().await, Ok("a"));
  assert_eq!(rx.recv().await, Ok("b"));
  assert_eq!(rx.recv().await, Err(RecvError::Closed));
}

#[tokio::test]
async fn unbounded_send_after_receiver_drop_fails() {
  let (tx, rx) = channel::unbounded::<i32>();
  drop(rx);

  match tx.send(5).await {
    Err(SendError::Disconnected(value)) => assert_eq!(value, 5),
    other => panic!("expected SendError::Disconnected, got {:?}", other),
  }
}

#[tokio::test]
async fn unbounded_close_after_receiver_drop_is_quiet() {
  let (tx, rx) = channel::unbounded::<i32>();
  drop(rx);

  // Closing an abandoned channel is an expected race, not a fault.
  tx.close();
  tx.close();
}

#[tokio::test]
async fn unbounded_no_loss_no_duplication() {
  let (tx, rx) = channel::unbounded();
  let producer = tokio::spawn(async move {
    for i in 0..1000u32 {
      tx.send(i).await.unwrap();
    }
  });

  let values: Vec<u32> = rx.collect().await;
  producer.await.unwrap();
  assert_eq!(values, (0..1000).collect::<Vec<_>>());
}

#[tokio::test]
async fn unbounded_receiver_drop_discards_values() {
  let drop_count = Arc::new(AtomicUsize::new(0));
  struct DropCounter(Arc<AtomicUsize>);
  impl Drop for DropCounter {
    fn drop(&mut self) {
      self.0.fetch_add(1, Ordering::SeqCst);
    }
  }

  let (tx, rx) = channel::unbounded();
  tx.send(DropCounter(drop_count.clone())).await.unwrap();
  tx.send(DropCounter(drop_count.clone())).await.unwrap();

  drop(rx);
  assert_eq!(drop_count.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unbounded_len_counts_undelivered() {
  let (tx, rx) = channel::unbounded();
  assert!(tx.is_empty());

  tx.send(1).await.unwrap();
  tx.send(2).await.unwrap();
  assert_eq!(tx.len(), 2);
  assert_eq!(rx.len(), 2);

  rx.recv().await.unwrap();
  assert_eq!(rx.len(), 1);
}

#[tokio::test]
async fn unbounded_close_states() {
  let (tx, rx) = channel::unbounded();
  tx.send(1).await.unwrap();
  tx.close();

  assert!(tx.is_closed());
  // Buffered values keep the channel in its draining state.
  assert!(!rx.is_closed());
  assert_eq!(rx.recv().await, Ok(1));
  assert!(rx.is_closed());
}
