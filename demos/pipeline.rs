use std::time::Duration;

use futures::{SinkExt, StreamExt};
use weir::channel;
use weir::queue::Queue;

#[tokio::main]
async fn main() {
  env_logger::init();

  println!("--- Queue: direct enqueue, streaming read ---");
  {
    let queue = Queue::new();
    for i in 0..3 {
      queue.enqueue(i).unwrap();
    }
    queue.close();
    let collected: Vec<i32> = queue.readable().collect().await;
    println!("collected: {:?}", collected);
  }

  println!("\n--- Queue: streaming write, direct dequeue ---");
  {
    let queue = Queue::new();
    let mut writer = queue.writable();
    let mut source = futures::stream::iter(["alpha", "beta", "gamma"].map(Ok));
    writer.send_all(&mut source).await.unwrap();
    writer.close().await.unwrap();

    while let Ok(word) = queue.dequeue().await {
      println!("dequeued: {}", word);
    }
  }

  println!("\n--- Unbounded channel ---");
  {
    let (tx, rx) = channel::unbounded();
    let producer = tokio::spawn(async move {
      for i in 0..5 {
        println!("[producer] sending {}", i);
        tx.send(i).await.unwrap();
      }
    });
    let values: Vec<i32> = rx.collect().await;
    println!("[consumer] received {:?}", values);
    producer.await.unwrap();
  }

  println!("\n--- Bounded channel, capacity 2 ---");
  {
    let (tx, rx) = channel::bounded::<i32>(2);
    let producer = tokio::spawn(async move {
      for i in 0..5 {
        tx.send(i).await.unwrap();
        println!("[producer] {} admitted", i);
      }
      println!("[producer] done");
    });

    // A slow consumer: the producer above gets throttled to its pace.
    while let Ok(value) = rx.recv().await {
      tokio::time::sleep(Duration::from_millis(50)).await;
      println!("[consumer] handled {}", value);
    }
    producer.await.unwrap();
  }
}
