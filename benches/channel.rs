use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use tokio::runtime::Runtime;

use weir::channel;

const ITEMS: usize = 10_000;

fn unbounded_throughput(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("unbounded");
  group.throughput(Throughput::Elements(ITEMS as u64));
  group.bench_function("send_recv", |b| {
    b.iter(|| {
      rt.block_on(async {
        let (tx, rx) = channel::unbounded();
        let producer = tokio::spawn(async move {
          for i in 0..ITEMS {
            tx.send(i).await.unwrap();
          }
        });
        for _ in 0..ITEMS {
          rx.recv().await.unwrap();
        }
        producer.await.unwrap();
      })
    })
  });
  group.finish();
}

fn bounded_throughput(c: &mut Criterion) {
  let rt = Runtime::new().unwrap();
  let mut group = c.benchmark_group("bounded");
  group.throughput(Throughput::Elements(ITEMS as u64));
  for capacity in [1usize, 16, 128] {
    group.bench_function(format!("send_recv_cap_{}", capacity), |b| {
      b.iter(|| {
        rt.block_on(async {
          let (tx, rx) = channel::bounded(capacity);
          let producer = tokio::spawn(async move {
            for i in 0..ITEMS {
              tx.send(i).await.unwrap();
            }
          });
          for _ in 0..ITEMS {
            rx.recv().await.unwrap();
          }
          producer.await.unwrap();
        })
      })
    });
  }
  group.finish();
}

criterion_group!(benches, unbounded_throughput, bounded_throughput);
criterion_main!(benches);
