//! Cross-crate tests: the scheduler driving real cycles against a live
//! source/replica pair.

use replica_core::{ActionKind, MemorySink, MirrorConfig, MirrorEngine, Scheduler};
use replica_fs::{DirectorySnapshot, fingerprint_file};
use replica_test_utils::TreePair;
use std::fs;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Notify;

/// Run `cycles` scheduled cycles against `pair`, then stop.
async fn run_cycles(
    pair: &TreePair,
    cycles: u64,
    between: impl Fn(u64) + Send + Sync + 'static,
) -> Arc<MemorySink> {
    let config =
        MirrorConfig::new(pair.source(), pair.replica(), Duration::from_millis(10)).unwrap();
    let scheduler = Scheduler::new(config.interval).unwrap();
    let sink = Arc::new(MemorySink::new());
    let engine = MirrorEngine::with_sink(config, sink.clone());

    let count = Arc::new(AtomicU64::new(0));
    let stop = Arc::new(Notify::new());
    let (c, s) = (Arc::clone(&count), Arc::clone(&stop));

    let stats = scheduler
        .run(
            move || {
                let report = engine.run_cycle();
                let n = c.fetch_add(1, Ordering::SeqCst) + 1;
                between(n);
                if n >= cycles {
                    s.notify_one();
                }
                report
            },
            async move { stop.notified().await },
        )
        .await;

    assert_eq!(stats.total(), cycles);
    sink
}

#[tokio::test(flavor = "multi_thread")]
async fn scheduled_cycles_track_source_changes() {
    let pair = TreePair::with_files(&[("a.txt", "x"), ("b.txt", "y")], &[("c.txt", "z")]);
    let source = pair.source();

    let sink = run_cycles(&pair, 3, move |n| match n {
        1 => fs::write(source.join("a.txt"), "x2").unwrap(),
        2 => fs::remove_file(source.join("b.txt")).unwrap(),
        _ => {}
    })
    .await;

    pair.assert_converged();
    assert_eq!(pair.read_replica("a.txt"), "x2");

    let kinds: Vec<_> = sink.events().iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ActionKind::Delete,
            ActionKind::Create,
            ActionKind::Create,
            ActionKind::Update,
            ActionKind::Delete,
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn failed_cycles_are_retried_on_schedule() {
    let pair = TreePair::with_files(&[("a.txt", "x")], &[]);
    let hidden = pair.root().join("hidden");
    fs::rename(pair.source(), &hidden).unwrap();
    let source = pair.source();

    let sink = run_cycles(&pair, 3, move |n| {
        if n == 1 {
            fs::rename(&hidden, &source).unwrap();
        }
    })
    .await;

    pair.assert_converged();
    assert_eq!(sink.events().len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn large_file_is_mirrored_byte_for_byte() {
    let pair = TreePair::new();
    let content: Vec<u8> = (0..5_000_000u32).map(|i| (i % 253) as u8).collect();
    pair.write_source("big.bin", &content);

    run_cycles(&pair, 1, |_| {}).await;

    assert_eq!(
        fingerprint_file(&pair.replica().join("big.bin")).unwrap(),
        fingerprint_file(&pair.source().join("big.bin")).unwrap()
    );
    assert_eq!(DirectorySnapshot::take(&pair.replica()).unwrap().len(), 1);
}
