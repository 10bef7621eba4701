//! End-to-end: heap model + local scheduler + spider.
//!
//! Demonstrates the pieces working together without any host:
//!
//! 1. **Time slicing** — getters that overrun the slice are preempted and
//!    the walk yields to other tasks before retrying
//! 2. **Same results** — preemption never changes what gets visited
//! 3. **Send** — a walk can run on a spawned task

use serde_json::json;
use spider_engine::{GraphSpider, SpiderConfig};
use spider_heap_memory::{Heap, HeapValue};
use spider_protocol::test_utils::RecordingVisitor;
use spider_protocol::{Budget, Scheduler};
use spider_sched_local::LocalScheduler;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

/// Root with `n` getter properties, each checking in with the scheduler
/// and then doing `work` worth of blocking work before returning a fresh
/// object.
fn slow_graph(heap: &Heap, sched: &Arc<LocalScheduler>, n: usize, work: Duration) -> HeapValue {
    let root = heap.object();
    for i in 0..n {
        let sched = Arc::clone(sched);
        heap.define_getter(&root, &format!("g{i}"), move |h| {
            sched.checkpoint()?;
            std::thread::sleep(work);
            let child = h.object();
            h.set(&child, "i", i as i64)
                .map_err(spider_protocol::ReadError::failed)?;
            Ok(child)
        })
        .unwrap();
    }
    root
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Time slicing
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test(flavor = "current_thread")]
async fn overrunning_getters_are_preempted_and_retried() {
    init_tracing();
    let heap = Arc::new(Heap::new());
    let sched = Arc::new(LocalScheduler::default());
    let root = slow_graph(&heap, &sched, 6, Duration::from_millis(3));

    let spider = GraphSpider::new(Arc::clone(&heap), Arc::clone(&sched))
        .with_config(SpiderConfig::default().with_budget_cap(Budget::from_units(1)));
    let mut rec = RecordingVisitor::new();
    let report = spider.spider(&root, &mut rec).await.unwrap();

    assert_eq!(
        rec.dotted(),
        vec!["<root>", "g0", "g1", "g2", "g3", "g4", "g5"]
    );
    // Every getter after the first finds the slice already spent.
    assert!(report.preemptions >= 5, "only {} preemptions", report.preemptions);
    assert_eq!(sched.ticks(), report.preemptions);
    assert_eq!(sched.current_budget(), Budget::UNLIMITED);
}

#[tokio::test(flavor = "current_thread")]
async fn other_tasks_run_while_the_walk_is_preempted() {
    init_tracing();
    let heap = Arc::new(Heap::new());
    let sched = Arc::new(LocalScheduler::default());
    let root = slow_graph(&heap, &sched, 4, Duration::from_millis(2));

    let done = Arc::new(AtomicBool::new(false));
    let progress = Arc::new(AtomicU64::new(0));
    let bystander = {
        let done = Arc::clone(&done);
        let progress = Arc::clone(&progress);
        tokio::spawn(async move {
            while !done.load(Ordering::SeqCst) {
                progress.fetch_add(1, Ordering::SeqCst);
                tokio::task::yield_now().await;
            }
        })
    };

    let spider = GraphSpider::new(Arc::clone(&heap), Arc::clone(&sched))
        .with_config(SpiderConfig::default().with_budget_cap(Budget::from_units(1)));
    let report = spider
        .spider(&root, &mut RecordingVisitor::new())
        .await
        .unwrap();
    let during = progress.load(Ordering::SeqCst);
    done.store(true, Ordering::SeqCst);
    bystander.await.unwrap();

    assert!(report.preemptions > 0);
    assert!(during > 0, "bystander never ran during the walk");
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Same results
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test(flavor = "current_thread")]
async fn sliced_and_unsliced_walks_agree() {
    let heap = Arc::new(Heap::new());
    let sched = Arc::new(LocalScheduler::default());
    let root = slow_graph(&heap, &sched, 3, Duration::from_millis(2));
    let extra = heap.from_json(&json!({"x": [{"y": {}}], "z": {}}));
    heap.set(&root, "extra", extra).unwrap();
    heap.set(&root, "loop", root.clone()).unwrap();

    let relaxed = GraphSpider::new(Arc::clone(&heap), Arc::new(LocalScheduler::default()))
        .with_config(SpiderConfig::default().with_budget_cap(Budget::UNLIMITED));
    let mut expected = RecordingVisitor::new();
    let r1 = relaxed.spider(&root, &mut expected).await.unwrap();

    let tight = GraphSpider::new(Arc::clone(&heap), Arc::clone(&sched))
        .with_config(SpiderConfig::default().with_budget_cap(Budget::from_units(1)));
    let mut actual = RecordingVisitor::new();
    let r2 = tight.spider(&root, &mut actual).await.unwrap();

    assert_eq!(actual.visits(), expected.visits());
    assert_eq!(r1.visited, r2.visited);
    assert_eq!(r1.preemptions, 0);
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Send
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn walk_runs_on_a_spawned_task() {
    let heap = Arc::new(Heap::new());
    let root = heap.from_json(&json!({"a": {"b": {}}, "c": [{}, {}]}));
    let spider = Arc::new(GraphSpider::new(
        Arc::clone(&heap),
        Arc::new(LocalScheduler::default()),
    ));

    let handle = {
        let spider = Arc::clone(&spider);
        tokio::spawn(async move {
            let mut rec = RecordingVisitor::new();
            spider.spider(&root, &mut rec).await.map(|_| rec.dotted())
        })
    };
    let visits = handle.await.unwrap().unwrap();
    assert_eq!(visits, vec!["<root>", "a", "a.b", "c", "c.0", "c.1"]);
}
