use spider_protocol::{Budget, Scheduler};
use spider_sched_local::LocalScheduler;
use std::sync::Arc;
use std::time::Duration;

// --- Budget ---

#[tokio::test]
async fn set_budget_is_visible() {
    let sched = LocalScheduler::new(Budget::from_units(500));
    assert_eq!(sched.current_budget(), Budget::from_units(500));
    sched.set_budget(Budget::from_units(100));
    assert_eq!(sched.current_budget(), Budget::from_units(100));
}

#[tokio::test]
async fn default_is_unlimited() {
    let sched = LocalScheduler::default();
    assert_eq!(sched.current_budget(), Budget::UNLIMITED);
    assert!(sched.checkpoint().is_ok());
}

// --- Preemption ---

#[tokio::test(start_paused = true)]
async fn checkpoint_passes_within_slice() {
    let sched = LocalScheduler::new(Budget::from_units(100));
    tokio::time::advance(Duration::from_millis(60)).await;
    assert!(sched.checkpoint().is_ok());
    assert_eq!(sched.remaining(), Duration::from_millis(40));
}

#[tokio::test(start_paused = true)]
async fn checkpoint_preempts_after_overrun_until_yield() {
    let sched = LocalScheduler::new(Budget::from_units(100));
    tokio::time::advance(Duration::from_millis(150)).await;

    assert!(sched.checkpoint().is_err());
    assert!(sched.checkpoint().is_err());
    assert_eq!(sched.remaining(), Duration::ZERO);
    assert_eq!(sched.preemptions(), 2);

    sched.yield_tick().await;
    assert_eq!(sched.ticks(), 1);
    assert!(sched.checkpoint().is_ok());
}

#[tokio::test(start_paused = true)]
async fn lowering_budget_shortens_current_slice() {
    let sched = LocalScheduler::new(Budget::from_units(1_000));
    tokio::time::advance(Duration::from_millis(200)).await;
    assert!(sched.checkpoint().is_ok());

    sched.set_budget(Budget::from_units(100));
    assert!(sched.checkpoint().is_err());
}

// --- Cooperation ---

#[tokio::test(flavor = "current_thread")]
async fn yield_lets_other_tasks_run() {
    let sched = Arc::new(LocalScheduler::default());
    let flag = Arc::new(std::sync::atomic::AtomicBool::new(false));

    let other = {
        let flag = Arc::clone(&flag);
        tokio::spawn(async move {
            flag.store(true, std::sync::atomic::Ordering::SeqCst);
        })
    };

    // On a current-thread runtime the spawned task only runs once we yield.
    assert!(!flag.load(std::sync::atomic::Ordering::SeqCst));
    sched.yield_tick().await;
    assert!(flag.load(std::sync::atomic::Ordering::SeqCst));
    other.await.unwrap();
}
