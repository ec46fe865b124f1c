//! Timer behaviour under a paused tokio clock.

use std::sync::Arc;
use std::time::Duration;

use curb_engine::config::SimConfig;
use curb_engine::error::EngineError;
use curb_engine::metrics::Counters;
use curb_engine::scheduler::SchedulerState;
use curb_engine::session::Session;
use curb_engine::time::ManualClock;

fn session() -> Session {
    Session::with_clock(
        12345,
        SimConfig::default(),
        Duration::from_secs(5),
        Arc::new(ManualClock::new(1_700_000_000_000)),
    )
}

#[tokio::test(start_paused = true)]
async fn one_tick_after_five_seconds() {
    let s = session();
    s.start().unwrap();

    tokio::time::sleep(Duration::from_millis(5_100)).await;

    assert_eq!(s.snapshot().tick, 1);
    s.stop();
}

#[tokio::test(start_paused = true)]
async fn nothing_applies_after_stop() {
    let s = session();
    s.start().unwrap();
    tokio::time::sleep(Duration::from_millis(10_100)).await;
    s.stop();

    let frozen = s.snapshot();
    tokio::time::sleep(Duration::from_secs(60)).await;

    assert_eq!(s.snapshot().tick, 2);
    assert_eq!(*s.snapshot(), *frozen);
    assert_eq!(s.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn start_twice_is_an_error_and_stop_twice_is_not() {
    let s = session();
    s.start().unwrap();

    assert!(matches!(s.start(), Err(EngineError::AlreadyRunning)));

    s.stop();
    s.stop();
    assert_eq!(s.state(), SchedulerState::Idle);
}

#[tokio::test(start_paused = true)]
async fn demo_mode_toggle_applies_without_restart() {
    let s = session();
    s.start().unwrap();

    s.set_demo_mode(true);
    tokio::time::sleep(Duration::from_millis(25_100)).await;

    assert_eq!(s.state(), SchedulerState::Running);
    assert_eq!(s.snapshot().tick, 5);
    assert_eq!(Counters::get(&s.counters().ticks_applied), 5);
    s.stop();
}
