//! Timer-driven scheduler behaviour.

use std::sync::Arc;
use std::thread;
use std::time::Duration;
use wildwatch::config::{AnalysisConfig, SchedulerConfig};
use wildwatch::frame::{Frame, SharedFrame};
use wildwatch::motion::MotionCategory;
use wildwatch::pipeline::{
    ActivityGate, AnalysisScheduler, CycleOutcome, SchedulerState, TickOutcome,
};

const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn scheduler(frames: &SharedFrame, gate: ActivityGate, period_ms: u64) -> AnalysisScheduler {
    AnalysisScheduler::new(
        &AnalysisConfig::default(),
        &SchedulerConfig {
            tick_period_ms: period_ms,
        },
        Arc::new(frames.clone()),
        gate,
    )
    .unwrap()
}

#[test]
fn test_timer_picks_up_published_frames() {
    let frames = SharedFrame::new();
    let mut scheduler = scheduler(&frames, ActivityGate::default(), 10);

    frames.publish(Frame::filled(320, 240, BLACK));
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(150));

    frames.publish(Frame::filled(320, 240, WHITE));
    thread::sleep(Duration::from_millis(150));
    scheduler.stop();

    let recent = scheduler.recent();
    assert_eq!(recent.len(), 1, "only the black-to-white change is motion");
    assert_eq!(recent[0].category, MotionCategory::LargeAnimal);
    assert!(scheduler.stats().cycles >= 2);
    assert_eq!(scheduler.snapshot().total_detections, 1);
}

#[test]
fn test_closed_gate_skips_every_tick() {
    let frames = SharedFrame::new();
    let gate = ActivityGate::new(false);
    let mut scheduler = scheduler(&frames, gate.clone(), 10);

    frames.publish(Frame::filled(64, 64, BLACK));
    scheduler.start().unwrap();
    thread::sleep(Duration::from_millis(60));
    frames.publish(Frame::filled(64, 64, WHITE));
    thread::sleep(Duration::from_millis(60));
    scheduler.stop();

    let stats = scheduler.stats();
    assert_eq!(stats.cycles, 0);
    assert!(stats.skipped_inactive > 0);
    assert!(scheduler.latest().is_none());

    // An open gate does not matter once stopped
    gate.set_active(true);
    assert_eq!(scheduler.tick(), TickOutcome::NotRunning);
    assert_eq!(scheduler.stats(), stats);
}

#[test]
fn test_restart_begins_with_warm_up() {
    let frames = SharedFrame::new();
    // Long period: only manual ticks run
    let mut scheduler = scheduler(&frames, ActivityGate::default(), 60_000);

    frames.publish(Frame::filled(64, 64, BLACK));
    scheduler.start().unwrap();
    scheduler.tick();
    frames.publish(Frame::filled(64, 64, WHITE));
    assert!(matches!(
        scheduler.tick(),
        TickOutcome::Cycle(CycleOutcome::Accepted(_))
    ));

    scheduler.stop();
    assert_eq!(scheduler.state(), SchedulerState::Stopped);

    // A manual tick while stopped must not leave a baseline behind
    frames.publish(Frame::filled(64, 64, BLACK));
    assert_eq!(scheduler.tick(), TickOutcome::NotRunning);
    scheduler.start().unwrap();

    frames.publish(Frame::filled(64, 64, WHITE));
    assert_eq!(
        scheduler.tick(),
        TickOutcome::Cycle(CycleOutcome::WarmingUp)
    );
    // History survives the restart
    assert_eq!(scheduler.recent().len(), 1);
    scheduler.stop();
}

#[test]
fn test_drop_stops_worker() {
    let frames = SharedFrame::new();
    let mut scheduler = scheduler(&frames, ActivityGate::default(), 5);
    scheduler.start().unwrap();
    drop(scheduler);
    // Reaching here without hanging means the worker was joined
}
