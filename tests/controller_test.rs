/*!
 * Controller Tests
 * Manual stepping, paced playback and their interaction
 */

use pretty_assertions::assert_eq;
use rr_scheduler::{
    Quantum, Simulation, SimulationConfig, SimulationError, Snapshot, Workload,
};
use std::time::Duration;

fn scenario() -> Workload {
    Workload::from_pairs(Quantum::new(2).unwrap(), &[(5, 0), (3, 1), (1, 2)]).unwrap()
}

fn run_manually(workload: &Workload) -> Snapshot {
    let mut sim = Simulation::default();
    sim.load(workload).unwrap();
    while !sim.step().unwrap().is_terminal() {}
    sim.snapshot()
}

#[tokio::test(start_paused = true)]
async fn test_playback_matches_manual_stepping() {
    let manual = run_manually(&scenario());

    for speed_ms in [100u64, 650, 5_000] {
        let config = SimulationConfig::default().with_speed(Duration::from_millis(speed_ms));
        let mut sim = Simulation::new(config);
        sim.load(&scenario()).unwrap();

        sim.play().unwrap();
        sim.wait().await;

        let played = sim.snapshot();
        assert!(played.is_complete());
        assert_eq!(played.processes, manual.processes);
        assert_eq!(played.gantt, manual.gantt);
        assert_eq!(played.time, manual.time);
    }
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_every_played_step() {
    let mut sim = Simulation::default();
    sim.load(&scenario()).unwrap();
    let mut rx = sim.subscribe();

    sim.play().unwrap();
    sim.wait().await;

    let mut explanations = Vec::new();
    while let Ok(step) = rx.try_recv() {
        explanations.push(step.explanation);
    }
    assert_eq!(explanations.len(), 6);
    assert_eq!(explanations[0], "t=0: Running P1 for 2. P1 preempted; remaining 3");
    assert_eq!(
        explanations[5],
        "t=8: Running P1 for 1. P1 finished at t=9. All processes completed."
    );
}

#[tokio::test(start_paused = true)]
async fn test_manual_step_and_load_refused_while_playing() {
    let mut sim = Simulation::default();
    sim.load(&scenario()).unwrap();
    sim.play().unwrap();

    assert!(sim.is_playing());
    assert_eq!(sim.step().unwrap_err(), SimulationError::Busy);
    assert_eq!(sim.load(&scenario()).unwrap_err(), SimulationError::Busy);
    assert_eq!(sim.play().unwrap_err(), SimulationError::Busy);

    sim.stop().await;
    assert!(!sim.is_playing());
    assert!(sim.step().is_ok());
}

#[tokio::test(start_paused = true)]
async fn test_stop_leaves_consistent_state() {
    let mut sim = Simulation::new(SimulationConfig::default().with_speed(Duration::from_secs(1)));
    sim.load(&scenario()).unwrap();

    sim.toggle_play().await.unwrap();
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    sim.toggle_play().await.unwrap();
    assert!(!sim.is_playing());

    let stopped = sim.snapshot();
    assert!(!stopped.is_complete());
    assert!(stopped.time > 0);

    // Finishing by hand reaches the same end state as an uninterrupted run
    while !sim.step().unwrap().is_terminal() {}
    let manual = run_manually(&scenario());
    assert_eq!(sim.snapshot().processes, manual.processes);
}

#[tokio::test(start_paused = true)]
async fn test_reset_and_clear() {
    let mut sim = Simulation::default();
    sim.load(&scenario()).unwrap();
    sim.step().unwrap();
    sim.play().unwrap();

    let snapshot = sim.reset().await;
    assert!(!sim.is_playing());
    assert_eq!(snapshot.time, 0);
    assert!(snapshot.gantt.is_empty());
    assert!(snapshot.processes.iter().all(|row| row.remaining == row.burst));

    sim.clear().await;
    assert_eq!(sim.snapshot().total, 0);
    assert_eq!(sim.play().unwrap_err(), SimulationError::NothingLoaded);
    assert_eq!(sim.step().unwrap().explanation, "Load processes first.");
}

#[tokio::test(start_paused = true)]
async fn test_pause_and_speed_change_do_not_alter_results() {
    let manual = run_manually(&scenario());

    let mut sim = Simulation::default();
    sim.load(&scenario()).unwrap();
    sim.play().unwrap();

    tokio::time::sleep(Duration::from_millis(700)).await;
    sim.pause();
    tokio::time::sleep(Duration::from_secs(30)).await;
    sim.set_speed(Duration::from_millis(100));
    sim.resume();
    sim.wait().await;

    assert_eq!(sim.snapshot().gantt, manual.gantt);
    assert_eq!(sim.config().speed, Duration::from_millis(100));
}
