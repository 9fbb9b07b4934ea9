/*!
 * rrsim - Round-Robin Scheduling Demo
 *
 * Usage: rrsim [workload.json]
 *
 * Without a workload file a built-in three-process sample is used.
 * Environment:
 * - RRSIM_QUANTUM: quantum for the built-in sample
 * - RRSIM_SPEED_MS: per-tick pacing when playing (default 650)
 * - RRSIM_PLAY=1: pace the run in real time instead of stepping instantly
 */

use rr_scheduler::core::limits::ENV_PLAY;
use rr_scheduler::scheduler::report::{results_table, trace_line, TRACE_HEADER, TRACE_RULE};
use rr_scheduler::{init_tracing, Simulation, SimulationConfig, Step, Workload};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, warn};

fn print_step(step: &Step) {
    if let Some(line) = trace_line(&step.outcome) {
        println!("{}", line);
    }
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimulationConfig::from_env();
    let workload = match std::env::args().nth(1) {
        Some(path) => {
            info!(path = %path, "Loading workload");
            Workload::from_path(&path)?
        }
        None => {
            info!("No workload given, using built-in sample");
            Workload::sample().with_quantum(config.quantum)
        }
    };

    let play = std::env::var(ENV_PLAY)
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    let mut sim = Simulation::new(config);
    let snapshot = sim.load(&workload)?;
    info!(
        processes = snapshot.total,
        quantum = snapshot.quantum.ticks(),
        play,
        "Simulation loaded"
    );

    println!("\n--- Step by Step Gantt Chart ---");
    println!("{}", TRACE_HEADER);
    println!("{}", TRACE_RULE);

    if play {
        let mut rx = sim.subscribe();
        sim.play()?;
        loop {
            match rx.recv().await {
                Ok(step) => {
                    print_step(&step);
                    if step.is_terminal() {
                        break;
                    }
                }
                Err(RecvError::Lagged(missed)) => warn!(missed, "Renderer fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
        sim.wait().await;
    } else {
        loop {
            let step = sim.step()?;
            print_step(&step);
            if step.is_terminal() {
                break;
            }
        }
    }

    let snapshot = sim.snapshot();
    println!("\n--- Gantt Chart ---");
    println!("{}", snapshot.gantt.render_blocks());
    println!("{}", snapshot.gantt.render_ticks());
    println!("\n--- Final Results ---");
    println!("{}", results_table(&snapshot));

    Ok(())
}
