/*!
 * Player Task - Paced Autoplay
 *
 * Background task that steps the engine on a timer and publishes every
 * step. Pacing is purely presentational: the engine is stepped exactly as a
 * manual caller would, and the lock is never held across an await, so the
 * task can be stopped at any step boundary.
 */

use super::events::StepBroadcaster;
use crate::core::limits::PLAY_STEP_GAP;
use crate::scheduler::{Scheduler, StepOutcome};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Control messages for the player task
#[derive(Debug, Clone)]
pub enum PlayerCommand {
    /// Change per-tick pacing (takes effect from the next step)
    SetSpeed(Duration),
    /// Stop stepping but keep the task alive
    Pause,
    /// Resume stepping immediately
    Resume,
    /// End the task at the next step boundary
    Stop,
}

/// Handle to the player background task
pub struct Player {
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
    handle: Option<tokio::task::JoinHandle<()>>,
}

impl Player {
    /// Spawn a player; must be called from within a tokio runtime
    pub fn spawn(
        engine: Arc<Mutex<Scheduler>>,
        events: StepBroadcaster,
        speed: Duration,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();

        let handle = tokio::spawn(async move {
            run_player_loop(engine, events, speed, command_rx).await;
        });

        info!(speed_ms = speed.as_millis() as u64, "Player task spawned");

        Self {
            command_tx,
            handle: Some(handle),
        }
    }

    pub fn set_speed(&self, speed: Duration) {
        let _ = self.command_tx.send(PlayerCommand::SetSpeed(speed));
    }

    pub fn pause(&self) {
        let _ = self.command_tx.send(PlayerCommand::Pause);
    }

    pub fn resume(&self) {
        let _ = self.command_tx.send(PlayerCommand::Resume);
    }

    /// The task has exited (stopped or ran to completion)
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, |h| h.is_finished())
    }

    /// Stop the task and wait for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.command_tx.send(PlayerCommand::Stop);

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Player task shutdown error: {}", e);
            } else {
                info!("Player task shutdown complete");
            }
        }
    }

    /// Wait for the task to finish on its own
    pub async fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!("Player task join error: {}", e);
            }
        }
    }
}

/// Wall-clock delay after a step: `speed` per tick of CPU time used
fn pacing(speed: Duration, outcome: &StepOutcome) -> Duration {
    let ticks = outcome.slice().map_or(0, |s| s.length);
    speed.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
}

async fn run_player_loop(
    engine: Arc<Mutex<Scheduler>>,
    events: StepBroadcaster,
    mut speed: Duration,
    mut command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
) {
    let mut active = true;
    let mut next_step = Instant::now();

    loop {
        tokio::select! {
            _ = tokio::time::sleep_until(next_step), if active => {
                let step = engine.lock().step();
                let delay = pacing(speed, &step.outcome) + PLAY_STEP_GAP;
                let terminal = step.is_terminal();

                debug!(time = step.snapshot.time, "Player step: {}", step.explanation);
                events.emit(step);

                if terminal {
                    info!("Player reached end of simulation");
                    break;
                }
                next_step = Instant::now() + delay;
            }

            cmd = command_rx.recv() => {
                match cmd {
                    Some(PlayerCommand::SetSpeed(new_speed)) => {
                        info!(speed_ms = new_speed.as_millis() as u64, "Player speed updated");
                        speed = new_speed;
                    }
                    Some(PlayerCommand::Pause) => {
                        info!("Player paused");
                        active = false;
                    }
                    Some(PlayerCommand::Resume) => {
                        info!("Player resumed");
                        active = true;
                        next_step = Instant::now();
                    }
                    Some(PlayerCommand::Stop) | None => {
                        info!("Player stopping");
                        break;
                    }
                }
            }
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        if self.handle.is_some() {
            let _ = self.command_tx.send(PlayerCommand::Stop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Quantum;
    use crate::process::Workload;

    fn engine() -> Arc<Mutex<Scheduler>> {
        let workload =
            Workload::from_pairs(Quantum::new(2).unwrap(), &[(5, 0), (3, 1), (1, 2)]).unwrap();
        Arc::new(Mutex::new(Scheduler::with_workload(&workload)))
    }

    #[test]
    fn test_pacing_scales_with_slice_length() {
        let speed = Duration::from_millis(100);
        assert_eq!(pacing(speed, &StepOutcome::Complete), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_player_runs_to_completion() {
        let engine = engine();
        let events = StepBroadcaster::default();
        let mut rx = events.subscribe();

        let player = Player::spawn(engine.clone(), events, Duration::from_millis(650));
        player.join().await;

        let mut steps = Vec::new();
        while let Ok(step) = rx.try_recv() {
            steps.push(step);
        }
        assert_eq!(steps.len(), 6);
        assert!(steps.last().unwrap().is_terminal());
        assert!(engine.lock().is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_resume_shutdown() {
        let engine = engine();
        let player = Player::spawn(
            engine.clone(),
            StepBroadcaster::default(),
            Duration::from_secs(1),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        player.pause();
        tokio::time::sleep(Duration::from_secs(60)).await;
        let paused_at = engine.lock().current_time();
        assert!(!engine.lock().is_complete());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(engine.lock().current_time(), paused_at);

        player.resume();
        player.shutdown().await;
        assert!(!engine.lock().is_complete());
    }
}
