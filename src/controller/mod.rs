/*!
 * Simulation Controller
 * Owns one engine instance and exposes explicit load/reset/step/play operations
 */

pub mod events;
pub mod player;

pub use events::StepBroadcaster;
pub use player::{Player, PlayerCommand};

use crate::core::config::SimulationConfig;
use crate::core::errors::SimulationError;
use crate::core::types::SimResult;
use crate::process::Workload;
use crate::scheduler::{Scheduler, Snapshot, Step};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::info;

/// Controller for a single simulation
///
/// Manual steps and the player share one engine behind a mutex, so steps are
/// always serialized. Manual stepping and loading are refused while the
/// player is running.
pub struct Simulation {
    engine: Arc<Mutex<Scheduler>>,
    config: SimulationConfig,
    events: StepBroadcaster,
    player: Option<Player>,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        Self {
            engine: Arc::new(Mutex::new(Scheduler::new())),
            config,
            events: StepBroadcaster::default(),
            player: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Load a validated workload and start a fresh run
    pub fn load(&mut self, workload: &Workload) -> SimResult<Snapshot> {
        if self.is_playing() {
            return Err(SimulationError::Busy);
        }
        self.player = None;
        self.config.quantum = workload.quantum();

        let mut engine = self.engine.lock();
        engine.load(workload);
        Ok(engine.current_snapshot())
    }

    /// Stop playback and restart the loaded process set from time 0
    pub async fn reset(&mut self) -> Snapshot {
        self.stop().await;
        let mut engine = self.engine.lock();
        engine.reset();
        engine.current_snapshot()
    }

    /// Stop playback and unload everything
    pub async fn clear(&mut self) {
        self.stop().await;
        self.engine.lock().clear();
        info!("Simulation cleared");
    }

    /// Advance one scheduling decision and publish it
    pub fn step(&self) -> SimResult<Step> {
        if self.is_playing() {
            return Err(SimulationError::Busy);
        }
        let step = self.engine.lock().step();
        self.events.emit(step.clone());
        Ok(step)
    }

    /// Start paced autoplay; requires a tokio runtime
    pub fn play(&mut self) -> SimResult<()> {
        if self.is_playing() {
            return Err(SimulationError::Busy);
        }
        if !self.engine.lock().is_loaded() {
            return Err(SimulationError::NothingLoaded);
        }
        self.player = Some(Player::spawn(
            self.engine.clone(),
            self.events.clone(),
            self.config.speed,
        ));
        Ok(())
    }

    /// Play if stopped, stop if playing
    pub async fn toggle_play(&mut self) -> SimResult<()> {
        if self.is_playing() {
            self.stop().await;
            Ok(())
        } else {
            self.play()
        }
    }

    /// Stop playback at the next step boundary
    pub async fn stop(&mut self) {
        if let Some(player) = self.player.take() {
            player.shutdown().await;
        }
    }

    /// Wait until playback ends by itself
    pub async fn wait(&mut self) {
        if let Some(player) = self.player.take() {
            player.join().await;
        }
    }

    pub fn pause(&self) {
        if let Some(player) = &self.player {
            player.pause();
        }
    }

    pub fn resume(&self) {
        if let Some(player) = &self.player {
            player.resume();
        }
    }

    /// Change pacing; never affects scheduling outcomes
    pub fn set_speed(&mut self, speed: Duration) {
        self.config = self.config.with_speed(speed);
        if let Some(player) = &self.player {
            player.set_speed(self.config.speed);
        }
    }

    pub fn is_playing(&self) -> bool {
        self.player.as_ref().map_or(false, |p| !p.is_finished())
    }

    pub fn is_complete(&self) -> bool {
        self.engine.lock().is_complete()
    }

    /// Current state with the CPU shown idle
    pub fn snapshot(&self) -> Snapshot {
        self.engine.lock().current_snapshot()
    }

    /// Receive every step taken from now on, manual or played
    pub fn subscribe(&self) -> broadcast::Receiver<Step> {
        self.events.subscribe()
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::Quantum;

    #[test]
    fn test_step_without_load_is_noop() {
        let sim = Simulation::default();
        let step = sim.step().unwrap();
        assert!(step.is_terminal());
        assert_eq!(step.snapshot.time, 0);
    }

    #[test]
    fn test_load_sets_quantum() {
        let mut sim = Simulation::default();
        let workload = Workload::from_pairs(Quantum::new(5).unwrap(), &[(3, 0)]).unwrap();
        let snapshot = sim.load(&workload).unwrap();
        assert_eq!(sim.config().quantum.ticks(), 5);
        assert_eq!(snapshot.total, 1);
        assert!(snapshot.run_id.is_some());
    }

    #[test]
    fn test_play_requires_load() {
        let mut sim = Simulation::default();
        assert_eq!(sim.play(), Err(SimulationError::NothingLoaded));
    }
}
