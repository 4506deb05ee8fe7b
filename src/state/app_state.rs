//! Main application state management

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::{
    catalog::Catalog,
    error::{Result, ZenError},
};
use super::{SessionKind, TickOutcome, ZoneSnapshot, ZoneState};

/// Default length of the "start again" breathing run
pub const DEFAULT_RESTART_SECONDS: u64 = 60;

/// Shared application state: the zone behind one lock plus server metadata
#[derive(Debug)]
pub struct AppState {
    /// Sessions, rotator and posture; every mutation happens under this lock
    pub zone: Arc<Mutex<ZoneState>>,
    pub catalog: Arc<Catalog>,
    /// Timer configuration
    pub tick_period: Duration,
    pub restart_seconds: u64,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Snapshots published after every command and applied tick
    pub state_change_tx: broadcast::Sender<ZoneSnapshot>,
}

impl AppState {
    /// Create a new AppState over the given catalog
    pub fn new(catalog: Arc<Catalog>, port: u16, host: String, tick_period: Duration) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);

        Self {
            zone: Arc::new(Mutex::new(ZoneState::new(Arc::clone(&catalog)))),
            catalog,
            tick_period,
            restart_seconds: DEFAULT_RESTART_SECONDS,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
        }
    }

    /// Override the default "start again" duration
    pub fn with_restart_seconds(mut self, seconds: u64) -> Self {
        self.restart_seconds = seconds;
        self
    }

    /// Tick period in whole milliseconds, saturating at `u64::MAX`
    pub fn tick_period_ms(&self) -> u64 {
        u64::try_from(self.tick_period.as_millis()).unwrap_or(u64::MAX)
    }

    fn lock_zone(&self) -> Result<MutexGuard<'_, ZoneState>> {
        self.zone
            .lock()
            .map_err(|e| ZenError::Lock(format!("zone state: {}", e)))
    }

    /// Apply a command to the zone and notify listeners with the new snapshot
    pub fn update_state<F>(&self, action: &str, updater: F) -> Result<ZoneSnapshot>
    where
        F: FnOnce(&mut ZoneState) -> Result<()>,
    {
        let mut zone = self.lock_zone()?;
        updater(&mut *zone)?;
        let snapshot = zone.snapshot();
        drop(zone); // Release the lock early

        // Update last action tracking
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.publish(snapshot.clone());
        Ok(snapshot)
    }

    fn publish(&self, snapshot: ZoneSnapshot) {
        // No receivers simply means no timer task is running yet
        if self.state_change_tx.receiver_count() == 0 {
            return;
        }
        if let Err(e) = self.state_change_tx.send(snapshot) {
            warn!("Failed to send state change notification: {}", e);
        }
    }

    /// Select a breathing exercise and start it
    pub fn start_exercise(&self, index: usize) -> Result<ZoneSnapshot> {
        info!("Starting breathing exercise {}", index);
        self.update_state("start-exercise", |zone| {
            zone.catalog()
                .exercise(index)
                .ok_or(ZenError::UnknownExercise(index))?;
            zone.breathing.start(index);
            Ok(())
        })
    }

    pub fn toggle_breathing(&self) -> Result<ZoneSnapshot> {
        self.update_state("toggle-breathing", |zone| {
            zone.breathing.toggle_play_pause();
            info!("Breathing running: {}", zone.breathing.is_running());
            Ok(())
        })
    }

    pub fn reset_breathing(&self) -> Result<ZoneSnapshot> {
        info!("Resetting breathing exercise");
        self.update_state("reset-breathing", |zone| {
            zone.breathing.reset();
            Ok(())
        })
    }

    /// Run the active exercise again for a fixed number of seconds
    pub fn restart_breathing(&self, seconds: u64) -> Result<ZoneSnapshot> {
        info!("Restarting breathing exercise for {}s", seconds);
        self.update_state("restart-breathing", |zone| {
            zone.breathing.restart_fixed_duration(seconds);
            Ok(())
        })
    }

    /// Select a meditation program and start it
    pub fn start_meditation(&self, index: usize) -> Result<ZoneSnapshot> {
        info!("Starting meditation program {}", index);
        self.update_state("start-meditation", |zone| {
            zone.catalog()
                .program(index)
                .ok_or(ZenError::UnknownProgram(index))?;
            zone.meditation.start(index);
            Ok(())
        })
    }

    pub fn toggle_meditation(&self) -> Result<ZoneSnapshot> {
        self.update_state("toggle-meditation", |zone| {
            zone.meditation.toggle_play_pause();
            info!("Meditation running: {}", zone.meditation.is_running());
            Ok(())
        })
    }

    pub fn reset_meditation(&self) -> Result<ZoneSnapshot> {
        info!("Resetting meditation");
        self.update_state("reset-meditation", |zone| {
            zone.meditation.reset();
            Ok(())
        })
    }

    pub fn end_meditation(&self) -> Result<ZoneSnapshot> {
        info!("Ending meditation");
        self.update_state("end-meditation", |zone| {
            zone.meditation.end();
            Ok(())
        })
    }

    /// Show a catalog posture, starting the meditation if none is active
    pub fn select_posture(&self, index: usize) -> Result<ZoneSnapshot> {
        self.update_state("select-posture", |zone| {
            let posture = zone
                .catalog()
                .posture(index)
                .cloned()
                .ok_or(ZenError::UnknownPosture(index))?;
            if zone.catalog().programs.is_empty() {
                return Err(ZenError::UnknownProgram(0));
            }
            zone.select_posture(posture);
            Ok(())
        })
    }

    pub fn next_affirmation(&self) -> Result<ZoneSnapshot> {
        self.update_state("next-affirmation", |zone| {
            zone.affirmations.next();
            debug!("Affirmation index now {}", zone.affirmations.index());
            Ok(())
        })
    }

    /// Apply a timer tick if the session still has the generation the timer armed with
    pub fn tick(&self, kind: SessionKind, generation: u64) -> Result<TickOutcome> {
        let mut zone = self.lock_zone()?;
        let outcome = zone.tick(kind, generation);
        if outcome == TickOutcome::Stale {
            return Ok(outcome);
        }
        let snapshot = zone.snapshot();
        drop(zone);

        if outcome == TickOutcome::Finished {
            info!("{} session finished", kind);
        }
        self.publish(snapshot);
        Ok(outcome)
    }

    /// Generation to arm a timer with, if the session is counting down
    pub fn armed_generation(&self, kind: SessionKind) -> Result<Option<u64>> {
        Ok(self.lock_zone()?.armed_generation(kind))
    }

    /// Get current zone snapshot
    pub fn get_snapshot(&self) -> Result<ZoneSnapshot> {
        Ok(self.lock_zone()?.snapshot())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_state() -> AppState {
        AppState::new(
            Arc::new(Catalog::default()),
            20554,
            "127.0.0.1".to_string(),
            Duration::from_secs(1),
        )
    }

    #[test]
    fn unknown_indices_leave_state_untouched() {
        let state = app_state();
        assert!(matches!(state.start_exercise(7), Err(ZenError::UnknownExercise(7))));
        assert!(matches!(state.start_meditation(1), Err(ZenError::UnknownProgram(1))));
        assert!(matches!(state.select_posture(3), Err(ZenError::UnknownPosture(3))));

        let snapshot = state.get_snapshot().unwrap();
        assert_eq!(snapshot.breathing.active_exercise, None);
        assert_eq!(snapshot.meditation.active_program, None);
        assert_eq!(state.get_last_action().0, None);
    }

    #[test]
    fn commands_record_last_action() {
        let state = app_state();
        state.start_exercise(0).unwrap();
        state.next_affirmation().unwrap();
        let (action, time) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("next-affirmation"));
        assert!(time.is_some());
    }

    #[test]
    fn commands_are_broadcast_to_subscribers() {
        let state = app_state();
        let mut rx = state.state_change_tx.subscribe();
        state.start_meditation(0).unwrap();
        let snapshot = rx.try_recv().unwrap();
        assert_eq!(snapshot.meditation.active_program, Some(0));
        assert!(snapshot.meditation.running);
    }

    #[test]
    fn stale_tick_is_not_broadcast() {
        let state = app_state();
        state.start_exercise(0).unwrap();
        let generation = state.armed_generation(SessionKind::Breathing).unwrap().unwrap();
        state.reset_breathing().unwrap();

        let mut rx = state.state_change_tx.subscribe();
        let outcome = state.tick(SessionKind::Breathing, generation).unwrap();
        assert_eq!(outcome, TickOutcome::Stale);
        assert!(rx.try_recv().is_err());
        assert_eq!(state.get_snapshot().unwrap().breathing.remaining_seconds, 60);
    }

    #[test]
    fn applied_tick_is_broadcast() {
        let state = app_state();
        state.start_exercise(1).unwrap();
        let generation = state.armed_generation(SessionKind::Breathing).unwrap().unwrap();

        let mut rx = state.state_change_tx.subscribe();
        assert_eq!(
            state.tick(SessionKind::Breathing, generation).unwrap(),
            TickOutcome::Running
        );
        assert_eq!(rx.try_recv().unwrap().breathing.remaining_seconds, 119);
    }

    #[test]
    fn restart_then_reset_restores_catalog_duration() {
        let state = app_state().with_restart_seconds(45);
        state.start_exercise(0).unwrap();
        let restarted = state.restart_breathing(state.restart_seconds).unwrap();
        assert_eq!(restarted.breathing.remaining_seconds, 45);
        let reset = state.reset_breathing().unwrap();
        assert_eq!(reset.breathing.remaining_seconds, 60);
        assert!(!reset.breathing.running);
    }

    #[test]
    fn tick_period_ms_saturates() {
        assert_eq!(app_state().tick_period_ms(), 1000);

        let mut slow = app_state();
        slow.tick_period = Duration::MAX;
        assert_eq!(slow.tick_period_ms(), u64::MAX);
    }

    #[test]
    fn uptime_is_formatted() {
        assert!(app_state().get_uptime().ends_with('s'));
    }
}
