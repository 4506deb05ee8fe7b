//! Breathing session state machine

use std::sync::Arc;

use crate::catalog::{BreathPhase, BreathingExercise, Catalog};

use super::TickOutcome;

/// Countdown and breath-cycle state for the selected breathing exercise
#[derive(Debug, Clone)]
pub struct BreathingSession {
    catalog: Arc<Catalog>,
    active: Option<usize>,
    running: bool,
    remaining_seconds: u64,
    elapsed_breath_seconds: u64,
    /// Bumped by every command so in-flight ticks can detect they are stale
    generation: u64,
}

impl BreathingSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            active: None,
            running: false,
            remaining_seconds: 0,
            elapsed_breath_seconds: 0,
            generation: 0,
        }
    }

    /// Select an exercise and start it from its full duration.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a catalog exercise; callers validate first.
    pub fn start(&mut self, index: usize) {
        let duration = match self.catalog.exercise(index) {
            Some(exercise) => exercise.duration_seconds,
            None => panic!(
                "breathing exercise {} out of range ({} in catalog)",
                index,
                self.catalog.exercises.len()
            ),
        };

        self.active = Some(index);
        self.remaining_seconds = duration;
        self.elapsed_breath_seconds = 0;
        self.running = true;
        self.generation += 1;
    }

    /// Flip between running and paused, even at zero remaining
    pub fn toggle_play_pause(&mut self) {
        self.running = !self.running;
        self.generation += 1;
    }

    /// Rewind to the exercise's catalog duration and pause
    pub fn reset(&mut self) {
        let Some(duration) = self.exercise().map(|e| e.duration_seconds) else {
            return;
        };

        self.remaining_seconds = duration;
        self.elapsed_breath_seconds = 0;
        self.running = false;
        self.generation += 1;
    }

    /// Run the active exercise again for a fixed number of seconds
    pub fn restart_fixed_duration(&mut self, seconds: u64) {
        if self.active.is_none() {
            return;
        }

        self.remaining_seconds = seconds;
        self.elapsed_breath_seconds = 0;
        self.running = true;
        self.generation += 1;
    }

    /// Advance the clock by one second.
    ///
    /// The tick that brings the countdown to zero also pauses the session.
    /// Returns false when nothing was applied.
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
        }
        self.elapsed_breath_seconds += 1;
        true
    }

    /// Apply a timer tick only if no command has run since `generation` was observed
    pub fn tick_if_current(&mut self, generation: u64) -> TickOutcome {
        if generation != self.generation || !self.tick() {
            return TickOutcome::Stale;
        }
        if self.running {
            TickOutcome::Running
        } else {
            TickOutcome::Finished
        }
    }

    /// Phase of the breath cycle at the current elapsed time; `Inhale` when idle
    pub fn current_phase(&self) -> BreathPhase {
        match self.exercise() {
            Some(exercise) => exercise.phase_at(self.elapsed_breath_seconds),
            None => BreathPhase::Inhale,
        }
    }

    /// Whether the breathing visual should be drawn expanded
    pub fn breath_expanded(&self) -> bool {
        self.running && matches!(self.current_phase(), BreathPhase::Inhale | BreathPhase::Hold)
    }

    /// The "start again" affordance is offered once the first exercise has run out
    pub fn start_again_available(&self) -> bool {
        self.active == Some(0) && self.remaining_seconds == 0
    }

    /// Active, running and with time left: the timer should be counting
    pub fn is_ticking(&self) -> bool {
        self.active.is_some() && self.running && self.remaining_seconds > 0
    }

    pub fn exercise(&self) -> Option<&BreathingExercise> {
        self.active.and_then(|i| self.catalog.exercise(i))
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.remaining_seconds
    }

    pub fn elapsed_breath_seconds(&self) -> u64 {
        self.elapsed_breath_seconds
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> BreathingSession {
        BreathingSession::new(Arc::new(Catalog::default()))
    }

    #[test]
    fn start_loads_catalog_duration() {
        let mut s = session();
        s.start(1);
        assert_eq!(s.active(), Some(1));
        assert_eq!(s.remaining_seconds(), 120);
        assert_eq!(s.elapsed_breath_seconds(), 0);
        assert!(s.is_running());
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn start_with_unknown_index_panics() {
        session().start(3);
    }

    #[test]
    fn ticking_to_zero_stops_and_further_ticks_are_noops() {
        let mut s = session();
        s.start(0);
        for _ in 0..60 {
            assert!(s.tick());
        }
        assert_eq!(s.remaining_seconds(), 0);
        assert!(!s.is_running());
        assert_eq!(s.elapsed_breath_seconds(), 60);

        assert!(!s.tick());
        assert_eq!(s.remaining_seconds(), 0);
        assert_eq!(s.elapsed_breath_seconds(), 60);
    }

    #[test]
    fn final_tick_sequence_ends_paused_at_zero() {
        let mut s = session();
        s.start(0);
        s.restart_fixed_duration(3);
        let mut seen = Vec::new();
        while s.tick() {
            seen.push((s.remaining_seconds(), s.is_running()));
        }
        assert_eq!(seen, vec![(2, true), (1, true), (0, false)]);
    }

    #[test]
    fn paused_session_does_not_tick() {
        let mut s = session();
        s.start(2);
        s.toggle_play_pause();
        assert!(!s.tick());
        assert_eq!(s.remaining_seconds(), 180);
    }

    #[test]
    fn toggle_is_permitted_at_zero_but_does_not_count() {
        let mut s = session();
        s.start(0);
        s.restart_fixed_duration(1);
        s.tick();
        s.toggle_play_pause();
        assert!(s.is_running());
        assert!(!s.is_ticking());
        assert!(!s.tick());
    }

    #[test]
    fn reset_targets_catalog_duration_after_fixed_restart() {
        let mut s = session();
        s.start(1);
        s.restart_fixed_duration(60);
        assert_eq!(s.remaining_seconds(), 60);
        s.reset();
        assert_eq!(s.remaining_seconds(), 120);
        assert_eq!(s.elapsed_breath_seconds(), 0);
        assert!(!s.is_running());
    }

    #[test]
    fn reset_and_restart_without_exercise_are_noops() {
        let mut s = session();
        s.reset();
        s.restart_fixed_duration(60);
        assert_eq!(s.active(), None);
        assert_eq!(s.remaining_seconds(), 0);
        assert!(!s.is_running());
        assert_eq!(s.generation(), 0);
    }

    #[test]
    fn phase_follows_elapsed_breath_counter() {
        let mut s = session();
        assert_eq!(s.current_phase(), BreathPhase::Inhale);
        s.start(0);
        for _ in 0..4 {
            s.tick();
        }
        assert_eq!(s.current_phase(), BreathPhase::Hold);
        assert!(s.breath_expanded());
        for _ in 0..7 {
            s.tick();
        }
        assert_eq!(s.current_phase(), BreathPhase::Exhale);
        assert!(!s.breath_expanded());
    }

    #[test]
    fn start_again_only_after_first_exercise_completes() {
        let mut s = session();
        s.start(0);
        assert!(!s.start_again_available());
        while s.tick() {}
        assert!(s.start_again_available());

        s.start(1);
        s.restart_fixed_duration(1);
        s.tick();
        assert!(!s.start_again_available());
    }

    #[test]
    fn stale_generation_is_rejected() {
        let mut s = session();
        s.start(0);
        let observed = s.generation();
        assert_eq!(s.tick_if_current(observed), TickOutcome::Running);

        s.reset();
        s.toggle_play_pause();
        assert_eq!(s.tick_if_current(observed), TickOutcome::Stale);
        assert_eq!(s.remaining_seconds(), 60);
        assert_eq!(s.elapsed_breath_seconds(), 0);
    }

    #[test]
    fn last_guarded_tick_reports_finished() {
        let mut s = session();
        s.start(0);
        s.restart_fixed_duration(1);
        assert_eq!(s.tick_if_current(s.generation()), TickOutcome::Finished);
        assert_eq!(s.tick_if_current(s.generation()), TickOutcome::Stale);
    }

    #[test]
    fn reselecting_replaces_running_session() {
        let mut s = session();
        s.start(0);
        s.tick();
        s.tick();
        s.start(2);
        assert_eq!(s.remaining_seconds(), 180);
        assert_eq!(s.elapsed_breath_seconds(), 0);
        assert_eq!(s.current_phase(), BreathPhase::Inhale);
    }
}
