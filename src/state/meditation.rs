//! Guided meditation session state machine

use std::sync::Arc;

use crate::catalog::{Catalog, MeditationProgram, MeditationStep};

use super::TickOutcome;

/// Countdown state for the selected guided program.
///
/// The current step is never stored; it is derived from the remaining time.
#[derive(Debug, Clone)]
pub struct MeditationSession {
    catalog: Arc<Catalog>,
    active: Option<usize>,
    running: bool,
    remaining_seconds: u64,
    generation: u64,
}

impl MeditationSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            active: None,
            running: false,
            remaining_seconds: 0,
            generation: 0,
        }
    }

    /// Select a program and start it from its full length.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a catalog program; callers validate first.
    pub fn start(&mut self, index: usize) {
        let total = match self.catalog.program(index) {
            Some(program) => program.total_seconds(),
            None => panic!(
                "meditation program {} out of range ({} in catalog)",
                index,
                self.catalog.programs.len()
            ),
        };

        self.active = Some(index);
        self.remaining_seconds = total;
        self.running = true;
        self.generation += 1;
    }

    pub fn toggle_play_pause(&mut self) {
        self.running = !self.running;
        self.generation += 1;
    }

    /// Rewind to the full program length and pause, keeping the selection
    pub fn reset(&mut self) {
        let Some(total) = self.program().map(|p| p.total_seconds()) else {
            return;
        };

        self.remaining_seconds = total;
        self.running = false;
        self.generation += 1;
    }

    /// Leave the session entirely
    pub fn end(&mut self) {
        self.active = None;
        self.running = false;
        self.remaining_seconds = 0;
        self.generation += 1;
    }

    /// Advance the clock by one second, pausing on the tick that reaches zero
    pub fn tick(&mut self) -> bool {
        if !self.is_ticking() {
            return false;
        }

        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.running = false;
        }
        true
    }

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

    pub fn current_step_index(&self) -> Option<usize> {
        self.program()
            .and_then(|p| p.step_index_at_remaining(self.remaining_seconds))
    }

    /// Step for the elapsed time, or `None` outside a session
    pub fn current_step(&self) -> Option<&MeditationStep> {
        let program = self.program()?;
        program.steps.get(self.current_step_index()?)
    }

    pub fn is_ticking(&self) -> bool {
        self.active.is_some() && self.running && self.remaining_seconds > 0
    }

    pub fn program(&self) -> Option<&MeditationProgram> {
        self.active.and_then(|i| self.catalog.program(i))
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

    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[cfg(test)]
    pub(crate) fn set_remaining_for_test(&mut self, remaining: u64) {
        self.remaining_seconds = remaining;
    }
}
