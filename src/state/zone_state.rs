//! Aggregate state of the zone: both sessions, the rotator and the posture

use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::{Catalog, Posture};

use super::{AffirmationRotator, BreathingSession, MeditationSession, ZoneSnapshot};

/// Which countdown a timer drives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Breathing,
    Meditation,
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionKind::Breathing => write!(f, "breathing"),
            SessionKind::Meditation => write!(f, "meditation"),
        }
    }
}

/// Result of a guarded timer tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session changed since the timer armed, or it was not counting
    Stale,
    /// Tick applied and the session keeps counting
    Running,
    /// Tick applied and brought the countdown to zero
    Finished,
}

/// All session state of the zone, driven by commands and timer ticks
#[derive(Debug, Clone)]
pub struct ZoneState {
    catalog: Arc<Catalog>,
    pub breathing: BreathingSession,
    pub meditation: MeditationSession,
    pub affirmations: AffirmationRotator,
    posture: Option<Posture>,
}

impl ZoneState {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            breathing: BreathingSession::new(Arc::clone(&catalog)),
            meditation: MeditationSession::new(Arc::clone(&catalog)),
            affirmations: AffirmationRotator::new(Arc::clone(&catalog)),
            posture: None,
            catalog,
        }
    }

    /// Show a posture with the meditation, starting the first program if none is active
    pub fn select_posture(&mut self, posture: Posture) {
        info!("Selected posture: {}", posture.name);
        self.posture = Some(posture);

        if self.meditation.active().is_none() {
            self.meditation.start(0);
        }
    }

    pub fn posture(&self) -> Option<&Posture> {
        self.posture.as_ref()
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Apply a timer tick to one session, guarded by the generation the timer armed with
    pub fn tick(&mut self, kind: SessionKind, generation: u64) -> TickOutcome {
        match kind {
            SessionKind::Breathing => self.breathing.tick_if_current(generation),
            SessionKind::Meditation => self.meditation.tick_if_current(generation),
        }
    }

    /// Generation to arm a timer with, if the session is currently counting down
    pub fn armed_generation(&self, kind: SessionKind) -> Option<u64> {
        match kind {
            SessionKind::Breathing => self
                .breathing
                .is_ticking()
                .then(|| self.breathing.generation()),
            SessionKind::Meditation => self
                .meditation
                .is_ticking()
                .then(|| self.meditation.generation()),
        }
    }

    pub fn snapshot(&self) -> ZoneSnapshot {
        ZoneSnapshot::capture(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone() -> ZoneState {
        ZoneState::new(Arc::new(Catalog::default()))
    }

    #[test]
    fn posture_selection_starts_meditation() {
        let mut z = zone();
        assert!(z.meditation.current_step().is_none());

        let posture = z.catalog().postures[2].clone();
        z.select_posture(posture);

        assert_eq!(z.posture().map(|p| p.name.as_str()), Some("Sukhasana"));
        assert_eq!(z.meditation.active(), Some(0));
        assert!(z.meditation.is_running());
        assert!(z.meditation.current_step().is_some());
    }

    #[test]
    fn changing_posture_keeps_countdown() {
        let mut z = zone();
        let first = z.catalog().postures[0].clone();
        let second = z.catalog().postures[1].clone();

        z.select_posture(first);
        for _ in 0..10 {
            z.meditation.tick();
        }
        let generation = z.meditation.generation();

        z.select_posture(second);
        assert_eq!(z.meditation.remaining_seconds(), 290);
        assert_eq!(z.meditation.generation(), generation);
        assert_eq!(z.posture().map(|p| p.name.as_str()), Some("Vajrasana"));
    }

    #[test]
    fn posture_survives_ending_meditation() {
        let mut z = zone();
        let posture = z.catalog().postures[0].clone();
        z.select_posture(posture);
        z.meditation.end();
        assert!(z.posture().is_some());
        assert!(z.meditation.current_step().is_none());
    }

    #[test]
    fn sessions_tick_independently() {
        let mut z = zone();
        z.breathing.start(0);
        z.meditation.start(0);
        let b = z.armed_generation(SessionKind::Breathing).unwrap();
        let m = z.armed_generation(SessionKind::Meditation).unwrap();

        assert_eq!(z.tick(SessionKind::Breathing, b), TickOutcome::Running);
        assert_eq!(z.tick(SessionKind::Breathing, b), TickOutcome::Running);
        assert_eq!(z.tick(SessionKind::Meditation, m), TickOutcome::Running);

        assert_eq!(z.breathing.remaining_seconds(), 58);
        assert_eq!(z.meditation.remaining_seconds(), 299);
    }

    #[test]
    fn paused_session_is_not_armed() {
        let mut z = zone();
        assert_eq!(z.armed_generation(SessionKind::Breathing), None);
        z.breathing.start(1);
        assert!(z.armed_generation(SessionKind::Breathing).is_some());
        z.breathing.toggle_play_pause();
        assert_eq!(z.armed_generation(SessionKind::Breathing), None);
    }
}
