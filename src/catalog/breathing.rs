//! Breathing exercise definitions and phase lookup

use serde::{Deserialize, Serialize};

/// A single breathing phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    /// Prompt shown to the user while the phase is active
    pub fn label(&self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale...",
            BreathPhase::Hold => "Hold...",
            BreathPhase::Exhale => "Exhale...",
        }
    }
}

/// One entry of a phase schedule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseWindow {
    pub phase: BreathPhase,
    pub seconds: u64,
}

impl PhaseWindow {
    pub fn new(phase: BreathPhase, seconds: u64) -> Self {
        Self { phase, seconds }
    }
}

/// Catalog entry for a timed breathing exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreathingExercise {
    pub name: String,
    pub description: String,
    /// Total session length in seconds
    pub duration_seconds: u64,
    /// Ordered phases making up one breath cycle
    pub schedule: Vec<PhaseWindow>,
}

impl BreathingExercise {
    /// Length of one full breath cycle in seconds
    pub fn cycle_seconds(&self) -> u64 {
        self.schedule
            .iter()
            .fold(0u64, |acc, w| acc.saturating_add(w.seconds))
    }

    /// Cycle length, or `None` if the phase durations overflow
    pub fn checked_cycle_seconds(&self) -> Option<u64> {
        self.schedule
            .iter()
            .try_fold(0u64, |acc, w| acc.checked_add(w.seconds))
    }

    /// Phase active after `elapsed` seconds of breathing
    pub fn phase_at(&self, elapsed: u64) -> BreathPhase {
        phase_at(&self.schedule, elapsed)
    }
}

/// Look up the phase whose cumulative window contains `elapsed` modulo the cycle length.
///
/// An empty or zero-length schedule yields `Inhale`.
pub fn phase_at(schedule: &[PhaseWindow], elapsed: u64) -> BreathPhase {
    let cycle = schedule
        .iter()
        .fold(0u64, |acc, w| acc.saturating_add(w.seconds));
    if cycle == 0 {
        return BreathPhase::Inhale;
    }

    let t = elapsed % cycle;
    let mut boundary = 0u64;
    for window in schedule {
        boundary = boundary.saturating_add(window.seconds);
        if t < boundary {
            return window.phase;
        }
    }

    BreathPhase::Inhale
}

pub(super) fn default_exercises() -> Vec<BreathingExercise> {
    use BreathPhase::*;

    vec![
        BreathingExercise {
            name: "4-7-8 Breathing".to_string(),
            description: "Inhale for 4, hold for 7, exhale for 8".to_string(),
            duration_seconds: 60,
            schedule: vec![
                PhaseWindow::new(Inhale, 4),
                PhaseWindow::new(Hold, 7),
                PhaseWindow::new(Exhale, 8),
            ],
        },
        BreathingExercise {
            name: "Box Breathing".to_string(),
            description: "4 counts each: inhale, hold, exhale, hold".to_string(),
            duration_seconds: 120,
            schedule: vec![
                PhaseWindow::new(Inhale, 4),
                PhaseWindow::new(Hold, 4),
                PhaseWindow::new(Exhale, 4),
                PhaseWindow::new(Hold, 4),
            ],
        },
        BreathingExercise {
            name: "Ocean Breathing".to_string(),
            description: "Deep, rhythmic breathing like ocean waves".to_string(),
            duration_seconds: 180,
            schedule: vec![
                PhaseWindow::new(Inhale, 6),
                PhaseWindow::new(Hold, 4),
                PhaseWindow::new(Exhale, 10),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(exercise: usize, t: u64) -> BreathPhase {
        use BreathPhase::*;
        match exercise {
            0 if t < 4 => Inhale,
            0 if t < 11 => Hold,
            0 => Exhale,
            1 if t < 4 => Inhale,
            1 if t < 8 => Hold,
            1 if t < 12 => Exhale,
            1 => Hold,
            _ if t < 6 => Inhale,
            _ if t < 10 => Hold,
            _ => Exhale,
        }
    }

    #[test]
    fn default_cycles_match_schedules() {
        let exercises = default_exercises();
        let cycles: Vec<u64> = exercises.iter().map(|e| e.cycle_seconds()).collect();
        assert_eq!(cycles, vec![19, 16, 20]);
    }

    #[test]
    fn every_exercise_starts_with_inhale() {
        for exercise in default_exercises() {
            assert_eq!(exercise.phase_at(0), BreathPhase::Inhale, "{}", exercise.name);
        }
    }

    #[test]
    fn phase_windows_follow_boundaries() {
        let exercises = default_exercises();
        for (i, exercise) in exercises.iter().enumerate() {
            let cycle = exercise.cycle_seconds();
            for t in 0..cycle {
                assert_eq!(exercise.phase_at(t), expected(i, t), "exercise {} at {}", i, t);
            }
        }
    }

    #[test]
    fn phase_is_periodic_in_cycle_length() {
        for exercise in default_exercises() {
            let cycle = exercise.cycle_seconds();
            for t in 0..cycle * 3 {
                assert_eq!(exercise.phase_at(t), exercise.phase_at(t + cycle * 7));
            }
        }
    }

    #[test]
    fn box_breathing_second_hold() {
        let exercises = default_exercises();
        assert_eq!(exercises[1].phase_at(12), BreathPhase::Hold);
        assert_eq!(exercises[1].phase_at(15), BreathPhase::Hold);
        assert_eq!(exercises[1].phase_at(16), BreathPhase::Inhale);
    }

    #[test]
    fn oversized_schedule_saturates_instead_of_wrapping() {
        let exercise = BreathingExercise {
            name: "Huge".to_string(),
            description: String::new(),
            duration_seconds: 60,
            schedule: vec![
                PhaseWindow::new(BreathPhase::Inhale, u64::MAX),
                PhaseWindow::new(BreathPhase::Exhale, 1),
            ],
        };
        assert_eq!(exercise.checked_cycle_seconds(), None);
        assert_eq!(exercise.cycle_seconds(), u64::MAX);
        assert_eq!(exercise.phase_at(5), BreathPhase::Inhale);
    }

    #[test]
    fn empty_schedule_defaults_to_inhale() {
        assert_eq!(phase_at(&[], 42), BreathPhase::Inhale);
        assert_eq!(phase_at(&[PhaseWindow::new(BreathPhase::Exhale, 0)], 3), BreathPhase::Inhale);
    }
}
