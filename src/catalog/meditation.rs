//! Guided meditation programs and step lookup

use serde::{Deserialize, Serialize};

/// One timed instruction of a guided program
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationStep {
    pub label: String,
    pub seconds: u64,
}

/// Catalog entry for a guided meditation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeditationProgram {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Declared total length; zero or absent falls back to the step sum
    #[serde(default)]
    pub total_seconds: Option<u64>,
    pub steps: Vec<MeditationStep>,
}

impl MeditationProgram {
    /// Session length in seconds
    pub fn total_seconds(&self) -> u64 {
        match self.total_seconds {
            Some(total) if total > 0 => total,
            _ => self
                .steps
                .iter()
                .fold(0u64, |acc, s| acc.saturating_add(s.seconds)),
        }
    }

    /// Sum of the step durations, or `None` if it overflows
    pub fn checked_step_seconds(&self) -> Option<u64> {
        self.steps
            .iter()
            .try_fold(0u64, |acc, s| acc.checked_add(s.seconds))
    }

    /// Index of the step active with `remaining` seconds left on the clock
    pub fn step_index_at_remaining(&self, remaining: u64) -> Option<usize> {
        let elapsed = self.total_seconds().saturating_sub(remaining);
        step_index_at(&self.steps, elapsed)
    }
}

/// First step whose cumulative duration exceeds `elapsed`, else the last step.
///
/// Returns `None` only for an empty step list.
pub fn step_index_at(steps: &[MeditationStep], elapsed: u64) -> Option<usize> {
    let mut boundary = 0u64;
    for (i, step) in steps.iter().enumerate() {
        boundary = boundary.saturating_add(step.seconds);
        if elapsed < boundary {
            return Some(i);
        }
    }
    steps.len().checked_sub(1)
}

pub(super) fn default_programs() -> Vec<MeditationProgram> {
    let steps = [
        ("Settle your posture. Notice the natural breath.", 30),
        ("Feel the breath at the nostrils: cool in, warm out.", 45),
        ("Count breaths 1 to 5, then begin again, gently.", 60),
        ("If the mind wanders, kindly return to the breath.", 60),
        ("Widen awareness to the whole body breathing.", 60),
        ("Rest in a calm, steady rhythm of breathing.", 45),
    ];

    vec![MeditationProgram {
        title: "Mindful Breathing".to_string(),
        description: "A calm, steady awareness of the natural breath.".to_string(),
        total_seconds: Some(300),
        steps: steps
            .iter()
            .map(|(label, seconds)| MeditationStep {
                label: label.to_string(),
                seconds: *seconds,
            })
            .collect(),
    }]
}
