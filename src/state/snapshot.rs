//! Serializable views of the zone state, as observed by clients

use serde::{Deserialize, Serialize};

use crate::{
    catalog::{BreathPhase, Posture},
    utils::format_clock,
};

use super::{SessionKind, ZoneState};

/// Everything a client needs to redraw the zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneSnapshot {
    pub breathing: BreathingView,
    pub meditation: MeditationView,
    pub affirmation: AffirmationView,
    pub posture: Option<PostureView>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingView {
    pub active_exercise: Option<usize>,
    pub exercise_name: Option<String>,
    pub running: bool,
    pub remaining_seconds: u64,
    pub remaining_display: String,
    pub phase: BreathPhase,
    pub phase_label: String,
    pub elapsed_breath_seconds: u64,
    pub expanded: bool,
    pub start_again_available: bool,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeditationView {
    pub active_program: Option<usize>,
    pub program_title: Option<String>,
    pub running: bool,
    pub remaining_seconds: u64,
    pub remaining_display: String,
    pub current_step_index: Option<usize>,
    pub current_step: Option<String>,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffirmationView {
    pub index: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostureView {
    pub name: String,
    pub image: String,
    pub instructions: Vec<String>,
}

impl From<&Posture> for PostureView {
    fn from(posture: &Posture) -> Self {
        Self {
            name: posture.name.clone(),
            image: posture.image.clone(),
            instructions: posture.instructions.clone(),
        }
    }
}

impl ZoneSnapshot {
    pub fn capture(zone: &ZoneState) -> Self {
        let breathing = &zone.breathing;
        let phase = breathing.current_phase();
        let meditation = &zone.meditation;

        Self {
            breathing: BreathingView {
                active_exercise: breathing.active(),
                exercise_name: breathing.exercise().map(|e| e.name.clone()),
                running: breathing.is_running(),
                remaining_seconds: breathing.remaining_seconds(),
                remaining_display: format_clock(breathing.remaining_seconds()),
                phase,
                phase_label: phase.label().to_string(),
                elapsed_breath_seconds: breathing.elapsed_breath_seconds(),
                expanded: breathing.breath_expanded(),
                start_again_available: breathing.start_again_available(),
                generation: breathing.generation(),
            },
            meditation: MeditationView {
                active_program: meditation.active(),
                program_title: meditation.program().map(|p| p.title.clone()),
                running: meditation.is_running(),
                remaining_seconds: meditation.remaining_seconds(),
                remaining_display: format_clock(meditation.remaining_seconds()),
                current_step_index: meditation.current_step_index(),
                current_step: meditation.current_step().map(|s| s.label.clone()),
                generation: meditation.generation(),
            },
            affirmation: AffirmationView {
                index: zone.affirmations.index(),
                text: zone.affirmations.current().to_string(),
            },
            posture: zone.posture().map(PostureView::from),
        }
    }

    /// Generation of the given session at capture time
    pub fn generation(&self, kind: SessionKind) -> u64 {
        match kind {
            SessionKind::Breathing => self.breathing.generation,
            SessionKind::Meditation => self.meditation.generation,
        }
    }
}
