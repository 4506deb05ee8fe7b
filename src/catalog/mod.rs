//! Static content catalog
//!
//! The catalog holds every exercise, program, posture and affirmation the
//! service can offer. It is built once at start-up (compiled-in defaults or a
//! JSON file) and shared read-only by the session state.

pub mod breathing;
pub mod meditation;
pub mod posture;

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ZenError};

pub use breathing::{phase_at, BreathPhase, BreathingExercise, PhaseWindow};
pub use meditation::{step_index_at, MeditationProgram, MeditationStep};
pub use posture::Posture;

const DEFAULT_AFFIRMATIONS: [&str; 8] = [
    "I am worthy of love and respect",
    "I choose peace over worry",
    "I am stronger than my challenges",
    "I deserve happiness and joy",
    "I am enough, just as I am",
    "I trust in my ability to overcome",
    "I am grateful for this moment",
    "I choose to be kind to myself",
];

const DEFAULT_CALM_TIPS: [&str; 4] = [
    "Take 5 deep breaths, counting each one",
    "Name 5 things you can see around you",
    "Gently stretch your neck and shoulders",
    "Drink a glass of water mindfully",
];

/// Immutable content served by the zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub exercises: Vec<BreathingExercise>,
    pub programs: Vec<MeditationProgram>,
    #[serde(default)]
    pub postures: Vec<Posture>,
    pub affirmations: Vec<String>,
    #[serde(default)]
    pub calm_tips: Vec<String>,
}

impl Catalog {
    /// Load and validate a catalog from a JSON file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;
        info!(
            "Loaded catalog from {}: {} exercises, {} programs, {} postures, {} affirmations",
            path.display(),
            catalog.exercises.len(),
            catalog.programs.len(),
            catalog.postures.len(),
            catalog.affirmations.len()
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from a JSON document
    pub fn from_json(raw: &str) -> Result<Self> {
        let catalog: Catalog = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check the invariants the session managers rely on
    pub fn validate(&self) -> Result<()> {
        if self.exercises.is_empty() {
            return Err(ZenError::CatalogValidation("no breathing exercises".to_string()));
        }
        if self.programs.is_empty() {
            return Err(ZenError::CatalogValidation("no meditation programs".to_string()));
        }
        if self.affirmations.is_empty() {
            return Err(ZenError::CatalogValidation("no affirmations".to_string()));
        }

        for exercise in &self.exercises {
            match exercise.checked_cycle_seconds() {
                Some(0) => {
                    return Err(ZenError::CatalogValidation(format!(
                        "exercise '{}' has an empty breath cycle",
                        exercise.name
                    )))
                }
                None => {
                    return Err(ZenError::CatalogValidation(format!(
                        "exercise '{}' has a breath cycle too long to count",
                        exercise.name
                    )))
                }
                Some(_) => {}
            }
        }

        for program in &self.programs {
            if program.steps.is_empty() {
                return Err(ZenError::CatalogValidation(format!(
                    "program '{}' has no steps",
                    program.title
                )));
            }
            if program.checked_step_seconds().is_none() {
                return Err(ZenError::CatalogValidation(format!(
                    "program '{}' has steps too long to count",
                    program.title
                )));
            }
        }

        Ok(())
    }

    pub fn exercise(&self, index: usize) -> Option<&BreathingExercise> {
        self.exercises.get(index)
    }

    pub fn program(&self, index: usize) -> Option<&MeditationProgram> {
        self.programs.get(index)
    }

    pub fn posture(&self, index: usize) -> Option<&Posture> {
        self.postures.get(index)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            exercises: breathing::default_exercises(),
            programs: meditation::default_programs(),
            postures: posture::default_postures(),
            affirmations: DEFAULT_AFFIRMATIONS.iter().map(|s| s.to_string()).collect(),
            calm_tips: DEFAULT_CALM_TIPS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
