//! Meditation postures

use serde::{Deserialize, Serialize};

/// A seated or lying posture offered alongside the guided meditation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posture {
    pub name: String,
    pub description: String,
    /// Reference to the illustration, resolved by the client
    pub image: String,
    pub instructions: Vec<String>,
}

fn posture(name: &str, description: &str, image: &str, instructions: &[&str]) -> Posture {
    Posture {
        name: name.to_string(),
        description: description.to_string(),
        image: image.to_string(),
        instructions: instructions.iter().map(|s| s.to_string()).collect(),
    }
}

pub(super) fn default_postures() -> Vec<Posture> {
    vec![
        posture(
            "Shavasana",
            "Lie on your back, arms by your sides, palms facing up.",
            "/asanas/shavasana.png",
            &[
                "Lie flat on your back with legs comfortably apart, feet falling outward.",
                "Place arms slightly away from the body, palms facing up.",
                "Gently tuck the chin to lengthen the back of the neck.",
                "Soften the jaw and let the tongue rest naturally.",
                "Close your eyes and allow the whole body to relax with natural breathing.",
            ],
        ),
        posture(
            "Vajrasana",
            "Kneel and sit back on your heels, spine tall and relaxed.",
            "/asanas/vajrasana.png",
            &[
                "Kneel on the mat with knees together and feet pointing back.",
                "Sit back on your heels; optionally place a cushion between heels and hips.",
                "Lengthen the spine, relax shoulders, and place hands on thighs.",
                "Keep the gaze soft and breathe steadily through the nose.",
                "If knees or ankles feel strained, use extra padding or switch posture.",
            ],
        ),
        posture(
            "Sukhasana",
            "Easy cross-legged seat, shoulders soft, hands on thighs.",
            "/asanas/sukhasana.png",
            &[
                "Sit cross-legged on a cushion so hips are above knees.",
                "Root sit bones evenly and lengthen the spine upward.",
                "Relax shoulders away from ears; soften the face and jaw.",
                "Rest hands on thighs or in the lap; keep chest open.",
                "If hips or knees are tight, elevate the seat further or support knees.",
            ],
        ),
    ]
}
