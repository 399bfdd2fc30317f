pub use self::{
    attributes::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    object::{OsuObject, OsuObjectKind, OsuSlider},
    performance::{OsuPerformance, PERFORMANCE_BASE_MULTIPLIER},
    score_state::OsuScoreState,
};

/// Per-object difficulty evaluation.
pub mod difficulty;

mod attributes;
mod object;
mod performance;
mod score_state;
