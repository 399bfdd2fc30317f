pub use self::{
    attributes::{TaikoDifficultyAttributes, TaikoPerformanceAttributes},
    object::{HitType, TaikoObject, TaikoObjectKind},
    performance::TaikoPerformance,
    score_state::TaikoScoreState,
};

/// Per-object difficulty evaluation.
pub mod difficulty;

mod attributes;
mod object;
mod performance;
mod score_state;
