pub use self::{
    attributes::{DifficultyAttributes, PerformanceAttributes},
    performance::{HitResultPriority, Performance},
};

mod attributes;
pub(crate) mod difficulty;
pub(crate) mod performance;
