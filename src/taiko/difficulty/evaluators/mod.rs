pub use self::{
    color::ColorEvaluator, reading::ReadingEvaluator, rhythm::RhythmEvaluator,
    stamina::StaminaEvaluator,
};

mod color;
mod reading;
mod rhythm;
mod stamina;
