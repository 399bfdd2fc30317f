use rosu_map::util::Pos;
use serde::{Deserialize, Serialize};

/// A hit object of an osu!standard chart as required by the evaluators.
///
/// Positions are expected to already include stacking offsets and mod
/// reflections.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsuObject {
    #[serde(with = "pos_serde")]
    pub pos: Pos,
    pub start_time: f64,
    pub kind: OsuObjectKind,
}

impl OsuObject {
    pub const OBJECT_RADIUS: f32 = 64.0;
    pub const PREEMPT_MIN: f64 = 450.0;

    /// A circle at the given position and time.
    pub const fn circle(pos: Pos, start_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: OsuObjectKind::Circle,
        }
    }

    /// A spinner between the given times.
    pub const fn spinner(pos: Pos, start_time: f64, end_time: f64) -> Self {
        Self {
            pos,
            start_time,
            kind: OsuObjectKind::Spinner { end_time },
        }
    }

    pub const fn end_time(&self) -> f64 {
        match self.kind {
            OsuObjectKind::Circle => self.start_time,
            OsuObjectKind::Slider(ref slider) => slider.end_time,
            OsuObjectKind::Spinner { end_time } => end_time,
        }
    }

    /// Position at which the object is finished, i.e. the tail for sliders.
    pub const fn end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
            OsuObjectKind::Slider(ref slider) => slider.tail_pos,
        }
    }

    /// Position of the cursor when it leaves the object while moving lazily.
    pub const fn lazy_end_pos(&self) -> Pos {
        match self.kind {
            OsuObjectKind::Circle | OsuObjectKind::Spinner { .. } => self.pos,
            OsuObjectKind::Slider(ref slider) => slider.lazy_end_pos,
        }
    }

    pub const fn is_circle(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Circle)
    }

    pub const fn is_slider(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Slider { .. })
    }

    pub const fn is_spinner(&self) -> bool {
        matches!(self.kind, OsuObjectKind::Spinner { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum OsuObjectKind {
    Circle,
    Slider(OsuSlider),
    Spinner { end_time: f64 },
}

/// Slider data that depends on the evaluated slider path.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OsuSlider {
    pub end_time: f64,
    /// Amount of repeats, i.e. spans minus one.
    pub repeats: usize,
    /// Position of the slider tail.
    #[serde(with = "pos_serde")]
    pub tail_pos: Pos,
    /// Position the cursor ends up at when following the slider lazily.
    #[serde(with = "pos_serde")]
    pub lazy_end_pos: Pos,
    /// Distance in osu!pixels the cursor travels when following the slider
    /// lazily.
    pub lazy_travel_dist: f32,
}

impl OsuSlider {
    pub const fn repeat_count(&self) -> usize {
        self.repeats
    }
}

mod pos_serde {
    use rosu_map::util::Pos;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(pos: &Pos, s: S) -> Result<S::Ok, S::Error> {
        (pos.x, pos.y).serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Pos, D::Error> {
        let (x, y) = <(f32, f32)>::deserialize(d)?;

        Ok(Pos::new(x, y))
    }
}
