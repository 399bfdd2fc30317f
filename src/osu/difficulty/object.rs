use crate::{
    any::difficulty::object::IDifficultyObject,
    osu::object::{OsuObject, OsuObjectKind},
};

use super::{scaling_factor::ScalingFactor, HD_FADE_OUT_DURATION_MULTIPLIER};

/// An [`OsuObject`] annotated with metrics relative to its predecessors.
///
/// The first hit object of a chart has no difficulty object, i.e. the
/// difficulty object at index `i` belongs to hit object `i + 1`.
#[derive(Clone, Debug)]
pub struct OsuDifficultyObject<'a> {
    pub idx: usize,
    pub base: &'a OsuObject,
    /// Start time adjusted by the clock rate.
    pub start_time: f64,
    /// Time since the previous object's start, adjusted by the clock rate.
    pub delta_time: f64,
    /// [`delta_time`](Self::delta_time) capped from below.
    pub strain_time: f64,

    pub lazy_jump_dist: f64,
    pub min_jump_dist: f64,
    pub min_jump_time: f64,
    pub travel_dist: f64,
    pub travel_time: f64,
    pub lazy_travel_dist: f64,
    pub lazy_travel_time: f64,
    pub angle: Option<f64>,
}

impl<'a> OsuDifficultyObject<'a> {
    pub const NORMALIZED_RADIUS: i32 = 50;
    pub const NORMALIZED_DIAMETER: i32 = Self::NORMALIZED_RADIUS * 2;

    pub const MIN_DELTA_TIME: f64 = 25.0;
    const MAX_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 2.4;
    const ASSUMED_SLIDER_RADIUS: f32 = Self::NORMALIZED_RADIUS as f32 * 1.8;

    pub fn new(
        hit_object: &'a OsuObject,
        last_object: &'a OsuObject,
        last_last_object: Option<&'a OsuObject>,
        clock_rate: f64,
        idx: usize,
        scaling_factor: &ScalingFactor,
    ) -> Self {
        let delta_time = (hit_object.start_time - last_object.start_time) / clock_rate;
        let start_time = hit_object.start_time / clock_rate;

        #[cfg(feature = "tracing")]
        if delta_time < 0.0 {
            tracing::warn!(
                start_time = hit_object.start_time,
                prev_start_time = last_object.start_time,
                "hit objects are not ordered by start time"
            );
        }

        let mut this = Self {
            idx,
            base: hit_object,
            start_time,
            delta_time,
            strain_time: delta_time.max(Self::MIN_DELTA_TIME),
            lazy_jump_dist: 0.0,
            min_jump_dist: 0.0,
            min_jump_time: 0.0,
            travel_dist: 0.0,
            travel_time: 0.0,
            lazy_travel_dist: 0.0,
            lazy_travel_time: 0.0,
            angle: None,
        };

        this.compute_slider_cursor_pos(scaling_factor);
        this.set_distances(last_object, last_last_object, clock_rate, scaling_factor);

        this
    }

    pub fn opacity_at(&self, time: f64, hidden: bool, time_preempt: f64, time_fade_in: f64) -> f64 {
        if time > self.base.start_time {
            // * Consider a hitobject as being invisible when its start time is passed.
            // * In reality the hitobject will be visible beyond its start time up until its hittable window has passed,
            // * but this is an approximation and such a case is unlikely to be hit where this function is used.
            return 0.0;
        }

        let fade_in_start_time = self.base.start_time - time_preempt;
        let fade_in_duration = time_fade_in;

        if hidden {
            // * Taken from OsuModHidden.
            let fade_out_start_time = self.base.start_time - time_preempt + time_fade_in;
            let fade_out_duration = time_preempt * HD_FADE_OUT_DURATION_MULTIPLIER;

            (((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0))
                .min(1.0 - ((time - fade_out_start_time) / fade_out_duration).clamp(0.0, 1.0))
        } else {
            ((time - fade_in_start_time) / fade_in_duration).clamp(0.0, 1.0)
        }
    }

    fn compute_slider_cursor_pos(&mut self, scaling_factor: &ScalingFactor) {
        let OsuObjectKind::Slider(ref slider) = self.base.kind else {
            return;
        };

        self.lazy_travel_time = lazy_travel_time(self.base);
        self.lazy_travel_dist = f64::from(slider.lazy_travel_dist) * scaling_factor.raw_factor();
    }

    fn set_distances(
        &mut self,
        last_object: &OsuObject,
        last_last_object: Option<&OsuObject>,
        clock_rate: f64,
        scaling_factor: &ScalingFactor,
    ) {
        if let OsuObjectKind::Slider(ref slider) = self.base.kind {
            self.travel_dist = self.lazy_travel_dist
                * ((1.0 + slider.repeat_count() as f64 / 2.5).powf(1.0 / 2.5));

            self.travel_time = (self.lazy_travel_time / clock_rate).max(Self::MIN_DELTA_TIME);
        }

        if self.base.is_spinner() || last_object.is_spinner() {
            return;
        }

        let scaling_factor = scaling_factor.factor;
        let last_cursor_pos = last_object.lazy_end_pos();

        self.lazy_jump_dist =
            f64::from((self.base.pos * scaling_factor - last_cursor_pos * scaling_factor).length());
        self.min_jump_time = self.strain_time;
        self.min_jump_dist = self.lazy_jump_dist;

        if let OsuObjectKind::Slider(ref last_slider) = last_object.kind {
            let last_travel_time = (lazy_travel_time(last_object) / clock_rate)
                .max(Self::MIN_DELTA_TIME);
            self.min_jump_time = (self.strain_time - last_travel_time).max(Self::MIN_DELTA_TIME);

            let tail_jump_dist = (last_slider.tail_pos - self.base.pos).length() * scaling_factor;

            let diff = f64::from(Self::MAX_SLIDER_RADIUS - Self::ASSUMED_SLIDER_RADIUS);

            let min = f64::from(tail_jump_dist - Self::MAX_SLIDER_RADIUS);
            self.min_jump_dist = ((self.lazy_jump_dist - diff).min(min)).max(0.0);
        }

        let Some(last_last_object) = last_last_object else {
            return;
        };

        if !last_last_object.is_spinner() {
            let last_last_cursor_pos = last_last_object.lazy_end_pos();

            let v1 = last_last_cursor_pos - last_object.pos;
            let v2 = self.base.pos - last_cursor_pos;

            let dot = v1.dot(v2);
            let det = v1.x * v2.y - v1.y * v2.x;

            self.angle = Some((f64::from(det).atan2(f64::from(dot))).abs());
        }
    }
}

/// Time until the cursor leaves a slider when following it lazily.
fn lazy_travel_time(hit_object: &OsuObject) -> f64 {
    const TAIL_LENIENCY: f64 = -36.0;

    let start_time = hit_object.start_time;
    let duration = hit_object.end_time() - start_time;

    let tracking_end_time =
        (start_time + duration + TAIL_LENIENCY).max(start_time + duration / 2.0);

    tracking_end_time - start_time
}

impl IDifficultyObject for OsuDifficultyObject<'_> {
    type DifficultyObjects = [Self];

    fn idx(&self) -> usize {
        self.idx
    }
}
