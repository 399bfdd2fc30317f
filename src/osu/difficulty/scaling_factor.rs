use crate::osu::object::OsuObject;

use super::object::OsuDifficultyObject;

const BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE: f32 = 1.00041;

/// Fields around the scaling of hit objects.
///
/// All objects of a chart share the same scaling so it is only stored once.
pub struct ScalingFactor {
    /// `NORMALIZED_RADIUS / Radius` and then adjusted if `Radius < 30`
    pub factor: f32,
    pub radius: f64,
}

impl ScalingFactor {
    pub fn new(cs: f64) -> Self {
        let scale = (f64::from(1.0_f32) - f64::from(0.7_f32) * ((cs - 5.0) / 5.0)) as f32 / 2.0
            * BROKEN_GAMEFIELD_ROUNDING_ALLOWANCE;

        let radius = f64::from(OsuObject::OBJECT_RADIUS * scale);
        let factor = OsuDifficultyObject::NORMALIZED_RADIUS as f32 / radius as f32;

        let factor_with_small_circle_bonus = if radius < 30.0 {
            factor * (1.0 + (30.0 - radius as f32).min(5.0) / 50.0)
        } else {
            factor
        };

        Self {
            factor: factor_with_small_circle_bonus,
            radius,
        }
    }

    /// Factor to normalize distances without the small circle bonus.
    pub fn raw_factor(&self) -> f64 {
        f64::from(OsuDifficultyObject::NORMALIZED_RADIUS) / self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn small_circles_get_bonus() {
        let cs4 = ScalingFactor::new(4.0);
        let cs7 = ScalingFactor::new(7.0);

        assert!(cs4.radius > 30.0);
        assert!((f64::from(cs4.factor) - cs4.raw_factor()).abs() < 1e-4);

        assert!(cs7.radius < 30.0);
        assert!(f64::from(cs7.factor) > cs7.raw_factor());
    }
}
