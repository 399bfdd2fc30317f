use serde::{Deserialize, Serialize};

use crate::{
    osu::{OsuDifficultyAttributes, OsuPerformanceAttributes},
    taiko::{TaikoDifficultyAttributes, TaikoPerformanceAttributes},
};

use super::performance::Performance;

/// The result of a difficulty calculation based on the mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum DifficultyAttributes {
    /// osu!standard difficulty calculation result.
    Osu(OsuDifficultyAttributes),
    /// osu!taiko difficulty calculation result.
    Taiko(TaikoDifficultyAttributes),
}

impl DifficultyAttributes {
    /// The star value.
    pub const fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.stars,
            Self::Taiko(attrs) => attrs.stars,
        }
    }

    /// The maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.max_combo,
            Self::Taiko(attrs) => attrs.max_combo,
        }
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.into()
    }
}

/// The result of a performance calculation based on the mode.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PerformanceAttributes {
    /// osu!standard performance calculation result.
    Osu(OsuPerformanceAttributes),
    /// osu!taiko performance calculation result.
    Taiko(TaikoPerformanceAttributes),
}

impl PerformanceAttributes {
    /// The pp value.
    pub const fn pp(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.pp,
            Self::Taiko(attrs) => attrs.pp,
        }
    }

    /// The star value.
    pub const fn stars(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.stars(),
            Self::Taiko(attrs) => attrs.stars(),
        }
    }

    /// Misses including an approximated amount of combo breaks.
    pub const fn effective_miss_count(&self) -> f64 {
        match self {
            Self::Osu(attrs) => attrs.effective_miss_count,
            Self::Taiko(attrs) => attrs.effective_miss_count,
        }
    }

    /// Difficulty attributes that were used for the performance calculation.
    pub fn difficulty_attributes(&self) -> DifficultyAttributes {
        match self {
            Self::Osu(attrs) => DifficultyAttributes::Osu(attrs.difficulty.clone()),
            Self::Taiko(attrs) => DifficultyAttributes::Taiko(attrs.difficulty.clone()),
        }
    }

    /// The maximum combo of the map.
    pub const fn max_combo(&self) -> u32 {
        match self {
            Self::Osu(attrs) => attrs.difficulty.max_combo,
            Self::Taiko(attrs) => attrs.difficulty.max_combo,
        }
    }

    /// Returns a builder for performance calculation.
    pub fn performance<'a>(self) -> Performance<'a> {
        self.into()
    }
}

impl From<PerformanceAttributes> for DifficultyAttributes {
    fn from(attrs: PerformanceAttributes) -> Self {
        match attrs {
            PerformanceAttributes::Osu(attrs) => Self::Osu(attrs.difficulty),
            PerformanceAttributes::Taiko(attrs) => Self::Taiko(attrs.difficulty),
        }
    }
}

macro_rules! impl_from_mode {
    ( $( $variant:ident: $diff:ident, $perf:ident ;)* ) => {
        $(
            impl From<$diff> for DifficultyAttributes {
                fn from(attrs: $diff) -> Self {
                    Self::$variant(attrs)
                }
            }

            impl From<$perf> for PerformanceAttributes {
                fn from(attrs: $perf) -> Self {
                    Self::$variant(attrs)
                }
            }
        )*
    };
}

impl_from_mode! {
    Osu: OsuDifficultyAttributes, OsuPerformanceAttributes;
    Taiko: TaikoDifficultyAttributes, TaikoPerformanceAttributes;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_by_mode() {
        let attrs = DifficultyAttributes::from(TaikoDifficultyAttributes {
            stars: 4.2,
            ..Default::default()
        });

        let value = serde_json::to_value(&attrs).unwrap();
        assert_eq!(value["mode"], "taiko");

        let back: DifficultyAttributes = serde_json::from_value(value).unwrap();
        assert_eq!(back, attrs);
        assert!((back.stars() - 4.2).abs() < f64::EPSILON);
    }
}
