use rosu_map::section::general::GameMode;

use crate::{
    osu::{OsuDifficultyAttributes, OsuPerformance, OsuPerformanceAttributes},
    overrides::{ChartIdentity, ChartOverrides},
    taiko::{TaikoDifficultyAttributes, TaikoPerformance, TaikoPerformanceAttributes},
    GameMods,
};

use super::attributes::{DifficultyAttributes, PerformanceAttributes};

pub(crate) mod pipeline;

/// Performance calculator on scores of any mode.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Performance<'a> {
    Osu(OsuPerformance<'a>),
    Taiko(TaikoPerformance<'a>),
}

impl<'a> Performance<'a> {
    /// Create a new performance calculator for any mode.
    ///
    /// The argument must be previously calculated attributes, either
    /// [`DifficultyAttributes`], [`PerformanceAttributes`], or mode-specific
    /// attributes like [`TaikoDifficultyAttributes`].
    pub fn new(attributes: impl Into<Self>) -> Self {
        attributes.into()
    }

    /// The mode of the calculator.
    pub const fn mode(&self) -> GameMode {
        match self {
            Self::Osu(_) => GameMode::Osu,
            Self::Taiko(_) => GameMode::Taiko,
        }
    }

    /// Consume the performance calculator and calculate
    /// performance attributes for the given parameters.
    pub fn calculate(self) -> PerformanceAttributes {
        match self {
            Self::Osu(o) => PerformanceAttributes::Osu(o.calculate()),
            Self::Taiko(t) => PerformanceAttributes::Taiko(t.calculate()),
        }
    }

    /// Specify mods.
    ///
    /// Accepted types are
    /// - `u32`
    /// - [`rosu_mods::GameModsLegacy`]
    /// - [`rosu_mods::GameMods`]
    /// - [`rosu_mods::GameModsIntermode`]
    /// - [`&rosu_mods::GameModsIntermode`](rosu_mods::GameModsIntermode)
    ///
    /// See <https://github.com/ppy/osu-api/wiki#mods>
    pub fn mods(self, mods: impl Into<GameMods>) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.mods(mods)),
            Self::Taiko(t) => Self::Taiko(t.mods(mods)),
        }
    }

    /// Set the accuracy between `0.0` and `100.0`.
    pub fn accuracy(self, acc: f64) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.accuracy(acc)),
            Self::Taiko(t) => Self::Taiko(t.accuracy(acc)),
        }
    }

    /// Specify the amount of misses of a play.
    pub fn misses(self, n_misses: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.misses(n_misses)),
            Self::Taiko(t) => Self::Taiko(t.misses(n_misses)),
        }
    }

    /// Specify the max combo of the play.
    pub fn combo(self, combo: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.combo(combo)),
            Self::Taiko(t) => Self::Taiko(t.combo(combo)),
        }
    }

    /// Specify how hitresults should be generated.
    ///
    /// Defaults to [`HitResultPriority::BestCase`].
    pub fn hitresult_priority(self, priority: HitResultPriority) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.hitresult_priority(priority)),
            Self::Taiko(t) => Self::Taiko(t.hitresult_priority(priority)),
        }
    }

    /// Specify the amount of 300s of a play.
    pub fn n300(self, n300: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.n300(n300)),
            Self::Taiko(t) => Self::Taiko(t.n300(n300)),
        }
    }

    /// Specify the amount of 100s of a play.
    pub fn n100(self, n100: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.n100(n100)),
            Self::Taiko(t) => Self::Taiko(t.n100(n100)),
        }
    }

    /// Specify the amount of 50s of a play.
    ///
    /// Irrelevant for osu!taiko.
    pub fn n50(self, n50: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.n50(n50)),
            Self::Taiko(_) => self,
        }
    }

    /// Specify the beatmap id so that its chart override may apply.
    pub fn beatmap_id(self, beatmap_id: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.beatmap_id(beatmap_id)),
            Self::Taiko(t) => Self::Taiko(t.beatmap_id(beatmap_id)),
        }
    }

    /// Specify the user id of the chart's creator so that their chart
    /// override may apply.
    pub fn creator_id(self, creator_id: u32) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.creator_id(creator_id)),
            Self::Taiko(t) => Self::Taiko(t.creator_id(creator_id)),
        }
    }

    /// Specify beatmap id and creator id at once.
    pub fn chart(self, chart: ChartIdentity) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.chart(chart)),
            Self::Taiko(t) => Self::Taiko(t.chart(chart)),
        }
    }

    /// Use a custom chart override table.
    ///
    /// Defaults to [`ChartOverrides::builtin`].
    pub fn overrides(self, overrides: &'a ChartOverrides) -> Self {
        match self {
            Self::Osu(o) => Self::Osu(o.overrides(overrides)),
            Self::Taiko(t) => Self::Taiko(t.overrides(overrides)),
        }
    }
}

/// While generating remaining hitresults, decide how they should be distributed.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum HitResultPriority {
    /// Prioritize good hitresults over bad ones
    BestCase,
    /// Prioritize bad hitresults over good ones
    WorstCase,
}

impl HitResultPriority {
    pub(crate) const DEFAULT: Self = Self::BestCase;
}

impl Default for HitResultPriority {
    fn default() -> Self {
        Self::DEFAULT
    }
}

macro_rules! impl_from_attributes {
    ( $( $variant:ident: $diff:ident, $perf:ident ;)* ) => {
        $(
            impl From<$diff> for Performance<'_> {
                fn from(attrs: $diff) -> Self {
                    Self::$variant(attrs.into())
                }
            }

            impl From<$perf> for Performance<'_> {
                fn from(attrs: $perf) -> Self {
                    Self::$variant(attrs.into())
                }
            }
        )*
    };
}

impl_from_attributes! {
    Osu: OsuDifficultyAttributes, OsuPerformanceAttributes;
    Taiko: TaikoDifficultyAttributes, TaikoPerformanceAttributes;
}

impl From<DifficultyAttributes> for Performance<'_> {
    fn from(attrs: DifficultyAttributes) -> Self {
        match attrs {
            DifficultyAttributes::Osu(attrs) => Self::Osu(attrs.into()),
            DifficultyAttributes::Taiko(attrs) => Self::Taiko(attrs.into()),
        }
    }
}

impl From<PerformanceAttributes> for Performance<'_> {
    fn from(attrs: PerformanceAttributes) -> Self {
        match attrs {
            PerformanceAttributes::Osu(attrs) => Self::Osu(attrs.into()),
            PerformanceAttributes::Taiko(attrs) => Self::Taiko(attrs.into()),
        }
    }
}

impl<'a> From<OsuPerformance<'a>> for Performance<'a> {
    fn from(calc: OsuPerformance<'a>) -> Self {
        Self::Osu(calc)
    }
}

impl<'a> From<TaikoPerformance<'a>> for Performance<'a> {
    fn from(calc: TaikoPerformance<'a>) -> Self {
        Self::Taiko(calc)
    }
}
