use std::{collections::HashMap, fs::File, io::Read, path::Path, sync::OnceLock};

use rosu_map::section::general::GameMode;
use serde::{Deserialize, Serialize};

use crate::model::mods::{GameMods, ModKind};

/// Identifies the chart a score was set on.
///
/// Both ids are optional. Without an id, no override of the matching kind
/// will be applied.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartIdentity {
    pub beatmap_id: Option<u32>,
    pub creator_id: Option<u32>,
}

/// Multipliers on the final performance value of specific charts or of all
/// charts made by a specific creator.
///
/// Creator rules are applied before beatmap rules. If a chart matches both,
/// both multipliers are applied.
///
/// # Example
///
/// ```
/// use relax_pp::ChartOverrides;
/// use rosu_map::section::general::GameMode;
///
/// let json = r#"{
///     "osu": {
///         "beatmaps": {
///             "1962833": {
///                 "multiplier": 0.885,
///                 "conditional": [{ "mods": ["DT", "NC"], "multiplier": 0.83 }]
///             }
///         },
///         "creators": { "6938249": { "multiplier": 0.9 } }
///     }
/// }"#;
///
/// let overrides = ChartOverrides::from_json_str(json).unwrap();
///
/// let rule = overrides.lookup_override(GameMode::Osu, 1_962_833).unwrap();
/// assert_eq!(rule.multiplier, 0.885);
/// assert!(overrides.lookup_override(GameMode::Taiko, 1_962_833).is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOverrides {
    pub osu: ModeOverrides,
    pub taiko: ModeOverrides,
}

/// Override rules of a single mode.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModeOverrides {
    /// Rules keyed by beatmap id.
    pub beatmaps: HashMap<u32, OverrideRule>,
    /// Rules keyed by the user id of the chart's creator.
    pub creators: HashMap<u32, OverrideRule>,
}

/// A multiplier and additional mod-dependent multipliers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub multiplier: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditional: Vec<ConditionalMultiplier>,
}

/// A multiplier that only applies if any of the given mods is enabled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConditionalMultiplier {
    pub mods: Vec<ModKind>,
    pub multiplier: f64,
}

/// All the ways that loading a [`ChartOverrides`] table can fail.
#[derive(Debug, thiserror::Error)]
pub enum OverrideTableError {
    #[error("failed to read override table")]
    Io(#[from] std::io::Error),
    #[error("failed to parse override table")]
    Json(#[from] serde_json::Error),
    #[error("multiplier of {kind} {id} must be finite and positive, got {multiplier}")]
    InvalidMultiplier {
        kind: &'static str,
        id: u32,
        multiplier: f64,
    },
}

impl OverrideRule {
    /// A rule with a single unconditional multiplier.
    pub const fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            conditional: Vec::new(),
        }
    }

    /// Add a multiplier that applies if any of the given mods is enabled.
    #[must_use]
    pub fn with_conditional(mut self, mods: impl Into<Vec<ModKind>>, multiplier: f64) -> Self {
        self.conditional.push(ConditionalMultiplier {
            mods: mods.into(),
            multiplier,
        });

        self
    }

    /// Apply the rule onto a performance value.
    pub fn apply(&self, mods: &GameMods, mut value: f64) -> f64 {
        value *= self.multiplier;

        for conditional in self.conditional.iter() {
            if conditional.matches(mods) {
                value *= conditional.multiplier;
            }
        }

        value
    }

    fn multipliers(&self) -> impl Iterator<Item = f64> + '_ {
        std::iter::once(self.multiplier).chain(self.conditional.iter().map(|c| c.multiplier))
    }
}

impl ConditionalMultiplier {
    /// Whether any of the rule's mods is contained in `mods`.
    pub fn matches(&self, mods: &GameMods) -> bool {
        self.mods.iter().any(|&kind| mods.contains_kind(kind))
    }
}

impl ChartOverrides {
    /// A table without any rules.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table used when no other table is specified.
    pub fn builtin() -> &'static Self {
        static BUILTIN: OnceLock<ChartOverrides> = OnceLock::new();

        BUILTIN.get_or_init(|| {
            let dt_nc = [ModKind::DoubleTime, ModKind::Nightcore];

            let beatmaps = HashMap::from([
                (1_808_605, OverrideRule::new(0.85)),
                (1_822_147, OverrideRule::new(0.7)),
                (1_844_776, OverrideRule::new(0.64)),
                (1_777_768, OverrideRule::new(0.9)),
                (
                    1_962_833,
                    OverrideRule::new(0.885).with_conditional(dt_nc, 0.83),
                ),
            ]);

            let creators = HashMap::from([(6_938_249, OverrideRule::new(0.9))]);

            Self {
                osu: ModeOverrides { beatmaps, creators },
                taiko: ModeOverrides::default(),
            }
        })
    }

    /// Parse a table from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, OverrideTableError> {
        let overrides: Self = serde_json::from_str(json)?;
        overrides.validate()?;

        #[cfg(feature = "tracing")]
        overrides.log_loaded();

        Ok(overrides)
    }

    /// Parse a table from JSON bytes of a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, OverrideTableError> {
        let overrides: Self = serde_json::from_reader(reader)?;
        overrides.validate()?;

        #[cfg(feature = "tracing")]
        overrides.log_loaded();

        Ok(overrides)
    }

    /// Read and parse a JSON table from a file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, OverrideTableError> {
        let file = File::open(path)?;

        Self::from_reader(std::io::BufReader::new(file))
    }

    /// The rules of the given mode.
    ///
    /// Returns `None` for modes other than osu!standard and osu!taiko.
    pub const fn mode(&self, mode: GameMode) -> Option<&ModeOverrides> {
        match mode {
            GameMode::Osu => Some(&self.osu),
            GameMode::Taiko => Some(&self.taiko),
            GameMode::Catch | GameMode::Mania => None,
        }
    }

    /// Mutable access to the rules of the given mode.
    pub fn mode_mut(&mut self, mode: GameMode) -> Option<&mut ModeOverrides> {
        match mode {
            GameMode::Osu => Some(&mut self.osu),
            GameMode::Taiko => Some(&mut self.taiko),
            GameMode::Catch | GameMode::Mania => None,
        }
    }

    /// The rule for the given beatmap, if any.
    pub fn lookup_override(&self, mode: GameMode, beatmap_id: u32) -> Option<&OverrideRule> {
        self.mode(mode)?.beatmaps.get(&beatmap_id)
    }

    /// The rule for charts of the given creator, if any.
    pub fn lookup_creator_override(
        &self,
        mode: GameMode,
        creator_id: u32,
    ) -> Option<&OverrideRule> {
        self.mode(mode)?.creators.get(&creator_id)
    }

    /// Apply the creator rule and then the beatmap rule matching `chart`.
    pub(crate) fn apply(
        &self,
        mode: GameMode,
        chart: &ChartIdentity,
        mods: &GameMods,
        mut value: f64,
    ) -> f64 {
        if let Some(rule) = chart
            .creator_id
            .and_then(|id| self.lookup_creator_override(mode, id))
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(creator_id = chart.creator_id, ?mode, "applying creator override");

            value = rule.apply(mods, value);
        }

        if let Some(rule) = chart
            .beatmap_id
            .and_then(|id| self.lookup_override(mode, id))
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(beatmap_id = chart.beatmap_id, ?mode, "applying beatmap override");

            value = rule.apply(mods, value);
        }

        value
    }

    fn validate(&self) -> Result<(), OverrideTableError> {
        fn check(
            rules: &HashMap<u32, OverrideRule>,
            kind: &'static str,
        ) -> Result<(), OverrideTableError> {
            for (&id, rule) in rules.iter() {
                if let Some(multiplier) = rule.multipliers().find(|m| !m.is_finite() || *m <= 0.0)
                {
                    return Err(OverrideTableError::InvalidMultiplier {
                        kind,
                        id,
                        multiplier,
                    });
                }
            }

            Ok(())
        }

        for mode in [&self.osu, &self.taiko] {
            check(&mode.beatmaps, "beatmap")?;
            check(&mode.creators, "creator")?;
        }

        Ok(())
    }

    #[cfg(feature = "tracing")]
    fn log_loaded(&self) {
        tracing::debug!(
            osu_beatmaps = self.osu.beatmaps.len(),
            osu_creators = self.osu.creators.len(),
            taiko_beatmaps = self.taiko.beatmaps.len(),
            taiko_creators = self.taiko.creators.len(),
            "loaded chart override table"
        );
    }
}
