use std::fmt::{Debug, Formatter, Result as FmtResult};

use rosu_mods::{GameModIntermode, GameMods as GameModsLazer, GameModsIntermode, GameModsLegacy};
use serde::{Deserialize, Serialize};

/// Collection of game mods.
///
/// This type can be created through its `From<T>` implementations where `T`
/// can be
/// - `u32`
/// - [`rosu_mods::GameModsLegacy`]
/// - [`rosu_mods::GameMods`]
/// - [`rosu_mods::GameModsIntermode`]
/// - [`&rosu_mods::GameModsIntermode`](rosu_mods::GameModsIntermode)
///
/// # Example
///
/// ```
/// use relax_pp::GameMods;
/// use rosu_mods::{GameModsIntermode, GameModsLegacy, GameMods as GameModsLazer};
///
/// let int = GameMods::from(128 + 8);
/// let legacy = GameMods::from(GameModsLegacy::Relax | GameModsLegacy::Hidden);
/// let lazer = GameMods::from(GameModsLazer::new());
/// let intermode = GameMods::from(GameModsIntermode::new());
///
/// assert!(int.rx() && int.hd());
/// assert_eq!(int, legacy);
/// ```
#[derive(Clone, PartialEq)]
pub struct GameMods {
    inner: GameModsInner,
}

impl Debug for GameMods {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.inner {
            GameModsInner::Lazer(ref mods) => Debug::fmt(mods, f),
            GameModsInner::Intermode(ref mods) => Debug::fmt(mods, f),
            GameModsInner::Legacy(ref mods) => Debug::fmt(mods, f),
        }
    }
}

/// Inner type of [`GameMods`] so that remote types contained in variants don't
/// need to be re-exported.
#[derive(Clone, PartialEq)]
enum GameModsInner {
    Lazer(GameModsLazer),
    Intermode(GameModsIntermode),
    Legacy(GameModsLegacy),
}

impl GameMods {
    pub(crate) const DEFAULT: Self = Self {
        inner: GameModsInner::Legacy(GameModsLegacy::NoMod),
    };

    /// Returns the mods' clock rate.
    ///
    /// In case of variable clock rates like for `WindUp`, this will return
    /// `1.0`.
    pub fn clock_rate(&self) -> f64 {
        match self.inner {
            GameModsInner::Lazer(ref mods) => mods.clock_rate().unwrap_or(1.0),
            GameModsInner::Intermode(ref mods) => mods.legacy_clock_rate(),
            GameModsInner::Legacy(mods) => mods.clock_rate(),
        }
    }

    /// Whether the mods change the playback rate, i.e. `DoubleTime`,
    /// `Nightcore`, or `HalfTime`.
    pub fn is_rate_changing(&self) -> bool {
        self.dt() || self.nc() || self.ht()
    }

    /// Check whether the mods contain the given [`ModKind`].
    pub fn contains_kind(&self, kind: ModKind) -> bool {
        match kind {
            ModKind::NoFail => self.nf(),
            ModKind::Easy => self.ez(),
            ModKind::TouchDevice => self.td(),
            ModKind::Hidden => self.hd(),
            ModKind::HardRock => self.hr(),
            ModKind::DoubleTime => self.dt(),
            ModKind::Nightcore => self.nc(),
            ModKind::HalfTime => self.ht(),
            ModKind::Flashlight => self.fl(),
            ModKind::SpunOut => self.so(),
            ModKind::Relax => self.rx(),
            ModKind::Autopilot => self.ap(),
            ModKind::Blinds => self.bl(),
            ModKind::Traceable => self.tc(),
        }
    }
}

macro_rules! impl_has_mod {
    ( $( $fn:ident: $sign:tt $name:ident [ $s:literal ], )* ) => {
        impl GameMods {
            $(
                // workaround for <https://github.com/rust-lang/rust-analyzer/issues/8092>
                #[doc = "Check whether [`GameMods`] contain `"]
                #[doc = $s]
                #[doc = "`."]
                pub fn $fn(&self) -> bool {
                    match self.inner {
                        GameModsInner::Lazer(ref mods) => {
                            mods.contains_intermode(GameModIntermode::$name)
                        },
                        GameModsInner::Intermode(ref mods) => {
                            mods.contains(GameModIntermode::$name)
                        },
                        GameModsInner::Legacy(_mods) => {
                            impl_has_mod!(LEGACY $sign $name _mods)
                        },
                    }
                }
            )*
        }
    };

    ( LEGACY + $name:ident $mods:ident ) => {
        $mods.contains(GameModsLegacy::$name)
    };

    ( LEGACY - $name:ident $mods:ident ) => {
        false
    };
}

impl_has_mod! {
    nf: + NoFail ["NoFail"],
    ez: + Easy ["Easy"],
    td: + TouchDevice ["TouchDevice"],
    hd: + Hidden ["Hidden"],
    hr: + HardRock ["HardRock"],
    rx: + Relax ["Relax"],
    fl: + Flashlight ["Flashlight"],
    so: + SpunOut ["SpunOut"],
    dt: + DoubleTime ["DoubleTime"],
    nc: + Nightcore ["Nightcore"],
    ht: + HalfTime ["HalfTime"],
    ap: + Autopilot ["Autopilot"],
    bl: - Blinds ["Blinds"],
    tc: - Traceable ["Traceable"],
}

impl Default for GameMods {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<GameModsLazer> for GameMods {
    fn from(mods: GameModsLazer) -> Self {
        Self {
            inner: GameModsInner::Lazer(mods),
        }
    }
}

impl From<GameModsIntermode> for GameMods {
    fn from(mods: GameModsIntermode) -> Self {
        Self {
            inner: GameModsInner::Intermode(mods),
        }
    }
}

impl From<&GameModsIntermode> for GameMods {
    fn from(mods: &GameModsIntermode) -> Self {
        // If only legacy mods are set, use `GameModsLegacy` and thus avoid
        // allocating an owned `GameModsIntermode` instance.
        match mods.checked_bits() {
            Some(bits) => bits.into(),
            None => mods.to_owned().into(),
        }
    }
}

impl From<GameModsLegacy> for GameMods {
    fn from(mods: GameModsLegacy) -> Self {
        Self {
            inner: GameModsInner::Legacy(mods),
        }
    }
}

impl From<u32> for GameMods {
    fn from(bits: u32) -> Self {
        GameModsLegacy::from_bits(bits).into()
    }
}

/// The mods that chart override conditions can refer to.
///
/// (De)serialized through their acronym, e.g. `"DT"`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModKind {
    #[serde(rename = "NF")]
    NoFail,
    #[serde(rename = "EZ")]
    Easy,
    #[serde(rename = "TD")]
    TouchDevice,
    #[serde(rename = "HD")]
    Hidden,
    #[serde(rename = "HR")]
    HardRock,
    #[serde(rename = "DT")]
    DoubleTime,
    #[serde(rename = "NC")]
    Nightcore,
    #[serde(rename = "HT")]
    HalfTime,
    #[serde(rename = "FL")]
    Flashlight,
    #[serde(rename = "SO")]
    SpunOut,
    #[serde(rename = "RX")]
    Relax,
    #[serde(rename = "AP")]
    Autopilot,
    #[serde(rename = "BL")]
    Blinds,
    #[serde(rename = "TC")]
    Traceable,
}
