//! Library to calculate performance attributes for osu!standard and
//! osu!taiko scores, including Relax and Autopilot plays.
//!
//! ## Description
//!
//! Performance is derived from previously calculated difficulty attributes
//! and the hit statistics of a score. The per-object evaluators that feed the
//! strain skills are available too so that difficulty attributes can be
//! produced from a sequence of hit objects.
//!
//! ## Usage
//!
//! ```
//! use relax_pp::osu::{OsuDifficultyAttributes, OsuPerformance};
//!
//! let attrs = OsuDifficultyAttributes {
//!     aim: 3.1,
//!     speed: 2.9,
//!     speed_note_count: 250.0,
//!     slider_factor: 0.98,
//!     aim_difficult_strain_count: 120.0,
//!     speed_difficult_strain_count: 90.0,
//!     ar: 9.5,
//!     od: 9.0,
//!     hp: 5.0,
//!     n_circles: 400,
//!     n_sliders: 150,
//!     n_spinners: 2,
//!     stars: 6.2,
//!     max_combo: 900,
//!     ..Default::default()
//! };
//!
//! let perf_attrs = OsuPerformance::new(attrs)
//!     .mods(128 + 8) // RXHD
//!     .combo(850)
//!     .accuracy(98.5)
//!     .misses(1)
//!     .beatmap_id(1_808_605)
//!     .calculate();
//!
//! println!("PP: {}", perf_attrs.pp);
//! ```
//!
//! ## Chart overrides
//!
//! Individual charts or chart creators may be assigned a multiplier on the
//! final value. A built-in table is used by default, custom tables can be
//! loaded from JSON through [`ChartOverrides`].
//!
//! ## Features
//!
//! | Flag | Description | Dependencies
//! | - | - | -
//! | `default` | No features |
//! | `tracing` | Applied overrides, loaded override tables, and out-of-order hit objects will be logged through `tracing`. | [`tracing`]
//!
//! [`tracing`]: https://docs.rs/tracing

#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::missing_const_for_fn, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::struct_excessive_bools,
    clippy::match_same_arms,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::explicit_iter_loop,
    clippy::similar_names,
    clippy::cast_possible_wrap
)]

#[doc(inline)]
pub use self::{
    any::{DifficultyAttributes, Performance, PerformanceAttributes},
    model::mods::GameMods,
    overrides::{ChartIdentity, ChartOverrides, OverrideTableError},
};

/// Types for calculations of any mode.
pub mod any;

/// Types for osu!standard calculations.
pub mod osu;

/// Types for osu!taiko calculations.
pub mod taiko;

/// Types used in and around this crate.
pub mod model;

/// Per-chart and per-creator adjustments of the final performance value.
pub mod overrides;

mod util;
