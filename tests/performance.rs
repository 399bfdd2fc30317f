use proptest::prelude::*;
use relax_pp::{
    osu::{OsuDifficultyAttributes, OsuPerformance, OsuPerformanceAttributes},
    taiko::{TaikoDifficultyAttributes, TaikoPerformance, TaikoPerformanceAttributes},
    ChartOverrides, Performance,
};

const OSU_OBJECTS: u32 = 1000;
const TAIKO_OBJECTS: u32 = 1200;

fn osu_attrs() -> OsuDifficultyAttributes {
    OsuDifficultyAttributes {
        aim: 3.4,
        speed: 3.1,
        flashlight: 2.6,
        slider_factor: 0.96,
        speed_note_count: 380.0,
        aim_difficult_strain_count: 160.0,
        speed_difficult_strain_count: 120.0,
        ar: 9.7,
        od: 9.2,
        hp: 6.0,
        n_circles: 700,
        n_sliders: 298,
        n_spinners: 2,
        stars: 6.9,
        max_combo: 1450,
    }
}

fn taiko_attrs() -> TaikoDifficultyAttributes {
    TaikoDifficultyAttributes {
        stamina: 2.1,
        rhythm: 1.1,
        color: 1.9,
        reading: 0.4,
        great_hit_window: 28.0,
        stars: 5.4,
        max_combo: TAIKO_OBJECTS,
        is_convert: false,
    }
}

fn osu(mods: u32, n100: u32, misses: u32) -> OsuPerformanceAttributes {
    OsuPerformance::new(osu_attrs())
        .mods(mods)
        .n100(n100)
        .n50(0)
        .misses(misses)
        .calculate()
}

fn taiko(mods: u32, n100: u32, misses: u32) -> TaikoPerformanceAttributes {
    TaikoPerformance::new(taiko_attrs())
        .mods(mods)
        .n100(n100)
        .misses(misses)
        .calculate()
}

fn assert_not_above(next: f64, prev: f64) {
    assert!(next <= prev + 1e-9 * prev.abs().max(1.0), "{next} > {prev}");
}

// NM, NF, HD, HR, HDHR, DT, FL, AP
const OSU_MODS: [u32; 8] = [0, 1, 8, 16, 24, 64, 1024, 8192];
// RX, HDRX, DTRX, FLRX
const RELAX_MODS: [u32; 4] = [128, 128 + 8, 128 + 64, 128 + 1024];
// NM, EZ, HD, HR, HDFL
const TAIKO_MODS: [u32; 5] = [0, 2, 8, 16, 8 + 1024];

proptest! {
    #[test]
    fn osu_monotonic_in_misses(
        mods in prop::sample::select(OSU_MODS.to_vec()),
        n100 in 0_u32..200,
        misses in 0_u32..150,
    ) {
        let prev = osu(mods, n100, misses);
        let next = osu(mods, n100, misses + 1);

        assert_not_above(next.pp, prev.pp);
        assert_not_above(next.pp_aim, prev.pp_aim);
        assert_not_above(next.pp_speed, prev.pp_speed);
        assert_not_above(next.pp_acc, prev.pp_acc);
        assert_not_above(next.pp_flashlight, prev.pp_flashlight);
        prop_assert!(next.effective_miss_count >= prev.effective_miss_count);
    }

    // The relax total may rise with a miss, see `relax_total_not_monotonic_in_misses`
    #[test]
    fn osu_relax_skill_values_monotonic_in_misses(
        mods in prop::sample::select(RELAX_MODS.to_vec()),
        n100 in 0_u32..200,
        misses in 0_u32..150,
    ) {
        let prev = osu(mods, n100, misses);
        let next = osu(mods, n100, misses + 1);

        assert_not_above(next.pp_aim, prev.pp_aim);
        assert_not_above(next.pp_speed, prev.pp_speed);
        assert_not_above(next.pp_acc, prev.pp_acc);
        assert_not_above(next.pp_flashlight, prev.pp_flashlight);
        prop_assert!(next.effective_miss_count >= prev.effective_miss_count);
    }

    #[test]
    fn osu_accuracy_value_monotonic(
        mods in prop::sample::select(OSU_MODS.to_vec()),
        n100 in 0_u32..400,
        misses in 0_u32..20,
    ) {
        let prev = osu(mods, n100, misses);
        let next = osu(mods, n100 + 1, misses);

        assert_not_above(next.pp_acc, prev.pp_acc);
    }

    #[test]
    fn taiko_monotonic_in_misses(
        mods in prop::sample::select(TAIKO_MODS.to_vec()),
        n100 in 0_u32..300,
        misses in 0_u32..200,
    ) {
        let prev = taiko(mods, n100, misses);
        let next = taiko(mods, n100, misses + 1);

        assert_not_above(next.pp, prev.pp);
        assert_not_above(next.pp_difficulty, prev.pp_difficulty);
        assert_not_above(next.pp_acc, prev.pp_acc);
    }

    #[test]
    fn taiko_accuracy_value_monotonic(
        mods in prop::sample::select(TAIKO_MODS.to_vec()),
        n100 in 0_u32..600,
        misses in 0_u32..20,
    ) {
        let prev = taiko(mods, n100, misses);
        let next = taiko(mods, n100 + 1, misses);

        assert_not_above(next.pp_acc, prev.pp_acc);
    }

    #[test]
    fn empty_attributes_yield_zero(
        mods in 0_u32..16384,
        acc in 0.0..=100.0,
        misses in prop::option::of(0_u32..50),
        combo in prop::option::of(0_u32..5000),
    ) {
        let mut osu = OsuPerformance::new(OsuDifficultyAttributes::default())
            .mods(mods)
            .accuracy(acc);

        let mut taiko = TaikoPerformance::new(TaikoDifficultyAttributes::default())
            .mods(mods)
            .accuracy(acc);

        if let Some(misses) = misses {
            osu = osu.misses(misses);
            taiko = taiko.misses(misses);
        }

        if let Some(combo) = combo {
            osu = osu.combo(combo);
            taiko = taiko.combo(combo);
        }

        let osu = osu.calculate();
        let taiko = taiko.calculate();

        prop_assert_eq!(osu.pp.to_bits(), 0.0_f64.to_bits());
        prop_assert_eq!(taiko.pp.to_bits(), 0.0_f64.to_bits());
        prop_assert_eq!(osu.effective_miss_count.to_bits(), 0.0_f64.to_bits());
    }

    #[test]
    fn idempotent(
        mods in 0_u32..16384,
        acc in 90.0..=100.0,
        misses in 0_u32..20,
        combo in 0_u32..2000,
    ) {
        let calc = |mods: u32| {
            Performance::new(osu_attrs())
                .mods(mods)
                .accuracy(acc)
                .misses(misses)
                .combo(combo)
                .beatmap_id(1_962_833)
        };

        let first = calc(mods).calculate();
        let second = calc(mods).calculate();

        prop_assert_eq!(first.pp().to_bits(), second.pp().to_bits());
        prop_assert_eq!(first, second);
    }
}

fn with_table(
    beatmap_id: Option<u32>,
    creator_id: Option<u32>,
    mods: u32,
    table: &ChartOverrides,
) -> f64 {
    let mut calc = OsuPerformance::new(osu_attrs())
        .mods(mods)
        .accuracy(98.0)
        .misses(2)
        .overrides(table);

    if let Some(beatmap_id) = beatmap_id {
        calc = calc.beatmap_id(beatmap_id);
    }

    if let Some(creator_id) = creator_id {
        calc = calc.creator_id(creator_id);
    }

    calc.calculate().pp
}

fn assert_override(beatmap_id: Option<u32>, creator_id: Option<u32>, mods: u32, factor: f64) {
    let empty = ChartOverrides::empty();

    let baseline = with_table(beatmap_id, creator_id, mods, &empty);
    let overridden = with_table(beatmap_id, creator_id, mods, ChartOverrides::builtin());

    assert!(baseline > 0.0);
    assert!(
        (overridden - baseline * factor).abs() < 1e-9 * baseline,
        "{overridden} != {baseline} * {factor}"
    );
}

#[test]
fn builtin_beatmap_overrides() {
    assert_override(Some(1_808_605), None, 0, 0.85);
    assert_override(Some(1_822_147), None, 0, 0.70);
    assert_override(Some(1_844_776), None, 128, 0.64);
    assert_override(Some(1_777_768), None, 8, 0.90);
}

#[test]
fn builtin_conditional_override() {
    assert_override(Some(1_962_833), None, 0, 0.885);
    assert_override(Some(1_962_833), None, 64, 0.885 * 0.83);
    assert_override(Some(1_962_833), None, 512 + 64, 0.885 * 0.83);
    assert_override(Some(1_962_833), None, 16, 0.885);
}

#[test]
fn builtin_creator_override() {
    assert_override(None, Some(6_938_249), 0, 0.9);
    assert_override(Some(1_822_147), Some(6_938_249), 128, 0.9 * 0.70);
    assert_override(Some(123), Some(456), 0, 1.0);
}

#[test]
fn taiko_has_no_builtin_overrides() {
    let overridden = TaikoPerformance::new(taiko_attrs())
        .beatmap_id(1_822_147)
        .creator_id(6_938_249)
        .calculate();

    let baseline = TaikoPerformance::new(taiko_attrs()).calculate();

    assert_eq!(overridden.pp.to_bits(), baseline.pp.to_bits());
}

#[test]
fn effective_miss_scenario() {
    let attrs = OsuDifficultyAttributes {
        max_combo: 1000,
        n_sliders: 50,
        n_circles: OSU_OBJECTS - 50,
        ..osu_attrs()
    };

    let perf = OsuPerformance::new(attrs.clone())
        .combo(500)
        .n100(100)
        .n50(0)
        .misses(10)
        .calculate();

    assert!((perf.effective_miss_count - 10.0).abs() < f64::EPSILON);

    let perf = OsuPerformance::new(attrs)
        .combo(500)
        .n100(100)
        .n50(0)
        .misses(0)
        .calculate();

    assert!((perf.effective_miss_count - 1.99).abs() < 1e-12);
}

#[test]
fn relax_and_autopilot_differ_from_nomod() {
    let nomod = osu(0, 20, 1);
    let relax = osu(128, 20, 1);
    let autopilot = osu(8192, 20, 1);

    assert!(autopilot.pp_aim.abs() < f64::EPSILON);
    assert!(relax.pp.to_bits() != nomod.pp.to_bits());
    assert!(autopilot.pp < nomod.pp);
}

#[test]
fn relax_total_not_monotonic_in_misses() {
    // Speed loses value to misses faster than aim. Once aim catches up with
    // speed, the relax accuracy factor no longer applies and the total jumps.
    let attrs = OsuDifficultyAttributes {
        aim: 2.4,
        speed: 3.5,
        aim_difficult_strain_count: 300.0,
        speed_difficult_strain_count: 20.0,
        ..osu_attrs()
    };

    let relax = |misses: u32| {
        OsuPerformance::new(attrs.clone())
            .mods(128)
            .n100(0)
            .n50(0)
            .misses(misses)
            .calculate()
    };

    let crossing = (0..200).find(|&misses| {
        let prev = relax(misses);
        let next = relax(misses + 1);

        prev.pp_aim < prev.pp_speed && next.pp_aim >= next.pp_speed
    });

    let Some(misses) = crossing else {
        panic!("aim never caught up with speed");
    };

    let prev = relax(misses);
    let next = relax(misses + 1);

    assert!(next.pp_aim <= prev.pp_aim);
    assert!(next.pp_speed <= prev.pp_speed);
    assert!(next.pp > prev.pp, "{misses}: {} <= {}", next.pp, prev.pp);
}
