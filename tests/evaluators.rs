use relax_pp::{
    osu::{
        difficulty::{difficulty_objects, object_difficulties, OsuDifficultySettings},
        OsuObject,
    },
    taiko::{
        difficulty::{self as taiko_difficulty, TaikoDifficultySettings},
        HitType, TaikoObject,
    },
};
use rosu_map::util::Pos;

fn center() -> Pos {
    Pos::new(256.0, 192.0)
}

fn stream(n: usize, spacing: f64, dist: f32) -> Vec<OsuObject> {
    (0..n)
        .map(|i| {
            let x = if i % 2 == 0 { 256.0 } else { 256.0 + dist };

            OsuObject::circle(Pos::new(x, 192.0), i as f64 * spacing)
        })
        .collect()
}

#[test]
fn speed_without_neighbours() {
    let objects = [OsuObject::circle(center(), 0.0), OsuObject::circle(center(), 50.0)];

    // OD 7.5 yields a great hit window of 35ms
    let settings = OsuDifficultySettings::new(0_u32).od(7.5);
    assert!((settings.great_hit_window() - 35.0).abs() < 1e-12);

    let difficulties = object_difficulties(&objects, &settings);
    assert_eq!(difficulties.len(), 1);

    let strain_time = 50.0 / ((50.0 / 70.0) / 0.93_f64).clamp(0.92, 1.0);
    let base = (75.0 - strain_time) / 40.0;
    let speed_bonus = 1.0 + 0.75 * f64::powf(base, 2.0);
    let expected = speed_bonus / strain_time;

    assert!(
        (difficulties[0].speed - expected).abs() < 1e-12,
        "{} != {expected}",
        difficulties[0].speed
    );
}

#[test]
fn speed_combines_bonus_before_doubletapness() {
    let settings = OsuDifficultySettings::new(0_u32).od(7.5);
    let full_window = settings.great_hit_window() * 2.0;

    for dist in [10.29_f32, 40.37, 63.5, 77.7, 150.0] {
        let objects = [
            OsuObject::circle(center(), 0.0),
            OsuObject::circle(Pos::new(256.0 + dist, 192.0), 50.0),
        ];

        let min_jump_dist = difficulty_objects(&objects, &settings)[0].min_jump_dist;
        let speed = object_difficulties(&objects, &settings)[0].speed;

        let strain_time = 50.0 / ((50.0 / full_window) / 0.93_f64).clamp(0.92, 1.0);
        let speed_bonus = 1.0 + 0.75 * f64::powf((75.0 - strain_time) / 40.0, 2.0);
        let spacing = f64::powf(f64::min(125.0, 0.0 + min_jump_dist) / 125.0, 3.5);
        let expected = (speed_bonus + speed_bonus * spacing) * 1.0 / strain_time;

        assert_eq!(speed.to_bits(), expected.to_bits(), "{dist}: {speed} != {expected}");
    }
}

#[test]
fn speed_autopilot_ignores_distance() {
    let objects = stream(3, 60.0, 200.0);

    let nomod = object_difficulties(&objects, &OsuDifficultySettings::new(0_u32).od(8.0));
    let autopilot = object_difficulties(&objects, &OsuDifficultySettings::new(8192_u32).od(8.0));

    assert!(autopilot[1].speed < nomod[1].speed);
}

#[test]
fn faster_rate_is_harder() {
    let objects = stream(16, 120.0, 120.0);

    let nomod = object_difficulties(&objects, &OsuDifficultySettings::new(0_u32).od(8.0));
    let dt = object_difficulties(&objects, &OsuDifficultySettings::new(64_u32).od(8.0));

    let sum = |values: &[f64]| values.iter().sum::<f64>();

    let nomod_speed: Vec<_> = nomod.iter().map(|d| d.speed).collect();
    let dt_speed: Vec<_> = dt.iter().map(|d| d.speed).collect();

    assert!(sum(&dt_speed) > sum(&nomod_speed));

    let nomod_aim: Vec<_> = nomod.iter().map(|d| d.aim).collect();
    let dt_aim: Vec<_> = dt.iter().map(|d| d.aim).collect();

    assert!(sum(&dt_aim) > sum(&nomod_aim));
}

#[test]
fn aim_needs_two_predecessors() {
    let objects = stream(6, 150.0, 150.0);
    let difficulties = object_difficulties(&objects, &OsuDifficultySettings::default());

    assert!(difficulties[0].aim.abs() < f64::EPSILON);
    assert!(difficulties[1].aim.abs() < f64::EPSILON);
    assert!(difficulties[2].aim > 0.0);
    assert!(difficulties.iter().all(|d| d.aim >= 0.0));
}

#[test]
fn spinners_have_no_difficulty() {
    let objects = [
        OsuObject::circle(center(), 0.0),
        OsuObject::circle(Pos::new(100.0, 100.0), 200.0),
        OsuObject::spinner(center(), 400.0, 1400.0),
    ];

    let settings = OsuDifficultySettings::new(1024_u32);
    let difficulties = object_difficulties(&objects, &settings);
    let spinner = difficulties[1];

    assert!(spinner.aim.abs() < f64::EPSILON);
    assert!(spinner.speed.abs() < f64::EPSILON);
    assert!(spinner.rhythm.abs() < f64::EPSILON);
    assert!(spinner.flashlight.abs() < f64::EPSILON);
}

#[test]
fn even_rhythm_is_neutral() {
    let objects = stream(40, 100.0, 80.0);
    let difficulties = object_difficulties(&objects, &OsuDifficultySettings::default());

    assert!(difficulties
        .iter()
        .all(|d| (d.rhythm - 1.0).abs() < f64::EPSILON));
}

#[test]
fn flashlight_requires_history() {
    let objects = stream(12, 150.0, 150.0);
    let settings = OsuDifficultySettings::new(1024_u32);
    let difficulties = object_difficulties(&objects, &settings);

    assert!(difficulties[0].flashlight.abs() < f64::EPSILON);
    assert!(difficulties.iter().skip(1).all(|d| d.flashlight > 0.0));
}

#[test]
fn empty_charts() {
    assert!(object_difficulties(&[], &OsuDifficultySettings::default()).is_empty());
    assert!(taiko_difficulty::object_difficulties(&[], &TaikoDifficultySettings::default())
        .is_empty());
}

#[test]
fn taiko_difficulties_are_finite() {
    let mut time = 0.0;

    let objects: Vec<_> = (0..64)
        .map(|i| {
            let hit_type = if i % 5 < 2 {
                HitType::Rim
            } else {
                HitType::Centre
            };

            time += if i % 8 < 4 { 120.0 } else { 90.0 };

            TaikoObject::hit(time, hit_type, 200.0)
        })
        .collect();

    let difficulties =
        taiko_difficulty::object_difficulties(&objects, &TaikoDifficultySettings::default());

    assert_eq!(difficulties.len(), 62);

    for d in difficulties {
        for value in [d.color, d.rhythm, d.stamina, d.reading] {
            assert!(value.is_finite() && value >= 0.0, "{d:?}");
        }
    }
}

fn pattern() -> Vec<OsuObject> {
    const POSITIONS: [(f32, f32); 12] = [
        (100.0, 100.0),
        (220.0, 140.0),
        (180.0, 260.0),
        (320.0, 220.0),
        (300.0, 80.0),
        (420.0, 160.0),
        (380.0, 300.0),
        (250.0, 330.0),
        (260.0, 200.0),
        (140.0, 240.0),
        (200.0, 120.0),
        (330.0, 110.0),
    ];

    const TIMES: [f64; 12] = [
        0.0, 150.0, 300.0, 375.0, 450.0, 600.0, 675.0, 750.0, 900.0, 1000.0, 1100.0, 1250.0,
    ];

    POSITIONS
        .into_iter()
        .zip(TIMES)
        .map(|((x, y), time)| OsuObject::circle(Pos::new(x, y), time))
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() <= 1e-10 * expected.abs(),
        "{actual} != {expected}"
    );
}

#[test]
fn aim_pattern_values() {
    let difficulties = object_difficulties(&pattern(), &OsuDifficultySettings::default());

    assert_close(difficulties[2].aim, 3.2203730133413053);
    assert_close(difficulties[3].aim, 5.599412821213427);
    assert_close(difficulties[6].aim, 4.963110086712363);
    assert_close(difficulties[10].aim, 1.425485367278469);
}

#[test]
fn flashlight_pattern_values() {
    let difficulties = object_difficulties(&pattern(), &OsuDifficultySettings::default());

    assert_close(difficulties[1].flashlight, 1.8762390260216049);
    assert_close(difficulties[6].flashlight, 69.15945851247781);
    assert_close(difficulties[10].flashlight, 35.42880789488028);
}

#[test]
fn rhythm_pattern_values() {
    let difficulties = object_difficulties(&pattern(), &OsuDifficultySettings::default());

    assert!((difficulties[4].rhythm - 1.0).abs() < f64::EPSILON);
    assert_close(difficulties[5].rhythm, 1.0629693366074422);
    assert_close(difficulties[8].rhythm, 1.0808316988879927);
    assert_close(difficulties[10].rhythm, 1.0651561993702539);
}
