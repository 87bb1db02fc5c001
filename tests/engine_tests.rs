use gamesense::device::DeviceProfile;
use gamesense::games::{Game, GameProfile};
use gamesense::player::{AimingFinger, FingerCount, PlayerStyle, Skill};
use gamesense::sensitivity::engine::{
    apply_per_scope, apply_uniform, base_sensitivity, gyro_scale, round1, ScaleFactors,
};
use gamesense::sensitivity::{
    apply_factor, clamp_and_round, compute_base, AdjustmentFactor, Scope, ScopeTable,
    SensitivityTables,
};
use rstest::rstest;

fn reference_device(gyro: Option<f64>) -> DeviceProfile {
    DeviceProfile::new(440.0, 120.0, 6.67, gyro).unwrap()
}

fn neutral_style() -> PlayerStyle {
    PlayerStyle::new(
        FingerCount::Two,
        Skill::Intermediate,
        AimingFinger::Index,
        false,
    )
}

#[test]
fn reference_device_yields_documented_tables() {
    let tables = compute_base(
        &reference_device(None),
        &neutral_style(),
        &GameProfile::new("Test", 300.0).unwrap(),
    )
    .unwrap();

    assert_eq!(tables.camera.get(Scope::NoAds), 150.0);
    assert_eq!(tables.camera.get(Scope::X8), 75.0);
    assert_eq!(tables.firing.get(Scope::NoAds), 165.0);
    assert!(tables.gyro.is_none());

    assert_eq!(
        tables.camera.values(),
        &[150.0, 120.0, 105.0, 97.5, 90.0, 82.5, 75.0]
    );
}

#[rstest]
#[case::one_finger(FingerCount::One, false, 1.1)]
#[case::two_fingers(FingerCount::Two, false, 1.0)]
#[case::three_fingers(FingerCount::ThreeOrMore, false, 0.85)]
#[case::claw(FingerCount::ThreeOrMore, true, 0.9)]
#[case::claw_ignored_for_two(FingerCount::Two, true, 1.0)]
fn finger_factor(#[case] fingers: FingerCount, #[case] claw: bool, #[case] expected: f64) {
    let style = PlayerStyle::new(fingers, Skill::Intermediate, AimingFinger::Index, claw);
    assert_eq!(style.finger_factor(), expected);
}

#[rstest]
#[case(Skill::Beginner, AimingFinger::Thumb, 0.9 * 1.1)]
#[case(Skill::Intermediate, AimingFinger::Index, 1.0)]
#[case(Skill::Advanced, AimingFinger::Other, 1.15 * 0.95)]
fn style_scale_multiplies_factors(
    #[case] skill: Skill,
    #[case] aiming: AimingFinger,
    #[case] expected: f64,
) {
    let style = PlayerStyle::new(FingerCount::Two, skill, aiming, false);
    assert!((style.style_scale() - expected).abs() < 1e-12);
}

#[rstest]
#[case::tiny_dpi(100.0, 0.5)]
#[case::reference(440.0, 1.0)]
#[case::huge_dpi(2000.0, 2.0)]
fn dpi_scale_is_clamped(#[case] dpi: f64, #[case] expected: f64) {
    let device = DeviceProfile::new(dpi, 120.0, 6.67, None).unwrap();
    assert_eq!(ScaleFactors::new(&device, &neutral_style()).dpi, expected);
}

#[rstest]
#[case::slow_panel(30.0, 0.8)]
#[case::fast_panel(240.0, 1.5)]
fn refresh_scale_is_clamped(#[case] hz: f64, #[case] expected: f64) {
    let device = DeviceProfile::new(440.0, hz, 6.67, None).unwrap();
    assert_eq!(ScaleFactors::new(&device, &neutral_style()).refresh, expected);
}

#[rstest]
#[case::free_fire(Game::FreeFire, 90.0, 99.0)]
#[case::delta_force(Game::DeltaForce, 150.0, 165.0)]
#[case::pubg(Game::PubgMobile, 150.0, 165.0)]
fn base_respects_game_cap(#[case] game: Game, #[case] camera: f64, #[case] firing: f64) {
    let tables = compute_base(&reference_device(None), &neutral_style(), &game.profile()).unwrap();
    assert_eq!(tables.camera.get(Scope::NoAds), camera);
    assert_eq!(tables.firing.get(Scope::NoAds), firing);
}

#[test]
fn base_has_a_floor() {
    // dpi 2.0x, refresh 0.8x, screen ~0.75x, thumb aiming 1.1x -> ~49.5 before the floor
    let device = DeviceProfile::new(880.0, 60.0, 5.0, None).unwrap();
    let style = PlayerStyle::default();
    assert_eq!(base_sensitivity(&device, &style, 300.0), 50.0);
    let tables = compute_base(&device, &style, &Game::BloodStrike.profile()).unwrap();
    assert_eq!(tables.camera.get(Scope::NoAds), 50.0);
}

#[rstest]
#[case::low_range(0.2, 0.5)]
#[case::saturated(20.0, 1.5)]
fn gyro_scale_is_clamped(#[case] range: f64, #[case] expected: f64) {
    assert_eq!(gyro_scale(range), expected);
}

#[test]
fn gyro_table_follows_its_ladder() {
    let tables = compute_base(
        &reference_device(Some(20.0)),
        &neutral_style(),
        &Game::PubgMobile.profile(),
    )
    .unwrap();
    let gyro = tables.gyro.expect("gyro present");
    assert_eq!(gyro.get(Scope::NoAds), 202.5);
    assert!(gyro.get(Scope::X8) < gyro.get(Scope::NoAds));
}

#[test]
fn gyro_base_entries_never_exceed_cap() {
    // Free Fire base is 90; 90 * 1.5 * 0.9 = 121.5 must be held to the cap of 100.
    let tables = compute_base(
        &reference_device(Some(20.0)),
        &neutral_style(),
        &Game::FreeFire.profile(),
    )
    .unwrap();
    let gyro = tables.gyro.unwrap();
    assert_eq!(gyro.get(Scope::NoAds), 100.0);
    assert!(gyro.values().iter().all(|&v| v <= 100.0));
}

#[test]
fn camera_ladder_is_non_increasing() {
    let tables = compute_base(
        &reference_device(Some(3.0)),
        &PlayerStyle::default(),
        &Game::CallOfDutyMobile.profile(),
    )
    .unwrap();
    for t in [Some(tables.camera), Some(tables.firing), tables.gyro].into_iter().flatten() {
        let v = t.values();
        assert!(v.windows(2).all(|w| w[0] >= w[1]), "{:?}", v);
    }
}

#[test]
fn invalid_cap_is_rejected_before_computing() {
    let game = GameProfile {
        name: "Broken".to_string(),
        sensitivity_cap: 0.0,
    };
    assert!(compute_base(&reference_device(None), &neutral_style(), &game).is_err());
}

#[rstest]
#[case(-5.0, 300.0, 0.0)]
#[case(301.0, 300.0, 300.0)]
#[case(123.456, 300.0, 123.5)]
#[case(99.94, 100.0, 99.9)]
fn clamp_and_round_cases(#[case] value: f64, #[case] cap: f64, #[case] expected: f64) {
    assert_eq!(clamp_and_round(value, cap), expected);
}

#[test]
fn per_stage_clamping_changes_compounded_result() {
    let tables = SensitivityTables {
        camera: ScopeTable::filled(280.0),
        firing: ScopeTable::filled(280.0),
        gyro: None,
    };
    let staged = apply_uniform(&apply_uniform(&tables, 1.2, 300.0), 0.8, 300.0);
    let combined = apply_uniform(&tables, 1.2 * 0.8, 300.0);

    assert_eq!(staged.camera.get(Scope::NoAds), 240.0);
    assert_eq!(combined.camera.get(Scope::NoAds), 268.8);
    assert_ne!(staged, combined);
}

#[test]
fn factors_scale_their_own_table() {
    let tables = compute_base(
        &reference_device(Some(3.0)),
        &neutral_style(),
        &Game::BloodStrike.profile(),
    )
    .unwrap();
    let factor = AdjustmentFactor {
        cam_adjust: 0.9,
        fire_adjust: 1.1,
        gyro_adjust: 1.0,
    };
    let out = apply_factor(&tables, &factor, 300.0);
    assert_eq!(out.camera.get(Scope::NoAds), 135.0);
    assert_eq!(out.firing.get(Scope::NoAds), 181.5);
    assert_eq!(out.gyro, tables.gyro);
}

#[test]
fn per_scope_multipliers_touch_only_their_scope() {
    let tables = compute_base(&reference_device(None), &neutral_style(), &Game::PubgMobile.profile())
        .unwrap();
    let mut m = [1.0; 7];
    m[Scope::X8.index()] = 0.5;
    m[Scope::NoAds.index()] = -0.2;
    let out = apply_per_scope(&tables, &m, 300.0);

    assert_eq!(out.camera.get(Scope::X8), 37.5);
    assert_eq!(out.camera.get(Scope::NoAds), 0.0);
    assert_eq!(out.camera.get(Scope::X4), tables.camera.get(Scope::X4));
    assert!(out.gyro.is_none());
}

#[rstest]
#[case(12.34, 12.3)]
#[case(12.36, 12.4)]
// Stored as 25.1499..; scaling by 10 first would land on 251.5
#[case(25.15, 25.1)]
// Exact ties go to the even digit
#[case(82.5 * 0.9, 74.2)]
#[case(0.25, 0.2)]
#[case(26.75, 26.8)]
fn rounding_is_one_decimal(#[case] value: f64, #[case] expected: f64) {
    assert_eq!(round1(value), expected);
    assert_eq!(round1(round1(value)), expected);
}

#[test]
fn device_validation_rejects_bad_values() {
    assert!(DeviceProfile::new(0.0, 60.0, 6.0, None).is_err());
    assert!(DeviceProfile::new(440.0, -1.0, 6.0, None).is_err());
    assert!(DeviceProfile::new(440.0, 60.0, f64::INFINITY, None).is_err());
    assert!(DeviceProfile::new(440.0, 60.0, 6.0, Some(0.0)).is_err());
}
