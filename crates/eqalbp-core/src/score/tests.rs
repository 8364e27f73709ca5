use super::*;

#[test]
fn test_accessors_and_feasibility() {
    let score = HardMediumSoftScore::of(-2, -19, -4123);
    assert_eq!((score.hard(), score.medium(), score.soft()), (-2, -19, -4123));
    assert!(!score.is_feasible());
    assert!(HardMediumSoftScore::of(0, -100, -100).is_feasible());
    assert_eq!(HardMediumSoftScore::default(), HardMediumSoftScore::of(0, 0, 0));
}

#[test]
fn test_lexicographic_order() {
    assert!(HardMediumSoftScore::of(0, -1000, -1000) > HardMediumSoftScore::of(-1, 0, 0));
    assert!(HardMediumSoftScore::of(0, -19, -5000) > HardMediumSoftScore::of(0, -20, 0));
    assert!(HardMediumSoftScore::of(0, -19, -4000) > HardMediumSoftScore::of(0, -19, -4123));
}

#[test]
fn test_display_parses_back() {
    let score = HardMediumSoftScore::of(0, -42, -4123);
    assert_eq!(score.to_string(), "0hard/-42medium/-4123soft");
    assert_eq!(" 0hard/-42medium/-4123soft ".parse(), Ok(score));
}

#[test]
fn test_parse_rejects_malformed() {
    for input in [
        "0hard/-19medium",
        "0hard/-19soft/-4medium",
        "xhard/0medium/0soft",
        "0hard/0medium/0soft/0soft",
        "",
    ] {
        assert!(input.parse::<HardMediumSoftScore>().is_err(), "{input:?}");
    }
}
