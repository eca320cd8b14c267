use super::*;

const ALL: [Ease; 7] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
];

#[test]
fn curves_hit_their_endpoints() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn input_is_clamped() {
    for ease in ALL {
        assert_eq!(ease.apply(-2.0), 0.0);
        assert_eq!(ease.apply(3.0), 1.0);
    }
}

#[test]
fn curves_are_monotonic_on_samples() {
    for ease in ALL {
        let mut prev = ease.apply(0.0);
        for i in 1..=50 {
            let v = ease.apply(i as f64 / 50.0);
            assert!(v >= prev - 1e-12, "{ease:?} at {i}");
            prev = v;
        }
    }
}

#[test]
fn linear_is_identity_and_default_is_smooth() {
    assert_eq!(Ease::Linear.apply(0.37), 0.37);
    assert_eq!(Ease::default(), Ease::InOutCubic);
    let mid = Ease::InOutCubic.apply(0.5);
    assert!((mid - 0.5).abs() < 1e-12);
}
