use super::*;

#[test]
fn endpoints_are_stable() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(0.0), 0.0, "{ease:?}");
        assert_eq!(ease.apply(1.0), 1.0, "{ease:?}");
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in Ease::ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn out_of_range_progress_is_clamped() {
    for ease in Ease::ALL {
        assert_eq!(ease.apply(-1.0), 0.0);
        assert_eq!(ease.apply(2.0), 1.0);
    }
}

#[test]
fn parses_names_and_dotted_aliases() {
    assert_eq!("OutExpo".parse::<Ease>().unwrap(), Ease::OutExpo);
    assert_eq!("out_expo".parse::<Ease>().unwrap(), Ease::OutExpo);
    assert_eq!("expo.out".parse::<Ease>().unwrap(), Ease::OutExpo);
    assert_eq!("Expo.easeOut".parse::<Ease>().unwrap(), Ease::OutExpo);
    assert_eq!("power1.inOut".parse::<Ease>().unwrap(), Ease::InOutQuad);
    assert_eq!("none".parse::<Ease>().unwrap(), Ease::Linear);
    assert!("bounce".parse::<Ease>().unwrap_err().is_configuration());
}
