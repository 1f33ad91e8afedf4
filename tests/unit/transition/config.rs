use std::path::PathBuf;

use super::*;

fn complete() -> TransitionOptions {
    TransitionOptions::new()
        .container(800.0, 600.0)
        .image1("a.png")
        .image2("b.png")
        .displacement_image("d.png")
}

#[test]
fn defaults_are_applied() {
    let cfg = complete().validate().unwrap();
    assert_eq!(cfg.container(), ContainerSize::new(800.0, 600.0));
    assert_eq!(cfg.intensity(), 0.5);
    assert_eq!(cfg.speed_in(), DEFAULT_SPEED_IN);
    assert_eq!(cfg.speed_out(), DEFAULT_SPEED_OUT);
    assert_eq!(cfg.easing(), Ease::OutExpo);
    assert!(cfg.hover());
    assert_eq!(cfg.direction(), DistortionDirection::TwoAxis);
    assert_eq!(
        cfg.source(TextureSlot::Image2),
        &ImageSource::Path(PathBuf::from("b.png"))
    );
}

#[test]
fn single_axis_defaults_to_full_intensity() {
    let cfg = complete()
        .direction(DistortionDirection::SingleAxis)
        .validate()
        .unwrap();
    assert_eq!(cfg.intensity(), 1.0);
}

#[test]
fn speed_shorthand_fills_both_unless_overridden() {
    let cfg = complete().speed(1.0).speed_out(0.4).validate().unwrap();
    assert_eq!(cfg.speed_in(), 1.0);
    assert_eq!(cfg.speed_out(), 0.4);
}

#[test]
fn missing_required_fields_are_configuration_errors() {
    let cases = [
        (TransitionOptions::new(), "container"),
        (
            TransitionOptions {
                image2: None,
                ..complete()
            },
            "image2",
        ),
        (
            TransitionOptions {
                image1: None,
                ..complete()
            },
            "image1",
        ),
        (
            TransitionOptions {
                displacement_image: None,
                ..complete()
            },
            "displacementImage",
        ),
    ];
    for (opts, field) in cases {
        let err = opts.validate().unwrap_err();
        assert!(err.is_configuration(), "{err}");
        assert!(err.to_string().contains(field), "{err}");
    }
}

#[test]
fn invalid_numbers_are_rejected() {
    assert!(complete().container(0.0, 10.0).validate().is_err());
    assert!(complete().intensity(-0.1).validate().is_err());
    assert!(complete().intensity(f64::NAN).validate().is_err());
    assert!(complete().speed_in(0.0).validate().is_err());
    assert!(complete().speed_out(f64::INFINITY).validate().is_err());
    assert!(complete().intensity(0.0).validate().is_ok());
}

#[test]
fn oversized_container_is_rejected() {
    let err = complete().container(1e9, 1e9).validate().unwrap_err();
    assert!(err.is_configuration());
    assert!(err.to_string().contains("pixel surface limit"), "{err}");

    let json = r#"{ "container": { "width": 100000, "height": 100000 } }"#;
    let opts = TransitionOptions::from_json_str(json).unwrap();
    let opts = TransitionOptions {
        image1: Some("a.png".into()),
        image2: Some("b.png".into()),
        displacement_image: Some("d.png".into()),
        ..opts
    };
    assert!(opts.validate().unwrap_err().is_configuration());
}

#[test]
fn json_uses_camel_case_and_aliases() {
    let json = r#"{
        "parent": { "width": 320, "height": 200 },
        "image1": "img/1.jpg",
        "image2": "img/2.jpg",
        "displacementImage": "img/disp.png",
        "speedIn": 1.0,
        "easing": "expo.inOut",
        "hover": false,
        "direction": "single_axis"
    }"#;
    let opts = TransitionOptions::from_json_str(json).unwrap();
    let cfg = opts.with_root(Path::new("/site")).validate().unwrap();
    assert_eq!(cfg.container(), ContainerSize::new(320.0, 200.0));
    assert_eq!(cfg.speed_in(), 1.0);
    assert_eq!(cfg.speed_out(), DEFAULT_SPEED_OUT);
    assert_eq!(cfg.easing(), Ease::InOutExpo);
    assert!(!cfg.hover());
    assert_eq!(cfg.direction(), DistortionDirection::SingleAxis);
    assert_eq!(
        cfg.source(TextureSlot::Displacement),
        &ImageSource::Path(PathBuf::from("/site/img/disp.png"))
    );
}

#[test]
fn json_rejects_unknown_fields_and_easings() {
    let err = TransitionOptions::from_json_str(r#"{ "colour": 1 }"#).unwrap_err();
    assert!(matches!(err, DistortError::Serde(_)));
    let err = TransitionOptions::from_json_str(r#"{ "easing": "wobble" }"#).unwrap_err();
    assert!(err.to_string().contains("wobble"));
}

#[test]
fn try_from_matches_validate() {
    let cfg = TransitionConfig::try_from(complete()).unwrap();
    assert_eq!(cfg, complete().validate().unwrap());
}
