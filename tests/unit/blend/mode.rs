use super::*;

#[test]
fn raw_ordinals_round_trip() {
    for mode in BlendMode::ALL {
        assert_eq!(BlendMode::from_raw(mode as u8), mode);
    }
}

#[test]
fn unknown_ordinal_falls_back_to_normal() {
    assert_eq!(BlendMode::from_raw(18), BlendMode::Normal);
    assert_eq!(BlendMode::from_raw(200), BlendMode::Normal);
}

#[test]
fn names_parse_back() {
    for mode in BlendMode::ALL {
        assert_eq!(mode.to_string().parse::<BlendMode>().unwrap(), mode);
    }
    assert_eq!("softlight".parse::<BlendMode>().unwrap(), BlendMode::SoftLight);
    assert!("Dissolve".parse::<BlendMode>().is_err());
}

#[test]
fn spot_validity_excludes_non_white_preserving_modes() {
    assert!(BlendMode::Multiply.is_valid_for_spot());
    assert!(BlendMode::SoftLight.is_valid_for_spot());
    assert!(!BlendMode::Difference.is_valid_for_spot());
    assert!(!BlendMode::Luminosity.is_valid_for_spot());
}

#[test]
fn serde_uses_variant_names() {
    let json = serde_json::to_string(&BlendMode::ColorDodge).unwrap();
    assert_eq!(json, "\"ColorDodge\"");
    let back: BlendMode = serde_json::from_str(&json).unwrap();
    assert_eq!(back, BlendMode::ColorDodge);
}
