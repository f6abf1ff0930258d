use super::*;

#[test]
fn empty_json_is_the_default_rgb_device() {
    let cfg = CompositorConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, CompositorConfig::default());
    assert_eq!(cfg.blend_space, BlendSpace::Rgb);
    assert!(cfg.blend_context().is_drawn(5));
}

#[test]
fn json_round_trip() {
    let cfg = CompositorConfig {
        polarity: ColorPolarity::Subtractive,
        blend_space: BlendSpace::Cmyk,
        overprint: true,
        overprint_mode: true,
        drawn_comps: 0b1010,
        num_components: 6,
    };
    let json = cfg.to_json_string().unwrap();
    assert!(json.contains("\"subtractive\""));
    assert_eq!(CompositorConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = [
        r#"{"num_components": 0}"#,
        r#"{"blend_space": "cmyk"}"#,
        r#"{"blend_space": "cmyk", "polarity": "subtractive", "num_components": 3}"#,
        r#"{"overprint_mode": true}"#,
    ];
    for json in bad {
        let err = CompositorConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, TransError::Validation(_)), "{json}");
    }
    let err = CompositorConfig::from_json_str(r#"{"polarity": "sideways"}"#).unwrap_err();
    assert!(matches!(err, TransError::Serde(_)));
}

#[test]
fn derived_parameters_follow_the_config() {
    let cfg = CompositorConfig {
        polarity: ColorPolarity::Subtractive,
        blend_space: BlendSpace::Cmyk,
        overprint: true,
        num_components: 4,
        drawn_comps: 0b0001,
        ..CompositorConfig::default()
    };
    let params = cfg.compose_params();
    assert!(params.writes_drawn_only());
    assert!(params.ctx.subtractive);
    assert_eq!(format!("{:?}", params.procs), "BlendProcs(\"CMYK\")");

    let fill = cfg.fill_params(Depth::Eight, 0xffff, 10, BlendMode::Screen);
    assert_eq!((fill.alpha, fill.shape), (0xff, 10));
    assert_eq!(fill.blend_mode, BlendMode::Screen);
    assert!(fill.ctx.is_drawn(0) && !fill.ctx.is_drawn(1));
}
