use super::*;

fn base() -> ComposeConfig {
    ComposeConfig {
        empty: false,
        nos_knockout: false,
        nos_isolated: true,
        tos_isolated: true,
        normal: true,
        has_shape: false,
        has_alpha_g: false,
        has_tags: false,
        mask: MaskCoverage::None,
        has_backdrop: false,
        num_spots: 0,
        overprint: false,
    }
}

#[test]
fn empty_region_is_noop() {
    let cfg = ComposeConfig { empty: true, ..base() };
    assert_eq!(select_compose_path(&cfg), ComposePath::Noop);
}

#[test]
fn plain_groups_take_simple_path() {
    assert_eq!(
        select_compose_path(&base()),
        ComposePath::Simple {
            tos_isolated: true,
            masked: false,
            normal: true
        }
    );
    let cfg = ComposeConfig {
        tos_isolated: false,
        normal: false,
        mask: MaskCoverage::Full,
        ..base()
    };
    assert_eq!(
        select_compose_path(&cfg),
        ComposePath::Simple {
            tos_isolated: false,
            masked: true,
            normal: false
        }
    );
}

#[test]
fn aux_planes_overprint_and_partial_masks_force_general() {
    for cfg in [
        ComposeConfig { has_shape: true, ..base() },
        ComposeConfig { has_alpha_g: true, ..base() },
        ComposeConfig { has_tags: true, ..base() },
        ComposeConfig { overprint: true, ..base() },
        ComposeConfig { mask: MaskCoverage::Partial, ..base() },
    ] {
        assert_eq!(select_compose_path(&cfg), ComposePath::General, "{cfg:?}");
    }
}

#[test]
fn knockout_paths() {
    let iso = ComposeConfig {
        nos_knockout: true,
        has_shape: true,
        has_tags: true,
        ..base()
    };
    assert_eq!(
        select_compose_path(&iso),
        ComposePath::KnockoutIsolated { masked: false }
    );
    let non_iso = ComposeConfig {
        nos_isolated: false,
        has_backdrop: true,
        ..iso
    };
    assert_eq!(select_compose_path(&non_iso), ComposePath::General);
}
