use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        TransError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        TransError::color_transform(anyhow::anyhow!("x"))
            .to_string()
            .contains("colour transform failure:")
    );
    assert!(
        TransError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn color_transform_keeps_source() {
    use std::error::Error as _;

    let err = TransError::color_transform(anyhow::anyhow!("link failed"));
    let source = err.source().expect("source is kept");
    assert!(source.to_string().contains("link failed"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = TransError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
