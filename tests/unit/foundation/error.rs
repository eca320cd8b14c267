use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ChalkError::invalid_geometry("x")
            .to_string()
            .contains("invalid geometry:")
    );
    assert!(
        ChalkError::storyboard("x")
            .to_string()
            .contains("storyboard error:")
    );
    assert!(
        ChalkError::renderer("x")
            .to_string()
            .contains("renderer failure:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ChalkError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
