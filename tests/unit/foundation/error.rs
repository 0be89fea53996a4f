use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        MondrianError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        MondrianError::generation("x")
            .to_string()
            .contains("generation error:")
    );
    assert!(
        MondrianError::render("x")
            .to_string()
            .contains("render error:")
    );
    assert!(
        MondrianError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = MondrianError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
