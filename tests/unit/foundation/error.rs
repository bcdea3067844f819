use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GlitchError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GlitchError::config("x").to_string().contains("config error:"));
    assert!(
        GlitchError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlitchError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: GlitchError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, GlitchError::Serde(_)));
}
