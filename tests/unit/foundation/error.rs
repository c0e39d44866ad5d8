use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VitrineError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(VitrineError::config("x").to_string().contains("config error:"));
    assert!(
        VitrineError::sampling("x")
            .to_string()
            .contains("sampling error:")
    );
    assert!(
        VitrineError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VitrineError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: VitrineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, VitrineError::Serde(_)));
}
