use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SpriteError::asset_load("x")
            .to_string()
            .contains("asset load error:")
    );
    assert!(
        SpriteError::unsupported_format("x")
            .to_string()
            .contains("unsupported format:")
    );
    assert!(
        SpriteError::degenerate_anchors("x")
            .to_string()
            .contains("degenerate anchor set:")
    );
    assert!(
        SpriteError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SpriteError::encode("x").to_string().contains("encode error:"));
    assert!(
        SpriteError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = SpriteError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
