use super::*;

#[test]
fn lerp_channel_endpoints_are_exact() {
    for dst in [0u8, 1, 77, 254, 255] {
        for src in [0u8, 3, 128, 255] {
            assert_eq!(lerp_channel(dst, src, 0), dst);
            assert_eq!(lerp_channel(dst, src, 255), src);
        }
    }
}

#[test]
fn lerp_channel_half_alpha_is_midpoint() {
    assert_eq!(lerp_channel(0, 255, 128), 128);
    assert_eq!(lerp_channel(100, 200, 128), 150);
}
