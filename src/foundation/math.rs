/// Straight-alpha `(1 - a) * dst + a * src` for one 8-bit channel, rounded.
pub(crate) fn lerp_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u32::from(alpha);
    let v = u32::from(dst) * (255 - a) + u32::from(src) * a;
    ((v + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
