//! Stateless raster operations used by the scene graph.

use std::path::Path;

use image::{Rgba, RgbaImage};

use crate::{
    foundation::core::{Affine, Point, Vec2},
    foundation::error::SpriteResult,
    foundation::math::lerp_channel,
    render::canvas::{Canvas, Channels},
};

/// Rotate `image` about its centre by `degrees` (positive turns counter-clockwise on screen).
///
/// The output is grown to the bounding box of the rotated content; pixels not covered by the
/// source are fully transparent. Sampling is bilinear.
pub fn rotate_expand(image: &RgbaImage, degrees: f64) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let theta = degrees.to_radians();
    let (sin, cos) = (theta.sin().abs(), theta.cos().abs());
    let (wf, hf) = (f64::from(w), f64::from(h));
    let new_w = expanded_extent(hf * sin + wf * cos);
    let new_h = expanded_extent(hf * cos + wf * sin);

    let src_center = Vec2::new((wf - 1.0) / 2.0, (hf - 1.0) / 2.0);
    let dst_center = Vec2::new(
        (f64::from(new_w) - 1.0) / 2.0,
        (f64::from(new_h) - 1.0) / 2.0,
    );

    // kurbo's positive angle turns +x towards +y, which is clockwise with y pointing down.
    let forward =
        Affine::translate(dst_center) * Affine::rotate(-theta) * Affine::translate(-src_center);
    let inverse = forward.inverse();

    let mut out = RgbaImage::new(new_w, new_h);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let src = inverse * Point::new(f64::from(x), f64::from(y));
        *px = sample_bilinear(image, src);
    }
    out
}

fn expanded_extent(v: f64) -> u32 {
    // Absorb trig noise such as cos(90°) = 6e-17 before truncating.
    ((v + 1e-6).floor() as u32).max(1)
}

fn sample_bilinear(image: &RgbaImage, p: Point) -> Rgba<u8> {
    let (x0, y0) = (p.x.floor(), p.y.floor());
    let (fx, fy) = (p.x - x0, p.y - y0);
    let taps = [
        (0, 0, (1.0 - fx) * (1.0 - fy)),
        (1, 0, fx * (1.0 - fy)),
        (0, 1, (1.0 - fx) * fy),
        (1, 1, fx * fy),
    ];

    let mut acc = [0f64; 4];
    for (dx, dy, weight) in taps {
        if weight <= 0.0 {
            continue;
        }
        let sx = x0 as i64 + dx;
        let sy = y0 as i64 + dy;
        if sx < 0 || sy < 0 || sx >= i64::from(image.width()) || sy >= i64::from(image.height())
        {
            continue;
        }
        let px = image.get_pixel(sx as u32, sy as u32);
        for (a, &c) in acc.iter_mut().zip(px.0.iter()) {
            *a += weight * f64::from(c);
        }
    }
    Rgba(acc.map(|v| v.round().clamp(0.0, 255.0) as u8))
}

/// Blend one row of straight-alpha RGBA `src` over `dst` in place.
///
/// `dst` holds `dst_channels` (3 or 4) bytes per pixel; its alpha, if any, is left untouched.
pub fn alpha_blend_row(dst: &mut [u8], dst_channels: usize, src: &[u8]) {
    for (d, s) in dst.chunks_exact_mut(dst_channels).zip(src.chunks_exact(4)) {
        let a = s[3];
        match a {
            0 => {}
            255 => d[..3].copy_from_slice(&s[..3]),
            _ => {
                for c in 0..3 {
                    d[c] = lerp_channel(d[c], s[c], a);
                }
            }
        }
    }
}

/// Composite `overlay` onto `canvas` with its top-left corner at `origin`.
///
/// The overlay is clipped to the canvas on every side. Returns `false` when nothing was visible,
/// in which case the canvas is untouched.
pub fn alpha_blend(canvas: &mut Canvas, overlay: &RgbaImage, origin: (i64, i64)) -> bool {
    let Some(clip) = ClipRect::new(canvas, overlay, origin) else {
        return false;
    };

    let channels = canvas.channels().count();
    let row_bytes = overlay.width() as usize * 4;
    let src = overlay.as_raw();
    for row in 0..clip.height {
        let sy = (clip.src_y + row) as usize;
        let start = sy * row_bytes + clip.src_x as usize * 4;
        let src_row = &src[start..start + clip.width as usize * 4];
        let dst_row = canvas.span_mut(clip.dst_x, clip.dst_y + row, clip.width);
        alpha_blend_row(dst_row, channels, src_row);
    }
    true
}

/// Visible intersection of an overlay placed at `origin` with a canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClipRect {
    src_x: u32,
    src_y: u32,
    dst_x: u32,
    dst_y: u32,
    width: u32,
    height: u32,
}

impl ClipRect {
    fn new(canvas: &Canvas, overlay: &RgbaImage, origin: (i64, i64)) -> Option<Self> {
        let (ox, oy) = origin;
        let x0 = ox.max(0);
        let y0 = oy.max(0);
        let x1 = (ox + i64::from(overlay.width())).min(i64::from(canvas.width()));
        let y1 = (oy + i64::from(overlay.height())).min(i64::from(canvas.height()));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Self {
            src_x: (x0 - ox) as u32,
            src_y: (y0 - oy) as u32,
            dst_x: x0 as u32,
            dst_y: y0 as u32,
            width: (x1 - x0) as u32,
            height: (y1 - y0) as u32,
        })
    }
}

/// Restore `canvas` from `background`.
///
/// The background is converted to the canvas's channel layout and copied into the top-left
/// region; canvas area outside the background is left as is.
pub fn reset_canvas(canvas: &mut Canvas, background: &Canvas) {
    let width = background.width().min(canvas.width());
    let height = background.height().min(canvas.height());
    let src_n = background.channels().count();
    let dst_n = canvas.channels().count();
    let src = background.as_bytes();
    let src_stride = background.width() as usize * src_n;

    for y in 0..height {
        let start = y as usize * src_stride;
        let src_row = &src[start..start + width as usize * src_n];
        let dst_row = canvas.span_mut(0, y, width);
        if src_n == dst_n {
            dst_row.copy_from_slice(src_row);
            continue;
        }
        for (d, s) in dst_row.chunks_exact_mut(dst_n).zip(src_row.chunks_exact(src_n)) {
            d[..3].copy_from_slice(&s[..3]);
            if dst_n == 4 {
                d[3] = 255;
            }
        }
    }
}

/// Load a background image and [`reset_canvas`] from it.
pub fn reset_canvas_from_path(canvas: &mut Canvas, background: &Path) -> SpriteResult<()> {
    let bg = Canvas::open(background)?;
    reset_canvas(canvas, &bg);
    Ok(())
}

/// Convert a canvas to another channel layout; alpha is dropped or made opaque.
pub fn convert_channels(canvas: &Canvas, channels: Channels) -> Canvas {
    if canvas.channels() == channels {
        return canvas.clone();
    }
    let mut out = Canvas::new(canvas.width(), canvas.height(), channels);
    reset_canvas(&mut out, canvas);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
