use image::{DynamicImage, RgbImage};

use super::*;

fn gradient(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, y| Rgba([(x * 12) as u8, (y * 12) as u8, 128, 255]))
}

fn solid_canvas(w: u32, h: u32, channels: Channels, rgb: [u8; 3]) -> Canvas {
    let mut c = Canvas::new(w, h, channels);
    for y in 0..h {
        for x in 0..w {
            c.stamp(i64::from(x), i64::from(y), rgb);
        }
    }
    c
}

#[test]
fn rotate_zero_is_identity_on_rgba() {
    let img = gradient(7, 5);
    assert_eq!(rotate_expand(&img, 0.0), img);
}

#[test]
fn rotate_zero_of_rgb_source_is_the_rgba_normalized_input() {
    let rgb = RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8 * 40, y as u8 * 90, 7]));
    let rgba = crate::assets::decode::to_rgba(&DynamicImage::ImageRgb8(rgb.clone()));
    let out = rotate_expand(&rgba, 0.0);
    assert_eq!(out.dimensions(), (3, 2));
    for (x, y, px) in out.enumerate_pixels() {
        let src = rgb.get_pixel(x, y);
        assert_eq!(px.0, [src[0], src[1], src[2], 255]);
    }
}

#[test]
fn rotate_quarter_turn_is_counter_clockwise_and_swaps_extent() {
    let red = Rgba([255, 0, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    let mut img = RgbaImage::new(2, 1);
    img.put_pixel(0, 0, red);
    img.put_pixel(1, 0, blue);

    let out = rotate_expand(&img, 90.0);
    assert_eq!(out.dimensions(), (1, 2));
    assert_eq!(*out.get_pixel(0, 0), blue);
    assert_eq!(*out.get_pixel(0, 1), red);
}

#[test]
fn rotate_expands_bounding_box() {
    let img = gradient(20, 10);
    let out = rotate_expand(&img, 30.0);
    let (s, c) = (0.5f64, 3f64.sqrt() / 2.0);
    assert_eq!(out.width(), (10.0 * s + 20.0 * c).floor() as u32);
    assert_eq!(out.height(), (10.0 * c + 20.0 * s).floor() as u32);

    // Corners of the expanded box are not covered by the source.
    assert_eq!(out.get_pixel(0, 0)[3], 0);
    assert_eq!(out.get_pixel(out.width() - 1, out.height() - 1)[3], 0);
}

#[test]
fn rotate_there_and_back_recovers_interior() {
    let img = gradient(20, 20);
    let back = rotate_expand(&rotate_expand(&img, 30.0), -30.0);

    let off_x = (f64::from(back.width()) - 1.0) / 2.0 - (20.0 - 1.0) / 2.0;
    let off_y = (f64::from(back.height()) - 1.0) / 2.0 - (20.0 - 1.0) / 2.0;
    assert_eq!(off_x.fract(), 0.0);
    assert_eq!(off_y.fract(), 0.0);

    let mut total = 0u32;
    let mut samples = 0u32;
    for y in 4..16u32 {
        for x in 4..16u32 {
            let want = img.get_pixel(x, y);
            let got = back.get_pixel(x + off_x as u32, y + off_y as u32);
            assert_eq!(got[3], 255);
            for c in 0..3 {
                let diff = (i32::from(want[c]) - i32::from(got[c])).unsigned_abs();
                assert!(diff <= 4, "pixel ({x},{y}) channel {c} off by {diff}");
                total += diff;
                samples += 1;
            }
        }
    }
    assert!(f64::from(total) / f64::from(samples) < 1.5);
}

#[test]
fn blend_with_transparent_overlay_is_bit_identical() {
    let mut dst = vec![10u8, 20, 30, 40, 50, 60, 70, 80];
    let before = dst.clone();
    alpha_blend_row(&mut dst, 4, &[255, 255, 255, 0, 1, 2, 3, 0]);
    assert_eq!(dst, before);
}

#[test]
fn blend_with_opaque_overlay_copies_color_keeps_canvas_alpha() {
    let mut dst = vec![10u8, 20, 30, 40, 50, 60, 70, 80];
    alpha_blend_row(&mut dst, 4, &[1, 2, 3, 255, 4, 5, 6, 255]);
    assert_eq!(dst, vec![1, 2, 3, 40, 4, 5, 6, 80]);

    let mut rgb = vec![10u8, 20, 30];
    alpha_blend_row(&mut rgb, 3, &[200, 100, 0, 255]);
    assert_eq!(rgb, vec![200, 100, 0]);
}

#[test]
fn blend_half_alpha_mixes() {
    let mut dst = vec![0u8, 100, 255];
    alpha_blend_row(&mut dst, 3, &[255, 200, 255, 128]);
    assert_eq!(dst, vec![128, 150, 255]);
}

#[test]
fn alpha_blend_clips_negative_origin() {
    let mut canvas = Canvas::new(4, 4, Channels::Rgb);
    let overlay = RgbaImage::from_pixel(3, 3, Rgba([255, 255, 255, 255]));
    assert!(alpha_blend(&mut canvas, &overlay, (-2, -1)));

    for y in 0..4 {
        for x in 0..4 {
            let lit = x < 1 && y < 2;
            let want: &[u8] = if lit { &[255, 255, 255] } else { &[0, 0, 0] };
            assert_eq!(canvas.pixel(x, y).unwrap(), want, "pixel ({x},{y})");
        }
    }
}

#[test]
fn alpha_blend_clips_right_and_bottom_edges() {
    let mut canvas = Canvas::new(4, 4, Channels::Rgba);
    let overlay = RgbaImage::from_pixel(3, 3, Rgba([9, 9, 9, 255]));
    assert!(alpha_blend(&mut canvas, &overlay, (3, 3)));
    assert_eq!(canvas.pixel(3, 3).unwrap(), &[9, 9, 9, 255]);
    assert_eq!(canvas.pixel(2, 3).unwrap(), &[0, 0, 0, 255]);
}

#[test]
fn alpha_blend_fully_outside_is_noop() {
    let mut canvas = solid_canvas(4, 4, Channels::Rgb, [1, 2, 3]);
    let before = canvas.clone();
    let overlay = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
    for origin in [(4, 0), (0, 4), (-2, 0), (0, -2), (100, -100)] {
        assert!(!alpha_blend(&mut canvas, &overlay, origin));
    }
    assert_eq!(canvas, before);
}

#[test]
fn reset_copies_top_left_and_leaves_rest() {
    let mut canvas = solid_canvas(4, 3, Channels::Rgba, [7, 7, 7]);
    let bg = solid_canvas(2, 2, Channels::Rgb, [100, 110, 120]);
    reset_canvas(&mut canvas, &bg);

    assert_eq!(canvas.pixel(0, 0).unwrap(), &[100, 110, 120, 255]);
    assert_eq!(canvas.pixel(1, 1).unwrap(), &[100, 110, 120, 255]);
    assert_eq!(canvas.pixel(2, 0).unwrap(), &[7, 7, 7, 255]);
    assert_eq!(canvas.pixel(0, 2).unwrap(), &[7, 7, 7, 255]);
}

#[test]
fn reset_drops_alpha_for_rgb_canvas_and_clips_large_background() {
    let mut canvas = Canvas::new(2, 2, Channels::Rgb);
    let bg = solid_canvas(5, 5, Channels::Rgba, [1, 2, 3]);
    reset_canvas(&mut canvas, &bg);
    assert_eq!(canvas.as_bytes(), vec![1u8, 2, 3].repeat(4).as_slice());
}

#[test]
fn convert_channels_roundtrip_keeps_color() {
    let rgb = solid_canvas(2, 1, Channels::Rgb, [5, 6, 7]);
    let rgba = convert_channels(&rgb, Channels::Rgba);
    assert_eq!(rgba.pixel(1, 0).unwrap(), &[5, 6, 7, 255]);
    assert_eq!(convert_channels(&rgba, Channels::Rgb), rgb);
}

#[test]
fn reset_from_missing_path_is_asset_error() {
    let mut canvas = Canvas::new(1, 1, Channels::Rgb);
    let err = reset_canvas_from_path(&mut canvas, Path::new("target/nope/bg.png")).unwrap_err();
    assert!(matches!(err, crate::SpriteError::AssetLoad(_)));
}
