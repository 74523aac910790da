use image::{Rgb, RgbImage};

use super::*;
use crate::encode::ffmpeg::is_ffmpeg_on_path;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_sequence").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_frame(dir: &Path, name: &str, w: u32, h: u32, shade: u8) {
    RgbImage::from_pixel(w, h, Rgb([shade, shade, shade]))
        .save(dir.join(name))
        .unwrap();
}

#[test]
fn collects_matching_frames_in_name_order() {
    let dir = scratch_dir("collect");
    write_frame(&dir, "frame_0002.png", 2, 2, 2);
    write_frame(&dir, "frame_0000.png", 2, 2, 0);
    write_frame(&dir, "frame_0001.png", 2, 2, 1);
    std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

    let frames = collect_frames(&dir, "png").unwrap();
    let names: Vec<_> = frames
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["frame_0000.png", "frame_0001.png", "frame_0002.png"]);

    assert_eq!(collect_frames(&dir, ".png").unwrap().len(), 3);
}

#[test]
fn empty_directory_fails_clearly() {
    let dir = scratch_dir("empty");
    std::fs::write(dir.join("frame_0000.jpg"), "not png").unwrap();
    let err = collect_frames(&dir, "png").unwrap_err();
    assert!(matches!(err, SpriteError::Encode(_)));
    assert!(err.to_string().contains("no .png images"));
}

#[test]
fn unsupported_container_is_rejected_up_front() {
    let dir = scratch_dir("unsupported");
    let out = dir.join("video.flv");
    let err = SequenceEncoder::new(&dir, &out, "png", "flv", Fps::whole(24).unwrap()).unwrap_err();
    assert!(matches!(err, SpriteError::UnsupportedFormat(_)));
    assert!(!out.exists());
}

#[test]
fn encode_on_empty_directory_produces_no_output() {
    let dir = scratch_dir("encode_empty");
    let out = dir.join("video.avi");
    let enc = SequenceEncoder::new(&dir, &out, "png", "avi", Fps::whole(24).unwrap()).unwrap();
    assert_eq!(enc.container(), ContainerFormat::Avi);
    assert!(enc.encode().is_err());
    assert!(!out.exists());
}

#[test]
fn encode_skips_mismatched_frames() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = scratch_dir("encode_skip");
    write_frame(&dir, "frame_0000.png", 6, 4, 10);
    write_frame(&dir, "frame_0001.png", 6, 4, 20);
    write_frame(&dir, "frame_0002.png", 3, 3, 30);
    write_frame(&dir, "frame_0003.png", 6, 4, 40);

    let out = dir.join("out").join("video.mp4");
    let summary = SequenceEncoder::new(&dir, &out, "png", "mp4", Fps::whole(12).unwrap())
        .unwrap()
        .encode()
        .unwrap();
    assert_eq!(summary.frames_written, 3);
    assert_eq!(summary.frames_skipped, 1);
    assert_eq!(summary.output, out);
    assert!(out.is_file());
}

#[test]
fn only_unreadable_frames_fail_without_output() {
    let dir = scratch_dir("unreadable_only");
    std::fs::write(dir.join("frame_0000.png"), "not a png").unwrap();
    std::fs::write(dir.join("frame_0001.png"), "still not a png").unwrap();

    let out = dir.join("video.avi");
    let err = SequenceEncoder::new(&dir, &out, "png", "avi", Fps::whole(24).unwrap())
        .unwrap()
        .encode()
        .unwrap_err();
    assert!(matches!(err, SpriteError::Encode(_)));
    assert!(err.to_string().contains("no readable .png images"));
    assert!(!out.exists());
}

#[test]
fn encode_skips_unreadable_leading_frame() {
    if !is_ffmpeg_on_path() {
        return;
    }
    let dir = scratch_dir("encode_bad_first");
    std::fs::write(dir.join("frame_0000.png"), "truncated").unwrap();
    write_frame(&dir, "frame_0001.png", 4, 4, 50);
    write_frame(&dir, "frame_0002.png", 4, 4, 60);

    let out = dir.join("video.avi");
    let summary = SequenceEncoder::new(&dir, &out, "png", "avi", Fps::whole(12).unwrap())
        .unwrap()
        .encode()
        .unwrap();
    assert_eq!(summary.frames_written, 2);
    assert_eq!(summary.frames_skipped, 1);
    assert!(out.is_file());
}
