use image::{Rgb, RgbImage, Rgba, RgbaImage};

use super::*;
use crate::render::canvas::Channels;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_scene_config").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_fill_missing_fields() {
    let cfg = SceneConfig::from_json(
        r#"{ "background": "bg.png", "nodes": [ { "image": "a.png" } ] }"#,
    )
    .unwrap();
    assert_eq!(cfg.fps, Fps { num: 24, den: 1 });
    assert_eq!(cfg.seconds, 5);
    assert_eq!(cfg.frame_count(), 120);
    let node = &cfg.nodes[0];
    assert_eq!(node.position, [0.0, 0.0]);
    assert_eq!(node.scale, 1.0);
    assert_eq!(node.spin, 0.0);
    assert!(node.path.is_empty() && node.children.is_empty());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = SceneConfig::from_json(r#"{ "background": 3 }"#).unwrap_err();
    assert!(matches!(err, SpriteError::Serde(_)));
}

#[test]
fn invalid_values_are_rejected() {
    let zero_fps = r#"{ "background": "bg.png", "fps": { "num": 0, "den": 1 } }"#;
    assert!(matches!(
        SceneConfig::from_json(zero_fps).unwrap_err(),
        SpriteError::Validation(_)
    ));

    let nested_bad_scale = r#"{
        "background": "bg.png",
        "nodes": [ { "image": "a.png", "children": [ { "image": "b.png", "scale": -1 } ] } ]
    }"#;
    assert!(matches!(
        SceneConfig::from_json(nested_bad_scale).unwrap_err(),
        SpriteError::Validation(_)
    ));
}

#[test]
fn load_resolves_paths_against_config_dir() {
    let dir = scratch_dir("resolve");
    RgbImage::from_pixel(8, 6, Rgb([5, 5, 5]))
        .save(dir.join("bg.png"))
        .unwrap();
    std::fs::create_dir_all(dir.join("sprites")).unwrap();
    RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]))
        .save(dir.join("sprites").join("ball.png"))
        .unwrap();
    RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255]))
        .save(dir.join("sprites").join("moon.png"))
        .unwrap();
    std::fs::write(
        dir.join("scene.json"),
        r#"{
            "background": "bg.png",
            "fps": { "num": 4, "den": 1 },
            "seconds": 1,
            "nodes": [ {
                "image": "sprites/ball.png",
                "position": [1, 1],
                "spin": 10,
                "path": [[0, 0], [3, 3], [6, 0]],
                "children": [ { "image": "sprites/moon.png", "position": [4, 1] } ]
            } ]
        }"#,
    )
    .unwrap();

    let loaded = SceneConfig::load(&dir.join("scene.json")).unwrap();
    assert_eq!(loaded.root, dir);
    let scene = loaded.build().unwrap();

    assert_eq!(scene.frame_count, 4);
    assert_eq!(scene.background.width(), 8);
    assert_eq!(scene.background.channels(), Channels::Rgb);
    assert_eq!(scene.graph.len(), 2);

    let ball = scene.graph.roots().next().unwrap();
    assert_eq!(scene.graph.node(ball).name(), "ball");
    let moon = scene.graph.children(ball)[0];
    assert_eq!(scene.graph.node(moon).name(), "moon");
    assert_eq!(scene.graph.node(moon).position(), Point::new(4.0, 1.0));

    assert_eq!(scene.animations.len(), 1);
    let anim = &scene.animations[0];
    assert_eq!(anim.node, ball);
    assert_eq!(anim.spin_per_frame, 10.0);
    assert_eq!(anim.positions.len(), 4);
    assert_eq!(anim.positions[0].x, 0.0);
    assert!(anim.positions[0].y.abs() < 1e-9);
    assert_eq!(anim.positions[3].x, 6.0);
}

#[test]
fn single_anchor_path_leaves_node_static() {
    let dir = scratch_dir("single_anchor");
    RgbImage::new(4, 4).save(dir.join("bg.png")).unwrap();
    RgbaImage::new(1, 1).save(dir.join("dot.png")).unwrap();
    let cfg = SceneConfig::from_json(
        r#"{ "background": "bg.png", "seconds": 1,
             "nodes": [ { "image": "dot.png", "path": [[1, 1]] } ] }"#,
    )
    .unwrap();
    let scene = cfg.build(&dir).unwrap();
    assert!(scene.animations.is_empty());
}

#[test]
fn missing_image_is_an_asset_error() {
    let dir = scratch_dir("missing");
    RgbImage::new(4, 4).save(dir.join("bg.png")).unwrap();
    let cfg = SceneConfig::from_json(
        r#"{ "background": "bg.png", "nodes": [ { "image": "nope.png" } ] }"#,
    )
    .unwrap();
    assert!(matches!(
        cfg.build(&dir).unwrap_err(),
        SpriteError::AssetLoad(_)
    ));
}
