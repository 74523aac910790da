//! Spritegraph is a small 2D raster scene graph for sprite animation.
//!
//! Sprites (RGBA images) are arranged in a parent/child tree. Moving or rotating a node moves or
//! rotates its whole subtree; each sprite then spins about its own centre when it is drawn.
//! Motion paths are natural cubic splines through a handful of anchors, sampled once per frame.
//!
//! # Pipeline overview
//!
//! 1. **Describe**: build a [`SceneGraph`] by hand or from a [`SceneConfig`] JSON file
//! 2. **Animate**: drive node positions and spin per frame with [`Animation`]s
//! 3. **Render**: [`render_frames`] composites every root onto a background-reset [`Canvas`]
//!    and writes numbered PNG frames through a [`FrameSaver`]
//! 4. **Encode** (optional): [`SequenceEncoder`] streams the frames to the system `ffmpeg`
//!
//! Canvases are straight-alpha, 8 bits per channel, RGB or RGBA. Coordinates are pixels with
//! x to the right and y down; positive angles turn counter-clockwise on screen.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod capture;
mod encode;
mod foundation;
mod path;
mod render;
mod scene;

pub use assets::decode::{decode_rgba, load_rgba, open_image, to_rgba};
pub use capture::frame::{ChannelOrder, FrameSaver, FrameSource, RawFrame};
pub use encode::container::ContainerFormat;
pub use encode::ffmpeg::{EncodeConfig, FfmpegEncoder, is_ffmpeg_on_path};
pub use encode::sequence::{EncodeSummary, SequenceEncoder, collect_frames};
pub use foundation::core::{Affine, Fps, Point, Vec2};
pub use foundation::error::{SpriteError, SpriteResult};
pub use path::debug::{ANCHOR_COLOR, AnchorCanvas, SAMPLE_COLOR};
pub use path::interpolate::{AnchorPath, Interpolation, interpolate};
pub use path::spline::NaturalCubicSpline;
pub use render::canvas::{Canvas, Channels, ensure_parent_dir, save};
pub use render::compositor::{
    alpha_blend, alpha_blend_row, convert_channels, reset_canvas, reset_canvas_from_path,
    rotate_expand,
};
pub use render::driver::{Animation, render_frames};
pub use scene::config::{BuiltScene, LoadedScene, NodeConfig, SceneConfig};
pub use scene::graph::SceneGraph;
pub use scene::node::{NodeId, SceneNode};
