use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use crate::{
    foundation::core::{Fps, Point},
    foundation::error::{SpriteError, SpriteResult},
    path::interpolate::interpolate,
    render::canvas::Canvas,
    render::driver::Animation,
    scene::{graph::SceneGraph, node::NodeId},
};

fn default_fps() -> Fps {
    Fps { num: 24, den: 1 }
}

fn default_seconds() -> u32 {
    5
}

fn default_scale() -> f64 {
    1.0
}

/// JSON-facing description of an animated scene.
///
/// Relative image paths are resolved against the directory handed to [`SceneConfig::build`]
/// (the config file's directory when loaded through [`SceneConfig::load`]).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneConfig {
    /// Background image; its size and channel count fix the canvas.
    pub background: PathBuf,
    /// Output frame rate.
    #[serde(default = "default_fps")]
    pub fps: Fps,
    /// Clip length in whole seconds.
    #[serde(default = "default_seconds")]
    pub seconds: u32,
    /// Root nodes, drawn in order.
    #[serde(default)]
    pub nodes: Vec<NodeConfig>,
}

/// One sprite and its subtree.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NodeConfig {
    /// Sprite image.
    pub image: PathBuf,
    /// Initial top-left corner in canvas pixels.
    #[serde(default)]
    pub position: [f64; 2],
    /// Scale applied at load time.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Degrees of counter-clockwise rotation added every frame, shared with the subtree.
    #[serde(default)]
    pub spin: f64,
    /// Anchors of the path followed by the node's top-left corner, in canvas pixels.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<[f64; 2]>,
    /// Child nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeConfig>,
}

/// A scene ready for [`crate::render_frames`].
#[derive(Debug)]
pub struct BuiltScene {
    /// Loaded node tree.
    pub graph: SceneGraph,
    /// Background canvas.
    pub background: Canvas,
    /// Per-node motion in pre-order.
    pub animations: Vec<Animation>,
    /// Frames in the clip.
    pub frame_count: usize,
}

/// Parsed config together with the directory its paths are relative to.
#[derive(Clone, Debug)]
pub struct LoadedScene {
    /// Parsed description.
    pub config: SceneConfig,
    /// Base directory for relative paths.
    pub root: PathBuf,
}

impl SceneConfig {
    /// Parse a scene description from JSON text.
    pub fn from_json(text: &str) -> SpriteResult<Self> {
        let cfg: Self = serde_json::from_str(text)
            .map_err(|e| SpriteError::serde(format!("parse scene JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a scene description file.
    pub fn load(path: &Path) -> SpriteResult<LoadedScene> {
        let f = File::open(path).map_err(|e| {
            SpriteError::asset_load(format!("open scene '{}': {e}", path.display()))
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            SpriteError::serde(format!("parse scene '{}': {e}", path.display()))
        })?;
        config.validate()?;
        let root = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(LoadedScene { config, root })
    }

    /// Check values serde cannot reject on its own.
    pub fn validate(&self) -> SpriteResult<()> {
        self.fps.validate()?;
        if self.seconds == 0 {
            return Err(SpriteError::validation("scene seconds must be > 0"));
        }
        let mut stack: Vec<&NodeConfig> = self.nodes.iter().collect();
        while let Some(node) = stack.pop() {
            node.validate()?;
            stack.extend(node.children.iter());
        }
        Ok(())
    }

    /// Frames in the clip.
    pub fn frame_count(&self) -> usize {
        self.fps.frames_in(self.seconds)
    }

    /// Load every image and fit every path.
    pub fn build(&self, root: &Path) -> SpriteResult<BuiltScene> {
        let background = Canvas::open(&resolve(root, &self.background))?;
        let frame_count = self.frame_count();
        let mut graph = SceneGraph::new();
        let mut animations = Vec::new();

        let mut stack: Vec<(&NodeConfig, Option<NodeId>)> =
            self.nodes.iter().rev().map(|n| (n, None)).collect();
        while let Some((node, parent)) = stack.pop() {
            let [x, y] = node.position;
            let id = graph.create(
                &resolve(root, &node.image),
                Point::new(x, y),
                node.scale,
                parent,
            )?;
            if let Some(anim) = node.animation(id, frame_count)? {
                animations.push(anim);
            }
            stack.extend(node.children.iter().rev().map(|c| (c, Some(id))));
        }

        tracing::debug!(
            nodes = graph.len(),
            animated = animations.len(),
            frame_count,
            "built scene"
        );
        Ok(BuiltScene {
            graph,
            background,
            animations,
            frame_count,
        })
    }
}

impl LoadedScene {
    /// Build relative to the config file's directory.
    pub fn build(&self) -> SpriteResult<BuiltScene> {
        self.config.build(&self.root)
    }
}

impl NodeConfig {
    fn validate(&self) -> SpriteResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(SpriteError::validation(format!(
                "node '{}': scale must be finite and > 0, got {}",
                self.image.display(),
                self.scale
            )));
        }
        if !self.spin.is_finite() || !self.position.iter().all(|v| v.is_finite()) {
            return Err(SpriteError::validation(format!(
                "node '{}': position and spin must be finite",
                self.image.display()
            )));
        }
        Ok(())
    }

    fn animation(&self, node: NodeId, frame_count: usize) -> SpriteResult<Option<Animation>> {
        let positions = if self.path.is_empty() {
            Vec::new()
        } else {
            let anchors: Vec<Point> = self.path.iter().map(|&[x, y]| Point::new(x, y)).collect();
            interpolate(&anchors, frame_count)?.into_points()
        };
        if positions.is_empty() && self.spin == 0.0 {
            return Ok(None);
        }
        Ok(Some(Animation {
            node,
            positions,
            spin_per_frame: self.spin,
        }))
    }
}

fn resolve(root: &Path, p: &Path) -> PathBuf {
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        root.join(p)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
