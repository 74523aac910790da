use std::path::PathBuf;

use crate::{
    capture::frame::FrameSaver,
    foundation::core::Point,
    foundation::error::SpriteResult,
    render::canvas::Canvas,
    render::compositor::reset_canvas,
    scene::{graph::SceneGraph, node::NodeId},
};

/// Per-frame motion of one node.
#[derive(Clone, Debug, PartialEq)]
pub struct Animation {
    /// Node being driven; its subtree follows.
    pub node: NodeId,
    /// Canvas-space position per frame. Once exhausted the last one is held.
    pub positions: Vec<Point>,
    /// Degrees added to the node's angle before every frame after the first.
    pub spin_per_frame: f64,
}

impl Animation {
    /// Bring `graph` to the state of `frame` for this node.
    ///
    /// Frames must be applied in increasing order since spin accumulates.
    pub fn apply(&self, graph: &mut SceneGraph, frame: usize) {
        if let Some(p) = self
            .positions
            .get(frame)
            .or_else(|| self.positions.last())
        {
            graph.set_position(self.node, p.x, p.y);
        }
        if frame > 0 && self.spin_per_frame != 0.0 {
            graph.rotate(self.node, self.spin_per_frame);
        }
    }
}

/// Render `frames` frames: reset from `background`, animate, draw every root, save.
///
/// Animations are applied in slice order, so a child's absolute path overrides the offset it
/// inherited from an animated ancestor. Stops early if `saver` runs out of budget.
#[tracing::instrument(skip_all, fields(frames = frames, nodes = graph.len()))]
pub fn render_frames(
    graph: &mut SceneGraph,
    background: &Canvas,
    animations: &[Animation],
    frames: usize,
    saver: &mut FrameSaver,
) -> SpriteResult<Vec<PathBuf>> {
    let mut canvas = background.clone();
    let mut written = Vec::with_capacity(frames);

    for frame in 0..frames {
        reset_canvas(&mut canvas, background);
        for anim in animations {
            anim.apply(graph, frame);
        }
        graph.draw_all(&mut canvas);

        match saver.save_canvas(&canvas)? {
            Some(path) => written.push(path),
            None => {
                tracing::warn!(frame, "frame budget exhausted, stopping");
                break;
            }
        }
    }

    tracing::info!(
        frames = written.len(),
        dir = %saver.out_dir().display(),
        "rendered frame sequence"
    );
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/render/driver.rs"]
mod tests;
