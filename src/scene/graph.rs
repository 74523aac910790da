use std::{borrow::Cow, path::Path};

use image::RgbaImage;

use crate::{
    assets::decode::load_rgba,
    foundation::core::{Point, Vec2},
    foundation::error::{SpriteError, SpriteResult},
    render::canvas::Canvas,
    render::compositor::{alpha_blend, rotate_expand},
    scene::node::{NodeId, SceneNode},
};

/// Arena-backed tree of sprites with eager rigid-transform propagation.
///
/// Translation and rotation applied to a node are applied identically to every descendant;
/// scale is per node. Rotation spins each sprite about its own centre, it does not orbit
/// descendants around an ancestor.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load `image_path` as a new node at `position`, optionally under `parent`.
    ///
    /// The image is normalized to RGBA and scaled by `scale` immediately.
    pub fn create(
        &mut self,
        image_path: &Path,
        position: Point,
        scale: f64,
        parent: Option<NodeId>,
    ) -> SpriteResult<NodeId> {
        let image = load_rgba(image_path)?;
        let name = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| image_path.display().to_string());
        self.create_from_image(name, image, position, scale, parent)
    }

    /// Same as [`SceneGraph::create`] for an already decoded image.
    pub fn create_from_image(
        &mut self,
        name: impl Into<String>,
        image: RgbaImage,
        position: Point,
        scale: f64,
        parent: Option<NodeId>,
    ) -> SpriteResult<NodeId> {
        if let Some(p) = parent
            && self.get(p).is_none()
        {
            return Err(SpriteError::validation(format!(
                "parent node {p:?} does not exist"
            )));
        }

        let id = NodeId(
            self.nodes
                .len()
                .try_into()
                .map_err(|_| SpriteError::validation("node id overflow"))?,
        );
        let node = SceneNode::new(name.into(), image, position, scale, parent)?;
        tracing::debug!(
            node = node.name(),
            ?id,
            ?parent,
            width = node.image().width(),
            height = node.image().height(),
            "created scene node"
        );
        self.nodes.push(node);
        if let Some(p) = parent {
            self.nodes[p.index()].children.push(id);
        }
        Ok(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` when the graph holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Look up a node.
    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.index())
    }

    /// Borrow a node.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this graph.
    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.index()]
    }

    /// Structural parent of `id`.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    /// Children of `id` in draw order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Nodes without a parent, in creation order.
    pub fn roots(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.parent.is_none())
            .map(|(i, _)| NodeId(i as u32))
    }

    /// `id` followed by all of its descendants, depth-first in draw order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.node(next).children.iter().rev().copied());
        }
        out
    }

    /// Translate `id` and its whole subtree by `(dx, dy)`.
    pub fn move_by(&mut self, id: NodeId, dx: f64, dy: f64) {
        let delta = Vec2::new(dx, dy);
        for n in self.descendants(id) {
            self.nodes[n.index()].position += delta;
        }
    }

    /// Move `id` to `(x, y)`, carrying its subtree along with the same delta.
    pub fn set_position(&mut self, id: NodeId, x: f64, y: f64) {
        let delta = Point::new(x, y) - self.node(id).position;
        self.move_by(id, delta.x, delta.y);
    }

    /// Add `degrees` to the angle of `id` and of every descendant. Positions do not change.
    pub fn rotate(&mut self, id: NodeId, degrees: f64) {
        for n in self.descendants(id) {
            self.nodes[n.index()].angle += degrees;
        }
    }

    /// Rescale the image of `id` from its original pixels. Children are not affected.
    pub fn scale_image(&mut self, id: NodeId, factor: f64) -> SpriteResult<()> {
        self.nodes[id.index()].set_scale(factor)
    }

    /// Composite `id` and then its subtree onto `canvas`, children over parents.
    ///
    /// A node whose top-left falls outside the canvas is skipped together with its whole
    /// subtree.
    pub fn draw(&self, id: NodeId, canvas: &mut Canvas) {
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let node = self.node(next);
            if !composite(node, canvas) {
                continue;
            }
            stack.extend(node.children.iter().rev().copied());
        }
    }

    /// Draw every root tree in creation order.
    pub fn draw_all(&self, canvas: &mut Canvas) {
        for root in self.roots() {
            self.draw(root, canvas);
        }
    }
}

/// Returns `false` when the node's top-left is off the canvas and nothing was drawn.
fn composite(node: &SceneNode, canvas: &mut Canvas) -> bool {
    let origin = (
        node.position.x.trunc() as i64,
        node.position.y.trunc() as i64,
    );
    let on_canvas = (0..i64::from(canvas.width())).contains(&origin.0)
        && (0..i64::from(canvas.height())).contains(&origin.1);
    if !on_canvas {
        tracing::trace!(node = node.name(), ?origin, "node outside canvas, subtree skipped");
        return false;
    }

    let rotated = if node.angle.rem_euclid(360.0) == 0.0 {
        Cow::Borrowed(&node.image)
    } else {
        Cow::Owned(rotate_expand(&node.image, node.angle))
    };
    // Origin is on the canvas, so only the right and bottom edges can clip.
    alpha_blend(canvas, &rotated, origin)
}

#[cfg(test)]
#[path = "../../tests/unit/scene/graph.rs"]
mod tests;
