use image::{RgbaImage, imageops::FilterType};

use crate::{
    foundation::core::Point,
    foundation::error::{SpriteError, SpriteResult},
};

/// Handle to a node stored in a [`crate::SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// One sprite in the scene tree.
///
/// Nodes are owned by their graph; `parent` and `children` are handles into the same arena.
#[derive(Clone, Debug)]
pub struct SceneNode {
    pub(crate) name: String,
    pub(crate) original: RgbaImage,
    pub(crate) image: RgbaImage,
    pub(crate) position: Point,
    pub(crate) scale: f64,
    pub(crate) angle: f64,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl SceneNode {
    pub(crate) fn new(
        name: String,
        original: RgbaImage,
        position: Point,
        scale: f64,
        parent: Option<NodeId>,
    ) -> SpriteResult<Self> {
        let image = scaled(&original, scale)?;
        Ok(Self {
            name,
            original,
            image,
            position,
            scale,
            angle: 0.0,
            parent,
            children: Vec::new(),
        })
    }

    /// Label used in log records (asset file stem by default).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Source pixels as loaded.
    pub fn original_image(&self) -> &RgbaImage {
        &self.original
    }

    /// Pixels at the current scale, before rotation.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Canvas-space top-left of the unrotated scaled image.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Scale factor applied to this node only.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Accumulated rotation in degrees.
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Structural parent, if any.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in draw order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub(crate) fn set_scale(&mut self, factor: f64) -> SpriteResult<()> {
        self.image = scaled(&self.original, factor)?;
        self.scale = factor;
        Ok(())
    }
}

fn scaled(original: &RgbaImage, factor: f64) -> SpriteResult<RgbaImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(SpriteError::validation(format!(
            "scale factor must be positive and finite, got {factor}"
        )));
    }

    let (w, h) = original.dimensions();
    let new_w = ((f64::from(w) * factor) as u32).max(1);
    let new_h = ((f64::from(h) * factor) as u32).max(1);
    if (new_w, new_h) == (w, h) {
        return Ok(original.clone());
    }
    Ok(image::imageops::resize(
        original,
        new_w,
        new_h,
        FilterType::Triangle,
    ))
}
