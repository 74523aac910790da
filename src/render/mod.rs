//! Pixel-level work: the canvas, compositing primitives and the frame loop.

pub(crate) mod canvas;
pub(crate) mod compositor;
pub(crate) mod driver;
