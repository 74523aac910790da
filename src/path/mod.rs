//! Smooth motion paths through user-picked anchors.

/// Anchor collection and preview drawing on a background.
pub(crate) mod debug;
pub(crate) mod interpolate;
pub(crate) mod spline;
