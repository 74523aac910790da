//! Sprite tree and its JSON description.

pub(crate) mod config;
pub(crate) mod graph;
pub(crate) mod node;
