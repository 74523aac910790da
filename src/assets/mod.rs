/// Image decoding into straight-alpha RGBA.
pub(crate) mod decode;
