//! Imaging primitives for the cartoonification pipeline.
//!
//! Decoding, lossless PNG encoding, and the deterministic resize arithmetic
//! shared by the preview and high-resolution tiers.

pub mod buffer;
pub mod mime;
pub mod resize;

pub use buffer::{ImageBuffer, ImagingError};
pub use mime::{is_image_mime, sniff_image_mime};
pub use resize::{scaled_dimensions, HIGHRES_LONG_SIDE, PREVIEW_LONG_SIDE};
