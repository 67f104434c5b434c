//! Aspect-preserving resize arithmetic.
//!
//! The longer original dimension maps exactly to the target long side; the
//! shorter one is scaled by the same ratio with truncating integer
//! conversion. There is deliberately no upscaling guard: a source smaller
//! than the target scales up linearly.

/// Long side of the preview tier.
pub const PREVIEW_LONG_SIDE: u32 = 768;

/// Long side of the high-resolution tier.
pub const HIGHRES_LONG_SIDE: u32 = 2400;

/// Compute `(new_width, new_height)` for a `target_long_side` resize.
///
/// Square inputs take the height-driven branch, so a square stays square.
pub fn scaled_dimensions(width: u32, height: u32, target_long_side: u32) -> (u32, u32) {
    if width > height {
        let new_height = (target_long_side as f64 / width as f64 * height as f64) as u32;
        (target_long_side, new_height)
    } else {
        let new_width = (target_long_side as f64 / height as f64 * width as f64) as u32;
        (new_width, target_long_side)
    }
}
