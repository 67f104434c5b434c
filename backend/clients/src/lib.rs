//! External capability adapters.
//!
//! Three thin clients over the services the pipeline delegates to: Gemini
//! style transfer, rembg-compatible background removal, and the imgBB image
//! host. Each owns a `reqwest::Client` with a bounded timeout so one stalled
//! dependency cannot hang a request.

pub mod gemini;
pub mod imgbb;
pub mod rembg;

pub use gemini::{GeminiClient, GeminiConfig};
pub use imgbb::{ImgbbClient, ImgbbConfig};
pub use rembg::{RembgClient, RembgConfig};
