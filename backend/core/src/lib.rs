pub mod error;
pub mod traits;
pub mod types;

pub use error::{GenerateError, VariantError, VariantStage};
pub use traits::{BackgroundRemoval, ImageHost, StyleTransfer};
pub use types::{
    Dimensions, GenerationRequest, GenerationResponse, SourceInput, StyleVariant, VariantResult,
};
