// The seam between the API layer and the face-beautification core.
//
// The core (landmark detection, smoothing, reshaping, makeup) is an external
// component; the API layer only depends on this trait, so handlers can be
// exercised against substitutable stubs without doing any real image work.

use std::sync::Arc;

use image::RgbImage;

use crate::models::{BeautyConfig, FaceMeta};

/// Failure reported by the beautification backend.
#[derive(Debug, Clone)]
pub struct PipelineError(pub String);

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for PipelineError {}

/// Face-beautification capability.
///
/// Implementations should be assumed synchronous and CPU-bound; handlers call
/// them through `tokio::task::spawn_blocking` to keep the request dispatch
/// path free.
pub trait BeautyPipeline: Send + Sync {
    /// Detect the primary face in the image. `Ok(None)` means no usable face.
    fn analyze(&self, image: &RgbImage) -> Result<Option<FaceMeta>, PipelineError>;

    /// Apply the beauty configuration, returning the processed image and the
    /// detection metadata the processing was based on.
    fn apply(
        &self,
        image: &RgbImage,
        config: &BeautyConfig,
    ) -> Result<(RgbImage, Option<FaceMeta>), PipelineError>;
}

pub type SharedPipeline = Arc<dyn BeautyPipeline>;

/// Default no-op backend: returns the input unchanged and reports no face.
/// Used until a real beautification core is wired in at startup.
#[derive(Debug, Default)]
pub struct PassthroughPipeline;

impl BeautyPipeline for PassthroughPipeline {
    fn analyze(&self, _image: &RgbImage) -> Result<Option<FaceMeta>, PipelineError> {
        Ok(None)
    }

    fn apply(
        &self,
        image: &RgbImage,
        _config: &BeautyConfig,
    ) -> Result<(RgbImage, Option<FaceMeta>), PipelineError> {
        Ok((image.clone(), None))
    }
}
