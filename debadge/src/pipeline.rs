//! One-shot cleaning pipeline: load, rasterize the mask, inpaint, save.

use std::path::{Path, PathBuf};
use std::time::Instant;

use classical_inpaint::Method;
use image::GenericImageView;
use thiserror::Error;

use crate::mask::build_mask;
use crate::rect::Rect;

/// Radius of the neighborhood each synthesized pixel samples from.
const INPAINT_RADIUS: u32 = 3;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to load image {path}: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Failed to encode result {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error(transparent)]
    Inpaint(#[from] anyhow::Error),
}

impl PipelineError {
    /// Process exit code this failure maps to.
    pub fn exit_code(&self) -> u8 {
        match self {
            PipelineError::Load { .. } => 2,
            PipelineError::Encode { .. } => 3,
            PipelineError::Inpaint(_) => 1,
        }
    }
}

/// Remove the given rectangles from the image at `input` and write the
/// cleaned result to `output`. No partial output is written on failure.
pub fn clean_image(
    input: &Path,
    output: &Path,
    rects: &[Rect],
    method: Method,
) -> Result<(), PipelineError> {
    let started = Instant::now();

    let image = image::open(input).map_err(|source| PipelineError::Load {
        path: input.to_path_buf(),
        source,
    })?;
    let (width, height) = (image.width(), image.height());
    tracing::info!("loaded {}x{} image from {}", width, height, input.display());

    let mask = build_mask(width, height, rects);
    let coverage = mask.as_raw().iter().filter(|&&m| m != 0).count();
    tracing::debug!("mask covers {} pixels across {} rect(s)", coverage, rects.len());

    let cleaned = classical_inpaint::inpaint(&image, &mask, INPAINT_RADIUS, method)?;

    cleaned.save(output).map_err(|source| PipelineError::Encode {
        path: output.to_path_buf(),
        source,
    })?;
    tracing::info!("inpainted and saved in {:.2?}", started.elapsed());

    Ok(())
}
