// src/transcode.rs

//! The per-image transcode pipeline: read file bytes, decode to a raster,
//! resize to the exact cell dimensions, re-encode as PNG, base64 the
//! result. Each stage fails distinctly so the caller can report precisely
//! and keep rendering the rest of the batch.
//!
//! Target dimensions are applied directly with no aspect-ratio
//! preservation; the grid's fixed-cell model wants every cell filled.
//! Transcoding is pure per call and caches nothing — re-rendering the same
//! path re-reads and re-encodes it. A (path, width, height) memo would be a
//! straightforward extension but is not part of this contract.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::imageops::FilterType;
use image::ImageFormat;
use log::trace;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// A protocol-ready payload: base64 (standard alphabet, padded) of a PNG
/// byte stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub base64: String,
}

/// One error kind per pipeline stage. `Read` and `Decode` failures are
/// per-image conditions the render loop skips past; they never abort the
/// batch.
#[derive(Debug, Error)]
pub enum TranscodeError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode resized {path} as PNG: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Runs the full pipeline for one image.
pub fn transcode(
    path: &Path,
    target_width: u32,
    target_height: u32,
) -> Result<EncodedImage, TranscodeError> {
    let bytes = std::fs::read(path).map_err(|source| TranscodeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let decoded = image::load_from_memory(&bytes).map_err(|source| TranscodeError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    // Lanczos3 matches the grid's quality expectation; resize_exact keeps
    // the aspect-distorting semantics of forcing both dimensions.
    let resized = decoded.resize_exact(target_width, target_height, FilterType::Lanczos3);

    let mut png_bytes = Vec::new();
    resized
        .write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)
        .map_err(|source| TranscodeError::Encode {
            path: path.to_path_buf(),
            source,
        })?;

    trace!(
        "transcoded {} to {}x{} ({} PNG bytes)",
        path.display(),
        target_width,
        target_height,
        png_bytes.len()
    );

    Ok(EncodedImage {
        base64: BASE64.encode(&png_bytes),
    })
}
