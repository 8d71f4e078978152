//! Image loading helpers.
//!
//! The pipeline hands whole images to the text-detection collaborator;
//! these helpers cover loading them from disk in whatever format the
//! `image` crate supports and normalizing to 8-bit RGB.

use crate::core::AnalysisError;
use image::{DynamicImage, RgbImage};

/// Converts a DynamicImage of any color format to an 8-bit RgbImage.
pub fn dynamic_to_rgb(img: DynamicImage) -> RgbImage {
    img.to_rgb8()
}

/// Loads an image from a file path and converts it to RgbImage.
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoad` if the file cannot be opened or
/// decoded.
pub fn load_image(path: &std::path::Path) -> Result<RgbImage, AnalysisError> {
    let img = image::open(path).map_err(AnalysisError::ImageLoad)?;
    Ok(dynamic_to_rgb(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file() {
        let result = load_image(std::path::Path::new("/nonexistent/image.png"));
        assert!(matches!(result, Err(AnalysisError::ImageLoad(_))));
    }

    #[test]
    fn test_dynamic_to_rgb() {
        let gray = DynamicImage::new_luma8(4, 4);
        let rgb = dynamic_to_rgb(gray);
        assert_eq!(rgb.dimensions(), (4, 4));
    }
}
