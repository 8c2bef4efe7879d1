//! Correlation scoring for decoded images.
//!
//! Matching is an exhaustive template search: the template is slid over
//! every position where it fits inside the source, and each position is
//! scored by the summed absolute difference of all RGB channels,
//! normalized against the largest possible difference.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// Dampening applied to the best match confidence
///
/// Keeps a near-perfect correlation from reading as a 100% match.
pub const CONFIDENCE_DAMPENING: f64 = 0.9;

/// One candidate alignment of a template inside a source image
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemplateMatch {
    /// Left edge of the template inside the source
    pub x: u32,
    /// Top edge of the template inside the source
    pub y: u32,
    /// Match confidence in [0, 1]; 1 means pixel-identical
    pub confidence: f64,
}

/// Search `source` for every alignment of `template` scoring at least
/// `threshold`.
///
/// Matches are ranked best first; equal confidences keep row-major
/// position order. A template larger than the source yields no matches.
pub fn match_template(
    source: &RgbImage,
    template: &RgbImage,
    threshold: f64,
) -> Vec<TemplateMatch> {
    let (source_width, source_height) = source.dimensions();
    let (template_width, template_height) = template.dimensions();

    if template_width == 0
        || template_height == 0
        || template_width > source_width
        || template_height > source_height
    {
        return Vec::new();
    }

    let max_difference = u64::from(template_width) * u64::from(template_height) * 3 * 255;

    let mut matches = Vec::new();

    for y in 0..=(source_height - template_height) {
        for x in 0..=(source_width - template_width) {
            let difference = window_difference(source, template, x, y);
            let confidence = 1.0 - difference as f64 / max_difference as f64;

            if confidence >= threshold {
                matches.push(TemplateMatch { x, y, confidence });
            }
        }
    }

    matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    matches
}

/// Summed absolute channel difference between `template` and the window
/// of `source` whose top-left corner is `(x, y)`
fn window_difference(source: &RgbImage, template: &RgbImage, x: u32, y: u32) -> u64 {
    let mut difference = 0u64;

    for (tx, ty, template_pixel) in template.enumerate_pixels() {
        let source_pixel = source.get_pixel(x + tx, y + ty);
        difference += source_pixel
            .0
            .iter()
            .zip(template_pixel.0.iter())
            .map(|(s, t)| u64::from(s.abs_diff(*t)))
            .sum::<u64>();
    }

    difference
}

/// Similarity of two images as a percentage; higher is more similar.
///
/// Images of different dimensions are never compared and score 0.
/// Otherwise the best template match confidence is scaled by
/// [`CONFIDENCE_DAMPENING`], so identical images score 90.
pub fn image_similarity(first: &RgbImage, second: &RgbImage) -> f64 {
    if first.dimensions() != second.dimensions() {
        return 0.0;
    }

    let best = match_template(first, second, 0.0)
        .first()
        .map(|m| m.confidence)
        .unwrap_or(0.0);

    100.0 * CONFIDENCE_DAMPENING * best
}
