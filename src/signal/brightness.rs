//! Per-row brightness extraction from a stereo image pair.
//!
//! Taking the brighter of the two sensor images at each sampled column makes
//! the profile robust to specular dropouts in either single image, and the
//! fixed column count bounds per-frame cost independent of image width.

use crate::sensor::SensorImage;

/// Proportion of the image height used for brightness extraction,
/// symmetric about the vertical midpoint.
pub const BAND_PROPORTION: f32 = 0.75;

/// Number of uniformly spaced columns sampled per row.
pub const COLUMN_SAMPLES: u32 = 10;

/// Computes a 1-D brightness profile from a stereo image pair.
///
/// Returns one normalized intensity in `[0, 1]` per row of the central
/// vertical band, top-to-bottom. Each row's value is the maximum over
/// `COLUMN_SAMPLES` sampled columns of the brighter pixel between the two
/// images.
///
/// Returns `None` when fewer than two valid, same-sized images are supplied;
/// the caller must skip the frame entirely in that case.
pub fn compute_brightness(images: &[SensorImage]) -> Option<Vec<f32>> {
    if images.len() < 2 {
        return None;
    }
    let (first, second) = (&images[0], &images[1]);
    if !first.is_valid()
        || !second.is_valid()
        || first.width() != second.width()
        || first.height() != second.height()
    {
        return None;
    }

    let width = first.width();
    let height = first.height();
    let band_height = (height as f32 * BAND_PROPORTION) as u32;
    let band_start = (height - band_height) / 2;

    let mut profile = Vec::with_capacity(band_height as usize);
    for y in band_start..band_start + band_height {
        let mut row_max = 0u8;
        for k in 0..COLUMN_SAMPLES {
            let x = k * (width - 1) / (COLUMN_SAMPLES - 1);
            let value = first.pixel(x, y).max(second.pixel(x, y));
            row_max = row_max.max(value);
        }
        profile.push(f32::from(row_max) / 255.0);
    }

    Some(profile)
}
