//! Skin heuristics over a downsampled face region: sharpness, redness, texture.
//!
//! None of these are clinical measures. Sharpness is a 4-neighbour gradient
//! energy proxy, redness compares mean red to mean green, and texture is the
//! luminance variance of the sample.

use crate::pixels::{ImageAccess, PixelBuffer};
use crate::score::{round_half_up, SubScore};
use crate::types::LandmarkSet;

/// Minimum side of the face region, in source pixels.
pub const MIN_REGION: f64 = 40.0;
/// Largest working sample; the region is scaled down to fit.
pub const MAX_SAMPLE_WIDTH: u32 = 120;
pub const MAX_SAMPLE_HEIGHT: u32 = 160;

/// Average gradient that maps to a sharpness score of 100.
pub const SHARPNESS_FULL_GRADIENT: f64 = 18.0;
/// Red/green ratio at or below which no redness penalty applies.
pub const REDNESS_ONSET: f64 = 1.04;
/// Ratio span over which the redness penalty grows from 0 to 1.
pub const REDNESS_SPAN: f64 = 0.5;
/// Luminance variance that drives the texture score to 0.
pub const TEXTURE_FULL_VARIANCE: f64 = 900.0;

pub const SHARPNESS_WEIGHT: f64 = 0.35;
pub const REDNESS_WEIGHT: f64 = 0.2;
pub const TEXTURE_WEIGHT: f64 = 0.45;

/// Source rectangle the working sample is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Landmark extent snapped outward to whole pixels, clamped to the buffer,
/// grown to at least [`MIN_REGION`] and then clipped again.
pub fn sample_region(set: &LandmarkSet, buffer_width: u32, buffer_height: u32) -> Option<SampleRegion> {
    let extent = set.bounding_box()?;
    if !(extent.x.is_finite() && extent.y.is_finite() && extent.width.is_finite() && extent.height.is_finite()) {
        return None;
    }
    let bw = buffer_width as f64;
    let bh = buffer_height as f64;
    // The minimum size must not pull a face lying wholly outside the frame back in.
    if extent.right() < 0.0 || extent.bottom() < 0.0 || extent.x >= bw || extent.y >= bh {
        return None;
    }

    let min_x = extent.x.floor().max(0.0);
    let max_x = extent.right().ceil().min(bw - 1.0);
    let min_y = extent.y.floor().max(0.0);
    let max_y = extent.bottom().ceil().min(bh - 1.0);

    let width = (max_x - min_x).max(MIN_REGION).min(bw - min_x);
    let height = (max_y - min_y).max(MIN_REGION).min(bh - min_y);
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    Some(SampleRegion {
        x: min_x,
        y: min_y,
        width,
        height,
    })
}

/// Working sample dimensions: the region scaled down to fit the cap, aspect preserved.
pub fn sample_size(region: &SampleRegion) -> (u32, u32) {
    let scale = (MAX_SAMPLE_WIDTH as f64 / region.width)
        .min(MAX_SAMPLE_HEIGHT as f64 / region.height)
        .min(1.0);
    let w = ((region.width * scale).round() as u32).clamp(1, MAX_SAMPLE_WIDTH);
    let h = ((region.height * scale).round() as u32).clamp(1, MAX_SAMPLE_HEIGHT);
    (w, h)
}

/// The three component scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkinComponents {
    pub sharpness: f64,
    pub redness: f64,
    pub texture: f64,
}

impl SkinComponents {
    /// Measure a working sample. `None` if it has no interior pixels.
    pub fn measure<I: ImageAccess>(sample: &I) -> Option<Self> {
        let w = sample.width() as i64;
        let h = sample.height() as i64;
        if w < 3 || h < 3 {
            return None;
        }
        Some(Self {
            sharpness: sharpness_score(sample),
            redness: redness_score(sample),
            texture: texture_score(sample),
        })
    }

    pub fn combined(&self) -> f64 {
        self.sharpness * SHARPNESS_WEIGHT
            + self.redness * REDNESS_WEIGHT
            + self.texture * TEXTURE_WEIGHT
    }
}

/// Mean 4-neighbour absolute luminance difference over interior pixels, scaled.
fn sharpness_score<I: ImageAccess>(sample: &I) -> f64 {
    let w = sample.width() as i64;
    let h = sample.height() as i64;
    let mut total = 0.0;
    let mut count = 0usize;
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let g = sample.luminance_at(x, y);
            total += (g - sample.luminance_at(x - 1, y)).abs()
                + (g - sample.luminance_at(x + 1, y)).abs()
                + (g - sample.luminance_at(x, y - 1)).abs()
                + (g - sample.luminance_at(x, y + 1)).abs();
            count += 1;
        }
    }
    let avg_grad = total / count as f64;
    round_half_up(avg_grad / SHARPNESS_FULL_GRADIENT * 100.0).clamp(0.0, 100.0)
}

fn redness_score<I: ImageAccess>(sample: &I) -> f64 {
    let (mut r_sum, mut g_sum) = (0.0, 0.0);
    for y in 0..sample.height() as i64 {
        for x in 0..sample.width() as i64 {
            let px = sample.get_pixel(x, y);
            r_sum += px[0] as f64;
            g_sum += px[1] as f64;
        }
    }
    let n = sample.width() as f64 * sample.height() as f64;
    let red_ratio = (r_sum / n) / (g_sum / n + 1.0);
    let penalty = ((red_ratio - REDNESS_ONSET) / REDNESS_SPAN).clamp(0.0, 1.0);
    (100.0 - penalty * 100.0).max(0.0)
}

fn texture_score<I: ImageAccess>(sample: &I) -> f64 {
    let mut gray = Vec::with_capacity(sample.width() as usize * sample.height() as usize);
    for y in 0..sample.height() as i64 {
        for x in 0..sample.width() as i64 {
            gray.push(sample.luminance_at(x, y));
        }
    }
    let n = gray.len() as f64;
    let mean = gray.iter().sum::<f64>() / n;
    let variance = gray.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    round_half_up(100.0 - variance / TEXTURE_FULL_VARIANCE * 100.0).clamp(0.0, 100.0)
}

/// Score skin appearance inside the landmark extent.
pub fn score(buffer: &PixelBuffer, set: &LandmarkSet) -> SubScore {
    let Some(region) = sample_region(set, buffer.width(), buffer.height()) else {
        return SubScore::neutral("face region lies outside the image");
    };
    let (sw, sh) = sample_size(&region);
    let sample = buffer.resample(region.x, region.y, region.width, region.height, sw, sh);

    let Some(c) = SkinComponents::measure(&sample) else {
        return SubScore::neutral("skin sample smaller than 3x3");
    };
    tracing::debug!(
        ?region,
        sharpness = c.sharpness,
        redness = c.redness,
        texture = c.texture,
        "skin"
    );
    SubScore::computed(c.combined())
}
