//! Mirrored-luminance symmetry over a padded face region.

use crate::pixels::{ImageAccess, PixelBuffer};
use crate::score::SubScore;
use crate::types::{BoundingBox, Detection};

/// Fraction of the face box added on every side before comparing halves.
pub const PADDING: f64 = 0.1;

/// Average mirrored luminance difference treated as fully asymmetric.
pub const FULL_ASYMMETRY_DIFF: f64 = 60.0;

/// Padded crop in integer pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Grow `face` by [`PADDING`] on each side and clamp it to the buffer.
pub fn padded_region(face: &BoundingBox, buffer_width: u32, buffer_height: u32) -> Region {
    let sx = (face.x - face.width * PADDING).max(0.0);
    let sy = (face.y - face.height * PADDING).max(0.0);
    let sw = (buffer_width as f64 - sx).min(face.width * (1.0 + PADDING * 2.0));
    let sh = (buffer_height as f64 - sy).min(face.height * (1.0 + PADDING * 2.0));

    let x = (sx.floor() as u32).min(buffer_width);
    let y = (sy.floor() as u32).min(buffer_height);
    Region {
        x,
        y,
        width: (sw.max(0.0).floor() as u32).min(buffer_width - x),
        height: (sh.max(0.0).floor() as u32).min(buffer_height - y),
    }
}

/// Mean absolute luminance difference between column `x` and `width - 1 - x`,
/// over the left half of every row. `None` if there is no mirror pair.
pub fn mirrored_difference<I: ImageAccess>(region: &I) -> Option<f64> {
    let w = region.width() as i64;
    let h = region.height() as i64;
    let half = w / 2;
    if half == 0 || h == 0 {
        return None;
    }

    let mut total = 0.0;
    for y in 0..h {
        for x in 0..half {
            let left = region.luminance_at(x, y);
            let right = region.luminance_at(w - 1 - x, y);
            total += (left - right).abs();
        }
    }
    Some(total / (half * h) as f64)
}

/// Score left/right luminance symmetry of the detected face.
pub fn score(buffer: &PixelBuffer, face: &Detection) -> SubScore {
    let Some(face_box) = face.face_box() else {
        return SubScore::neutral("no landmarks or bounding box");
    };
    if face_box.is_degenerate() {
        return SubScore::neutral("face box has zero area");
    }

    let region = padded_region(&face_box, buffer.width(), buffer.height());
    let crop = buffer.crop(region.x, region.y, region.width, region.height);
    let Some(avg_diff) = mirrored_difference(&crop) else {
        return SubScore::neutral("padded face region is empty");
    };
    tracing::debug!(?region, avg_diff, "symmetry");

    SubScore::computed(100.0 - (avg_diff / FULL_ASYMMETRY_DIFF) * 100.0)
}
