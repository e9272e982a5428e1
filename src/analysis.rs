//! The full scoring pass over one image and one selected face.

use serde::Serialize;

use crate::advice::{self, Advice};
use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use crate::score::ScoreBundle;
use crate::types::Detection;
use crate::{proportion, skin, structure, symmetry};

/// External landmark detector.
///
/// Implement this for whatever face-mesh model the host runs and pass it to
/// [`analyze_with`]. The engine only consumes its resolved output.
pub trait LandmarkDetector {
    /// Detect faces in an RGBA buffer. Landmarks must be in buffer coordinates.
    fn detect(&self, buffer: &PixelBuffer) -> Vec<Detection>;
}

/// Scores and recommendations for one face.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub scores: ScoreBundle,
    pub advice: Vec<Advice>,
}

/// The largest detection by box area, or landmark extent when it has no box.
/// Earlier detections win ties.
pub fn select_face(detections: &[Detection]) -> Option<&Detection> {
    let mut best: Option<(&Detection, f64)> = None;
    for det in detections {
        let area = det.selection_area();
        match best {
            Some((_, a)) if area <= a => {}
            _ => best = Some((det, area)),
        }
    }
    best.map(|(d, _)| d)
}

/// Score every aspect of `face`. Never fails: degenerate input yields
/// fallback sub-scores flagged in their status.
pub fn analyze(buffer: &PixelBuffer, face: &Detection) -> Analysis {
    let scores = ScoreBundle::new(
        symmetry::score(buffer, face),
        proportion::score(&face.landmarks),
        structure::score(&face.landmarks),
        skin::score(buffer, &face.landmarks),
    );
    tracing::debug!(
        overall = scores.overall,
        fully_computed = scores.fully_computed(),
        "analysis complete"
    );
    let advice = advice::generate(&scores);
    Analysis { scores, advice }
}

/// Pick the dominant face among `detections` and score it.
pub fn analyze_detections(buffer: &PixelBuffer, detections: &[Detection]) -> Result<Analysis> {
    let face = select_face(detections).ok_or(Error::NoFaceDetected)?;
    if detections.len() > 1 {
        tracing::debug!(count = detections.len(), "multiple faces, scoring the largest");
    }
    Ok(analyze(buffer, face))
}

/// Run `detector` on `buffer` and score the dominant face.
pub fn analyze_with<D: LandmarkDetector + ?Sized>(detector: &D, buffer: &PixelBuffer) -> Result<Analysis> {
    let detections = detector.detect(buffer);
    analyze_detections(buffer, &detections)
}
