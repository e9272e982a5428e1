//! Face aspect ratio and inter-eye distance against fixed targets.

use crate::landmarks::{LEFT_EYE, MIN_LANDMARKS, RIGHT_EYE};
use crate::score::SubScore;
use crate::types::LandmarkSet;

/// Target height / width of the landmark extent.
pub const TARGET_ASPECT: f64 = 1.62;
/// Target eye-centroid distance / landmark-extent width.
pub const TARGET_EYE_SPACING: f64 = 0.36;
/// Share of the aspect term in the final score; the eye term gets the rest.
pub const ASPECT_WEIGHT: f64 = 0.7;
pub const EYE_WEIGHT: f64 = 0.3;
/// Proportion never fully disqualifies.
pub const MIN_SCORE: f64 = 10.0;

/// Measurements the proportion score is derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    pub width: f64,
    pub height: f64,
    /// Distance between the eye centroids, if the mesh has the eye indices.
    pub eye_distance: Option<f64>,
}

impl Proportions {
    /// Returns `None` if the mesh has too few points or a zero-size extent.
    pub fn from_landmarks(set: &LandmarkSet) -> Option<Self> {
        if set.len() < MIN_LANDMARKS {
            return None;
        }
        let extent = set.bounding_box()?;
        if extent.is_degenerate() {
            return None;
        }
        let eye_distance = match (set.centroid(&LEFT_EYE), set.centroid(&RIGHT_EYE)) {
            (Some(l), Some(r)) => Some(l.distance(&r)),
            _ => None,
        };
        Some(Self {
            width: extent.width,
            height: extent.height,
            eye_distance,
        })
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.height / self.width
    }

    pub fn eye_spacing(&self) -> Option<f64> {
        self.eye_distance.map(|d| d / self.width)
    }

    /// Aspect term in `[0, 100]`.
    pub fn aspect_score(&self) -> f64 {
        deviation_score(self.aspect_ratio(), TARGET_ASPECT)
    }

    /// Eye term in `[0, 100]`.
    pub fn eye_score(&self) -> Option<f64> {
        self.eye_spacing()
            .map(|s| deviation_score(s, TARGET_EYE_SPACING))
    }
}

/// `100 - relative deviation * 100`, floored at zero.
fn deviation_score(value: f64, target: f64) -> f64 {
    let diff = (value - target).abs() / target;
    (100.0 - diff * 100.0).max(0.0)
}

/// Score face proportions from the landmark extent and eye placement.
pub fn score(set: &LandmarkSet) -> SubScore {
    let Some(p) = Proportions::from_landmarks(set) else {
        return SubScore::neutral("too few landmarks or zero-size extent");
    };
    let base = p.aspect_score();

    match p.eye_score() {
        Some(eye) => {
            tracing::debug!(aspect = p.aspect_ratio(), base, eye, "proportion");
            SubScore::computed((base * ASPECT_WEIGHT + eye * EYE_WEIGHT).clamp(MIN_SCORE, 100.0))
        }
        None => {
            tracing::debug!(aspect = p.aspect_ratio(), base, "proportion without eye term");
            SubScore::approximated(
                base.clamp(MIN_SCORE, 100.0),
                "eye landmarks missing, aspect ratio only",
            )
        }
    }
}
