//! Jaw width against midface width.

use crate::landmarks::{lookup, resolve, MeshLandmark, Resolved};
use crate::score::SubScore;
use crate::types::{LandmarkSet, Point};

/// Target jaw width / midface width.
pub const TARGET_JAW_RATIO: f64 = 0.9;
/// Penalty per unit of relative deviation from the target ratio.
pub const DEVIATION_PENALTY: f64 = 160.0;
/// Midface width assumed as a multiple of jaw width when the cheek points are missing.
pub const MIDFACE_FALLBACK_FACTOR: f64 = 0.9;
pub const MIN_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JawMeasurements {
    pub chin: Resolved,
    pub jaw_left: Resolved,
    pub jaw_right: Resolved,
    pub jaw_width: f64,
    pub mid_face_width: f64,
    /// True when the cheek points were missing and the width was derived from the jaw.
    pub mid_face_estimated: bool,
}

impl JawMeasurements {
    /// Returns `None` for an empty mesh.
    pub fn from_landmarks(set: &LandmarkSet) -> Option<Self> {
        let chin = resolve(set, MeshLandmark::ChinTip)?;
        let jaw_left = resolve(set, MeshLandmark::LeftJawCorner)?;
        let jaw_right = resolve(set, MeshLandmark::RightJawCorner)?;
        let jaw_width = (jaw_right.point().x - jaw_left.point().x).abs();

        let cheeks = (
            lookup(set, MeshLandmark::LeftCheek),
            lookup(set, MeshLandmark::RightCheek),
        );
        let (mid_face_width, mid_face_estimated) = match cheeks {
            (Some(a), Some(b)) => ((a.x - b.x).abs(), false),
            _ => (jaw_width * MIDFACE_FALLBACK_FACTOR, true),
        };

        Some(Self {
            chin,
            jaw_left,
            jaw_right,
            jaw_width,
            mid_face_width,
            mid_face_estimated,
        })
    }

    pub fn chin_point(&self) -> Point {
        self.chin.point()
    }

    /// Jaw / midface ratio, `None` if the midface width is zero.
    pub fn ratio(&self) -> Option<f64> {
        if self.mid_face_width > 0.0 && self.mid_face_width.is_finite() {
            Some(self.jaw_width / self.mid_face_width)
        } else {
            None
        }
    }

    fn used_fallback(&self) -> bool {
        self.mid_face_estimated || self.jaw_left.is_fallback() || self.jaw_right.is_fallback()
    }
}

/// Score jaw definition relative to the midface.
pub fn score(set: &LandmarkSet) -> SubScore {
    let Some(m) = JawMeasurements::from_landmarks(set) else {
        return SubScore::neutral("no landmarks");
    };
    let Some(ratio) = m.ratio() else {
        return SubScore::neutral("midface width is zero");
    };

    let diff = (ratio - TARGET_JAW_RATIO).abs() / TARGET_JAW_RATIO;
    let value = (100.0 - diff * DEVIATION_PENALTY).clamp(MIN_SCORE, 100.0);
    tracing::debug!(
        jaw_width = m.jaw_width,
        mid_face_width = m.mid_face_width,
        ratio,
        "structure"
    );

    if m.used_fallback() {
        SubScore::approximated(value, "jaw or cheek landmarks substituted")
    } else {
        SubScore::computed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::{ScoreStatus, NEUTRAL_SCORE};

    fn mesh(jaw_width: f64, mid_width: f64) -> LandmarkSet {
        let mut pts = vec![Point::new(100.0, 100.0); 468];
        pts[MeshLandmark::LeftJawCorner.index()] = Point::new(100.0 - jaw_width / 2.0, 150.0);
        pts[MeshLandmark::RightJawCorner.index()] = Point::new(100.0 + jaw_width / 2.0, 150.0);
        pts[MeshLandmark::LeftCheek.index()] = Point::new(100.0 - mid_width / 2.0, 110.0);
        pts[MeshLandmark::RightCheek.index()] = Point::new(100.0 + mid_width / 2.0, 110.0);
        pts[MeshLandmark::ChinTip.index()] = Point::new(100.0, 200.0);
        LandmarkSet::new(pts)
    }

    #[test]
    fn target_ratio_scores_100() {
        let s = score(&mesh(90.0, 100.0));
        assert_eq!(s.value, 100);
        assert_eq!(s.status, ScoreStatus::Computed);
    }

    #[test]
    fn steep_penalty() {
        // ratio 1.0 => diff 0.111.. => 100 - 17.78 = 82.2 => 82
        assert_eq!(score(&mesh(100.0, 100.0)).value, 82);
    }

    #[test]
    fn floor_is_five() {
        assert_eq!(score(&mesh(300.0, 100.0)).value, 5);
    }

    #[test]
    fn chin_is_resolved() {
        let m = JawMeasurements::from_landmarks(&mesh(90.0, 100.0)).unwrap();
        assert_eq!(m.chin_point(), Point::new(100.0, 200.0));
        assert!(!m.mid_face_estimated);
    }

    #[test]
    fn short_mesh_estimates_midface() {
        // 50 points: jaw corners fall back to first/last, cheeks are missing.
        let mut pts = vec![Point::new(0.0, 0.0); 50];
        pts[0] = Point::new(10.0, 0.0);
        pts[49] = Point::new(110.0, 0.0);
        let s = score(&LandmarkSet::new(pts));
        // midface = 0.9 * jaw => ratio 1/0.9 => diff ~0.2346 => 100 - 37.5 => 62
        assert_eq!(s.value, 62);
        assert!(matches!(s.status, ScoreStatus::Approximated(_)));
    }

    #[test]
    fn degenerate_meshes_are_neutral() {
        assert_eq!(score(&LandmarkSet::default()).value, NEUTRAL_SCORE);

        // Single point: jaw width and midface width both zero.
        let single = LandmarkSet::new(vec![Point::new(4.0, 4.0)]);
        let s = score(&single);
        assert_eq!(s.value, NEUTRAL_SCORE);
        assert!(matches!(s.status, ScoreStatus::Neutral(_)));
    }
}
