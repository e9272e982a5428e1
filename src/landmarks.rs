//! Named indices into the 468-point face mesh.
//!
//! The analyzers never index the mesh with bare numbers; they go through
//! [`MeshLandmark`] so every substitution for a missing index is explicit.

use crate::types::{LandmarkSet, Point};

/// Minimum number of points for the mesh-extent ratios to be meaningful.
pub const MIN_LANDMARKS: usize = 10;

/// Upper lid, lower lid and both corners of the subject's left eye.
pub const LEFT_EYE: [usize; 4] = [33, 133, 159, 145];
/// Upper lid, lower lid and both corners of the subject's right eye.
pub const RIGHT_EYE: [usize; 4] = [362, 263, 386, 374];

/// Semantic labels for the individual mesh points the analyzers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshLandmark {
    ChinTip,
    LeftJawCorner,
    RightJawCorner,
    LeftCheek,
    RightCheek,
}

impl MeshLandmark {
    pub const fn index(self) -> usize {
        match self {
            MeshLandmark::ChinTip => 152,
            MeshLandmark::LeftJawCorner => 234,
            MeshLandmark::RightJawCorner => 454,
            MeshLandmark::LeftCheek => 98,
            MeshLandmark::RightCheek => 328,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            MeshLandmark::ChinTip => "chin tip",
            MeshLandmark::LeftJawCorner => "left jaw corner",
            MeshLandmark::RightJawCorner => "right jaw corner",
            MeshLandmark::LeftCheek => "left cheek",
            MeshLandmark::RightCheek => "right cheek",
        }
    }

    /// Index substituted on shorter mesh variants, relative to the mesh length.
    /// Cheek points have no substitute.
    pub fn fallback_index(self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        match self {
            MeshLandmark::ChinTip => Some(len / 2),
            MeshLandmark::LeftJawCorner => Some(0),
            MeshLandmark::RightJawCorner => Some(len - 1),
            MeshLandmark::LeftCheek | MeshLandmark::RightCheek => None,
        }
    }
}

/// Where a looked-up landmark came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved {
    /// The mesh exposes the primary index.
    Primary(Point),
    /// The primary index was missing and the fallback index was used.
    Fallback(Point),
}

impl Resolved {
    pub fn point(self) -> Point {
        match self {
            Resolved::Primary(p) | Resolved::Fallback(p) => p,
        }
    }

    pub fn is_fallback(self) -> bool {
        matches!(self, Resolved::Fallback(_))
    }
}

/// Capability check: the primary point only, `None` if this mesh lacks it.
pub fn lookup(set: &LandmarkSet, landmark: MeshLandmark) -> Option<Point> {
    set.get(landmark.index())
}

/// The primary point, or its documented fallback on a shorter mesh.
pub fn resolve(set: &LandmarkSet, landmark: MeshLandmark) -> Option<Resolved> {
    if let Some(p) = lookup(set, landmark) {
        return Some(Resolved::Primary(p));
    }
    let idx = landmark.fallback_index(set.len())?;
    let p = set.get(idx)?;
    tracing::debug!(
        landmark = landmark.name(),
        primary = landmark.index(),
        fallback = idx,
        "mesh lacks landmark, using fallback index"
    );
    Some(Resolved::Fallback(p))
}
