use serde::{Deserialize, Serialize};

/// A 2D point in buffer coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self { x: 0.0, y: 0.0 }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.hypot(dy)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

/// An axis-aligned box defined by top-left corner, width, and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Min/max reduction over a point set.
    ///
    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut max_x) = (first.x, first.x);
        let (mut min_y, mut max_y) = (first.y, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            max_x = max_x.max(p.x);
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when either side is zero, negative, or not finite.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self::new(
            self.x * factor,
            self.y * factor,
            self.width * factor,
            self.height * factor,
        )
    }
}

/// Ordered face-mesh landmarks.
///
/// Index meaning follows the detector's mesh topology and must be preserved;
/// see [`crate::landmarks`] for the indices the analyzers read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkSet {
    pub points: Vec<Point>,
}

impl LandmarkSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<Point> {
        self.points.get(idx).copied()
    }

    /// Extent of every landmark.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// Arithmetic mean of the points at `indices`.
    ///
    /// Returns `None` if `indices` is empty or any index is out of range.
    pub fn centroid(&self, indices: &[usize]) -> Option<Point> {
        if indices.is_empty() {
            return None;
        }
        let mut sum = Point::zero();
        for &i in indices {
            sum += self.get(i)?;
        }
        Some(sum * (1.0 / indices.len() as f64))
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            points: self.points.iter().map(|p| *p * factor).collect(),
        }
    }
}

/// One detected face: its landmarks and, when the detector supplies one, a box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub landmarks: LandmarkSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl Detection {
    pub fn new(landmarks: LandmarkSet, bounding_box: Option<BoundingBox>) -> Self {
        Self {
            landmarks,
            bounding_box,
        }
    }

    /// The detector's box if present, otherwise the landmark extent.
    pub fn face_box(&self) -> Option<BoundingBox> {
        self.bounding_box.or_else(|| self.landmarks.bounding_box())
    }

    /// Area used to pick the dominant face among several detections.
    pub fn selection_area(&self) -> f64 {
        self.face_box()
            .map(|b| b.area())
            .filter(|a| a.is_finite())
            .unwrap_or(0.0)
    }

    /// Rescale landmarks and box, e.g. after the source image was resized.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            landmarks: self.landmarks.scaled(factor),
            bounding_box: self.bounding_box.map(|b| b.scaled(factor)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_arithmetic() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(3.0, 4.0);

        let mut sum = a;
        sum += b;
        assert_eq!(sum.x, 4.0);
        assert_eq!(sum.y, 6.0);

        let scaled = a * 2.0;
        assert_eq!(scaled.x, 2.0);
        assert_eq!(scaled.y, 4.0);

        assert!((Point::zero().distance(&Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bounding_box_from_points() {
        let pts = vec![
            Point::new(10.0, 40.0),
            Point::new(-2.0, 5.0),
            Point::new(30.0, 12.0),
        ];
        let bbox = BoundingBox::from_points(&pts).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, 5.0, 32.0, 35.0));
        assert_eq!(bbox.right(), 30.0);
        assert_eq!(bbox.bottom(), 40.0);

        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn degenerate_boxes() {
        assert!(BoundingBox::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(BoundingBox::new(0.0, 0.0, 10.0, f64::NAN).is_degenerate());
        assert!(!BoundingBox::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
    }

    #[test]
    fn centroid_of_subset() {
        let set = LandmarkSet::new(vec![
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 2.0),
            Point::new(100.0, 100.0),
        ]);
        let c = set.centroid(&[0, 1, 2]).unwrap();
        assert!((c.x - 8.0 / 3.0).abs() < 1e-12);
        assert!((c.y - 2.0 / 3.0).abs() < 1e-12);

        assert!(set.centroid(&[0, 4]).is_none());
        assert!(set.centroid(&[]).is_none());
    }

    #[test]
    fn detection_prefers_explicit_box() {
        let landmarks = LandmarkSet::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)]);
        let boxed = Detection::new(
            landmarks.clone(),
            Some(BoundingBox::new(0.0, 0.0, 20.0, 30.0)),
        );
        assert_eq!(boxed.selection_area(), 600.0);

        let bare = Detection::new(landmarks, None);
        assert_eq!(bare.selection_area(), 100.0);
    }

    #[test]
    fn detection_scaling() {
        let det = Detection::new(
            LandmarkSet::new(vec![Point::new(10.0, 20.0)]),
            Some(BoundingBox::new(2.0, 4.0, 6.0, 8.0)),
        );
        let half = det.scaled(0.5);
        assert_eq!(half.landmarks.points[0], Point::new(5.0, 10.0));
        assert_eq!(half.bounding_box, Some(BoundingBox::new(1.0, 2.0, 3.0, 4.0)));
    }

    #[test]
    fn detection_json_shape() {
        let json = r#"{"landmarks":[{"x":1.0,"y":2.0}]}"#;
        let det: Detection = serde_json::from_str(json).unwrap();
        assert_eq!(det.landmarks.len(), 1);
        assert!(det.bounding_box.is_none());
    }
}
