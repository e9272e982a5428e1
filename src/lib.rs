//! # face-score
//!
//! Heuristic facial aesthetic scoring from one RGBA image and the landmarks of
//! a 468-point face mesh.
//!
//! This crate provides:
//! - **Symmetry**: mirrored-luminance comparison over a padded face region
//! - **Proportion**: face aspect ratio and eye spacing against fixed targets
//! - **Structure**: jaw width relative to midface width
//! - **Skin**: sharpness, redness and texture of a downsampled face sample
//! - **Advice**: one fixed recommendation per sub-score, chosen by threshold
//!
//! Scores are heuristics with no clinical meaning. Every analyzer is a pure
//! function of `(buffer, face)` and always returns a value in `[0, 100]`;
//! degenerate input is reported through [`ScoreStatus`] instead of an error.
//!
//! Landmark detection is not part of this crate. Feed it the output of any
//! face-mesh model, either directly or through [`LandmarkDetector`].
//!
//! ## Quick Start
//!
//! ```rust
//! use face_score::{analyze, Detection, LandmarkSet, PixelBuffer, Point};
//!
//! let buffer = PixelBuffer::filled(200, 240, [180, 150, 140, 255]);
//!
//! // Landmarks normally come from a face-mesh model.
//! let landmarks = LandmarkSet::new(vec![Point::new(50.0, 30.0), Point::new(150.0, 200.0)]);
//! let face = Detection::new(landmarks, None);
//!
//! let analysis = analyze(&buffer, &face);
//! assert!(analysis.scores.overall <= 100);
//! for item in &analysis.advice {
//!     println!("{item}");
//! }
//! ```

pub mod advice;
mod analysis;
mod error;
pub mod landmarks;
mod pixels;
pub mod proportion;
pub mod score;
pub mod skin;
pub mod structure;
pub mod symmetry;
mod types;

pub use advice::{Advice, AdviceLabel};
pub use analysis::{analyze, analyze_detections, analyze_with, select_face, Analysis, LandmarkDetector};
pub use error::{Error, Result};
pub use landmarks::MeshLandmark;
pub use pixels::{luminance, ImageAccess, PixelBuffer, LUMA_B, LUMA_G, LUMA_R};
pub use score::{overall_score, ScoreBundle, ScoreStatus, SubScore, NEUTRAL_SCORE};
pub use types::{BoundingBox, Detection, LandmarkSet, Point};
