//! Sub-scores, their diagnostics, and the aggregated bundle.

use serde::Serialize;

/// Score returned whenever the input geometry is too degenerate to measure.
pub const NEUTRAL_SCORE: u8 = 50;

/// Weight of the symmetry sub-score in the overall score.
pub const SYMMETRY_WEIGHT: f64 = 0.35;
/// Weight of the proportion sub-score in the overall score.
pub const PROPORTION_WEIGHT: f64 = 0.25;
/// Weight of the structure sub-score in the overall score.
pub const STRUCTURE_WEIGHT: f64 = 0.2;
/// Weight of the skin sub-score in the overall score.
pub const SKIN_WEIGHT: f64 = 0.2;

/// How a sub-score was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "reason", rename_all = "snake_case")]
pub enum ScoreStatus {
    /// Measured from the full set of inputs.
    Computed,
    /// Measured, but with a documented substitute for a missing landmark or width.
    Approximated(&'static str),
    /// Input was unusable; [`NEUTRAL_SCORE`] was returned.
    Neutral(&'static str),
}

/// An integer score in `[0, 100]`, higher is more favourable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubScore {
    pub value: u8,
    pub status: ScoreStatus,
}

impl SubScore {
    /// Clamp `value` into `[0, 100]`.
    pub fn computed(value: f64) -> Self {
        Self {
            value: to_score(value),
            status: ScoreStatus::Computed,
        }
    }

    pub fn approximated(value: f64, reason: &'static str) -> Self {
        Self {
            value: to_score(value),
            status: ScoreStatus::Approximated(reason),
        }
    }

    pub fn neutral(reason: &'static str) -> Self {
        tracing::debug!(reason, "falling back to neutral score");
        Self {
            value: NEUTRAL_SCORE,
            status: ScoreStatus::Neutral(reason),
        }
    }

    pub fn is_fallback(&self) -> bool {
        !matches!(self.status, ScoreStatus::Computed)
    }
}

/// Round half toward positive infinity.
pub fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// Round and clamp into `[0, 100]`. Non-finite input maps to the neutral score.
pub fn to_score(v: f64) -> u8 {
    if !v.is_finite() {
        return NEUTRAL_SCORE;
    }
    round_half_up(v).clamp(0.0, 100.0) as u8
}

/// The four sub-scores plus their weighted overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBundle {
    pub symmetry: SubScore,
    pub proportion: SubScore,
    pub structure: SubScore,
    pub skin: SubScore,
    pub overall: u8,
}

impl ScoreBundle {
    pub fn new(symmetry: SubScore, proportion: SubScore, structure: SubScore, skin: SubScore) -> Self {
        let overall = overall_score(symmetry.value, proportion.value, structure.value, skin.value);
        Self {
            symmetry,
            proportion,
            structure,
            skin,
            overall,
        }
    }

    /// True when every sub-score was measured normally.
    pub fn fully_computed(&self) -> bool {
        [self.symmetry, self.proportion, self.structure, self.skin]
            .iter()
            .all(|s| !s.is_fallback())
    }
}

/// Weighted mean of the four sub-scores.
pub fn overall_score(symmetry: u8, proportion: u8, structure: u8, skin: u8) -> u8 {
    to_score(
        symmetry as f64 * SYMMETRY_WEIGHT
            + proportion as f64 * PROPORTION_WEIGHT
            + structure as f64 * STRUCTURE_WEIGHT
            + skin as f64 * SKIN_WEIGHT,
    )
}
