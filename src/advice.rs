//! Threshold-driven recommendation text.

use std::fmt;

use serde::Serialize;

use crate::score::ScoreBundle;

/// Skin scores below this select the unfavourable text.
pub const SKIN_THRESHOLD: u8 = 60;
pub const SYMMETRY_THRESHOLD: u8 = 60;
pub const STRUCTURE_THRESHOLD: u8 = 55;
pub const PROPORTION_THRESHOLD: u8 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdviceLabel {
    Skin,
    Symmetry,
    Structure,
    Proportions,
}

impl AdviceLabel {
    /// Emission order of the advice list.
    pub const ALL: [AdviceLabel; 4] = [
        AdviceLabel::Skin,
        AdviceLabel::Symmetry,
        AdviceLabel::Structure,
        AdviceLabel::Proportions,
    ];

    pub const fn threshold(self) -> u8 {
        match self {
            AdviceLabel::Skin => SKIN_THRESHOLD,
            AdviceLabel::Symmetry => SYMMETRY_THRESHOLD,
            AdviceLabel::Structure => STRUCTURE_THRESHOLD,
            AdviceLabel::Proportions => PROPORTION_THRESHOLD,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            AdviceLabel::Skin => "Skin",
            AdviceLabel::Symmetry => "Symmetry",
            AdviceLabel::Structure => "Structure",
            AdviceLabel::Proportions => "Proportions",
        }
    }

    const fn favorable_text(self) -> &'static str {
        match self {
            AdviceLabel::Skin => {
                "Looks healthy. Maintain routine: cleanse, moisturize, sunscreen. \
                 Add exfoliation 1–2x weekly if needed."
            }
            AdviceLabel::Symmetry => {
                "Symmetry is good — use grooming to highlight strengths (jawline, cheekbones)."
            }
            AdviceLabel::Structure => {
                "Strong bone structure — emphasize with hair & beard styles."
            }
            AdviceLabel::Proportions => {
                "Good proportions. Keep grooming consistent. \
                 Consider style upgrades (fits, collars) to match face shape."
            }
        }
    }

    const fn unfavorable_text(self) -> &'static str {
        match self {
            AdviceLabel::Skin => {
                "Start with a basic routine — gentle cleanser, moisturizer with SPF, \
                 and a targeted acne/spot treatment. Consider dermatologist if severe."
            }
            AdviceLabel::Symmetry => {
                "Natural asymmetry is normal. Non-invasive improvements: hairstyle, \
                 facial hair trimming, contouring with makeup. For large concerns, consult specialists."
            }
            AdviceLabel::Structure => {
                "Consider posture & fat-loss to enhance jawline. Targeted jawline exercises \
                 and strength training can help; long-term: weight loss reduces facial fat."
            }
            AdviceLabel::Proportions => {
                "Subtle changes (haircut, glasses/frame choice) can improve perceived proportions. \
                 Work on hairstyle that elongates or broadens face depending on goal."
            }
        }
    }
}

impl fmt::Display for AdviceLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Advice {
    pub label: AdviceLabel,
    /// True when the score met the threshold.
    pub favorable: bool,
    pub text: &'static str,
}

impl Advice {
    /// Pick the text for `label` given its score. The threshold itself is favourable.
    pub fn for_score(label: AdviceLabel, score: u8) -> Self {
        let favorable = score >= label.threshold();
        let text = if favorable {
            label.favorable_text()
        } else {
            label.unfavorable_text()
        };
        Self {
            label,
            favorable,
            text,
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.text)
    }
}

/// One item per sub-score, in the order Skin, Symmetry, Structure, Proportions.
pub fn generate(scores: &ScoreBundle) -> Vec<Advice> {
    AdviceLabel::ALL
        .iter()
        .map(|&label| {
            let value = match label {
                AdviceLabel::Skin => scores.skin.value,
                AdviceLabel::Symmetry => scores.symmetry.value,
                AdviceLabel::Structure => scores.structure.value,
                AdviceLabel::Proportions => scores.proportion.value,
            };
            Advice::for_score(label, value)
        })
        .collect()
}

/// Numbered plain-text list, one item per line.
pub fn render(advice: &[Advice]) -> String {
    advice
        .iter()
        .enumerate()
        .map(|(i, a)| format!("{}. {}\n", i + 1, a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::SubScore;

    fn bundle(symmetry: u8, proportion: u8, structure: u8, skin: u8) -> ScoreBundle {
        ScoreBundle::new(
            SubScore::computed(symmetry as f64),
            SubScore::computed(proportion as f64),
            SubScore::computed(structure as f64),
            SubScore::computed(skin as f64),
        )
    }

    #[test]
    fn fixed_order() {
        let labels: Vec<_> = generate(&bundle(10, 20, 30, 40)).iter().map(|a| a.label).collect();
        assert_eq!(labels, AdviceLabel::ALL.to_vec());
    }

    #[test]
    fn thresholds_are_inclusive() {
        let at = generate(&bundle(60, 60, 55, 60));
        assert!(at.iter().all(|a| a.favorable));

        let below = generate(&bundle(59, 59, 54, 59));
        assert!(below.iter().all(|a| !a.favorable));
    }

    #[test]
    fn structure_threshold_is_lower() {
        let advice = generate(&bundle(100, 100, 56, 100));
        assert!(advice[2].favorable);
        assert_eq!(advice[2].label, AdviceLabel::Structure);
        assert_ne!(
            Advice::for_score(AdviceLabel::Structure, 54).text,
            advice[2].text
        );
    }

    #[test]
    fn texts_are_fixed() {
        let cases = [
            (AdviceLabel::Skin, 60, "Looks healthy. Maintain routine: cleanse, moisturize, sunscreen. Add exfoliation 1–2x weekly if needed."),
            (AdviceLabel::Skin, 59, "Start with a basic routine — gentle cleanser, moisturizer with SPF, and a targeted acne/spot treatment. Consider dermatologist if severe."),
            (AdviceLabel::Symmetry, 60, "Symmetry is good — use grooming to highlight strengths (jawline, cheekbones)."),
            (AdviceLabel::Symmetry, 59, "Natural asymmetry is normal. Non-invasive improvements: hairstyle, facial hair trimming, contouring with makeup. For large concerns, consult specialists."),
            (AdviceLabel::Structure, 55, "Strong bone structure — emphasize with hair & beard styles."),
            (AdviceLabel::Structure, 54, "Consider posture & fat-loss to enhance jawline. Targeted jawline exercises and strength training can help; long-term: weight loss reduces facial fat."),
            (AdviceLabel::Proportions, 60, "Good proportions. Keep grooming consistent. Consider style upgrades (fits, collars) to match face shape."),
            (AdviceLabel::Proportions, 59, "Subtle changes (haircut, glasses/frame choice) can improve perceived proportions. Work on hairstyle that elongates or broadens face depending on goal."),
        ];
        for (label, score, text) in cases {
            assert_eq!(Advice::for_score(label, score).text, text);
        }
    }

    #[test]
    fn renders_numbered_list() {
        let text = render(&generate(&bundle(80, 80, 80, 30)));
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("1. Skin: Start with a basic routine —"));
        assert!(lines[3].starts_with("4. Proportions: Good proportions."));
    }
}
