use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lowest rating the estimator ever returns.
pub const MIN_RATING: u8 = 1;
/// Highest rating the estimator ever returns.
pub const MAX_RATING: u8 = 10;

/// Qualitative band for a 1-10 rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl RatingBand {
    pub fn from_rating(rating: u8) -> Self {
        match rating {
            8.. => RatingBand::Excellent,
            6..=7 => RatingBand::Good,
            4..=5 => RatingBand::Fair,
            _ => RatingBand::Poor,
        }
    }

    pub fn recommendation(&self) -> &'static str {
        match self {
            RatingBand::Excellent => "Excellent for stargazing!",
            RatingBand::Good => "Good stargazing conditions",
            RatingBand::Fair => "Fair conditions",
            RatingBand::Poor => "Poor conditions tonight",
        }
    }
}

/// Suitability of the sky for stargazing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StargazingScore {
    /// Always in `MIN_RATING..=MAX_RATING`.
    pub rating: u8,
    pub band: RatingBand,
    pub recommendation: String,
    pub best_viewing_time: String,
}

/// Which rating formula to apply.
///
/// The two formulas disagree for the same inputs and are never blended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringPolicy {
    /// Stepwise deductions for cloud, moonlight and humidity.
    #[default]
    Additive,
    /// Proportional cloud penalty plus humidity and visibility steps.
    Continuous,
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "additive" | "additive-deduction" => Ok(Self::Additive),
            "continuous" | "continuous-penalty" => Ok(Self::Continuous),
            other => Err(format!("Unknown scoring policy: {}", other)),
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::Additive => f.write_str("additive"),
            ScoringPolicy::Continuous => f.write_str("continuous"),
        }
    }
}
