//! Evaluation levels for a computed ROIC.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::Rate;

/// Qualitative rating bands: ≥15% Excellent, ≥10% Good, ≥5% Average,
/// below that Poor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoicRating {
    Excellent,
    Good,
    Average,
    Poor,
}

const EXCELLENT_THRESHOLD: Decimal = dec!(0.15);
const GOOD_THRESHOLD: Decimal = dec!(0.10);
const AVERAGE_THRESHOLD: Decimal = dec!(0.05);

impl RoicRating {
    /// Classify a ROIC expressed as a decimal (0.15 = 15%).
    pub fn classify(roic: Rate) -> Self {
        if roic >= EXCELLENT_THRESHOLD {
            RoicRating::Excellent
        } else if roic >= GOOD_THRESHOLD {
            RoicRating::Good
        } else if roic >= AVERAGE_THRESHOLD {
            RoicRating::Average
        } else {
            RoicRating::Poor
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            RoicRating::Excellent => "Excellent (15%+)",
            RoicRating::Good => "Good (10-15%)",
            RoicRating::Average => "Average (5-10%)",
            RoicRating::Poor => "Poor (below 5%)",
        }
    }
}
