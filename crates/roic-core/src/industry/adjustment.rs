//! Industry-specific ROIC adjustment.
//!
//! Capital-intensive sectors (utilities, transport equipment) structurally
//! earn lower raw ROIC; the industry master carries a per-sector
//! coefficient that normalizes cross-sector comparisons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RoicError;
use crate::types::Rate;
use crate::RoicResult;

/// Entry from the industry master data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryProfile {
    pub industry_code: String,
    pub industry_name: String,
    /// Multiplier applied to raw ROIC; 1.0 means no adjustment.
    pub coefficient: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjustment_reason: Option<String>,
}

/// Apply the sector coefficient to a raw ROIC.
pub fn apply_industry_adjustment(roic: Rate, profile: &IndustryProfile) -> RoicResult<Rate> {
    if profile.coefficient <= Decimal::ZERO {
        return Err(RoicError::InvalidInput {
            field: "coefficient".into(),
            reason: "Adjustment coefficient must be positive".into(),
        });
    }
    Ok(roic * profile.coefficient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn automotive() -> IndustryProfile {
        IndustryProfile {
            industry_code: "1100".into(),
            industry_name: "自動車・輸送機器".into(),
            coefficient: dec!(0.95),
            adjustment_reason: Some("capital intensity".into()),
        }
    }

    #[test]
    fn test_coefficient_applied() {
        let adjusted = apply_industry_adjustment(dec!(0.10), &automotive()).unwrap();
        assert_eq!(adjusted, dec!(0.095));
    }

    #[test]
    fn test_unit_coefficient_is_identity() {
        let mut profile = automotive();
        profile.coefficient = dec!(1);
        assert_eq!(
            apply_industry_adjustment(dec!(0.123), &profile).unwrap(),
            dec!(0.123)
        );
    }

    #[test]
    fn test_non_positive_coefficient_rejected() {
        let mut profile = automotive();
        profile.coefficient = Decimal::ZERO;
        assert!(apply_industry_adjustment(dec!(0.10), &profile).is_err());
        profile.coefficient = dec!(-0.5);
        assert!(apply_industry_adjustment(dec!(0.10), &profile).is_err());
    }

    #[test]
    fn test_profile_roundtrip() {
        let json = serde_json::to_string(&automotive()).unwrap();
        let back: IndustryProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back.industry_code, "1100");
        assert_eq!(back.coefficient, dec!(0.95));
    }
}
