//! Cross-sectional statistics over an industry's ROIC observations.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RoicError;
use crate::types::Rate;
use crate::RoicResult;

/// One company's ROIC within an industry universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyRoic {
    pub company_code: String,
    pub company_name: String,
    /// ROIC as a decimal (0.15 = 15%).
    pub roic: Rate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quartiles {
    pub q1: Decimal,
    pub q2: Decimal,
    pub q3: Decimal,
}

/// Summary statistics for a universe of observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndustryStatistics {
    pub count: usize,
    pub average_roic: Decimal,
    pub median_roic: Decimal,
    pub min_roic: Decimal,
    pub max_roic: Decimal,
    pub quartiles: Quartiles,
}

/// Compute universe statistics. Requires at least one observation.
pub fn industry_statistics(universe: &[CompanyRoic]) -> RoicResult<IndustryStatistics> {
    if universe.is_empty() {
        return Err(RoicError::InsufficientData(
            "industry statistics require at least one observation".into(),
        ));
    }

    let mut values: Vec<Decimal> = universe.iter().map(|c| c.roic).collect();
    values.sort();

    let count = values.len();
    let sum: Decimal = values.iter().sum();
    let average_roic = sum / Decimal::from(count as u64);

    let quartiles = Quartiles {
        q1: interpolated_percentile(&values, dec!(0.25)),
        q2: interpolated_percentile(&values, dec!(0.5)),
        q3: interpolated_percentile(&values, dec!(0.75)),
    };

    Ok(IndustryStatistics {
        count,
        average_roic,
        median_roic: quartiles.q2,
        min_roic: values[0],
        max_roic: values[count - 1],
        quartiles,
    })
}

/// Percentile rank (0–100) of a value within the universe: the share of
/// observations at or below it.
pub fn percentile_rank(universe: &[CompanyRoic], roic: Rate) -> RoicResult<Decimal> {
    if universe.is_empty() {
        return Err(RoicError::InsufficientData(
            "percentile rank requires at least one observation".into(),
        ));
    }
    let at_or_below = universe.iter().filter(|c| c.roic <= roic).count();
    Ok(Decimal::from(at_or_below as u64) / Decimal::from(universe.len() as u64) * dec!(100))
}

/// Linear interpolation on sorted values: position `p × (n−1)`.
fn interpolated_percentile(sorted: &[Decimal], p: Decimal) -> Decimal {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * Decimal::from((n - 1) as u64);
    let lower = pos.floor();
    let frac = pos - lower;
    // floor() of a non-negative Decimal fits usize here: p <= 1, n bounded.
    let idx = lower.to_usize().unwrap_or(0).min(n - 1);
    if frac == Decimal::ZERO || idx + 1 >= n {
        return sorted[idx];
    }
    sorted[idx] + (sorted[idx + 1] - sorted[idx]) * frac
}
