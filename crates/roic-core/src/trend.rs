//! Multi-year ROIC trend analytics: year-over-year deltas, CAGR across
//! the window, and a coarse direction classification.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::RoicError;
use crate::types::Rate;
use crate::RoicResult;

/// Mean YoY delta within ±0.5pp counts as Stable.
const STABLE_BAND: Decimal = dec!(0.005);

/// One year's ROIC in a company time series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RoicObservation {
    pub fiscal_year: i32,
    /// ROIC as a decimal (0.15 = 15%).
    pub roic: Rate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    Stable,
    Declining,
}

/// Change from the prior fiscal year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct YoyDelta {
    pub fiscal_year: i32,
    pub delta: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendOutput {
    pub start_year: i32,
    pub end_year: i32,
    pub observations: usize,
    pub yoy_deltas: Vec<YoyDelta>,
    pub mean_delta: Decimal,
    /// Compound annual growth rate of ROIC over the window. None when
    /// either endpoint is non-positive (growth is undefined across a
    /// sign change).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cagr: Option<Decimal>,
    pub direction: TrendDirection,
}

/// Analyze a ROIC time series. Requires at least two observations with
/// strictly increasing fiscal years.
pub fn analyze_trend(series: &[RoicObservation]) -> RoicResult<TrendOutput> {
    if series.len() < 2 {
        return Err(RoicError::InsufficientData(
            "trend analysis requires at least two fiscal years".into(),
        ));
    }
    for pair in series.windows(2) {
        if pair[1].fiscal_year <= pair[0].fiscal_year {
            return Err(RoicError::InvalidInput {
                field: "fiscal_year".into(),
                reason: format!(
                    "Series must be strictly increasing; {} follows {}",
                    pair[1].fiscal_year, pair[0].fiscal_year
                ),
            });
        }
    }

    let yoy_deltas: Vec<YoyDelta> = series
        .windows(2)
        .map(|pair| YoyDelta {
            fiscal_year: pair[1].fiscal_year,
            delta: pair[1].roic - pair[0].roic,
        })
        .collect();

    let delta_sum: Decimal = yoy_deltas.iter().map(|d| d.delta).sum();
    let mean_delta = delta_sum / Decimal::from(yoy_deltas.len() as u64);

    let direction = if mean_delta > STABLE_BAND {
        TrendDirection::Improving
    } else if mean_delta < -STABLE_BAND {
        TrendDirection::Declining
    } else {
        TrendDirection::Stable
    };

    let first = series[0];
    let last = series[series.len() - 1];
    let cagr = compute_cagr(first, last);

    Ok(TrendOutput {
        start_year: first.fiscal_year,
        end_year: last.fiscal_year,
        observations: series.len(),
        yoy_deltas,
        mean_delta,
        cagr,
        direction,
    })
}

fn compute_cagr(first: RoicObservation, last: RoicObservation) -> Option<Decimal> {
    if first.roic <= Decimal::ZERO || last.roic <= Decimal::ZERO {
        return None;
    }
    let years = Decimal::from((last.fiscal_year - first.fiscal_year) as i64);
    let exponent = Decimal::ONE / years;
    Some((last.roic / first.roic).powd(exponent) - Decimal::ONE)
}
