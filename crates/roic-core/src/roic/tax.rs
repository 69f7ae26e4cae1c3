//! Effective tax rate estimation.
//!
//! Filings often lack a usable effective rate, so estimation falls through
//! a ladder:
//!
//! 1. `tax_expense / ordinary_income` when the result lies in `[0, 0.5]`
//! 2. implied rate `(operating_income − net_income) / operating_income`
//!    when that lies in `[0, 0.5]`
//! 3. the statutory default of 30%
//!
//! Rates outside the acceptance window are treated as data noise (one-off
//! tax credits, loss carryforwards) rather than rejected outright.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::statements::FinancialStatement;
use crate::types::Rate;

/// Statutory default applied when nothing better can be estimated.
pub const DEFAULT_TAX_RATE: Decimal = dec!(0.30);

/// Upper bound of the acceptance window for estimated rates.
const MAX_PLAUSIBLE_RATE: Decimal = dec!(0.5);

/// Floor applied under the conservative stance.
const CONSERVATIVE_FLOOR: Decimal = dec!(0.35);

/// Cap applied under the aggressive stance.
const AGGRESSIVE_CAP: Decimal = dec!(0.25);

/// How to lean when the effective rate is itself an estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxStance {
    /// Use the estimated rate as-is.
    #[default]
    Neutral,
    /// Floor the rate at 35%, understating NOPAT.
    Conservative,
    /// Cap the rate at 25%, overstating NOPAT.
    Aggressive,
}

/// Effective tax rate for a statement, after applying the stance.
///
/// An explicit `tax_rate` on the statement short-circuits the ladder but
/// still gets the stance floor/cap.
pub fn effective_tax_rate(stmt: &FinancialStatement, stance: TaxStance) -> Rate {
    let base = stmt.tax_rate.unwrap_or_else(|| estimate_rate(stmt));
    match stance {
        TaxStance::Neutral => base,
        TaxStance::Conservative => base.max(CONSERVATIVE_FLOOR),
        TaxStance::Aggressive => base.min(AGGRESSIVE_CAP),
    }
}

fn estimate_rate(stmt: &FinancialStatement) -> Rate {
    // Rung 1: reported tax expense over pre-tax (ordinary) income.
    if let (Some(tax_expense), Some(ordinary_income)) = (stmt.tax_expense, stmt.ordinary_income) {
        if ordinary_income > Decimal::ZERO {
            let rate = tax_expense / ordinary_income;
            if rate >= Decimal::ZERO && rate <= MAX_PLAUSIBLE_RATE {
                return rate;
            }
        }
    }

    // Rung 2: rate implied by the gap between operating and net income.
    if let (Some(net_income), Some(operating_income)) = (stmt.net_income, stmt.operating_income) {
        if operating_income > Decimal::ZERO {
            let implied = (operating_income - net_income) / operating_income;
            if implied >= Decimal::ZERO && implied <= MAX_PLAUSIBLE_RATE {
                return implied;
            }
        }
    }

    DEFAULT_TAX_RATE
}
