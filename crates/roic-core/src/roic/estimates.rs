//! Balance-sheet estimation heuristics.
//!
//! Japanese summary filings often omit detail lines. When a figure is
//! reported it is used as-is; otherwise these ratios approximate it from
//! coarser totals. The ratios come from typical balance-sheet composition
//! of listed non-financial companies:
//!
//! - interest-bearing debt ≈ 80% of fixed liabilities + 30% of current
//! - non-interest-bearing current liabilities ≈ 70% of current liabilities
//! - goodwill ≈ 5% of fixed assets, other intangibles ≈ 10%

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::statements::FinancialStatement;
use crate::types::Money;

const FIXED_LIABILITY_DEBT_RATIO: Decimal = dec!(0.8);
const CURRENT_LIABILITY_DEBT_RATIO: Decimal = dec!(0.3);
const NON_INTEREST_BEARING_RATIO: Decimal = dec!(0.7);
const GOODWILL_RATIO: Decimal = dec!(0.05);
const INTANGIBLE_RATIO: Decimal = dec!(0.10);

/// Interest-bearing debt: reported, or estimated from liability totals.
pub fn interest_bearing_debt(stmt: &FinancialStatement) -> Money {
    if let Some(reported) = stmt.interest_bearing_debt {
        return reported;
    }
    let fixed = FinancialStatement::or_zero(stmt.fixed_liabilities);
    let current = FinancialStatement::or_zero(stmt.current_liabilities);
    fixed * FIXED_LIABILITY_DEBT_RATIO + current * CURRENT_LIABILITY_DEBT_RATIO
}

/// Non-interest-bearing current liabilities (payables, accruals).
/// Reported detail lines win; otherwise 70% of current liabilities.
pub fn non_interest_bearing_liabilities(stmt: &FinancialStatement) -> Money {
    match (stmt.accounts_payable, stmt.accrued_expenses) {
        (None, None) => {
            FinancialStatement::or_zero(stmt.current_liabilities) * NON_INTEREST_BEARING_RATIO
        }
        (payable, accrued) => {
            FinancialStatement::or_zero(payable) + FinancialStatement::or_zero(accrued)
        }
    }
}

/// Goodwill: reported, or 5% of fixed assets.
pub fn goodwill(stmt: &FinancialStatement) -> Money {
    stmt.goodwill
        .unwrap_or_else(|| FinancialStatement::or_zero(stmt.fixed_assets) * GOODWILL_RATIO)
}

/// Other intangibles: reported, or 10% of fixed assets.
pub fn intangible_assets(stmt: &FinancialStatement) -> Money {
    stmt.intangible_assets
        .unwrap_or_else(|| FinancialStatement::or_zero(stmt.fixed_assets) * INTANGIBLE_RATIO)
}

/// Working capital, when both sides of the current balance are reported.
pub fn working_capital(stmt: &FinancialStatement) -> Option<Money> {
    match (stmt.current_assets, stmt.current_liabilities) {
        (Some(assets), Some(liabilities)) => Some(assets - liabilities),
        _ => None,
    }
}
