use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{Currency, FiscalPeriod, Money, Rate};

/// One period of reported financial data for a company.
///
/// Income-statement and balance-sheet items are optional where filings
/// commonly omit them; the ROIC engine fills gaps from the estimation
/// heuristics in [`crate::roic::estimates`] where it can, and reports
/// `InsufficientData` where it cannot.
///
/// All amounts share the statement's `currency` and unit (typically
/// thousands of yen for EDINET filings).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinancialStatement {
    pub period: FiscalPeriod,
    #[serde(default)]
    pub currency: Currency,

    // Income statement
    #[serde(default)]
    pub revenue: Option<Money>,
    #[serde(default)]
    pub operating_income: Option<Money>,
    #[serde(default)]
    pub interest_income: Option<Money>,
    #[serde(default)]
    pub ordinary_income: Option<Money>,
    #[serde(default)]
    pub net_income: Option<Money>,
    #[serde(default)]
    pub tax_expense: Option<Money>,

    // Balance sheet
    #[serde(default)]
    pub total_assets: Option<Money>,
    #[serde(default)]
    pub cash_and_equivalents: Option<Money>,
    #[serde(default)]
    pub current_assets: Option<Money>,
    #[serde(default)]
    pub current_liabilities: Option<Money>,
    #[serde(default)]
    pub fixed_assets: Option<Money>,
    #[serde(default)]
    pub fixed_liabilities: Option<Money>,
    #[serde(default)]
    pub total_liabilities: Option<Money>,
    #[serde(default)]
    pub shareholders_equity: Option<Money>,
    /// Reported directly when available; otherwise estimated from
    /// fixed/current liabilities.
    #[serde(default)]
    pub interest_bearing_debt: Option<Money>,
    #[serde(default)]
    pub accounts_payable: Option<Money>,
    #[serde(default)]
    pub accrued_expenses: Option<Money>,
    #[serde(default)]
    pub goodwill: Option<Money>,
    #[serde(default)]
    pub intangible_assets: Option<Money>,

    // IFRS 16 lease items
    #[serde(default)]
    pub lease_expense: Option<Money>,
    #[serde(default)]
    pub lease_debt: Option<Money>,

    /// Effective tax rate override (0.0–1.0). When absent the engine
    /// estimates it from tax expense and pre-tax income.
    #[serde(default)]
    pub tax_rate: Option<Rate>,
}

impl FinancialStatement {
    /// Empty statement for the given period; fields are filled by the caller.
    pub fn empty(period: FiscalPeriod) -> Self {
        FinancialStatement {
            period,
            currency: Currency::default(),
            revenue: None,
            operating_income: None,
            interest_income: None,
            ordinary_income: None,
            net_income: None,
            tax_expense: None,
            total_assets: None,
            cash_and_equivalents: None,
            current_assets: None,
            current_liabilities: None,
            fixed_assets: None,
            fixed_liabilities: None,
            total_liabilities: None,
            shareholders_equity: None,
            interest_bearing_debt: None,
            accounts_payable: None,
            accrued_expenses: None,
            goodwill: None,
            intangible_assets: None,
            lease_expense: None,
            lease_debt: None,
            tax_rate: None,
        }
    }

    /// A field, or zero when unreported. For additive balance-sheet terms
    /// where absence means "none reported".
    pub fn or_zero(field: Option<Money>) -> Money {
        field.unwrap_or(Decimal::ZERO)
    }
}
