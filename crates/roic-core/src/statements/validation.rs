//! Input validation for company records and financial statements.
//!
//! Bounds match what the platform's API layer rejected with a 400:
//! blank identifiers, non-positive core figures, tax rates outside
//! `[0, 1]`, and fiscal years outside the disclosure system's window.

use rust_decimal::Decimal;

use crate::error::RoicError;
use crate::statements::{CompanyProfile, FinancialStatement};
use crate::RoicResult;

/// Earliest fiscal year the disclosure system covers.
pub const MIN_FISCAL_YEAR: i32 = 1990;
/// Upper sanity bound; filings cannot be this far in the future.
pub const MAX_FISCAL_YEAR: i32 = 2100;

/// Validate a company master record.
pub fn validate_company(profile: &CompanyProfile) -> RoicResult<()> {
    if profile.edinet_code.trim().is_empty() {
        return Err(RoicError::InvalidInput {
            field: "edinet_code".into(),
            reason: "Must not be blank".into(),
        });
    }
    if profile.company_name.trim().is_empty() {
        return Err(RoicError::InvalidInput {
            field: "company_name".into(),
            reason: "Must not be blank".into(),
        });
    }
    if let Some(ref code) = profile.securities_code {
        if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(RoicError::InvalidInput {
                field: "securities_code".into(),
                reason: "Must be alphanumeric".into(),
            });
        }
    }
    Ok(())
}

/// Validate a financial statement for use in ROIC calculations.
///
/// Reported figures may legitimately be negative (operating losses,
/// negative equity), so this checks consistency, not profitability:
/// revenue cannot be negative, the tax rate must lie in `[0, 1]`, and
/// the period must be plausible.
pub fn validate_statement(stmt: &FinancialStatement) -> RoicResult<()> {
    let year = stmt.period.fiscal_year;
    if !(MIN_FISCAL_YEAR..=MAX_FISCAL_YEAR).contains(&year) {
        return Err(RoicError::InvalidInput {
            field: "fiscal_year".into(),
            reason: format!("Must be between {MIN_FISCAL_YEAR} and {MAX_FISCAL_YEAR}"),
        });
    }
    if let Some(q) = stmt.period.fiscal_quarter {
        if !(1..=4).contains(&q) {
            return Err(RoicError::InvalidInput {
                field: "fiscal_quarter".into(),
                reason: "Must be 1-4".into(),
            });
        }
    }
    if let Some(revenue) = stmt.revenue {
        if revenue < Decimal::ZERO {
            return Err(RoicError::InvalidInput {
                field: "revenue".into(),
                reason: "Must not be negative".into(),
            });
        }
    }
    if let Some(rate) = stmt.tax_rate {
        if rate < Decimal::ZERO || rate > Decimal::ONE {
            return Err(RoicError::InvalidInput {
                field: "tax_rate".into(),
                reason: "Must be between 0 and 1".into(),
            });
        }
    }
    for (field, value) in [
        ("total_assets", stmt.total_assets),
        ("current_assets", stmt.current_assets),
        ("fixed_assets", stmt.fixed_assets),
    ] {
        if let Some(v) = value {
            if v < Decimal::ZERO {
                return Err(RoicError::InvalidInput {
                    field: field.into(),
                    reason: "Asset totals must not be negative".into(),
                });
            }
        }
    }
    Ok(())
}

/// Stricter check for screening universes: the company must be an
/// operating, profitable business with usable figures.
pub fn validate_profitable(stmt: &FinancialStatement) -> RoicResult<()> {
    validate_statement(stmt)?;

    let revenue = stmt.revenue.ok_or_else(|| {
        RoicError::InsufficientData("revenue is required for profitability screening".into())
    })?;
    if revenue <= Decimal::ZERO {
        return Err(RoicError::InvalidInput {
            field: "revenue".into(),
            reason: "Must be positive".into(),
        });
    }

    let operating_income = stmt.operating_income.ok_or_else(|| {
        RoicError::InsufficientData(
            "operating_income is required for profitability screening".into(),
        )
    })?;
    if operating_income <= Decimal::ZERO {
        return Err(RoicError::InvalidInput {
            field: "operating_income".into(),
            reason: "Must be positive".into(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FiscalPeriod;
    use rust_decimal_macros::dec;

    /// Fixture mirroring a healthy filer: positive revenue and operating
    /// income, tax rate inside [0, 1].
    fn healthy_statement() -> FinancialStatement {
        let mut stmt = FinancialStatement::empty(FiscalPeriod::annual(2023));
        stmt.revenue = Some(dec!(1000000));
        stmt.operating_income = Some(dec!(150000));
        stmt.tax_rate = Some(dec!(0.30));
        stmt.total_assets = Some(dec!(2000000));
        stmt
    }

    #[test]
    fn test_healthy_statement_passes() {
        assert!(validate_statement(&healthy_statement()).is_ok());
        assert!(validate_profitable(&healthy_statement()).is_ok());
    }

    #[test]
    fn test_company_passes_with_name_and_code() {
        let profile = CompanyProfile::new("E02144", "トヨタ自動車株式会社");
        assert!(validate_company(&profile).is_ok());
    }

    #[test]
    fn test_blank_company_name_rejected() {
        let profile = CompanyProfile::new("E02144", "   ");
        let err = validate_company(&profile).unwrap_err();
        match err {
            RoicError::InvalidInput { field, .. } => assert_eq!(field, "company_name"),
            _ => panic!("Expected InvalidInput"),
        }
    }

    #[test]
    fn test_blank_edinet_code_rejected() {
        let profile = CompanyProfile::new("", "テスト株式会社");
        assert!(validate_company(&profile).is_err());
    }

    #[test]
    fn test_non_alphanumeric_securities_code_rejected() {
        let mut profile = CompanyProfile::new("E02144", "テスト株式会社");
        profile.securities_code = Some("72-03".into());
        assert!(validate_company(&profile).is_err());
    }

    #[test]
    fn test_negative_revenue_rejected() {
        let mut stmt = healthy_statement();
        stmt.revenue = Some(dec!(-1));
        let err = validate_statement(&stmt).unwrap_err();
        match err {
            RoicError::InvalidInput { field, .. } => assert_eq!(field, "revenue"),
            _ => panic!("Expected InvalidInput"),
        }
    }

    #[test]
    fn test_zero_revenue_fails_profitability_screen() {
        let mut stmt = healthy_statement();
        stmt.revenue = Some(Decimal::ZERO);
        // Plain validation tolerates zero revenue...
        assert!(validate_statement(&stmt).is_ok());
        // ...the profitability screen does not.
        assert!(validate_profitable(&stmt).is_err());
    }

    #[test]
    fn test_negative_operating_income_fails_profitability_screen() {
        let mut stmt = healthy_statement();
        stmt.operating_income = Some(dec!(-5000));
        assert!(validate_statement(&stmt).is_ok());
        assert!(validate_profitable(&stmt).is_err());
    }

    #[test]
    fn test_tax_rate_bounds() {
        let mut stmt = healthy_statement();
        stmt.tax_rate = Some(dec!(0));
        assert!(validate_statement(&stmt).is_ok());
        stmt.tax_rate = Some(dec!(1));
        assert!(validate_statement(&stmt).is_ok());
        stmt.tax_rate = Some(dec!(1.01));
        assert!(validate_statement(&stmt).is_err());
        stmt.tax_rate = Some(dec!(-0.01));
        assert!(validate_statement(&stmt).is_err());
    }

    #[test]
    fn test_fiscal_year_window() {
        let mut stmt = healthy_statement();
        stmt.period = FiscalPeriod::annual(1989);
        assert!(validate_statement(&stmt).is_err());
        stmt.period = FiscalPeriod::annual(2101);
        assert!(validate_statement(&stmt).is_err());
    }

    #[test]
    fn test_invalid_quarter_rejected() {
        let mut stmt = healthy_statement();
        stmt.period = FiscalPeriod::quarterly(2023, 5);
        assert!(validate_statement(&stmt).is_err());
        stmt.period = FiscalPeriod::quarterly(2023, 4);
        assert!(validate_statement(&stmt).is_ok());
    }

    #[test]
    fn test_missing_revenue_is_insufficient_for_screening() {
        let mut stmt = healthy_statement();
        stmt.revenue = None;
        match validate_profitable(&stmt).unwrap_err() {
            RoicError::InsufficientData(_) => {}
            _ => panic!("Expected InsufficientData"),
        }
    }
}
