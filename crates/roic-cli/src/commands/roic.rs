use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use roic_core::roic::{calculate_all, calculate_roic, CalculationMethod, RoicInput, TaxStance};
use roic_core::statements::FinancialStatement;
use roic_core::types::FiscalPeriod;

use crate::input;

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum MethodArg {
    #[default]
    Basic,
    Detailed,
    Asset,
    Modified,
}

impl From<MethodArg> for CalculationMethod {
    fn from(m: MethodArg) -> Self {
        match m {
            MethodArg::Basic => CalculationMethod::Basic,
            MethodArg::Detailed => CalculationMethod::Detailed,
            MethodArg::Asset => CalculationMethod::Asset,
            MethodArg::Modified => CalculationMethod::Modified,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum StanceArg {
    #[default]
    Neutral,
    Conservative,
    Aggressive,
}

impl From<StanceArg> for TaxStance {
    fn from(s: StanceArg) -> Self {
        match s {
            StanceArg::Neutral => TaxStance::Neutral,
            StanceArg::Conservative => TaxStance::Conservative,
            StanceArg::Aggressive => TaxStance::Aggressive,
        }
    }
}

/// Arguments for a single-method ROIC calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct CalcArgs {
    /// Invested-capital construction method
    #[arg(long, value_enum, default_value = "basic")]
    pub method: MethodArg,

    /// How to lean when the effective tax rate is estimated
    #[arg(long, value_enum, default_value = "neutral")]
    pub tax_stance: StanceArg,

    /// Fiscal year of the statement
    #[arg(long)]
    pub fiscal_year: Option<i32>,

    /// Operating income
    #[arg(long)]
    pub operating_income: Option<Decimal>,

    /// Interest income (detailed/asset/modified methods)
    #[arg(long)]
    pub interest_income: Option<Decimal>,

    /// Effective tax rate (e.g. 0.30 for 30%); estimated when omitted
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Cash and cash equivalents
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Shareholders' equity (detailed/modified methods)
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Interest-bearing debt; estimated from liabilities when omitted
    #[arg(long)]
    pub interest_bearing_debt: Option<Decimal>,

    /// Accounts payable (asset method)
    #[arg(long)]
    pub accounts_payable: Option<Decimal>,

    /// Accrued expenses (asset method)
    #[arg(long)]
    pub accrued_expenses: Option<Decimal>,

    /// Lease expense (modified method)
    #[arg(long)]
    pub lease_expense: Option<Decimal>,

    /// Lease debt (modified method)
    #[arg(long)]
    pub lease_debt: Option<Decimal>,

    /// Path to a JSON/YAML statement file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for running all four methods at once
#[derive(Args)]
pub struct AllArgs {
    /// Path to a JSON/YAML statement file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_calc(args: CalcArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement = statement_from(&args)?;
    let result = calculate_roic(&RoicInput {
        statement,
        method: args.method.into(),
        tax_stance: args.tax_stance.into(),
    })?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_all(args: AllArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let statement: FinancialStatement = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped stdin required".into());
    };
    let result = calculate_all(&statement)?;
    Ok(serde_json::to_value(result)?)
}

fn statement_from(args: &CalcArgs) -> Result<FinancialStatement, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return Ok(input::file::read_input(path)?);
    }
    if let Some(data) = input::stdin::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }
    statement_from_flags(args)
}

fn statement_from_flags(args: &CalcArgs) -> Result<FinancialStatement, Box<dyn std::error::Error>> {
    let fiscal_year = args
        .fiscal_year
        .ok_or("--fiscal-year is required (or provide --input)")?;
    let mut stmt = FinancialStatement::empty(FiscalPeriod::annual(fiscal_year));
    stmt.operating_income = args.operating_income;
    stmt.interest_income = args.interest_income;
    stmt.tax_rate = args.tax_rate;
    stmt.total_assets = args.total_assets;
    stmt.cash_and_equivalents = args.cash;
    stmt.shareholders_equity = args.equity;
    stmt.interest_bearing_debt = args.interest_bearing_debt;
    stmt.accounts_payable = args.accounts_payable;
    stmt.accrued_expenses = args.accrued_expenses;
    stmt.lease_expense = args.lease_expense;
    stmt.lease_debt = args.lease_debt;
    Ok(stmt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bare_args() -> CalcArgs {
        CalcArgs {
            method: MethodArg::Basic,
            tax_stance: StanceArg::Neutral,
            fiscal_year: None,
            operating_income: None,
            interest_income: None,
            tax_rate: None,
            total_assets: None,
            cash: None,
            equity: None,
            interest_bearing_debt: None,
            accounts_payable: None,
            accrued_expenses: None,
            lease_expense: None,
            lease_debt: None,
            input: None,
        }
    }

    #[test]
    fn test_flags_require_fiscal_year() {
        let err = statement_from_flags(&bare_args()).unwrap_err();
        assert!(err.to_string().contains("--fiscal-year"));
    }

    #[test]
    fn test_flags_map_onto_statement() {
        let mut args = bare_args();
        args.fiscal_year = Some(2023);
        args.operating_income = Some(dec!(150000));
        args.tax_rate = Some(dec!(0.30));
        args.total_assets = Some(dec!(2000000));
        args.cash = Some(dec!(200000));

        let stmt = statement_from_flags(&args).unwrap();
        assert_eq!(stmt.period, FiscalPeriod::annual(2023));
        assert_eq!(stmt.operating_income, Some(dec!(150000)));
        assert_eq!(stmt.cash_and_equivalents, Some(dec!(200000)));
        assert!(stmt.lease_debt.is_none());
    }

    #[test]
    fn test_method_arg_conversion() {
        assert_eq!(
            CalculationMethod::from(MethodArg::Modified),
            CalculationMethod::Modified
        );
        assert_eq!(
            CalculationMethod::from(MethodArg::Asset),
            CalculationMethod::Asset
        );
    }

    #[test]
    fn test_stance_arg_conversion() {
        assert_eq!(
            TaxStance::from(StanceArg::Conservative),
            TaxStance::Conservative
        );
    }
}
