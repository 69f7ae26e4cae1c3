use clap::Args;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use roic_core::statements::validation::{
    validate_company, validate_profitable, validate_statement,
};
use roic_core::statements::{CompanyProfile, FinancialStatement};

use crate::input;

/// Arguments for the validation report
#[derive(Args)]
pub struct ValidateArgs {
    /// Path to a JSON/YAML file with `company` and/or `statement` keys
    #[arg(long)]
    pub input: Option<String>,

    /// Also apply the stricter profitability screen to the statement
    #[arg(long, default_value_t = false)]
    pub profitability: bool,
}

#[derive(Debug, Deserialize)]
struct ValidateRequest {
    company: Option<CompanyProfile>,
    statement: Option<FinancialStatement>,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: &'static str,
    passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct ValidationReport {
    valid: bool,
    checks: Vec<CheckResult>,
}

pub fn run_validate(args: ValidateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: ValidateRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped stdin required".into());
    };

    if request.company.is_none() && request.statement.is_none() {
        return Err("input must contain a `company` and/or a `statement` key".into());
    }

    let mut checks = Vec::new();

    if let Some(ref company) = request.company {
        checks.push(check("company", validate_company(company)));
    }
    if let Some(ref statement) = request.statement {
        checks.push(check("statement", validate_statement(statement)));
        if args.profitability {
            checks.push(check("profitability", validate_profitable(statement)));
        }
    }

    let report = ValidationReport {
        valid: checks.iter().all(|c| c.passed),
        checks,
    };
    Ok(serde_json::to_value(report)?)
}

fn check(name: &'static str, result: roic_core::RoicResult<()>) -> CheckResult {
    match result {
        Ok(()) => CheckResult {
            name,
            passed: true,
            message: None,
        },
        Err(e) => CheckResult {
            name,
            passed: false,
            message: Some(e.to_string()),
        },
    }
}
