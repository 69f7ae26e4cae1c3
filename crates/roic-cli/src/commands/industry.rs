use clap::Args;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use roic_core::industry::{
    apply_industry_adjustment, industry_statistics, percentile_rank, CompanyRoic,
    IndustryProfile, IndustryStatistics,
};

use crate::input;

/// Arguments for industry universe statistics
#[derive(Args)]
pub struct IndustryArgs {
    /// Path to a JSON/YAML file with a `universe` of company ROIC
    /// observations, and optionally `target_roic` and a sector `profile`
    #[arg(long)]
    pub input: Option<String>,

    /// ROIC to rank against the universe (overrides the file's value)
    #[arg(long)]
    pub target_roic: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct IndustryRequest {
    universe: Vec<CompanyRoic>,
    target_roic: Option<Decimal>,
    profile: Option<IndustryProfile>,
}

#[derive(Debug, Serialize)]
struct IndustryReport {
    statistics: IndustryStatistics,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_roic: Option<Decimal>,
    /// Percentile (0-100) of the target within the universe.
    #[serde(skip_serializing_if = "Option::is_none")]
    percentile: Option<Decimal>,
    /// Target ROIC after the sector coefficient.
    #[serde(skip_serializing_if = "Option::is_none")]
    adjusted_target: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile: Option<IndustryProfile>,
}

pub fn run_industry(args: IndustryArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut request: IndustryRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped stdin required".into());
    };

    if let Some(target) = args.target_roic {
        request.target_roic = Some(target);
    }

    let statistics = industry_statistics(&request.universe)?;

    let percentile = match request.target_roic {
        Some(target) => Some(percentile_rank(&request.universe, target)?),
        None => None,
    };
    let adjusted_target = match (request.target_roic, &request.profile) {
        (Some(target), Some(profile)) => Some(apply_industry_adjustment(target, profile)?),
        _ => None,
    };

    let report = IndustryReport {
        statistics,
        target_roic: request.target_roic,
        percentile,
        adjusted_target,
        profile: request.profile,
    };
    Ok(serde_json::to_value(report)?)
}
