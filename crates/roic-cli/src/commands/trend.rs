use clap::Args;
use serde::Deserialize;
use serde_json::Value;

use roic_core::trend::{analyze_trend, RoicObservation};

use crate::input;

/// Arguments for ROIC trend analysis
#[derive(Args)]
pub struct TrendArgs {
    /// Path to a JSON/YAML file: either `{"series": [...]}` or a bare
    /// array of `{fiscal_year, roic}` observations
    #[arg(long)]
    pub input: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TrendRequest {
    Wrapped { series: Vec<RoicObservation> },
    Bare(Vec<RoicObservation>),
}

impl TrendRequest {
    fn into_series(self) -> Vec<RoicObservation> {
        match self {
            TrendRequest::Wrapped { series } => series,
            TrendRequest::Bare(series) => series,
        }
    }
}

pub fn run_trend(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: TrendRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file> or piped stdin required".into());
    };

    let result = analyze_trend(&request.into_series())?;
    Ok(serde_json::to_value(result)?)
}
