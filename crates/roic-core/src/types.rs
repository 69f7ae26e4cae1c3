use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.30 = 30%). Never as percentages,
/// except fields explicitly suffixed `_pct`.
pub type Rate = Decimal;

/// Multiples (e.g. 1.2x asset turnover)
pub type Multiple = Decimal;

/// Currency code
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[default]
    JPY,
    USD,
    EUR,
    GBP,
    CHF,
    CAD,
    AUD,
    HKD,
    SGD,
    Other(String),
}

/// A reporting period: fiscal year plus optional quarter (annual when None).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FiscalPeriod {
    pub fiscal_year: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_quarter: Option<u8>,
}

impl FiscalPeriod {
    pub fn annual(fiscal_year: i32) -> Self {
        FiscalPeriod {
            fiscal_year,
            fiscal_quarter: None,
        }
    }

    pub fn quarterly(fiscal_year: i32, quarter: u8) -> Self {
        FiscalPeriod {
            fiscal_year,
            fiscal_quarter: Some(quarter),
        }
    }

    pub fn is_annual(&self) -> bool {
        self.fiscal_quarter.is_none()
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

/// Wire envelope matching the platform's HTTP responses:
/// `{"status": "success", "data": ...}` or `{"status": "error", "message": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            status: ResponseStatus::Success,
            data: Some(data),
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ApiResponse {
            status: ResponseStatus::Error,
            data: None,
            message: Some(message.into()),
        }
    }
}
