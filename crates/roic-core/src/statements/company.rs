use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Master record for a listed company, keyed by its disclosure (EDINET) code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Disclosure system code, e.g. "E02144"
    pub edinet_code: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name_en: Option<String>,
    /// Ticker on the exchange, e.g. "7203"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub securities_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub industry_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiscal_year_end: Option<NaiveDate>,
}

impl CompanyProfile {
    pub fn new(edinet_code: impl Into<String>, company_name: impl Into<String>) -> Self {
        CompanyProfile {
            edinet_code: edinet_code.into(),
            company_name: company_name.into(),
            company_name_en: None,
            securities_code: None,
            industry_code: None,
            market_segment: None,
            fiscal_year_end: None,
        }
    }
}
