pub mod company;
pub mod financials;
pub mod validation;

pub use company::CompanyProfile;
pub use financials::FinancialStatement;
