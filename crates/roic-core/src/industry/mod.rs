pub mod adjustment;
pub mod stats;

pub use adjustment::{apply_industry_adjustment, IndustryProfile};
pub use stats::{industry_statistics, percentile_rank, CompanyRoic, IndustryStatistics, Quartiles};
