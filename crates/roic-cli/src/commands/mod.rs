pub mod industry;
pub mod roic;
pub mod trend;
pub mod validate;
