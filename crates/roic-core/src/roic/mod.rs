pub mod calculator;
pub mod estimates;
pub mod rating;
pub mod tax;

pub use calculator::{
    calculate_all, calculate_roic, AllMethodsOutput, CalculationMethod, RoicInput, RoicOutput,
};
pub use rating::RoicRating;
pub use tax::TaxStance;
