pub mod advice;
pub mod conditions;
pub mod forecast;
pub mod irrigation;

pub use advice::AdviceScreen;
pub use conditions::{ConditionField, ConditionsScreen};
pub use forecast::ForecastScreen;
pub use irrigation::IrrigationScreen;
