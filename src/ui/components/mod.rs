pub mod gauge;
pub mod input;

pub use gauge::{
    humidity_gauge, method_gauge, optimal_gauge, ph_gauge, temperature_gauge, GaugeWidget,
};
pub use input::{InputWidget, TextBuffer};
