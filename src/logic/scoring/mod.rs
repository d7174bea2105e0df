pub mod crop_suggestion;
pub mod fertilizer;
pub mod irrigation;
pub mod pesticide;
pub mod yield_estimate;

pub use crop_suggestion::CropSuggestionScorer;
pub use fertilizer::{FertilizerScorer, PhAdvice};
pub use irrigation::IrrigationScorer;
pub use pesticide::PesticideScorer;
pub use yield_estimate::YieldScorer;

/// Turns a parameter record into advice.
///
/// Implementations are swappable: the template and formula models here can
/// be replaced by a trained model without touching callers.
pub trait Scorer {
    type Input;
    type Output;

    fn name(&self) -> &'static str;

    fn score(&mut self, input: &Self::Input) -> Self::Output;
}

/// Half-up rounding to a whole number.
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Half-up rounding to one decimal.
pub(crate) fn round1(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_goes_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(86.6), 87.0);
        assert_eq!(round1(12.34), 12.3);
        assert_eq!(round1(12.36), 12.4);
    }
}
