pub mod advisor;
pub mod extractor;
pub mod random;
pub mod rules;
pub mod scoring;
pub mod validation;

pub use advisor::AdvisorService;
pub use extractor::FieldExtractor;
pub use rules::RulesEngine;
pub use scoring::Scorer;
pub use validation::Validate;
