use super::extractor::FieldExtractor;
use super::scoring::{
    CropSuggestionScorer, FertilizerScorer, IrrigationScorer, PesticideScorer, Scorer, YieldScorer,
};
use super::validation::Validate;
use crate::config::Config;
use crate::error::Result;
use crate::models::{
    CropSuggestion, Domain, FertilizerParameters, FieldConditions, FormValues,
    GeographicReference, IrrigationComparison, ParameterRecord, PesticideParameters,
    RecommendationResult, YieldEstimate,
};
use std::sync::Arc;

/// One entry point for every advisory form: free text or structured
/// values in, validated and scored advice out.
pub struct AdvisorService {
    config: Config,
    extractor: FieldExtractor,
    pesticide: PesticideScorer,
    fertilizer: FertilizerScorer,
    irrigation: IrrigationScorer,
    yields: YieldScorer,
    crops: CropSuggestionScorer,
}

impl AdvisorService {
    pub fn new(config: Config, geography: Arc<GeographicReference>) -> Self {
        let mut extractor = FieldExtractor::new(geography);
        if let Some(region) = &config.extraction.default_region {
            extractor = extractor.with_default_region(region);
        }

        let scoring = &config.scoring;
        if scoring.jitter {
            tracing::info!(seed = ?scoring.seed, spread = scoring.jitter_spread, "Yield jitter enabled");
        } else {
            tracing::info!("Yield jitter disabled, simulated models are deterministic");
        }

        Self {
            pesticide: PesticideScorer::new(config.report.issue_separator.clone()),
            fertilizer: FertilizerScorer,
            irrigation: IrrigationScorer::new(scoring.random_source(), scoring.jitter_spread),
            yields: YieldScorer::new(scoring.random_source(), scoring.jitter_spread),
            crops: CropSuggestionScorer::new(scoring.random_source()),
            extractor,
            config,
        }
    }

    /// Build with the geography the config points at.
    pub fn from_config(config: Config) -> Result<Self> {
        let geography = Arc::new(config.geography()?);
        Ok(Self::new(config, geography))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn geography(&self) -> &GeographicReference {
        self.extractor.geography()
    }

    pub fn default_region(&self) -> &str {
        self.extractor.default_region()
    }

    pub fn extract(&self, text: &str, domain: Domain) -> ParameterRecord {
        self.extractor.extract(text, domain)
    }

    /// Extract a record from free text, then score it.
    pub fn advise_text(
        &mut self,
        text: &str,
        domain: Domain,
    ) -> Result<(ParameterRecord, RecommendationResult)> {
        let record = self.extract(text, domain);
        let result = self.advise(&record)?;
        Ok((record, result))
    }

    /// Parse a structured form submission, then score it.
    pub fn advise_form(
        &mut self,
        domain: Domain,
        form: &FormValues,
    ) -> Result<(ParameterRecord, RecommendationResult)> {
        let geography = self.extractor.geography();
        let record = match domain {
            Domain::Pesticide => {
                ParameterRecord::Pesticide(PesticideParameters::from_form(form, geography)?)
            }
            Domain::Fertilizer => {
                ParameterRecord::Fertilizer(FertilizerParameters::from_form(form, geography)?)
            }
        };
        let result = self.advise(&record)?;
        Ok((record, result))
    }

    pub fn advise(&mut self, record: &ParameterRecord) -> Result<RecommendationResult> {
        record.check(self.config.validation.strict)?;
        let result = match record {
            ParameterRecord::Pesticide(p) => self.pesticide.score(p),
            ParameterRecord::Fertilizer(f) => self.fertilizer.score(f),
        };
        tracing::info!(
            domain = %record.domain(),
            crop = record.crop(),
            region = record.region(),
            "Generated recommendation"
        );
        Ok(result)
    }

    pub fn compare_irrigation(&mut self, c: &FieldConditions) -> Result<IrrigationComparison> {
        c.check(self.config.validation.strict)?;
        Ok(self.irrigation.score(c))
    }

    pub fn estimate_yield(&mut self, c: &FieldConditions) -> Result<YieldEstimate> {
        c.check(self.config.validation.strict)?;
        Ok(self.yields.score(c))
    }

    pub fn suggest_crops(&mut self, c: &FieldConditions) -> Result<CropSuggestion> {
        c.check(self.config.validation.strict)?;
        Ok(self.crops.score(c))
    }

    /// Names of the active scorers, for diagnostics.
    pub fn scorer_names(&self) -> [&'static str; 5] {
        [
            self.pesticide.name(),
            self.fertilizer.name(),
            self.irrigation.name(),
            self.yields.name(),
            self.crops.name(),
        ]
    }

    /// Threshold rules behind the yield forecast's factors and advice.
    pub fn yield_rules(&self) -> Vec<(&'static str, &'static str)> {
        self.yields.rules().list_rules()
    }
}
