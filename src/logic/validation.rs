use crate::error::{FarmwiseError, Result};
use crate::models::{FertilizerParameters, FieldConditions, ParameterRecord, PesticideParameters};

/// Range checks on physical readings.
pub trait Validate {
    /// Every out-of-range reading, as a human-readable message.
    fn issues(&self) -> Vec<String>;

    /// Lenient mode logs each issue; strict mode rejects the record.
    fn check(&self, strict: bool) -> Result<()> {
        let issues = self.issues();
        if issues.is_empty() {
            return Ok(());
        }
        if strict {
            return Err(FarmwiseError::Validation(issues.join("; ")));
        }
        for issue in &issues {
            tracing::warn!("{}", issue);
        }
        Ok(())
    }
}

fn within(issues: &mut Vec<String>, label: &str, value: f64, min: f64, max: f64) {
    if !(min..=max).contains(&value) {
        issues.push(format!("{} {} is outside {}..{}", label, value, min, max));
    }
}

fn non_negative(issues: &mut Vec<String>, label: &str, value: f64) {
    if !(value >= 0.0) {
        issues.push(format!("{} {} cannot be negative", label, value));
    }
}

impl Validate for PesticideParameters {
    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        within(&mut issues, "temperature (°C)", self.temperature_c, -50.0, 60.0);
        within(&mut issues, "humidity (%)", self.humidity_percent, 0.0, 100.0);
        non_negative(&mut issues, "rainfall (mm)", self.rainfall_mm);
        issues
    }
}

impl Validate for FertilizerParameters {
    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        non_negative(&mut issues, "nitrogen (kg/ha)", self.nitrogen_kg_ha);
        non_negative(&mut issues, "phosphorus (kg/ha)", self.phosphorus_kg_ha);
        non_negative(&mut issues, "potassium (kg/ha)", self.potassium_kg_ha);
        within(&mut issues, "pH", self.ph, 0.0, 14.0);
        issues
    }
}

impl Validate for ParameterRecord {
    fn issues(&self) -> Vec<String> {
        match self {
            ParameterRecord::Pesticide(p) => p.issues(),
            ParameterRecord::Fertilizer(f) => f.issues(),
        }
    }
}

impl Validate for FieldConditions {
    fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        non_negative(&mut issues, "soil N (kg/ha)", self.soil_n);
        non_negative(&mut issues, "soil P (kg/ha)", self.soil_p);
        non_negative(&mut issues, "soil K (kg/ha)", self.soil_k);
        within(&mut issues, "temperature (°C)", self.temperature_c, -50.0, 60.0);
        within(&mut issues, "humidity (%)", self.humidity_percent, 0.0, 100.0);
        within(&mut issues, "pH", self.ph, 0.0, 14.0);
        non_negative(&mut issues, "rainfall (mm)", self.rainfall_mm);
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(PesticideParameters::defaults("Tunis").issues().is_empty());
        assert!(FertilizerParameters::defaults("Tunis").issues().is_empty());
        assert!(FieldConditions::default().issues().is_empty());
    }

    #[test]
    fn reports_every_violation() {
        let c = FieldConditions {
            ph: 15.0,
            humidity_percent: 120.0,
            rainfall_mm: -5.0,
            soil_k: -1.0,
            ..FieldConditions::default()
        };
        let issues = c.issues();
        assert_eq!(issues.len(), 4);
        assert!(issues.iter().any(|i| i.starts_with("pH 15")));
    }

    #[test]
    fn nan_is_rejected() {
        let mut p = FertilizerParameters::defaults("Tunis");
        p.ph = f64::NAN;
        p.nitrogen_kg_ha = f64::NAN;
        assert_eq!(p.issues().len(), 2);
    }

    #[test]
    fn strict_mode_fails_lenient_mode_passes() {
        let mut p = PesticideParameters::defaults("Tunis");
        p.humidity_percent = 150.0;
        assert!(p.check(false).is_ok());
        match p.check(true) {
            Err(FarmwiseError::Validation(msg)) => assert!(msg.contains("humidity")),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
