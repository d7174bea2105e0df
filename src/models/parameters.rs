use super::geography::GeographicReference;
use super::irrigation::IrrigationMethod;
use super::season::Season;
use crate::error::{FarmwiseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Placeholder for optional text fields the farmer left blank.
pub const UNSPECIFIED: &str = "Unspecified";

/// Flat string-keyed form submission, as posted by the advisory forms.
pub type FormValues = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Pesticide,
    Fertilizer,
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Pesticide => "pesticide",
            Domain::Fertilizer => "fertilizer",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PesticideParameters {
    pub crop: String,
    pub region: String,
    pub district: String,
    /// Detected pest, disease and weed names. Joined only when rendered.
    pub issues: Vec<String>,
    pub season: Season,
    pub growing_season: String,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub rainfall_mm: f64,
}

impl PesticideParameters {
    pub const DEFAULT_CROP: &'static str = "tomate";
    pub const DEFAULT_SEASON: Season = Season::Summer;
    pub const DEFAULT_ISSUES: [&'static str; 2] = ["pucerons", "mildiou"];
    pub const DEFAULT_TEMPERATURE_C: f64 = 25.0;
    pub const DEFAULT_HUMIDITY_PERCENT: f64 = 70.0;
    pub const DEFAULT_RAINFALL_MM: f64 = 10.0;

    pub fn defaults(region: &str) -> Self {
        Self {
            crop: Self::DEFAULT_CROP.to_string(),
            region: region.to_string(),
            district: UNSPECIFIED.to_string(),
            issues: Self::DEFAULT_ISSUES.iter().map(|s| s.to_string()).collect(),
            season: Self::DEFAULT_SEASON,
            growing_season: UNSPECIFIED.to_string(),
            temperature_c: Self::DEFAULT_TEMPERATURE_C,
            humidity_percent: Self::DEFAULT_HUMIDITY_PERCENT,
            rainfall_mm: Self::DEFAULT_RAINFALL_MM,
        }
    }

    pub fn problem_description(&self, separator: &str) -> String {
        self.issues.join(separator)
    }

    /// Build a record from the structured pesticide form.
    ///
    /// Keys: crop, region, district?, pest_problem, season, growing_season?,
    /// temperature, humidity, rainfall. A comma-separated problem becomes
    /// several issues.
    pub fn from_form(form: &FormValues, geography: &GeographicReference) -> Result<Self> {
        let (region, district) = locate(form, geography)?;

        let issues: Vec<String> = required(form, "pest_problem")?
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            crop: required(form, "crop")?.to_lowercase(),
            region,
            district,
            issues,
            season: season(form, "season")?,
            growing_season: optional(form, "growing_season")
                .unwrap_or(UNSPECIFIED)
                .to_string(),
            temperature_c: number(form, "temperature")?,
            humidity_percent: number(form, "humidity")?,
            rainfall_mm: number(form, "rainfall")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerParameters {
    pub crop: String,
    pub region: String,
    pub district: String,
    pub nitrogen_kg_ha: f64,
    pub phosphorus_kg_ha: f64,
    pub potassium_kg_ha: f64,
    pub ph: f64,
    pub fertilizer_type: String,
    pub season: Season,
}

impl FertilizerParameters {
    pub const DEFAULT_CROP: &'static str = "maïs";
    pub const DEFAULT_SEASON: Season = Season::Spring;
    pub const DEFAULT_FERTILIZER_TYPE: &'static str = "NPK";
    pub const DEFAULT_NITROGEN: f64 = 80.0;
    pub const DEFAULT_PHOSPHORUS: f64 = 40.0;
    pub const DEFAULT_POTASSIUM: f64 = 20.0;
    pub const DEFAULT_PH: f64 = 6.5;

    pub fn defaults(region: &str) -> Self {
        Self {
            crop: Self::DEFAULT_CROP.to_string(),
            region: region.to_string(),
            district: UNSPECIFIED.to_string(),
            nitrogen_kg_ha: Self::DEFAULT_NITROGEN,
            phosphorus_kg_ha: Self::DEFAULT_PHOSPHORUS,
            potassium_kg_ha: Self::DEFAULT_POTASSIUM,
            ph: Self::DEFAULT_PH,
            fertilizer_type: Self::DEFAULT_FERTILIZER_TYPE.to_string(),
            season: Self::DEFAULT_SEASON,
        }
    }

    /// Build a record from the structured fertilizer form.
    ///
    /// Keys: crop, region, district?, nitrogen, phosphorus, potassium, ph,
    /// fertilizer_type? (or fertilizer_plant?), season.
    pub fn from_form(form: &FormValues, geography: &GeographicReference) -> Result<Self> {
        let (region, district) = locate(form, geography)?;

        let fertilizer_type = optional(form, "fertilizer_type")
            .or_else(|| optional(form, "fertilizer_plant"))
            .unwrap_or(UNSPECIFIED)
            .to_string();

        Ok(Self {
            crop: required(form, "crop")?.to_lowercase(),
            region,
            district,
            nitrogen_kg_ha: number(form, "nitrogen")?,
            phosphorus_kg_ha: number(form, "phosphorus")?,
            potassium_kg_ha: number(form, "potassium")?,
            ph: number(form, "ph")?,
            fertilizer_type,
            season: season(form, "season")?,
        })
    }
}

/// Output of the field extractor, one variant per domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "domain", rename_all = "lowercase")]
pub enum ParameterRecord {
    Pesticide(PesticideParameters),
    Fertilizer(FertilizerParameters),
}

impl ParameterRecord {
    pub fn domain(&self) -> Domain {
        match self {
            ParameterRecord::Pesticide(_) => Domain::Pesticide,
            ParameterRecord::Fertilizer(_) => Domain::Fertilizer,
        }
    }

    pub fn crop(&self) -> &str {
        match self {
            ParameterRecord::Pesticide(p) => &p.crop,
            ParameterRecord::Fertilizer(f) => &f.crop,
        }
    }

    pub fn region(&self) -> &str {
        match self {
            ParameterRecord::Pesticide(p) => &p.region,
            ParameterRecord::Fertilizer(f) => &f.region,
        }
    }

    pub fn district(&self) -> &str {
        match self {
            ParameterRecord::Pesticide(p) => &p.district,
            ParameterRecord::Fertilizer(f) => &f.district,
        }
    }
}

/// Soil and climate readings for the irrigation, yield and crop-suggestion models.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConditions {
    pub crop: String,
    pub soil_n: f64,
    pub soil_p: f64,
    pub soil_k: f64,
    pub temperature_c: f64,
    pub humidity_percent: f64,
    pub ph: f64,
    pub rainfall_mm: f64,
    /// Method currently in use on the field, if known.
    pub irrigation: Option<IrrigationMethod>,
}

impl FieldConditions {
    pub const FIELDS: [&'static str; 9] = [
        "crop",
        "soil_n",
        "soil_p",
        "soil_k",
        "temperature",
        "humidity",
        "ph",
        "rainfall",
        "irrigation",
    ];

    /// Start from defaults and apply every submitted field.
    pub fn from_form(form: &FormValues) -> Result<Self> {
        let mut conditions = Self::default();
        for (key, value) in form {
            conditions.apply(key, value)?;
        }
        Ok(conditions)
    }

    /// Set one field from its textual form value.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "crop" => {
                if value.is_empty() {
                    return Err(FarmwiseError::InvalidInput("crop cannot be empty".into()));
                }
                self.crop = value.to_lowercase();
            }
            "soil_n" => self.soil_n = parse_number(key, value)?,
            "soil_p" => self.soil_p = parse_number(key, value)?,
            "soil_k" => self.soil_k = parse_number(key, value)?,
            "temperature" => self.temperature_c = parse_number(key, value)?,
            "humidity" => self.humidity_percent = parse_number(key, value)?,
            "ph" => self.ph = parse_number(key, value)?,
            "rainfall" => self.rainfall_mm = parse_number(key, value)?,
            "irrigation" => {
                self.irrigation = if value.is_empty() || value.eq_ignore_ascii_case("none") {
                    None
                } else {
                    Some(IrrigationMethod::from_str(value).ok_or_else(|| {
                        FarmwiseError::InvalidInput(format!(
                            "unknown irrigation method '{}'",
                            value
                        ))
                    })?)
                };
            }
            other => {
                return Err(FarmwiseError::InvalidInput(format!(
                    "unknown field '{}'",
                    other
                )))
            }
        }
        Ok(())
    }

    /// Textual value of a field, as shown in an editable form.
    pub fn value_of(&self, key: &str) -> Option<String> {
        let value = match key {
            "crop" => self.crop.clone(),
            "soil_n" => self.soil_n.to_string(),
            "soil_p" => self.soil_p.to_string(),
            "soil_k" => self.soil_k.to_string(),
            "temperature" => self.temperature_c.to_string(),
            "humidity" => self.humidity_percent.to_string(),
            "ph" => self.ph.to_string(),
            "rainfall" => self.rainfall_mm.to_string(),
            "irrigation" => self
                .irrigation
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "None".to_string()),
            _ => return None,
        };
        Some(value)
    }
}

impl Default for FieldConditions {
    fn default() -> Self {
        Self {
            crop: "tomate".to_string(),
            soil_n: 40.0,
            soil_p: 60.0,
            soil_k: 30.0,
            temperature_c: 25.0,
            humidity_percent: 70.0,
            ph: 6.5,
            rainfall_mm: 100.0,
            irrigation: None,
        }
    }
}

fn optional<'a>(form: &'a FormValues, key: &str) -> Option<&'a str> {
    form.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required<'a>(form: &'a FormValues, key: &str) -> Result<&'a str> {
    optional(form, key)
        .ok_or_else(|| FarmwiseError::InvalidInput(format!("missing field '{}'", key)))
}

fn parse_number(key: &str, value: &str) -> Result<f64> {
    value.replace(',', ".").parse::<f64>().map_err(|_| {
        FarmwiseError::InvalidInput(format!("field '{}' is not a number: '{}'", key, value))
    })
}

fn number(form: &FormValues, key: &str) -> Result<f64> {
    parse_number(key, required(form, key)?)
}

fn season(form: &FormValues, key: &str) -> Result<Season> {
    let value = required(form, key)?;
    Season::from_str(value)
        .ok_or_else(|| FarmwiseError::InvalidInput(format!("unknown season '{}'", value)))
}

/// Canonical (region, district) pair for a form, checked against the reference.
fn locate(form: &FormValues, geography: &GeographicReference) -> Result<(String, String)> {
    let region_name = required(form, "region")?;
    let region = geography
        .find_region(region_name)
        .ok_or_else(|| FarmwiseError::NotFound(format!("region '{}'", region_name)))?;

    let district = match optional(form, "district") {
        None => UNSPECIFIED.to_string(),
        Some(name) => match region.find_district(name) {
            Some(district) => district.to_string(),
            None => {
                let hint = geography
                    .locate_district(name)
                    .map(|(owner, _)| format!(" (it belongs to '{}')", owner.name))
                    .unwrap_or_default();
                return Err(FarmwiseError::InvalidInput(format!(
                    "district '{}' is not in region '{}'{}",
                    name, region.name, hint
                )));
            }
        },
    };

    Ok((region.name.clone(), district))
}
