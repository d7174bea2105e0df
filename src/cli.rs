use crate::models::{FieldConditions, FormValues, IrrigationMethod, Season};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "farmwise",
    version,
    about = "Farm advisory TUI: pesticide, fertilizer, irrigation and yield advice"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format for command results
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract structured parameters from a free-text description
    Extract {
        #[arg(value_enum)]
        domain: DomainArg,
        /// Description of the field and its problem
        text: String,
    },
    /// Recommend a pest or disease treatment
    Pesticide(PesticideArgs),
    /// Recommend a fertilization plan
    Fertilizer(FertilizerArgs),
    /// Compare irrigation methods for the given field conditions
    Irrigation(ConditionsArgs),
    /// Forecast the yield for the given field conditions
    Yield(ConditionsArgs),
    /// Suggest crops suited to the given field conditions
    Suggest(ConditionsArgs),
    /// List known regions and their districts
    Regions,
    /// Run interactive setup
    Init {
        /// Write the config here instead of the default location
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Validate config and the geography table
    Check,
    /// Open the terminal dashboard (default)
    Tui,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DomainArg {
    Pesticide,
    Fertilizer,
}

impl From<DomainArg> for crate::models::Domain {
    fn from(d: DomainArg) -> Self {
        match d {
            DomainArg::Pesticide => crate::models::Domain::Pesticide,
            DomainArg::Fertilizer => crate::models::Domain::Fertilizer,
        }
    }
}

/// Either a free-text description, or the structured form fields.
#[derive(Args, Debug, Clone)]
pub struct PesticideArgs {
    /// Free-text description; when given, structured flags are ignored
    pub text: Option<String>,

    #[arg(long, default_value = "tomate")]
    pub crop: String,
    /// Region (defaults to the configured default region)
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    /// Comma-separated pest, disease or weed names
    #[arg(long, default_value = "pucerons, mildiou")]
    pub problem: String,
    /// Current season (defaults to today's)
    #[arg(long)]
    pub season: Option<String>,
    #[arg(long)]
    pub growing_season: Option<String>,
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub temperature: f64,
    #[arg(long, default_value_t = 70.0)]
    pub humidity: f64,
    #[arg(long, default_value_t = 10.0)]
    pub rainfall: f64,
}

impl PesticideArgs {
    pub fn to_form(&self, default_region: &str) -> FormValues {
        let mut form = FormValues::new();
        form.insert("crop".into(), self.crop.clone());
        form.insert(
            "region".into(),
            self.region.clone().unwrap_or_else(|| default_region.to_string()),
        );
        if let Some(d) = &self.district {
            form.insert("district".into(), d.clone());
        }
        form.insert("pest_problem".into(), self.problem.clone());
        form.insert("season".into(), season_or_current(self.season.as_deref()));
        if let Some(gs) = &self.growing_season {
            form.insert("growing_season".into(), gs.clone());
        }
        form.insert("temperature".into(), self.temperature.to_string());
        form.insert("humidity".into(), self.humidity.to_string());
        form.insert("rainfall".into(), self.rainfall.to_string());
        form
    }
}

#[derive(Args, Debug, Clone)]
pub struct FertilizerArgs {
    /// Free-text description; when given, structured flags are ignored
    pub text: Option<String>,

    #[arg(long, default_value = "maïs")]
    pub crop: String,
    /// Region (defaults to the configured default region)
    #[arg(long)]
    pub region: Option<String>,
    #[arg(long)]
    pub district: Option<String>,
    /// Soil nitrogen, kg/ha
    #[arg(long, default_value_t = 80.0)]
    pub nitrogen: f64,
    /// Soil phosphorus, kg/ha
    #[arg(long, default_value_t = 40.0)]
    pub phosphorus: f64,
    /// Soil potassium, kg/ha
    #[arg(long, default_value_t = 20.0)]
    pub potassium: f64,
    #[arg(long, default_value_t = 6.5)]
    pub ph: f64,
    #[arg(long)]
    pub fertilizer_type: Option<String>,
    /// Application season (defaults to today's)
    #[arg(long)]
    pub season: Option<String>,
}

impl FertilizerArgs {
    pub fn to_form(&self, default_region: &str) -> FormValues {
        let mut form = FormValues::new();
        form.insert("crop".into(), self.crop.clone());
        form.insert(
            "region".into(),
            self.region.clone().unwrap_or_else(|| default_region.to_string()),
        );
        if let Some(d) = &self.district {
            form.insert("district".into(), d.clone());
        }
        form.insert("nitrogen".into(), self.nitrogen.to_string());
        form.insert("phosphorus".into(), self.phosphorus.to_string());
        form.insert("potassium".into(), self.potassium.to_string());
        form.insert("ph".into(), self.ph.to_string());
        if let Some(t) = &self.fertilizer_type {
            form.insert("fertilizer_type".into(), t.clone());
        }
        form.insert("season".into(), season_or_current(self.season.as_deref()));
        form
    }
}

fn season_or_current(season: Option<&str>) -> String {
    season
        .map(str::to_string)
        .unwrap_or_else(|| Season::current().as_str().to_string())
}

#[derive(Args, Debug, Clone)]
pub struct ConditionsArgs {
    #[arg(long, default_value = "tomate")]
    pub crop: String,
    /// Soil nitrogen, kg/ha
    #[arg(long, default_value_t = 40.0)]
    pub soil_n: f64,
    /// Soil phosphorus, kg/ha
    #[arg(long, default_value_t = 60.0)]
    pub soil_p: f64,
    /// Soil potassium, kg/ha
    #[arg(long, default_value_t = 30.0)]
    pub soil_k: f64,
    /// Air temperature, °C
    #[arg(long, default_value_t = 25.0, allow_negative_numbers = true)]
    pub temperature: f64,
    /// Relative humidity, %
    #[arg(long, default_value_t = 70.0)]
    pub humidity: f64,
    #[arg(long, default_value_t = 6.5)]
    pub ph: f64,
    /// Rainfall, mm
    #[arg(long, default_value_t = 100.0)]
    pub rainfall: f64,
    /// Irrigation method currently in use (Drip, Sprinkler, Flood, ...)
    #[arg(long, value_parser = parse_irrigation)]
    pub irrigation: Option<IrrigationMethod>,
}

fn parse_irrigation(s: &str) -> Result<IrrigationMethod, String> {
    IrrigationMethod::from_str(s).ok_or_else(|| format!("unknown irrigation method '{}'", s))
}

impl From<&ConditionsArgs> for FieldConditions {
    fn from(a: &ConditionsArgs) -> Self {
        FieldConditions {
            crop: a.crop.trim().to_lowercase(),
            soil_n: a.soil_n,
            soil_p: a.soil_p,
            soil_k: a.soil_k,
            temperature_c: a.temperature,
            humidity_percent: a.humidity,
            ph: a.ph,
            rainfall_mm: a.rainfall,
            irrigation: a.irrigation,
        }
    }
}
