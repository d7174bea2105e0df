use crate::error::{FarmwiseError, Result};
use crate::logic::random::{NeutralSource, RandomSource, SeededSource};
use crate::models::GeographicReference;
use dialoguer::{Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static ENV_VAR: LazyLock<regex_lite::Regex> =
    LazyLock::new(|| regex_lite::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub extraction: ExtractionConfig,
    pub scoring: ScoringConfig,
    pub validation: ValidationConfig,
    pub report: ReportConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geography: Option<GeographyConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Region assumed when free text names none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Apply the random yield variation of the simulated models.
    pub jitter: bool,
    /// Half-width of the jitter multiplier: 0.05 draws from [0.95, 1.05).
    pub jitter_spread: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            jitter: true,
            jitter_spread: 0.05,
            seed: None,
        }
    }
}

impl ScoringConfig {
    pub fn random_source(&self) -> Box<dyn RandomSource> {
        if self.jitter {
            Box::new(SeededSource::new(self.seed))
        } else {
            Box::new(NeutralSource)
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject out-of-range readings instead of logging them.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    pub issue_separator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            issue_separator: " and ".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeographyConfig {
    /// YAML region table replacing the built-in one.
    pub file: PathBuf,
}

impl Config {
    /// Load from `config_override`, or from the first standard location.
    ///
    /// An explicit path must exist. Without one, a missing file falls back
    /// to built-in defaults.
    pub fn load(config_override: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_override {
            Some(p) if p.exists() => p,
            Some(p) => {
                return Err(FarmwiseError::Config(format!(
                    "Config file not found at {:?}",
                    p
                )))
            }
            None => match Self::find_config_path() {
                Some(p) => p,
                None => {
                    tracing::warn!(
                        "No config file found, using built-in defaults. Run `farmwise init` to create one."
                    );
                    return Ok(Self::default());
                }
            },
        };

        tracing::debug!("Loading config from {}", config_path.display());

        let config_str = std::fs::read_to_string(&config_path)
            .map_err(|e| FarmwiseError::Config(format!("Failed to read config: {}", e)))?;

        Self::from_yaml_str(&config_str)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let content = Self::substitute_env_vars(content);

        // An empty or comment-only file means defaults.
        if content.lines().all(|l| {
            let l = l.trim();
            l.is_empty() || l.starts_with('#')
        }) {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| FarmwiseError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let spread = self.scoring.jitter_spread;
        if !(0.0..1.0).contains(&spread) {
            return Err(FarmwiseError::Config(format!(
                "scoring.jitter_spread must be within [0, 1), got {}",
                spread
            )));
        }
        Ok(())
    }

    /// The region table: the configured file, or the built-in Tunisian one.
    pub fn geography(&self) -> Result<GeographicReference> {
        match &self.geography {
            Some(g) => GeographicReference::load(&g.file),
            None => Ok(GeographicReference::tunisia()),
        }
    }

    /// First existing config.yaml: `./config/`, then the XDG config dir.
    fn find_config_path() -> Option<PathBuf> {
        let local_config = PathBuf::from("config/config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("farmwise").join("config.yaml"))
            .filter(|p| p.exists())
    }

    /// Default path for writing new config files (~/.config/farmwise/config.yaml).
    pub fn default_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| FarmwiseError::Config("Cannot determine config directory".into()))?
            .join("farmwise");
        Ok(config_dir.join("config.yaml"))
    }

    /// Run interactive setup prompts and write config to disk.
    /// Returns the config and the path it was written to.
    pub fn setup_interactive(target: Option<PathBuf>) -> Result<(Self, PathBuf)> {
        println!();
        println!("Let's set up Farmwise!");
        println!();

        let geography = GeographicReference::tunisia();
        let regions: Vec<&str> = geography.region_names().collect();

        // --- Extraction ---
        println!("Extraction");
        let region_idx = Select::new()
            .with_prompt("  Default region when the text names none")
            .items(&regions)
            .default(0)
            .interact()
            .map_err(|e| FarmwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        // --- Scoring ---
        println!("Scoring");
        let jitter = Confirm::new()
            .with_prompt("  Apply random yield variation")
            .default(true)
            .interact()
            .map_err(|e| FarmwiseError::Config(format!("Input error: {}", e)))?;

        let seed = if jitter {
            let raw: String = Input::new()
                .with_prompt("  Random seed (blank for a fresh one each run)")
                .default(String::new())
                .allow_empty(true)
                .interact_text()
                .map_err(|e| FarmwiseError::Config(format!("Input error: {}", e)))?;
            if raw.trim().is_empty() {
                None
            } else {
                Some(raw.trim().parse::<u64>().map_err(|_| {
                    FarmwiseError::Config(format!("Seed '{}' is not a whole number", raw))
                })?)
            }
        } else {
            None
        };

        println!();

        // --- Validation ---
        println!("Validation");
        let strict = Confirm::new()
            .with_prompt("  Reject out-of-range readings (pH, humidity, rainfall)")
            .default(false)
            .interact()
            .map_err(|e| FarmwiseError::Config(format!("Input error: {}", e)))?;

        println!();

        let config = Config {
            extraction: ExtractionConfig {
                default_region: Some(regions[region_idx].to_string()),
            },
            scoring: ScoringConfig {
                jitter,
                seed,
                ..ScoringConfig::default()
            },
            validation: ValidationConfig { strict },
            report: ReportConfig::default(),
            geography: None,
        };

        let config_path = match target {
            Some(p) => p,
            None => Self::default_config_path()?,
        };
        config.save(&config_path)?;

        println!("Configuration saved to {}", config_path.display());
        println!();

        Ok((config, config_path))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| FarmwiseError::Config(format!("Failed to serialize config: {}", e)))?;

        let content = format!(
            "# Farmwise Configuration\n# Generated by `farmwise init`\n# Environment variable substitution (${{VAR}}) is supported.\n\n{}",
            yaml
        );
        std::fs::write(path, content)?;
        Ok(())
    }

    fn substitute_env_vars(content: &str) -> String {
        let mut result = content.to_string();

        for cap in ENV_VAR.captures_iter(content) {
            let var_name = &cap[1];
            let placeholder = &cap[0];
            if let Ok(value) = std::env::var(var_name) {
                result = result.replace(placeholder, &value);
            }
        }

        result
    }
}
