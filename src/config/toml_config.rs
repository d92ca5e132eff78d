use crate::utils::error::{QuoteError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use toml::Value;

/// Inch-to-meter conversion applied to fins per inch.
pub const INCH_FINS_PER_METER_FACTOR: f64 = 39.3700787;

/// Business pricing policy. Loaded once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricingConfig {
    pub material: CoatingConfig,
    pub primer: CoatingConfig,
    pub labor: LaborConfig,
    pub costs: CostsConfig,
    pub fins: FinsConfig,
    pub input: InputConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoatingConfig {
    pub price_per_kg: f64,
    pub coverage_kg_per_m2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaborConfig {
    pub rate_per_hour: f64,
    pub output_m2_per_hour: f64,
    pub area_basis: LaborAreaBasis,
}

/// Which area labor time is estimated from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaborAreaBasis {
    /// Frontal footprint, length x height.
    #[default]
    Faced,
    /// Total fin surface. Reproduces the earlier quoting sheets.
    Coated,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostsConfig {
    pub fixed_prep: f64,
    /// Fraction, 0.15 means 15%.
    pub overhead_percent: f64,
    /// Fraction, 0.50 means 50%.
    pub profit_margin: f64,
    pub field_work_surcharge: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinsConfig {
    pub per_meter_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub min_fpi: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { min_fpi: 1 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub currency: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: "₪".to_string(),
        }
    }
}

// On-disk layout. Pricing constants stay raw values so an absent or
// non-numeric key is reported by name instead of as a parse error.
#[derive(Debug, Default, Deserialize)]
struct PricingFile {
    #[serde(default)]
    material: CoatingSection,
    #[serde(default)]
    primer: CoatingSection,
    #[serde(default)]
    labor: LaborSection,
    #[serde(default)]
    costs: CostsSection,
    #[serde(default)]
    fins: FinsSection,
    #[serde(default)]
    input: InputConfig,
    #[serde(default)]
    display: DisplayConfig,
}

#[derive(Debug, Default, Deserialize)]
struct CoatingSection {
    price_per_kg: Option<Value>,
    coverage_kg_per_m2: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct LaborSection {
    rate_per_hour: Option<Value>,
    output_m2_per_hour: Option<Value>,
    #[serde(default)]
    area_basis: LaborAreaBasis,
}

#[derive(Debug, Default, Deserialize)]
struct CostsSection {
    fixed_prep: Option<Value>,
    overhead_percent: Option<Value>,
    profit_margin: Option<Value>,
    field_work_surcharge: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct FinsSection {
    per_meter_factor: Option<Value>,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            material: CoatingConfig {
                price_per_kg: 96.59,
                coverage_kg_per_m2: 0.05,
            },
            primer: CoatingConfig {
                price_per_kg: 96.74,
                coverage_kg_per_m2: 2.5,
            },
            labor: LaborConfig {
                rate_per_hour: 200.0,
                output_m2_per_hour: 1.5,
                area_basis: LaborAreaBasis::Faced,
            },
            costs: CostsConfig {
                fixed_prep: 50.0,
                overhead_percent: 0.15,
                profit_margin: 0.50,
                field_work_surcharge: 2900.0,
            },
            fins: FinsConfig {
                per_meter_factor: INCH_FINS_PER_METER_FACTOR,
            },
            input: InputConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Loads pricing from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(QuoteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses a pricing file. The eleven pricing constants are required;
    /// `labor.area_basis`, `input` and `display` fall back to defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        let file: PricingFile =
            toml::from_str(&processed_content).map_err(|e| QuoteError::ConfigParse {
                message: format!("TOML parsing error: {}", e),
            })?;

        let config = Self {
            material: CoatingConfig {
                price_per_kg: require_number(
                    &file.material.price_per_kg,
                    "material.price_per_kg",
                )?,
                coverage_kg_per_m2: require_number(
                    &file.material.coverage_kg_per_m2,
                    "material.coverage_kg_per_m2",
                )?,
            },
            primer: CoatingConfig {
                price_per_kg: require_number(&file.primer.price_per_kg, "primer.price_per_kg")?,
                coverage_kg_per_m2: require_number(
                    &file.primer.coverage_kg_per_m2,
                    "primer.coverage_kg_per_m2",
                )?,
            },
            labor: LaborConfig {
                rate_per_hour: require_number(&file.labor.rate_per_hour, "labor.rate_per_hour")?,
                output_m2_per_hour: require_number(
                    &file.labor.output_m2_per_hour,
                    "labor.output_m2_per_hour",
                )?,
                area_basis: file.labor.area_basis,
            },
            costs: CostsConfig {
                fixed_prep: require_number(&file.costs.fixed_prep, "costs.fixed_prep")?,
                overhead_percent: require_number(
                    &file.costs.overhead_percent,
                    "costs.overhead_percent",
                )?,
                profit_margin: require_number(&file.costs.profit_margin, "costs.profit_margin")?,
                field_work_surcharge: require_number(
                    &file.costs.field_work_surcharge,
                    "costs.field_work_surcharge",
                )?,
            },
            fins: FinsConfig {
                per_meter_factor: require_number(
                    &file.fins.per_meter_factor,
                    "fins.per_meter_factor",
                )?,
            },
            input: file.input,
            display: file.display,
        };

        tracing::debug!("Pricing configuration parsed: {:?}", config);
        Ok(config)
    }

    /// Replaces `${VAR}` with the environment value; unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| QuoteError::ConfigParse {
            message: format!("environment substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_negative("material.price_per_kg", self.material.price_per_kg)?;
        validation::validate_non_negative(
            "material.coverage_kg_per_m2",
            self.material.coverage_kg_per_m2,
        )?;
        validation::validate_non_negative("primer.price_per_kg", self.primer.price_per_kg)?;
        validation::validate_non_negative(
            "primer.coverage_kg_per_m2",
            self.primer.coverage_kg_per_m2,
        )?;
        validation::validate_non_negative("labor.rate_per_hour", self.labor.rate_per_hour)?;
        validation::validate_strictly_positive(
            "labor.output_m2_per_hour",
            self.labor.output_m2_per_hour,
        )?;
        validation::validate_non_negative("costs.fixed_prep", self.costs.fixed_prep)?;
        validation::validate_non_negative("costs.overhead_percent", self.costs.overhead_percent)?;
        validation::validate_non_negative("costs.profit_margin", self.costs.profit_margin)?;
        validation::validate_non_negative(
            "costs.field_work_surcharge",
            self.costs.field_work_surcharge,
        )?;
        validation::validate_strictly_positive(
            "fins.per_meter_factor",
            self.fins.per_meter_factor,
        )?;

        if self.input.min_fpi < 1 {
            return Err(QuoteError::InvalidConfigValue {
                field: "input.min_fpi".to_string(),
                value: self.input.min_fpi.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }

    /// Effective configuration in the same layout `from_toml_str` reads.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| QuoteError::ConfigParse {
            message: format!("TOML serialization error: {}", e),
        })
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

fn require_number(value: &Option<Value>, dotted_key: &str) -> Result<f64> {
    match value {
        Some(Value::Float(f)) => Ok(*f),
        Some(Value::Integer(i)) => Ok(*i as f64),
        Some(other) => Err(QuoteError::ConfigurationMissing {
            key: dotted_key.to_string(),
            reason: format!("expected a number, found {}", other.type_str()),
        }),
        None => Err(QuoteError::ConfigurationMissing {
            key: dotted_key.to_string(),
            reason: "key not found".to_string(),
        }),
    }
}
