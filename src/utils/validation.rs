use crate::utils::error::{QuoteError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Rejects zero, negative, NaN and infinite dimensions.
pub fn validate_dimension(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(QuoteError::invalid_input(
            field_name,
            value,
            "must be a finite number",
        ));
    }
    if value <= 0.0 {
        return Err(QuoteError::invalid_input(
            field_name,
            value,
            "must be greater than 0",
        ));
    }
    Ok(())
}

pub fn validate_fpi(field_name: &str, value: u32, min_value: u32) -> Result<()> {
    if value < min_value {
        return Err(QuoteError::invalid_input(
            field_name,
            value,
            format!("must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(QuoteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "must be a finite number of at least 0".to_string(),
        });
    }
    Ok(())
}

/// Used for constants the formula divides by or multiplies the whole area with.
pub fn validate_strictly_positive(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(QuoteError::InvalidConfigValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "must be a finite number greater than 0".to_string(),
        });
    }
    Ok(())
}
