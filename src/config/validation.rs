//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (gas limit > 0, adjustment a real buffer)
//! - Check that endpoint URLs actually parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: RunnerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use url::Url;

use crate::config::schema::RunnerConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidUrl { field: &'static str, reason: String },
    EmptyField(&'static str),
    ZeroGasLimit,
    GasAdjustmentTooLow(f64),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidUrl { field, reason } => {
                write!(f, "{} is not a valid URL: {}", field, reason)
            }
            ValidationError::EmptyField(field) => write!(f, "{} must not be empty", field),
            ValidationError::ZeroGasLimit => write!(f, "ledger.gas_limit must be greater than 0"),
            ValidationError::GasAdjustmentTooLow(v) => {
                write!(f, "ledger.gas_adjustment must be at least 1.0, got {}", v)
            }
        }
    }
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &RunnerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.network.is_empty() {
        errors.push(ValidationError::EmptyField("network"));
    }
    if config.ledger.chain_id.is_empty() {
        errors.push(ValidationError::EmptyField("ledger.chain_id"));
    }
    if config.ledger.account_prefix.is_empty() {
        errors.push(ValidationError::EmptyField("ledger.account_prefix"));
    }
    if config.ledger.fee_denom.is_empty() {
        errors.push(ValidationError::EmptyField("ledger.fee_denom"));
    }

    if let Err(e) = Url::parse(&config.ledger.lcd_url) {
        errors.push(ValidationError::InvalidUrl {
            field: "ledger.lcd_url",
            reason: e.to_string(),
        });
    }
    if let Err(e) = Url::parse(&config.fees.oracle_url) {
        errors.push(ValidationError::InvalidUrl {
            field: "fees.oracle_url",
            reason: e.to_string(),
        });
    }

    if config.ledger.gas_limit == 0 {
        errors.push(ValidationError::ZeroGasLimit);
    }
    if config.ledger.gas_adjustment < 1.0 {
        errors.push(ValidationError::GasAdjustmentTooLow(config.ledger.gas_adjustment));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
