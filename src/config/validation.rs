//! Environment validation
//!
//! Checks the captured environment before any network access:
//! - At least one of CSO_VERSION / CSPO_VERSION is set
//! - All four GIT_*_B64 credential variables are set
//! - Once the mode is known, its own version variable is set

use super::settings::{EnvSnapshot, GIT_VARS, VERSION_VARS};
use crate::mode::Mode;
use crate::FetchError;

/// Validation error details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// Validate the mode-independent part of the environment
///
/// Every problem is reported, not just the first one.
pub fn validate_env(env: &EnvSnapshot) -> ValidationResult {
    let mut errors = Vec::new();

    if VERSION_VARS.iter().all(|var| env.get(var).is_none()) {
        errors.push(ValidationError::new(
            VERSION_VARS.join("|"),
            "Neither CSO_VERSION nor CSPO_VERSION are set",
        ));
    }

    for var in GIT_VARS {
        if env.get(var).is_none() {
            errors.push(ValidationError::new(var, "must be set and non-empty"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validate the environment and convert failures into a [`FetchError`]
pub fn validate_env_result(env: &EnvSnapshot) -> crate::Result<()> {
    validate_env(env).map_err(|errors| {
        for error in &errors {
            tracing::debug!(field = %error.field, "{}", error.message);
        }
        FetchError::MissingEnv(errors)
    })
}

/// Release tag for `mode`, failing when its variable is unset
///
/// Only the variable belonging to the selected mode is consulted.
pub fn require_version(env: &EnvSnapshot, mode: Mode) -> crate::Result<String> {
    let var = mode.version_var();
    env.get(var).map(str::to_string).ok_or_else(|| {
        FetchError::MissingEnv(vec![ValidationError::new(
            var,
            format!("required for mode {}", mode),
        )])
    })
}
