use thiserror::Error;

/// A configuration group failed validation.
///
/// Only raised while building or validating configuration, never once stepping has started.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid configuration for `{field}`: {reason}")]
pub struct ConfigurationError {
    pub field: String,
    pub reason: String,
}

impl ConfigurationError {
    pub fn new(field: &str, reason: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// A computed physical quantity left its admissible domain during a run.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Non-admissible {quantity} (value={value}): {reason}")]
pub struct NumericalError {
    pub quantity: String,
    pub value: f64,
    pub reason: String,
    /// Step index at which the failure occurred, if raised by the integrator
    pub step: Option<usize>,
}

impl NumericalError {
    pub fn new(quantity: &str, value: f64, reason: impl Into<String>) -> Self {
        Self {
            quantity: quantity.to_string(),
            value,
            reason: reason.into(),
            step: None,
        }
    }

    pub fn at_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }
}

/// Error type for the six-box model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoxModelError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Numerical(#[from] NumericalError),
}

impl BoxModelError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, BoxModelError::Configuration(_))
    }

    pub fn is_numerical(&self) -> bool {
        matches!(self, BoxModelError::Numerical(_))
    }
}

/// Convenience type for `Result<T, BoxModelError>`.
pub type BoxModelResult<T> = Result<T, BoxModelError>;
