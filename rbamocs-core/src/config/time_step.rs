//! Time-stepping settings

use super::{require_positive, unknown_field, ConfigGroup, FieldValue};
use crate::errors::ConfigurationError;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Seconds in a 365.25 day year
pub const SECONDS_PER_YEAR: FloatValue = 365.25 * 86400.0;

/// Tolerance used when rounding `duration / dt` down to a whole number of steps
const STEP_COUNT_TOLERANCE: FloatValue = 1e-9;

/// Largest number of steps a run may take. Every step stores 32 values.
pub const MAX_STEPS: usize = 10_000_000;

/// Simulated duration and step size, both in years.
///
/// The number of steps is `floor(duration_years / dt_years + 1e-9)`: the duration is truncated
/// to whole steps, with a small tolerance so that e.g. `1.0 / 0.1` gives 10 steps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeStep {
    /// Total simulated time (years).
    /// Default: 500.0
    pub duration_years: FloatValue,

    /// Length of one explicit step (years).
    /// Default: 0.25
    pub dt_years: FloatValue,
}

impl Default for TimeStep {
    fn default() -> Self {
        Self {
            duration_years: 500.0,
            dt_years: 0.25,
        }
    }
}

float_fields!(TimeStep, [duration_years, dt_years]);

impl TimeStep {
    pub fn new(
        duration_years: FloatValue,
        dt_years: FloatValue,
    ) -> Result<Self, ConfigurationError> {
        let time_step = Self {
            duration_years,
            dt_years,
        };
        time_step.validate()?;
        Ok(time_step)
    }

    /// Number of steps taken by a run
    pub fn n_steps(&self) -> usize {
        self.step_ratio().floor() as usize
    }

    fn step_ratio(&self) -> FloatValue {
        self.duration_years / self.dt_years + STEP_COUNT_TOLERANCE
    }

    /// Step size in seconds
    pub fn dt_seconds(&self) -> FloatValue {
        self.dt_years * SECONDS_PER_YEAR
    }
}

impl ConfigGroup for TimeStep {
    const GROUP_NAME: &'static str = "Time Step";

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        self.float_fields()
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigurationError> {
        if self.set_float_field(name, value)? {
            Ok(())
        } else {
            Err(unknown_field(Self::GROUP_NAME, name))
        }
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        require_positive("dt_years", self.dt_years)?;
        require_positive("duration_years", self.duration_years)?;
        if self.duration_years < self.dt_years {
            return Err(ConfigurationError::new(
                "duration_years",
                format!(
                    "must be at least one step long ({} < dt_years={})",
                    self.duration_years, self.dt_years
                ),
            ));
        }
        let ratio = self.step_ratio();
        if !ratio.is_finite() || ratio.floor() > MAX_STEPS as FloatValue {
            return Err(ConfigurationError::new(
                "duration_years",
                format!(
                    "gives {:e} steps of dt_years={}, at most {} are allowed",
                    ratio.floor(),
                    self.dt_years,
                    MAX_STEPS
                ),
            ));
        }
        Ok(())
    }
}
