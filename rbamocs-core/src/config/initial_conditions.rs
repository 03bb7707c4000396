//! Initial state of the boxes

use super::{require_finite, require_positive, unknown_field, ConfigGroup, FieldValue};
use crate::errors::ConfigurationError;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Initial temperature (degC), salinity (psu) and pycnocline depths (m).
///
/// The defaults describe a warm, salty low-latitude Atlantic over a cold deep ocean, with a
/// fresher North Pacific than North Atlantic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InitialConditions {
    /// Default: 2.0
    pub t_north_a0: FloatValue,
    /// Default: 4.0
    pub t_north_p0: FloatValue,
    /// Default: 4.0
    pub t_south0: FloatValue,
    /// Default: 17.0
    pub t_low_a0: FloatValue,
    /// Default: 17.0
    pub t_low_pi0: FloatValue,
    /// Default: 3.0
    pub t_deep0: FloatValue,

    /// Default: 35.0
    pub s_north_a0: FloatValue,
    /// Default: 33.8
    pub s_north_p0: FloatValue,
    /// Default: 34.0
    pub s_south0: FloatValue,
    /// Default: 36.0
    pub s_low_a0: FloatValue,
    /// Default: 34.8
    pub s_low_pi0: FloatValue,
    /// Default: 34.7
    pub s_deep0: FloatValue,

    /// Initial pycnocline depth of the low Atlantic box (m).
    /// Default: 400.0
    pub d_low_a0: FloatValue,
    /// Initial pycnocline depth of the low Pacific/Indian box (m).
    /// Default: 400.0
    pub d_low_pi0: FloatValue,
}

impl Default for InitialConditions {
    fn default() -> Self {
        Self {
            t_north_a0: 2.0,
            t_north_p0: 4.0,
            t_south0: 4.0,
            t_low_a0: 17.0,
            t_low_pi0: 17.0,
            t_deep0: 3.0,

            s_north_a0: 35.0,
            s_north_p0: 33.8,
            s_south0: 34.0,
            s_low_a0: 36.0,
            s_low_pi0: 34.8,
            s_deep0: 34.7,

            d_low_a0: 400.0,
            d_low_pi0: 400.0,
        }
    }
}

float_fields!(
    InitialConditions,
    [
        t_north_a0,
        t_north_p0,
        t_south0,
        t_low_a0,
        t_low_pi0,
        t_deep0,
        s_north_a0,
        s_north_p0,
        s_south0,
        s_low_a0,
        s_low_pi0,
        s_deep0,
        d_low_a0,
        d_low_pi0,
    ]
);

impl InitialConditions {
    /// Same temperature and salinity in every box
    pub fn uniform(temperature: FloatValue, salinity: FloatValue) -> Self {
        Self {
            t_north_a0: temperature,
            t_north_p0: temperature,
            t_south0: temperature,
            t_low_a0: temperature,
            t_low_pi0: temperature,
            t_deep0: temperature,
            s_north_a0: salinity,
            s_north_p0: salinity,
            s_south0: salinity,
            s_low_a0: salinity,
            s_low_pi0: salinity,
            s_deep0: salinity,
            ..Default::default()
        }
    }
}

impl ConfigGroup for InitialConditions {
    const GROUP_NAME: &'static str = "Initial Conditions";

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

    /// The admissible temperature and salinity range is checked by the equation of state on the
    /// first step; here only finiteness and positive depths are required.
    fn validate(&self) -> Result<(), ConfigurationError> {
        for (name, value) in self.float_fields() {
            require_finite(name, value.as_float(name)?)?;
        }
        require_positive("d_low_a0", self.d_low_a0)?;
        require_positive("d_low_pi0", self.d_low_pi0)?;
        Ok(())
    }
}
