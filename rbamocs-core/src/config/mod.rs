//! Configuration groups for the six-box model
//!
//! A run is configured by five independent groups, each with physical defaults:
//!
//! - [`BoxDimensions`]: box areas, depths and horizontal length scales
//! - [`InitialConditions`]: initial temperature, salinity and pycnocline depths
//! - [`Parameters`]: physical coefficients of the flux model and surface forcing
//! - [`TimeStep`]: simulated duration and step size
//! - [`Randomization`]: amplitude of stochastic perturbations and the seed
//!
//! Groups are plain values. Overriding a field produces a new snapshot
//! (struct update syntax or [`ConfigGroup::with_field`]), so the configuration used by one run is
//! never changed by preparing the next one.
//!
//! [`ModelConfig`] bundles one snapshot of each group and validates all of them, including the
//! checks that span more than one group.

/// Implements the float-field part of [`ConfigGroup`] from a list of field names
macro_rules! float_fields {
    ($ty:ty, [$($field:ident),* $(,)?]) => {
        impl $ty {
            fn float_fields(&self) -> Vec<(&'static str, $crate::config::FieldValue)> {
                vec![$((stringify!($field), $crate::config::FieldValue::Float(self.$field))),*]
            }

            /// Returns `Ok(false)` when `name` is not one of the float fields
            fn set_float_field(
                &mut self,
                name: &str,
                value: $crate::config::FieldValue,
            ) -> Result<bool, $crate::errors::ConfigurationError> {
                match name {
                    $(stringify!($field) => {
                        self.$field = value.as_float(name)?;
                        Ok(true)
                    })*
                    _ => Ok(false),
                }
            }
        }
    };
}

mod dimensions;
mod initial_conditions;
mod parameters;
mod randomization;
mod time_step;

pub use dimensions::BoxDimensions;
pub use initial_conditions::InitialConditions;
pub use parameters::Parameters;
pub use randomization::{Randomization, DEFAULT_SEED};
pub use time_step::{TimeStep, MAX_STEPS, SECONDS_PER_YEAR};

use crate::errors::{BoxModelError, BoxModelResult, ConfigurationError};
use crate::FloatValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of a single configuration field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Float(FloatValue),
    Int(i64),
    /// An optional field that is not set
    Missing,
}

impl FieldValue {
    /// Interpret the value as a float, accepting integers
    pub fn as_float(&self, field: &str) -> Result<FloatValue, ConfigurationError> {
        match *self {
            FieldValue::Float(v) => Ok(v),
            FieldValue::Int(v) => Ok(v as FloatValue),
            FieldValue::Missing => Err(ConfigurationError::new(field, "a value is required")),
        }
    }
}

impl From<FloatValue> for FieldValue {
    fn from(value: FloatValue) -> Self {
        FieldValue::Float(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Int(value)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Int(v) => write!(f, "{}", v),
            FieldValue::Missing => write!(f, "None"),
        }
    }
}

/// Common interface of the five configuration groups
pub trait ConfigGroup: Clone {
    /// Name of the group, used in summaries
    const GROUP_NAME: &'static str;

    /// All fields with their current values, in a fixed order
    fn fields(&self) -> Vec<(&'static str, FieldValue)>;

    /// Override one field by name
    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigurationError>;

    /// Check every field against its admissible range
    fn validate(&self) -> Result<(), ConfigurationError>;

    /// Field name to value mapping, in [`ConfigGroup::fields`] order
    fn to_dict(&self) -> IndexMap<&'static str, FieldValue> {
        self.fields().into_iter().collect()
    }

    /// Canonical name of a field, matched ignoring ASCII case
    ///
    /// `T_north_A0` and `Fwn_A` resolve to `t_north_a0` and `fwn_a`.
    fn field_name(&self, name: &str) -> Option<&'static str> {
        self.fields()
            .into_iter()
            .map(|(key, _)| key)
            .find(|key| key.eq_ignore_ascii_case(name))
    }

    /// Current value of a field, looked up as in [`ConfigGroup::field_name`]
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields()
            .into_iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    }

    /// Copy of `self` with a single field replaced
    ///
    /// The copy is validated; `self` is left untouched.
    fn with_field(
        &self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<Self, ConfigurationError> {
        let key = self
            .field_name(name)
            .ok_or_else(|| unknown_field(Self::GROUP_NAME, name))?;
        let mut next = self.clone();
        next.set_field(key, value.into())?;
        next.validate()?;
        Ok(next)
    }
}

/// Format the field mapping of a group, one `key=value` per line
pub fn describe<G: ConfigGroup>(group: &G) -> String {
    let rule_top = "v".repeat(63);
    let rule_bottom = "^".repeat(63);
    let mut out = format!("{}:\n{}\n", G::GROUP_NAME, rule_top);
    for (key, value) in group.fields() {
        out.push_str(&format!("{}={}\n", key, value));
    }
    out.push_str(&rule_bottom);
    out.push('\n');
    out
}

pub(crate) fn unknown_field(group: &str, name: &str) -> ConfigurationError {
    ConfigurationError::new(name, format!("unknown field for {}", group))
}

pub(crate) fn require_finite(name: &str, value: FloatValue) -> Result<(), ConfigurationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigurationError::new(name, format!("must be finite, got {}", value)))
    }
}

pub(crate) fn require_positive(name: &str, value: FloatValue) -> Result<(), ConfigurationError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::new(name, format!("must be strictly positive, got {}", value)))
    }
}

pub(crate) fn require_non_negative(
    name: &str,
    value: FloatValue,
) -> Result<(), ConfigurationError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::new(name, format!("must be non-negative, got {}", value)))
    }
}

/// One validated snapshot of all five configuration groups
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub dimensions: BoxDimensions,
    pub initial_conditions: InitialConditions,
    pub parameters: Parameters,
    pub time_step: TimeStep,
    pub randomization: Randomization,
}

impl ModelConfig {
    /// Bundle and validate the five groups
    pub fn new(
        dimensions: BoxDimensions,
        initial_conditions: InitialConditions,
        parameters: Parameters,
        time_step: TimeStep,
        randomization: Randomization,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            dimensions,
            initial_conditions,
            parameters,
            time_step,
            randomization,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate every group and the checks that span groups
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        self.dimensions.validate()?;
        self.initial_conditions.validate()?;
        self.parameters.validate()?;
        self.time_step.validate()?;
        self.randomization.validate()?;

        let depth_total = self.dimensions.depth_total;
        for (name, depth) in [
            ("d_low_a0", self.initial_conditions.d_low_a0),
            ("d_low_pi0", self.initial_conditions.d_low_pi0),
        ] {
            if depth >= depth_total {
                return Err(ConfigurationError::new(
                    name,
                    format!(
                        "initial pycnocline depth {} must be shallower than depth_total {}",
                        depth, depth_total
                    ),
                ));
            }
        }

        let volumes = self.dimensions.volumes(
            self.initial_conditions.d_low_a0,
            self.initial_conditions.d_low_pi0,
        );
        let deep = volumes[crate::spatial::SixBoxRegion::Deep];
        if deep <= 0.0 {
            return Err(ConfigurationError::new(
                "depth_total",
                format!("initial deep box volume must be positive, got {:e}", deep),
            ));
        }
        Ok(())
    }

    /// Parse a snapshot from TOML. Missing tables and keys take their defaults.
    ///
    /// ```toml
    /// [parameters]
    /// fwn_a = 1.0e5
    ///
    /// [time_step]
    /// duration_years = 100.0
    /// ```
    pub fn from_toml_str(source: &str) -> BoxModelResult<Self> {
        let config: ModelConfig = toml::from_str(source)
            .map_err(|e| ConfigurationError::new("toml", e.message().to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> BoxModelResult<String> {
        toml::to_string(self)
            .map_err(|e| BoxModelError::from(ConfigurationError::new("toml", e.to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(ModelConfig::default().validate().is_ok());
    }

    #[test]
    fn describe_lists_every_field() {
        let params = Parameters::default();
        let text = describe(&params);

        assert!(text.starts_with("Parameters:\n"));
        for (key, _) in params.fields() {
            assert!(text.contains(&format!("{}=", key)), "missing {}", key);
        }
    }

    #[test]
    fn with_field_returns_new_snapshot() {
        let params = Parameters::default();
        let swept = params.with_field("fwn_a", 1.0e6).unwrap();

        assert_eq!(swept.fwn_a, 1.0e6);
        assert_eq!(params.fwn_a, Parameters::default().fwn_a);
    }

    #[test]
    fn with_field_validates() {
        let err = BoxDimensions::default()
            .with_field("area_low_a", 0.0)
            .unwrap_err();
        assert_eq!(err.field, "area_low_a");
    }

    #[test]
    fn fields_resolve_ignoring_case() {
        let init = InitialConditions::default()
            .with_field("T_north_A0", 4.0)
            .unwrap();
        assert_eq!(init.t_north_a0, 4.0);
        assert_eq!(init.field("T_NORTH_A0"), Some(FieldValue::Float(4.0)));

        let params = Parameters::default().with_field("Fwn_A", 100_000_i64).unwrap();
        assert_eq!(params.fwn_a, 1.0e5);
        assert_eq!(params.field_name("Fwn_A"), Some("fwn_a"));

        let dims = BoxDimensions::default()
            .with_field("Area_low_A", 0.5e14)
            .unwrap();
        assert_eq!(dims.area_low_a, 0.5e14);

        let time_step = TimeStep::default().with_field("DT_years", 0.5).unwrap();
        assert_eq!(time_step.dt_years, 0.5);

        let rand = Randomization::default().with_field("Seed", 3_i64).unwrap();
        assert_eq!(rand.seed, Some(3));
        assert_eq!(rand.field("seed"), Some(FieldValue::Int(3)));
    }

    #[test]
    fn every_field_resolves_from_its_mixed_case_name() {
        fn check<G: ConfigGroup>(group: &G) {
            for (key, value) in group.fields() {
                let shouted = key.to_ascii_uppercase();
                assert_eq!(group.field_name(&shouted), Some(key));
                assert_eq!(group.field(&shouted), Some(value));
            }
            assert_eq!(group.field_name("no_such_field"), None);
        }
        check(&BoxDimensions::default());
        check(&InitialConditions::default());
        check(&Parameters::default());
        check(&TimeStep::default());
        check(&Randomization::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = TimeStep::default().with_field("n_steps", 10_i64).unwrap_err();
        assert_eq!(err.field, "n_steps");
    }

    #[test]
    fn pycnocline_deeper_than_ocean() {
        let init = InitialConditions {
            d_low_a0: 5000.0,
            ..Default::default()
        };
        let err = ModelConfig::new(
            BoxDimensions::default(),
            init,
            Parameters::default(),
            TimeStep::default(),
            Randomization::default(),
        )
        .unwrap_err();
        assert_eq!(err.field, "d_low_a0");
    }

    #[test]
    fn toml_partial_config() {
        let config = ModelConfig::from_toml_str(
            r#"
            [parameters]
            fwn_a = 1.0e5

            [time_step]
            duration_years = 10.0
            "#,
        )
        .unwrap();

        assert_eq!(config.parameters.fwn_a, 1.0e5);
        assert_eq!(config.time_step.duration_years, 10.0);
        assert_eq!(config.dimensions, BoxDimensions::default());
        assert_eq!(config.randomization.seed, None);
    }

    #[test]
    fn toml_round_trip() {
        let config = ModelConfig {
            randomization: Randomization {
                t_noise: 0.1,
                seed: Some(7),
                ..Default::default()
            },
            ..Default::default()
        };
        let text = config.to_toml_string().unwrap();
        let parsed = ModelConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn toml_invalid_value() {
        let err = ModelConfig::from_toml_str(
            r#"
            [time_step]
            dt_years = -1.0
            "#,
        )
        .unwrap_err();
        assert!(err.is_configuration());
    }
}
