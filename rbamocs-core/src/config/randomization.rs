//! Stochastic perturbation settings

use super::{require_non_negative, unknown_field, ConfigGroup, FieldValue};
use crate::errors::ConfigurationError;
use crate::FloatValue;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seed used when no seed is given, so unseeded runs are still reproducible
pub const DEFAULT_SEED: u64 = 0;

/// Amplitude of the random perturbations added to the upper boxes after every step.
///
/// Perturbations are zero-mean normal draws with the given standard deviation, applied
/// independently to the temperature and salinity of the five upper boxes. The deep box is never
/// perturbed. With both amplitudes at zero no random numbers are drawn and the seed has no effect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Randomization {
    /// Standard deviation of the temperature perturbation per step (degC).
    /// Default: 0.0
    pub t_noise: FloatValue,

    /// Standard deviation of the salinity perturbation per step (psu).
    /// Default: 0.0
    pub s_noise: FloatValue,

    /// Seed of the random generator. `None` uses [`DEFAULT_SEED`].
    pub seed: Option<u64>,
}

float_fields!(Randomization, [t_noise, s_noise]);

impl Randomization {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.t_noise > 0.0 || self.s_noise > 0.0
    }

    /// A fresh generator for one run
    pub fn rng(&self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed.unwrap_or(DEFAULT_SEED))
    }
}

impl ConfigGroup for Randomization {
    const GROUP_NAME: &'static str = "Randomization";

    fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = self.float_fields();
        let seed = match self.seed {
            // Seeds above i64::MAX are shown wrapped, they cannot be set through `set_field`
            Some(seed) => FieldValue::Int(seed as i64),
            None => FieldValue::Missing,
        };
        fields.push(("seed", seed));
        fields
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> Result<(), ConfigurationError> {
        if self.set_float_field(name, value)? {
            return Ok(());
        }
        if name != "seed" {
            return Err(unknown_field(Self::GROUP_NAME, name));
        }
        self.seed = match value {
            FieldValue::Missing => None,
            FieldValue::Int(seed) if seed >= 0 => Some(seed as u64),
            FieldValue::Int(seed) => {
                return Err(ConfigurationError::new(
                    "seed",
                    format!("must be a non-negative integer, got {}", seed),
                ))
            }
            FieldValue::Float(seed) => {
                return Err(ConfigurationError::new(
                    "seed",
                    format!("must be an integer, got {}", seed),
                ))
            }
        };
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        require_non_negative("t_noise", self.t_noise)?;
        require_non_negative("s_noise", self.s_noise)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_is_inactive() {
        let rand = Randomization::default();
        assert!(!rand.is_active());
        assert!(rand.validate().is_ok());
        assert_eq!(rand.to_dict()["seed"], FieldValue::Missing);
    }

    #[test]
    fn test_negative_amplitude_rejected() {
        let rand = Randomization {
            s_noise: -0.1,
            ..Default::default()
        };
        assert_eq!(rand.validate().unwrap_err().field, "s_noise");
    }

    #[test]
    fn test_seed_field() {
        let rand = Randomization::default().with_field("seed", 42_i64).unwrap();
        assert_eq!(rand.seed, Some(42));

        let err = Randomization::default()
            .with_field("seed", -1_i64)
            .unwrap_err();
        assert_eq!(err.field, "seed");

        let err = Randomization::default().with_field("seed", 1.5).unwrap_err();
        assert_eq!(err.field, "seed");

        let cleared = rand.with_field("seed", FieldValue::Missing).unwrap();
        assert_eq!(cleared.seed, None);
    }

    #[test]
    fn test_rng_is_reproducible() {
        let draw = |seed: u64| -> Vec<f64> {
            Randomization::with_seed(seed)
                .rng()
                .sample_iter(rand::distributions::Standard)
                .take(5)
                .collect()
        };
        assert_eq!(draw(3), draw(3));
        assert_ne!(draw(3), draw(4));

        let unseeded: f64 = Randomization::default().rng().gen();
        let default_seeded: f64 = Randomization::with_seed(DEFAULT_SEED).rng().gen();
        assert_eq!(unseeded, default_seeded);
    }
}
