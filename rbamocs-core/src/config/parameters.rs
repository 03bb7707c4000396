//! Physical parameters of the flux model and surface forcing

use super::{
    require_finite, require_non_negative, require_positive, unknown_field, ConfigGroup,
    FieldValue, SECONDS_PER_YEAR,
};
use crate::errors::ConfigurationError;
use crate::spatial::SixBoxRegion;
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Parameters of the six-box overturning model.
///
/// All values are SI: transports in m^3/s (1 Sv = 1e6 m^3/s), diffusivities in m^2/s, rates in
/// 1/s, temperatures in degC.
///
/// # Overturning
///
/// The northern sinking in each basin scales as
/// $$ M_n = \frac{g \Delta\sigma}{\rho_0} \frac{D^2}{\epsilon} $$
/// so `epsilon_a` and `epsilon_p` set the sensitivity of the overturning to the north-low density
/// difference.
///
/// # Freshwater
///
/// `fws_*` moves fresh water from the low box of a basin to the Southern Ocean and `fwn_*` from
/// the low box to the northern box of the same basin. Freshwater transports carry neither heat
/// nor salt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Reference density (kg/m^3).
    /// Default: 1027.0
    pub rho0: FloatValue,

    /// Gravitational acceleration (m/s^2).
    /// Default: 9.8
    pub gravity: FloatValue,

    /// Wind-driven Ekman transport out of the Atlantic sector of the Southern Ocean (m^3/s).
    /// Default: 8e6
    pub m_ek_a: FloatValue,

    /// Wind-driven Ekman transport out of the Pacific/Indian sector (m^3/s).
    /// Default: 17e6
    pub m_ek_pi: FloatValue,

    /// Diapycnal diffusivity driving low-latitude upwelling (m^2/s).
    /// Default: 1e-5
    pub kv: FloatValue,

    /// Eddy-induced thickness diffusivity in the Southern Ocean (m^2/s).
    /// Default: 1000.0
    pub a_gm: FloatValue,

    /// Isopycnal (Redi) mixing coefficient (m^2/s).
    /// Default: 1000.0
    pub a_redi: FloatValue,

    /// Overturning resistance of the Atlantic (1/s).
    /// Default: 1.2e-4
    pub epsilon_a: FloatValue,

    /// Overturning resistance of the Pacific (1/s).
    /// Default: 1.2e-4
    pub epsilon_p: FloatValue,

    /// Freshwater transport from the low Atlantic to the Southern Ocean (m^3/s).
    /// Default: 0.35e6
    pub fws_a: FloatValue,

    /// Freshwater transport from the low Pacific/Indian to the Southern Ocean (m^3/s).
    /// Default: 0.7e6
    pub fws_pi: FloatValue,

    /// Freshwater transport from the low Atlantic to the North Atlantic (m^3/s).
    /// Default: 5e4
    pub fwn_a: FloatValue,

    /// Freshwater transport from the low Pacific/Indian to the North Pacific (m^3/s).
    /// Default: 2e5
    pub fwn_p: FloatValue,

    /// Coriolis parameter at the latitude of the inter-basin exchange (1/s).
    /// Default: 1e-4
    pub f_ex: FloatValue,

    /// Restoring temperature of the North Atlantic box (degC).
    /// Default: 2.0
    pub t_target_north_a: FloatValue,
    /// Restoring temperature of the North Pacific box (degC).
    /// Default: 4.0
    pub t_target_north_p: FloatValue,
    /// Restoring temperature of the Southern Ocean box (degC).
    /// Default: 4.0
    pub t_target_south: FloatValue,
    /// Restoring temperature of the low Atlantic box (degC).
    /// Default: 24.0
    pub t_target_low_a: FloatValue,
    /// Restoring temperature of the low Pacific/Indian box (degC).
    /// Default: 25.0
    pub t_target_low_pi: FloatValue,

    /// Rate at which the top `depth_high` metres of each upper box relax to its target (1/s).
    /// Zero disables surface heat exchange.
    /// Default: 1 / year
    pub restoring_rate: FloatValue,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            rho0: 1027.0,
            gravity: 9.8,

            m_ek_a: 8.0e6,
            m_ek_pi: 17.0e6,

            kv: 1.0e-5,
            a_gm: 1000.0,
            a_redi: 1000.0,

            epsilon_a: 1.2e-4,
            epsilon_p: 1.2e-4,

            fws_a: 0.35e6,
            fws_pi: 0.7e6,
            fwn_a: 5.0e4,
            fwn_p: 2.0e5,

            f_ex: 1.0e-4,

            t_target_north_a: 2.0,
            t_target_north_p: 4.0,
            t_target_south: 4.0,
            t_target_low_a: 24.0,
            t_target_low_pi: 25.0,
            restoring_rate: 1.0 / SECONDS_PER_YEAR,
        }
    }
}

float_fields!(
    Parameters,
    [
        rho0,
        gravity,
        m_ek_a,
        m_ek_pi,
        kv,
        a_gm,
        a_redi,
        epsilon_a,
        epsilon_p,
        fws_a,
        fws_pi,
        fwn_a,
        fwn_p,
        f_ex,
        t_target_north_a,
        t_target_north_p,
        t_target_south,
        t_target_low_a,
        t_target_low_pi,
        restoring_rate,
    ]
);

impl Parameters {
    /// Restoring target temperature of an upper box. The deep box is never restored.
    pub fn target_temperature(&self, region: SixBoxRegion) -> Option<FloatValue> {
        match region {
            SixBoxRegion::NorthA => Some(self.t_target_north_a),
            SixBoxRegion::NorthP => Some(self.t_target_north_p),
            SixBoxRegion::South => Some(self.t_target_south),
            SixBoxRegion::LowA => Some(self.t_target_low_a),
            SixBoxRegion::LowPI => Some(self.t_target_low_pi),
            SixBoxRegion::Deep => None,
        }
    }

    /// Parameters with the surface forcing switched off (Ekman transport, freshwater fluxes and
    /// temperature restoring). Internal transports and mixing are unchanged.
    pub fn unforced() -> Self {
        Self {
            m_ek_a: 0.0,
            m_ek_pi: 0.0,
            fws_a: 0.0,
            fws_pi: 0.0,
            fwn_a: 0.0,
            fwn_p: 0.0,
            restoring_rate: 0.0,
            ..Default::default()
        }
    }
}

impl ConfigGroup for Parameters {
    const GROUP_NAME: &'static str = "Parameters";

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
        for (name, value) in [
            ("rho0", self.rho0),
            ("gravity", self.gravity),
            ("kv", self.kv),
            ("a_gm", self.a_gm),
            ("a_redi", self.a_redi),
            ("epsilon_a", self.epsilon_a),
            ("epsilon_p", self.epsilon_p),
            ("f_ex", self.f_ex),
        ] {
            require_positive(name, value)?;
        }
        for (name, value) in [
            ("m_ek_a", self.m_ek_a),
            ("m_ek_pi", self.m_ek_pi),
            ("fws_a", self.fws_a),
            ("fws_pi", self.fws_pi),
            ("fwn_a", self.fwn_a),
            ("fwn_p", self.fwn_p),
            ("restoring_rate", self.restoring_rate),
        ] {
            require_non_negative(name, value)?;
        }
        for (name, value) in [
            ("t_target_north_a", self.t_target_north_a),
            ("t_target_north_p", self.t_target_north_p),
            ("t_target_south", self.t_target_south),
            ("t_target_low_a", self.t_target_low_a),
            ("t_target_low_pi", self.t_target_low_pi),
        ] {
            require_finite(name, value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = Parameters::default();
        assert!(params.validate().is_ok());
        assert!((params.restoring_rate * SECONDS_PER_YEAR - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unforced_is_valid() {
        let params = Parameters::unforced();
        assert!(params.validate().is_ok());
        assert_eq!(params.fwn_a, 0.0);
        assert_eq!(params.kv, Parameters::default().kv);
    }

    #[test]
    fn test_zero_epsilon_rejected() {
        let params = Parameters {
            epsilon_a: 0.0,
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().field, "epsilon_a");
    }

    #[test]
    fn test_negative_freshwater_rejected() {
        let params = Parameters {
            fwn_p: -1.0,
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap_err().field, "fwn_p");
    }

    #[test]
    fn test_integer_field_value_accepted() {
        let params = Parameters::default()
            .with_field("fwn_a", 100000_i64)
            .unwrap();
        assert_eq!(params.fwn_a, 1.0e5);
    }

    #[test]
    fn test_target_temperature() {
        let params = Parameters::default();
        assert_eq!(params.target_temperature(SixBoxRegion::LowA), Some(24.0));
        assert_eq!(params.target_temperature(SixBoxRegion::Deep), None);
    }

    #[test]
    fn test_partial_deserialization() {
        let json = r#"{"fwn_a": 1.0e6}"#;
        let params: Parameters =
            serde_json::from_str(json).expect("Partial deserialization failed");

        assert_eq!(params.fwn_a, 1.0e6);
        assert_eq!(params.kv, 1.0e-5);
    }
}
