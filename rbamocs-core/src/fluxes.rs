//! Inter-box volume transports
//!
//! Transports follow the pycnocline model of Gnanadesikan (1999) as extended to separate Atlantic
//! and Pacific/Indian basins (Gnanadesikan, Kelson & Sten, 2018). For each basin $b$ the
//! low-latitude box sits above the pycnocline at depth $D_b$ and:
//!
//! - sinks into the north at rate
//!   $M_{n,b} = \frac{g (\sigma_N - \sigma_L)}{\rho_0} \frac{D_b^2}{\epsilon_b}$
//! - is fed from below by diffusive upwelling $M_{upw,b} = \kappa_v A_{L,b} / D_b$
//! - loses water to the south through the eddy return flow $M_{eddy,b} = A_{GM} D_b L_{x,b} / L_y$
//!
//! The two basins exchange water through a geostrophic flow driven by the difference in
//! pycnocline depths,
//! $$ M_{ex} = \frac{g (\sigma_D - \bar\sigma_L)}{\rho_0} \frac{D_{PI}^2 - D_A^2}{2 f_{ex}} $$
//! which is positive when water moves from the Pacific/Indian to the Atlantic.
//!
//! All transports are in m^3/s.

use crate::config::{BoxDimensions, Parameters};
use crate::eos::density_slice;
use crate::errors::NumericalError;
use crate::spatial::SixBoxRegion;
use crate::state::{BoxState, SixBoxSlice};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// Denominators smaller than this (in absolute value) are treated as a singular division
pub const MIN_DENOMINATOR: FloatValue = 1e-12;

/// Transports between the boxes at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fluxes {
    /// Atlantic overturning, positive when sinking in the North Atlantic
    pub m_n_a: FloatValue,
    /// Pacific overturning, positive when sinking in the North Pacific
    pub m_n_p: FloatValue,
    pub m_upw_a: FloatValue,
    pub m_upw_pi: FloatValue,
    pub m_eddy_a: FloatValue,
    pub m_eddy_pi: FloatValue,
    /// Inter-basin exchange, positive from the Pacific/Indian to the Atlantic
    pub m_ex: FloatValue,
    /// Pycnocline depth of the low Atlantic the transports were evaluated at (m)
    pub d_low_a: FloatValue,
    /// Pycnocline depth of the low Pacific/Indian the transports were evaluated at (m)
    pub d_low_pi: FloatValue,
    /// Isopycnal mixing between the low Atlantic and the Southern Ocean
    pub m_ls_a: FloatValue,
    /// Isopycnal mixing between the low Pacific/Indian and the Southern Ocean
    pub m_ls_pi: FloatValue,
    /// Isopycnal mixing between the low Atlantic and the North Atlantic
    pub m_ln_a: FloatValue,
    /// Isopycnal mixing between the low Pacific/Indian and the North Pacific
    pub m_ln_p: FloatValue,
    /// Southern Ocean residual upwelling, positive from the deep box into the south box
    pub m_s: FloatValue,
}

impl Fluxes {
    fn named(&self) -> [(&'static str, FloatValue); 14] {
        [
            ("M_n_A", self.m_n_a),
            ("M_n_P", self.m_n_p),
            ("M_upw_A", self.m_upw_a),
            ("M_upw_PI", self.m_upw_pi),
            ("M_eddy_A", self.m_eddy_a),
            ("M_eddy_PI", self.m_eddy_pi),
            ("M_ex", self.m_ex),
            ("D_low_A", self.d_low_a),
            ("D_low_PI", self.d_low_pi),
            ("M_ls_A", self.m_ls_a),
            ("M_ls_PI", self.m_ls_pi),
            ("M_ln_A", self.m_ln_a),
            ("M_ln_P", self.m_ln_p),
            ("M_s", self.m_s),
        ]
    }

    fn ensure_finite(self) -> Result<Self, NumericalError> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(NumericalError::new(name, value, "transport is not finite"));
            }
        }
        Ok(self)
    }
}

/// Division that fails instead of producing an infinite or undefined transport
fn checked_div(
    quantity: &str,
    numerator: FloatValue,
    denominator: FloatValue,
) -> Result<FloatValue, NumericalError> {
    if !denominator.is_finite() || denominator.abs() < MIN_DENOMINATOR {
        return Err(NumericalError::new(
            quantity,
            denominator,
            "denominator is zero or not finite",
        ));
    }
    Ok(numerator / denominator)
}

/// Evaluates the transports for a fixed geometry and parameter set.
///
/// Holds no state between calls; the same model can be evaluated for any number of states.
#[derive(Debug, Clone, Copy)]
pub struct FluxModel<'a> {
    dimensions: &'a BoxDimensions,
    parameters: &'a Parameters,
}

impl<'a> FluxModel<'a> {
    pub fn new(dimensions: &'a BoxDimensions, parameters: &'a Parameters) -> Self {
        Self {
            dimensions,
            parameters,
        }
    }

    /// Transports for `state`, given the potential density anomaly of each box
    pub fn compute(
        &self,
        state: &BoxState,
        sigma: &SixBoxSlice,
    ) -> Result<Fluxes, NumericalError> {
        let dims = self.dimensions;
        let params = self.parameters;
        let d_a = state.d_low_a;
        let d_pi = state.d_low_pi;

        let buoyancy = |heavy: FloatValue, light: FloatValue| {
            checked_div("rho0", params.gravity * (heavy - light), params.rho0)
        };

        let m_n_a = checked_div(
            "epsilon_a",
            buoyancy(sigma[SixBoxRegion::NorthA], sigma[SixBoxRegion::LowA])? * d_a * d_a,
            params.epsilon_a,
        )?;
        let m_n_p = checked_div(
            "epsilon_p",
            buoyancy(sigma[SixBoxRegion::NorthP], sigma[SixBoxRegion::LowPI])? * d_pi * d_pi,
            params.epsilon_p,
        )?;

        let m_upw_a = checked_div("D_low_A", params.kv * dims.area_low_a, d_a)?;
        let m_upw_pi = checked_div("D_low_PI", params.kv * dims.area_low_pi, d_pi)?;

        let m_eddy_a = checked_div("ly_south", params.a_gm * d_a * dims.lx_south_a, dims.ly_south)?;
        let m_eddy_pi =
            checked_div("ly_south", params.a_gm * d_pi * dims.lx_south_pi, dims.ly_south)?;

        let sigma_low_mean = 0.5 * (sigma[SixBoxRegion::LowA] + sigma[SixBoxRegion::LowPI]);
        let m_ex = checked_div(
            "f_ex",
            buoyancy(sigma[SixBoxRegion::Deep], sigma_low_mean)? * (d_pi * d_pi - d_a * d_a),
            2.0 * params.f_ex,
        )?;

        let m_ls_a = checked_div("ly_south", params.a_redi * d_a * dims.lx_south_a, dims.ly_south)?;
        let m_ls_pi =
            checked_div("ly_south", params.a_redi * d_pi * dims.lx_south_pi, dims.ly_south)?;
        let m_ln_a = checked_div("ly_north", params.a_redi * d_a * dims.lx_north_a, dims.ly_north)?;
        let m_ln_p =
            checked_div("ly_north", params.a_redi * d_pi * dims.lx_north_p, dims.ly_north)?;

        let m_s = params.m_ek_a + params.m_ek_pi
            - (m_eddy_a + m_eddy_pi)
            - (params.fws_a + params.fws_pi);

        Fluxes {
            m_n_a,
            m_n_p,
            m_upw_a,
            m_upw_pi,
            m_eddy_a,
            m_eddy_pi,
            m_ex,
            d_low_a: d_a,
            d_low_pi: d_pi,
            m_ls_a,
            m_ls_pi,
            m_ln_a,
            m_ln_p,
            m_s,
        }
        .ensure_finite()
    }
}

/// Transports for `state`, evaluating the equation of state first
pub fn fluxes(
    state: &BoxState,
    dimensions: &BoxDimensions,
    parameters: &Parameters,
) -> Result<Fluxes, NumericalError> {
    let sigma = density_slice(&state.temperature, &state.salinity)?;
    FluxModel::new(dimensions, parameters).compute(state, &sigma)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::InitialConditions;
    use approx::assert_relative_eq;

    fn default_state() -> BoxState {
        BoxState::from_initial_conditions(&InitialConditions::default())
    }

    #[test]
    fn default_overturning_sinks_in_the_north_atlantic() {
        let fluxes = fluxes(
            &default_state(),
            &BoxDimensions::default(),
            &Parameters::default(),
        )
        .unwrap();

        // Cold North Atlantic over warm low latitudes: ~20 Sv of sinking
        assert!(fluxes.m_n_a > 5.0e6 && fluxes.m_n_a < 50.0e6, "{}", fluxes.m_n_a);
        assert_relative_eq!(fluxes.m_upw_a, 1.5e6, max_relative = 1e-12);
        assert_relative_eq!(fluxes.m_eddy_a, 4.0e6, max_relative = 1e-12);
        assert_eq!(fluxes.d_low_a, 400.0);
    }

    #[test]
    fn overturning_reverses_with_the_density_gradient() {
        let dims = BoxDimensions::default();
        let params = Parameters::default();
        let state = default_state();

        let mut reversed = state;
        for (north, low) in [
            (SixBoxRegion::NorthA, SixBoxRegion::LowA),
            (SixBoxRegion::NorthP, SixBoxRegion::LowPI),
        ] {
            reversed.temperature.0.swap(north.index(), low.index());
            reversed.salinity.0.swap(north.index(), low.index());
        }

        let forward = fluxes(&state, &dims, &params).unwrap();
        let backward = fluxes(&reversed, &dims, &params).unwrap();

        assert!(forward.m_n_a > 0.0);
        assert_relative_eq!(backward.m_n_a, -forward.m_n_a, max_relative = 1e-12);
        assert_relative_eq!(backward.m_n_p, -forward.m_n_p, max_relative = 1e-12);
    }

    #[test]
    fn no_exchange_with_equal_pycnoclines() {
        let fluxes = fluxes(
            &default_state(),
            &BoxDimensions::default(),
            &Parameters::default(),
        )
        .unwrap();
        assert_eq!(fluxes.m_ex, 0.0);
    }

    #[test]
    fn deeper_pacific_pycnocline_drives_flow_into_the_atlantic() {
        let mut state = default_state();
        state.d_low_pi = 600.0;
        let fluxes = fluxes(&state, &BoxDimensions::default(), &Parameters::default()).unwrap();

        // The deep box is denser than the low-latitude mean
        assert!(fluxes.m_ex > 0.0);
    }

    #[test]
    fn southern_residual_closes_the_south_box() {
        let params = Parameters::default();
        let fluxes = fluxes(&default_state(), &BoxDimensions::default(), &params).unwrap();

        let into_south =
            fluxes.m_eddy_a + fluxes.m_eddy_pi + params.fws_a + params.fws_pi + fluxes.m_s;
        assert_relative_eq!(into_south, params.m_ek_a + params.m_ek_pi, max_relative = 1e-12);
    }

    #[test]
    fn zero_pycnocline_depth_is_an_error() {
        let mut state = default_state();
        state.d_low_a = 0.0;
        let err = fluxes(&state, &BoxDimensions::default(), &Parameters::default()).unwrap_err();
        assert_eq!(err.quantity, "D_low_A");
    }

    #[test]
    fn temperature_outside_eos_range_is_an_error() {
        let mut state = default_state();
        state.temperature[SixBoxRegion::South] = 80.0;
        let err = fluxes(&state, &BoxDimensions::default(), &Parameters::default()).unwrap_err();
        assert_eq!(err.quantity, "temperature");
    }

    #[test]
    fn checked_div_guards() {
        assert_eq!(checked_div("x", 1.0, 2.0).unwrap(), 0.5);
        assert!(checked_div("x", 1.0, 1e-13).is_err());
        assert!(checked_div("x", 1.0, FloatValue::NAN).is_err());
        assert!(checked_div("x", 1.0, FloatValue::INFINITY).is_err());
    }
}
