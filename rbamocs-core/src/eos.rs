//! Equation of state for seawater potential density.
//!
//! Uses the UNESCO EOS-80 one-atmosphere polynomial (Millero & Poisson, 1981), which at zero
//! pressure gives potential density referenced to the surface. The model works with the
//! anomaly $\sigma_0 = \rho(T, S, 0) - 1000$.
//!
//! # Units
//!
//! - Temperature: degC
//! - Salinity: psu
//! - Density anomaly: kg/m^3

use crate::errors::NumericalError;
use crate::state::SixBoxSlice;
use crate::FloatValue;

/// Lowest admissible temperature (degC), near the freezing point of seawater
pub const T_MIN: FloatValue = -2.5;
/// Highest admissible temperature (degC)
pub const T_MAX: FloatValue = 40.0;
/// Lowest admissible salinity (psu)
pub const S_MIN: FloatValue = 0.0;
/// Highest admissible salinity (psu)
pub const S_MAX: FloatValue = 42.0;

/// Potential density anomaly $\sigma_0$ (kg/m^3) of seawater at temperature `t` and salinity `s`.
///
/// Fails when either input is not finite or lies outside
/// [`T_MIN`]..=[`T_MAX`] / [`S_MIN`]..=[`S_MAX`].
///
/// # Example
///
/// ```
/// use rbamocs_core::eos::density;
///
/// // Standard seawater: 35 psu at 0 degC
/// let sigma = density(0.0, 35.0).unwrap();
/// assert!((sigma - 28.1).abs() < 0.05);
///
/// assert!(density(60.0, 35.0).is_err());
/// ```
pub fn density(t: FloatValue, s: FloatValue) -> Result<FloatValue, NumericalError> {
    if !t.is_finite() || !(T_MIN..=T_MAX).contains(&t) {
        return Err(NumericalError::new(
            "temperature",
            t,
            format!("outside the equation of state range [{}, {}] degC", T_MIN, T_MAX),
        ));
    }
    if !s.is_finite() || !(S_MIN..=S_MAX).contains(&s) {
        return Err(NumericalError::new(
            "salinity",
            s,
            format!("outside the equation of state range [{}, {}] psu", S_MIN, S_MAX),
        ));
    }

    // Pure water density (Bigg, 1967)
    let rho_w = 999.842594 + 6.793952e-2 * t - 9.095290e-3 * t.powi(2)
        + 1.001685e-4 * t.powi(3)
        - 1.120083e-6 * t.powi(4)
        + 6.536336e-9 * t.powi(5);

    let a = 8.24493e-1 - 4.0899e-3 * t + 7.6438e-5 * t.powi(2) - 8.2467e-7 * t.powi(3)
        + 5.3875e-9 * t.powi(4);
    let b = -5.72466e-3 + 1.0227e-4 * t - 1.6546e-6 * t.powi(2);
    let c = 4.8314e-4;

    Ok(rho_w + a * s + b * s.powf(1.5) + c * s.powi(2) - 1000.0)
}

/// $\sigma_0$ of every box
pub fn density_slice(
    temperature: &SixBoxSlice,
    salinity: &SixBoxSlice,
) -> Result<SixBoxSlice, NumericalError> {
    let mut sigma = SixBoxSlice::new();
    for (region, t) in temperature.iter() {
        sigma[region] = density(t, salinity[region])?;
    }
    Ok(sigma)
}
