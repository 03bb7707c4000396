//! Per-box values and the prognostic model state.

use crate::config::{BoxDimensions, InitialConditions};
use crate::spatial::{SixBoxRegion, N_BOXES};
use crate::FloatValue;
use serde::{Deserialize, Serialize};

/// A zero-cost wrapper for six-box values.
///
/// `SixBoxSlice` provides type-safe box access instead of raw arrays with magic indices.
///
/// # Examples
///
/// ```rust
/// use rbamocs_core::state::SixBoxSlice;
/// use rbamocs_core::spatial::SixBoxRegion;
///
/// let slice = SixBoxSlice::uniform(4.0).with(SixBoxRegion::LowA, 17.0);
///
/// assert_eq!(slice[SixBoxRegion::LowA], 17.0);
/// assert_eq!(slice.get(SixBoxRegion::Deep), 4.0);
/// ```
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SixBoxSlice(pub [FloatValue; N_BOXES]);

impl SixBoxSlice {
    /// Create a new SixBoxSlice initialised with NaN values.
    ///
    /// Unset boxes show up immediately as NaN.
    pub fn new() -> Self {
        Self([FloatValue::NAN; N_BOXES])
    }

    /// Create a new SixBoxSlice with all boxes set to the same value.
    pub fn uniform(value: FloatValue) -> Self {
        Self([value; N_BOXES])
    }

    pub fn zeros() -> Self {
        Self::uniform(0.0)
    }

    /// Create a new SixBoxSlice from an array of values in box index order.
    pub fn from_array(values: [FloatValue; N_BOXES]) -> Self {
        Self(values)
    }

    /// Builder method to set a single box's value.
    pub fn with(mut self, region: SixBoxRegion, value: FloatValue) -> Self {
        self.0[region as usize] = value;
        self
    }

    pub fn set(&mut self, region: SixBoxRegion, value: FloatValue) {
        self.0[region as usize] = value;
    }

    pub fn get(&self, region: SixBoxRegion) -> FloatValue {
        self.0[region as usize]
    }

    pub fn as_array(&self) -> &[FloatValue; N_BOXES] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (SixBoxRegion, FloatValue)> + '_ {
        SixBoxRegion::ALL.iter().map(move |r| (*r, self.0[*r as usize]))
    }

    /// Sum of `self * weights` over all boxes
    pub fn weighted_sum(&self, weights: &SixBoxSlice) -> FloatValue {
        self.0.iter().zip(weights.0.iter()).map(|(v, w)| v * w).sum()
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl Default for SixBoxSlice {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[FloatValue; N_BOXES]> for SixBoxSlice {
    fn from(values: [FloatValue; N_BOXES]) -> Self {
        Self(values)
    }
}

impl From<SixBoxSlice> for [FloatValue; N_BOXES] {
    fn from(slice: SixBoxSlice) -> Self {
        slice.0
    }
}

impl std::ops::Index<SixBoxRegion> for SixBoxSlice {
    type Output = FloatValue;

    fn index(&self, region: SixBoxRegion) -> &Self::Output {
        &self.0[region as usize]
    }
}

impl std::ops::IndexMut<SixBoxRegion> for SixBoxSlice {
    fn index_mut(&mut self, region: SixBoxRegion) -> &mut Self::Output {
        &mut self.0[region as usize]
    }
}

/// Prognostic state of the six-box model at one instant
///
/// The two low-latitude boxes have a time-varying thickness (the pycnocline depth), every other
/// box has a fixed thickness. Volumes are derived from these depths and [`BoxDimensions`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxState {
    /// Temperature (degC)
    pub temperature: SixBoxSlice,
    /// Salinity (psu)
    pub salinity: SixBoxSlice,
    /// Pycnocline depth of the low Atlantic box (m)
    pub d_low_a: FloatValue,
    /// Pycnocline depth of the low Pacific/Indian box (m)
    pub d_low_pi: FloatValue,
}

impl BoxState {
    pub fn from_initial_conditions(init: &InitialConditions) -> Self {
        Self {
            temperature: SixBoxSlice::from_array([
                init.t_north_a0,
                init.t_north_p0,
                init.t_south0,
                init.t_low_a0,
                init.t_low_pi0,
                init.t_deep0,
            ]),
            salinity: SixBoxSlice::from_array([
                init.s_north_a0,
                init.s_north_p0,
                init.s_south0,
                init.s_low_a0,
                init.s_low_pi0,
                init.s_deep0,
            ]),
            d_low_a: init.d_low_a0,
            d_low_pi: init.d_low_pi0,
        }
    }

    /// Box volumes (m^3) implied by the current pycnocline depths
    pub fn volumes(&self, dims: &BoxDimensions) -> SixBoxSlice {
        dims.volumes(self.d_low_a, self.d_low_pi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_builder_and_index() {
        let mut slice = SixBoxSlice::new().with(SixBoxRegion::NorthA, 1.0);
        assert_eq!(slice[SixBoxRegion::NorthA], 1.0);
        assert!(slice.get(SixBoxRegion::Deep).is_nan());
        assert!(!slice.is_finite());

        slice[SixBoxRegion::Deep] = 3.0;
        assert_eq!(slice.get(SixBoxRegion::Deep), 3.0);
    }

    #[test]
    fn weighted_sum() {
        let values = SixBoxSlice::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let weights = SixBoxSlice::uniform(2.0);
        assert_eq!(values.weighted_sum(&weights), 42.0);
    }

    #[test]
    fn state_from_initial_conditions() {
        let init = InitialConditions::default();
        let state = BoxState::from_initial_conditions(&init);

        assert_eq!(state.temperature[SixBoxRegion::NorthA], init.t_north_a0);
        assert_eq!(state.salinity[SixBoxRegion::Deep], init.s_deep0);
        assert_eq!(state.d_low_pi, init.d_low_pi0);
    }

    #[test]
    fn volumes_fill_the_basin() {
        let dims = BoxDimensions::default();
        let state = BoxState::from_initial_conditions(&InitialConditions::default());
        let volumes = state.volumes(&dims);

        let total: FloatValue = volumes.as_array().iter().sum();
        let expected = dims.total_area() * dims.depth_total;
        assert!((total - expected).abs() / expected < 1e-12);
    }
}
