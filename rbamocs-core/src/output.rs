//! Time series produced by a run
//!
//! All series are preallocated for the full number of steps when a run starts and are written
//! at most once per step index by the integrator. Once a run completes the output is handed
//! back by value and only exposes read access.

use crate::fluxes::Fluxes;
use crate::spatial::{SixBoxRegion, N_BOXES};
use crate::standard_variables::{self, VariableShape};
use crate::state::SixBoxSlice;
use crate::FloatValue;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Borrowed views in `unpack` order:
/// `(M_n_A, M_n_P, M_upw_A, M_upw_PI, M_eddy_A, M_eddy_PI, M_ex, D_low_A, D_low_PI, T, S, sigma_0)`
pub type Unpacked<'a> = (
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView1<'a, FloatValue>,
    ArrayView2<'a, FloatValue>,
    ArrayView2<'a, FloatValue>,
    ArrayView2<'a, FloatValue>,
);

/// Owned arrays in `unpack` order
pub type UnpackedOwned = (
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array1<FloatValue>,
    Array2<FloatValue>,
    Array2<FloatValue>,
    Array2<FloatValue>,
);

/// A single recorded series, looked up by name
#[derive(Debug, Clone, Copy)]
pub enum SeriesView<'a> {
    Scalar(ArrayView1<'a, FloatValue>),
    PerBox(ArrayView2<'a, FloatValue>),
}

impl SeriesView<'_> {
    pub fn shape(&self) -> &[usize] {
        match self {
            SeriesView::Scalar(view) => view.shape(),
            SeriesView::PerBox(view) => view.shape(),
        }
    }
}

/// Result of a six-box model run.
///
/// Per-box arrays have shape `(6, n_steps)` with the box index (see
/// [`crate::spatial`]) on the first axis. Scalar series have shape `(n_steps,)`. Column `i`
/// of every array belongs to step `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SixBoxOutput {
    temperature: Array2<FloatValue>,
    salinity: Array2<FloatValue>,
    sigma_0: Array2<FloatValue>,
    m_n_a: Array1<FloatValue>,
    m_n_p: Array1<FloatValue>,
    m_upw_a: Array1<FloatValue>,
    m_upw_pi: Array1<FloatValue>,
    m_eddy_a: Array1<FloatValue>,
    m_eddy_pi: Array1<FloatValue>,
    m_ex: Array1<FloatValue>,
    d_low_a: Array1<FloatValue>,
    d_low_pi: Array1<FloatValue>,
    m_ls_a: Array1<FloatValue>,
    m_ls_pi: Array1<FloatValue>,
    m_ln_a: Array1<FloatValue>,
    m_ln_p: Array1<FloatValue>,
    m_s: Array1<FloatValue>,
}

impl SixBoxOutput {
    /// Zero-filled output for `n_steps` steps
    pub(crate) fn new(n_steps: usize) -> Self {
        let per_box = || Array2::zeros((N_BOXES, n_steps));
        let scalar = || Array1::zeros(n_steps);
        Self {
            temperature: per_box(),
            salinity: per_box(),
            sigma_0: per_box(),
            m_n_a: scalar(),
            m_n_p: scalar(),
            m_upw_a: scalar(),
            m_upw_pi: scalar(),
            m_eddy_a: scalar(),
            m_eddy_pi: scalar(),
            m_ex: scalar(),
            d_low_a: scalar(),
            d_low_pi: scalar(),
            m_ls_a: scalar(),
            m_ls_pi: scalar(),
            m_ln_a: scalar(),
            m_ln_p: scalar(),
            m_s: scalar(),
        }
    }

    /// Write step `step` of every series
    pub(crate) fn record(
        &mut self,
        step: usize,
        temperature: &SixBoxSlice,
        salinity: &SixBoxSlice,
        sigma_0: &SixBoxSlice,
        fluxes: &Fluxes,
    ) {
        for region in SixBoxRegion::ALL {
            let idx = region.index();
            self.temperature[[idx, step]] = temperature[region];
            self.salinity[[idx, step]] = salinity[region];
            self.sigma_0[[idx, step]] = sigma_0[region];
        }
        self.m_n_a[step] = fluxes.m_n_a;
        self.m_n_p[step] = fluxes.m_n_p;
        self.m_upw_a[step] = fluxes.m_upw_a;
        self.m_upw_pi[step] = fluxes.m_upw_pi;
        self.m_eddy_a[step] = fluxes.m_eddy_a;
        self.m_eddy_pi[step] = fluxes.m_eddy_pi;
        self.m_ex[step] = fluxes.m_ex;
        self.d_low_a[step] = fluxes.d_low_a;
        self.d_low_pi[step] = fluxes.d_low_pi;
        self.m_ls_a[step] = fluxes.m_ls_a;
        self.m_ls_pi[step] = fluxes.m_ls_pi;
        self.m_ln_a[step] = fluxes.m_ln_a;
        self.m_ln_p[step] = fluxes.m_ln_p;
        self.m_s[step] = fluxes.m_s;
    }

    pub fn n_steps(&self) -> usize {
        self.m_n_a.len()
    }

    /// Temperature (degC), shape `(6, n_steps)`
    pub fn temperature(&self) -> ArrayView2<'_, FloatValue> {
        self.temperature.view()
    }

    /// Salinity (psu), shape `(6, n_steps)`
    pub fn salinity(&self) -> ArrayView2<'_, FloatValue> {
        self.salinity.view()
    }

    /// Potential density anomaly (kg/m^3), shape `(6, n_steps)`
    pub fn sigma_0(&self) -> ArrayView2<'_, FloatValue> {
        self.sigma_0.view()
    }

    pub fn m_n_a(&self) -> ArrayView1<'_, FloatValue> {
        self.m_n_a.view()
    }

    pub fn m_n_p(&self) -> ArrayView1<'_, FloatValue> {
        self.m_n_p.view()
    }

    pub fn m_upw_a(&self) -> ArrayView1<'_, FloatValue> {
        self.m_upw_a.view()
    }

    pub fn m_upw_pi(&self) -> ArrayView1<'_, FloatValue> {
        self.m_upw_pi.view()
    }

    pub fn m_eddy_a(&self) -> ArrayView1<'_, FloatValue> {
        self.m_eddy_a.view()
    }

    pub fn m_eddy_pi(&self) -> ArrayView1<'_, FloatValue> {
        self.m_eddy_pi.view()
    }

    pub fn m_ex(&self) -> ArrayView1<'_, FloatValue> {
        self.m_ex.view()
    }

    pub fn d_low_a(&self) -> ArrayView1<'_, FloatValue> {
        self.d_low_a.view()
    }

    pub fn d_low_pi(&self) -> ArrayView1<'_, FloatValue> {
        self.d_low_pi.view()
    }

    pub fn m_ls_a(&self) -> ArrayView1<'_, FloatValue> {
        self.m_ls_a.view()
    }

    pub fn m_ls_pi(&self) -> ArrayView1<'_, FloatValue> {
        self.m_ls_pi.view()
    }

    pub fn m_ln_a(&self) -> ArrayView1<'_, FloatValue> {
        self.m_ln_a.view()
    }

    pub fn m_ln_p(&self) -> ArrayView1<'_, FloatValue> {
        self.m_ln_p.view()
    }

    pub fn m_s(&self) -> ArrayView1<'_, FloatValue> {
        self.m_s.view()
    }

    /// Time series of a single box
    pub fn box_temperature(&self, region: SixBoxRegion) -> ArrayView1<'_, FloatValue> {
        self.temperature.row(region.index())
    }

    /// Look up a series by its name in [`standard_variables`]
    pub fn get(&self, name: &str) -> Option<SeriesView<'_>> {
        let view = match name {
            "T" => SeriesView::PerBox(self.temperature()),
            "S" => SeriesView::PerBox(self.salinity()),
            "sigma_0" => SeriesView::PerBox(self.sigma_0()),
            "M_n_A" => SeriesView::Scalar(self.m_n_a()),
            "M_n_P" => SeriesView::Scalar(self.m_n_p()),
            "M_upw_A" => SeriesView::Scalar(self.m_upw_a()),
            "M_upw_PI" => SeriesView::Scalar(self.m_upw_pi()),
            "M_eddy_A" => SeriesView::Scalar(self.m_eddy_a()),
            "M_eddy_PI" => SeriesView::Scalar(self.m_eddy_pi()),
            "M_ex" => SeriesView::Scalar(self.m_ex()),
            "D_low_A" => SeriesView::Scalar(self.d_low_a()),
            "D_low_PI" => SeriesView::Scalar(self.d_low_pi()),
            "M_ls_A" => SeriesView::Scalar(self.m_ls_a()),
            "M_ls_PI" => SeriesView::Scalar(self.m_ls_pi()),
            "M_ln_A" => SeriesView::Scalar(self.m_ln_a()),
            "M_ln_P" => SeriesView::Scalar(self.m_ln_p()),
            "M_s" => SeriesView::Scalar(self.m_s()),
            _ => return None,
        };
        Some(view)
    }

    /// Views of the twelve primary series in a fixed order.
    ///
    /// The order is
    /// `(M_n_A, M_n_P, M_upw_A, M_upw_PI, M_eddy_A, M_eddy_PI, M_ex, D_low_A, D_low_PI, T, S, sigma_0)`
    /// and matches [`standard_variables::UNPACK_ORDER`].
    pub fn unpack(&self) -> Unpacked<'_> {
        (
            self.m_n_a(),
            self.m_n_p(),
            self.m_upw_a(),
            self.m_upw_pi(),
            self.m_eddy_a(),
            self.m_eddy_pi(),
            self.m_ex(),
            self.d_low_a(),
            self.d_low_pi(),
            self.temperature(),
            self.salinity(),
            self.sigma_0(),
        )
    }

    /// Consume the output, returning the arrays in [`SixBoxOutput::unpack`] order
    pub fn into_unpacked(self) -> UnpackedOwned {
        (
            self.m_n_a,
            self.m_n_p,
            self.m_upw_a,
            self.m_upw_pi,
            self.m_eddy_a,
            self.m_eddy_pi,
            self.m_ex,
            self.d_low_a,
            self.d_low_pi,
            self.temperature,
            self.salinity,
            self.sigma_0,
        )
    }

    /// Shape of every recorded series, one `name: shape` line each
    pub fn summary(&self) -> String {
        let mut out = format!("SixBoxOutput ({} steps)\n", self.n_steps());
        for var in standard_variables::all() {
            let shape = match var.shape {
                VariableShape::PerBox => format!("({}, {})", N_BOXES, self.n_steps()),
                VariableShape::Scalar => format!("({},)", self.n_steps()),
            };
            out.push_str(&format!("  {}: {} [{}]\n", var.name, shape, var.unit));
        }
        out
    }
}

impl fmt::Display for SixBoxOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standard_variables::UNPACK_ORDER;

    fn fluxes(value: FloatValue) -> Fluxes {
        Fluxes {
            m_n_a: value,
            m_n_p: value + 1.0,
            m_upw_a: value + 2.0,
            m_upw_pi: value + 3.0,
            m_eddy_a: value + 4.0,
            m_eddy_pi: value + 5.0,
            m_ex: value + 6.0,
            d_low_a: value + 7.0,
            d_low_pi: value + 8.0,
            m_ls_a: value + 9.0,
            m_ls_pi: value + 10.0,
            m_ln_a: value + 11.0,
            m_ln_p: value + 12.0,
            m_s: value + 13.0,
        }
    }

    #[test]
    fn preallocated_shapes() {
        let output = SixBoxOutput::new(7);
        assert_eq!(output.n_steps(), 7);
        assert_eq!(output.temperature().shape(), &[6, 7]);
        assert_eq!(output.m_s().shape(), &[7]);
        for var in standard_variables::all() {
            assert!(output.get(var.name).is_some(), "missing {}", var.name);
        }
    }

    #[test]
    fn record_writes_one_column() {
        let mut output = SixBoxOutput::new(3);
        let temperature = SixBoxSlice::from_array([1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let salinity = SixBoxSlice::uniform(35.0);
        let sigma = SixBoxSlice::uniform(27.0);
        output.record(1, &temperature, &salinity, &sigma, &fluxes(100.0));

        assert_eq!(output.temperature()[[3, 1]], 4.0);
        assert_eq!(output.temperature()[[3, 0]], 0.0);
        assert_eq!(output.box_temperature(SixBoxRegion::Deep)[1], 6.0);
        assert_eq!(output.m_ex()[1], 106.0);
        assert_eq!(output.d_low_pi()[1], 108.0);
        assert_eq!(output.m_s()[1], 113.0);
        assert_eq!(output.m_n_a()[2], 0.0);
    }

    #[test]
    fn unpack_order() {
        let mut output = SixBoxOutput::new(1);
        let slice = SixBoxSlice::uniform(1.0);
        output.record(0, &slice, &slice, &slice, &fluxes(0.0));

        let (m_n_a, m_n_p, m_upw_a, m_upw_pi, m_eddy_a, m_eddy_pi, m_ex, d_a, d_pi, t, s, sigma) =
            output.unpack();
        let scalars = [m_n_a, m_n_p, m_upw_a, m_upw_pi, m_eddy_a, m_eddy_pi, m_ex, d_a, d_pi];
        for (i, series) in scalars.iter().enumerate() {
            assert_eq!(series[0], i as FloatValue, "{}", UNPACK_ORDER[i].name);
        }
        for per_box in [t, s, sigma] {
            assert_eq!(per_box.shape(), &[6, 1]);
        }

        let owned = output.clone().into_unpacked();
        assert_eq!(owned.7[0], 7.0);
        assert_eq!(owned.11, output.sigma_0());
    }

    #[test]
    fn summary_lists_shapes() {
        let summary = SixBoxOutput::new(4).summary();
        assert!(summary.contains("T: (6, 4) [degC]"));
        assert!(summary.contains("M_n_A: (4,) [m^3 / s]"));
        assert!(summary.contains("M_s: (4,)"));
    }
}
