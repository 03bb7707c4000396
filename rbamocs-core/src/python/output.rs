//! Python wrapper for the run output

use crate::output::{SeriesView, SixBoxOutput};
use crate::FloatValue;
use numpy::{PyArray1, PyArray2, ToPyArray};
use pyo3::exceptions::PyKeyError;
use pyo3::prelude::*;
use pyo3::types::PyTuple;

/// Time series recorded by `six_box_model`.
///
/// Per-box arrays (`T`, `S`, `sigma_0`) have shape `(6, n_steps)`, indexed by the `*_IDX`
/// constants. All other series have shape `(n_steps,)`. Every getter returns a new numpy array.
#[pyclass(frozen, name = "SixBoxModelResult")]
#[derive(Debug, Clone)]
pub struct PySixBoxOutput(pub SixBoxOutput);

#[pymethods]
impl PySixBoxOutput {
    #[getter(M_n_A)]
    fn m_n_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_n_a().to_pyarray_bound(py)
    }

    #[getter(M_n_P)]
    fn m_n_p<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_n_p().to_pyarray_bound(py)
    }

    #[getter(M_upw_A)]
    fn m_upw_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_upw_a().to_pyarray_bound(py)
    }

    #[getter(M_upw_PI)]
    fn m_upw_pi<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_upw_pi().to_pyarray_bound(py)
    }

    #[getter(M_eddy_A)]
    fn m_eddy_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_eddy_a().to_pyarray_bound(py)
    }

    #[getter(M_eddy_PI)]
    fn m_eddy_pi<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_eddy_pi().to_pyarray_bound(py)
    }

    #[getter(M_ex)]
    fn m_ex<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_ex().to_pyarray_bound(py)
    }

    #[getter(D_low_A)]
    fn d_low_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.d_low_a().to_pyarray_bound(py)
    }

    #[getter(D_low_PI)]
    fn d_low_pi<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.d_low_pi().to_pyarray_bound(py)
    }

    #[getter(M_ls_A)]
    fn m_ls_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_ls_a().to_pyarray_bound(py)
    }

    #[getter(M_ls_PI)]
    fn m_ls_pi<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_ls_pi().to_pyarray_bound(py)
    }

    #[getter(M_ln_A)]
    fn m_ln_a<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_ln_a().to_pyarray_bound(py)
    }

    #[getter(M_ln_P)]
    fn m_ln_p<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_ln_p().to_pyarray_bound(py)
    }

    #[getter(M_s)]
    fn m_s<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<FloatValue>> {
        self.0.m_s().to_pyarray_bound(py)
    }

    #[getter(T)]
    fn temperature<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<FloatValue>> {
        self.0.temperature().to_pyarray_bound(py)
    }

    #[getter(S)]
    fn salinity<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<FloatValue>> {
        self.0.salinity().to_pyarray_bound(py)
    }

    #[getter]
    fn sigma_0<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray2<FloatValue>> {
        self.0.sigma_0().to_pyarray_bound(py)
    }

    #[getter]
    fn n_steps(&self) -> usize {
        self.0.n_steps()
    }

    /// Look up a series by name, e.g. `result.get("M_s")`
    fn get(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
        match self.0.get(name) {
            Some(SeriesView::Scalar(view)) => Ok(view.to_pyarray_bound(py).into_any().unbind()),
            Some(SeriesView::PerBox(view)) => Ok(view.to_pyarray_bound(py).into_any().unbind()),
            None => Err(PyKeyError::new_err(format!("unknown series `{}`", name))),
        }
    }

    /// The twelve primary series as a tuple:
    /// `(M_n_A, M_n_P, M_upw_A, M_upw_PI, M_eddy_A, M_eddy_PI, M_ex, D_low_A, D_low_PI, T, S, sigma_0)`
    fn unpack<'py>(&self, py: Python<'py>) -> Bound<'py, PyTuple> {
        let (m_n_a, m_n_p, m_upw_a, m_upw_pi, m_eddy_a, m_eddy_pi, m_ex, d_a, d_pi, t, s, sigma) =
            self.0.unpack();
        let scalars = [m_n_a, m_n_p, m_upw_a, m_upw_pi, m_eddy_a, m_eddy_pi, m_ex, d_a, d_pi];
        let per_box = [t, s, sigma];

        let items: Vec<PyObject> = scalars
            .iter()
            .map(|view| view.to_pyarray_bound(py).into_any().unbind())
            .chain(
                per_box
                    .iter()
                    .map(|view| view.to_pyarray_bound(py).into_any().unbind()),
            )
            .collect();
        PyTuple::new_bound(py, items)
    }

    fn __repr__(&self) -> String {
        self.0.summary()
    }
}
