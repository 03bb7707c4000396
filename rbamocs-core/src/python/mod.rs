//! Python bindings for the six-box model
//!
//! Exposed as `rbamocs._lib.core` by the `rbamocs` extension module.
//!
//! ```python
//! from rbamocs._lib.core import (
//!     SixBoxModelParameters, SixBoxModelTimeStep, six_box_model, LOW_A_IDX,
//! )
//!
//! params = SixBoxModelParameters(fwn_a=1.0e5)
//! result = six_box_model(parameters=params, time_step=SixBoxModelTimeStep(duration_years=50.0))
//! M_n_A, *_, T, S, sigma_0 = result.unpack()
//! T[LOW_A_IDX]
//! ```

mod config;
mod output;

pub use config::{
    PyBoxDimensions, PyInitialConditions, PyParameters, PyRandomization, PyTimeStep,
};
pub use output::PySixBoxOutput;

use crate::config::ModelConfig;
use crate::errors::BoxModelError;
use crate::spatial::{DEEP_IDX, LOW_A_IDX, LOW_PI_IDX, NORTH_A_IDX, NORTH_P_IDX, SOUTH_IDX};
use pyo3::create_exception;
use pyo3::exceptions::{PyArithmeticError, PyValueError};
use pyo3::prelude::*;

create_exception!(
    core,
    ConfigurationError,
    PyValueError,
    "A configuration group failed validation."
);
create_exception!(
    core,
    NumericalError,
    PyArithmeticError,
    "A computed quantity left its admissible domain during a run."
);

impl From<BoxModelError> for PyErr {
    fn from(err: BoxModelError) -> PyErr {
        match err {
            BoxModelError::Configuration(e) => ConfigurationError::new_err(e.to_string()),
            BoxModelError::Numerical(e) => NumericalError::new_err(e.to_string()),
        }
    }
}

impl From<crate::errors::ConfigurationError> for PyErr {
    fn from(err: crate::errors::ConfigurationError) -> PyErr {
        BoxModelError::from(err).into()
    }
}

/// Run the six-box model.
///
/// Parameters
/// ----------
/// dimensions, init_conditions, parameters, time_step, randomization
///     Configuration groups. Any group that is not given uses its defaults.
///
/// Returns
/// -------
/// SixBoxModelResult
///     The recorded time series.
///
/// Raises
/// ------
/// ConfigurationError
///     If any group is invalid. Raised before the first step.
/// NumericalError
///     If a quantity leaves its admissible domain during the run.
#[pyfunction]
#[pyo3(signature = (
    dimensions=None,
    init_conditions=None,
    parameters=None,
    time_step=None,
    randomization=None,
))]
pub fn six_box_model(
    py: Python<'_>,
    dimensions: Option<PyBoxDimensions>,
    init_conditions: Option<PyInitialConditions>,
    parameters: Option<PyParameters>,
    time_step: Option<PyTimeStep>,
    randomization: Option<PyRandomization>,
) -> PyResult<PySixBoxOutput> {
    let config = ModelConfig {
        dimensions: dimensions.map(|g| g.0).unwrap_or_default(),
        initial_conditions: init_conditions.map(|g| g.0).unwrap_or_default(),
        parameters: parameters.map(|g| g.0).unwrap_or_default(),
        time_step: time_step.map(|g| g.0).unwrap_or_default(),
        randomization: randomization.map(|g| g.0).unwrap_or_default(),
    };
    let output = py.allow_threads(|| config.run())?;
    Ok(PySixBoxOutput(output))
}

#[pymodule]
pub fn core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();

    m.add_class::<PyBoxDimensions>()?;
    m.add_class::<PyInitialConditions>()?;
    m.add_class::<PyParameters>()?;
    m.add_class::<PyTimeStep>()?;
    m.add_class::<PyRandomization>()?;
    m.add_class::<PySixBoxOutput>()?;
    m.add_function(wrap_pyfunction!(six_box_model, m)?)?;

    m.add("NORTH_A_IDX", NORTH_A_IDX)?;
    m.add("NORTH_P_IDX", NORTH_P_IDX)?;
    m.add("SOUTH_IDX", SOUTH_IDX)?;
    m.add("LOW_A_IDX", LOW_A_IDX)?;
    m.add("LOW_PI_IDX", LOW_PI_IDX)?;
    m.add("DEEP_IDX", DEEP_IDX)?;

    m.add("ConfigurationError", py.get_type_bound::<ConfigurationError>())?;
    m.add("NumericalError", py.get_type_bound::<NumericalError>())?;
    Ok(())
}
