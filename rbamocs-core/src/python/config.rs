//! Python wrappers for the configuration groups
//!
//! Every group is an immutable value: keyword arguments override the defaults at construction,
//! and `replace` returns a new object. Field names are matched ignoring case, so both
//! `SixBoxModelInitConditions(T_north_A0=4.0)` and `params.Fwn_A` work.

use crate::config::{
    describe, BoxDimensions, ConfigGroup, FieldValue, InitialConditions, Parameters,
    Randomization, TimeStep,
};
use pyo3::exceptions::{PyAttributeError, PyTypeError};
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyDict, PyLong};

/// Convert a Python keyword value into a field value
fn to_field_value(name: &str, value: &Bound<'_, PyAny>) -> PyResult<FieldValue> {
    if value.is_none() {
        Ok(FieldValue::Missing)
    } else if value.is_instance_of::<PyBool>() {
        Err(PyTypeError::new_err(format!("`{}` must be a number, got a bool", name)))
    } else if value.is_instance_of::<PyLong>() {
        Ok(FieldValue::Int(value.extract()?))
    } else {
        Ok(FieldValue::Float(value.extract()?))
    }
}

/// Apply keyword overrides to `group` and validate the result
fn apply_kwargs<G: ConfigGroup>(
    mut group: G,
    kwargs: Option<&Bound<'_, PyDict>>,
) -> PyResult<G> {
    if let Some(kwargs) = kwargs {
        for (key, value) in kwargs.iter() {
            let name: String = key.extract()?;
            let value = to_field_value(&name, &value)?;
            match group.field_name(&name) {
                Some(field) => group.set_field(field, value)?,
                None => group.set_field(&name, value)?,
            }
        }
    }
    group.validate()?;
    Ok(group)
}

fn field_value_to_object(py: Python<'_>, value: FieldValue) -> PyObject {
    match value {
        FieldValue::Float(v) => v.into_py(py),
        FieldValue::Int(v) => v.into_py(py),
        FieldValue::Missing => py.None(),
    }
}

/// Read a field as an attribute
fn get_field_attr<G: ConfigGroup>(py: Python<'_>, group: &G, name: &str) -> PyResult<PyObject> {
    group
        .field(name)
        .map(|value| field_value_to_object(py, value))
        .ok_or_else(|| {
            PyAttributeError::new_err(format!(
                "{} has no field `{}`",
                G::GROUP_NAME,
                name
            ))
        })
}

fn fields_to_dict<'py, G: ConfigGroup>(
    py: Python<'py>,
    group: &G,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    for (key, value) in group.fields() {
        dict.set_item(key, field_value_to_object(py, value))?;
    }
    Ok(dict)
}

macro_rules! config_group_class {
    ($py_name:ident, $group:ty, $class_name:tt) => {
        #[pyclass(frozen, name = $class_name)]
        #[derive(Debug, Clone)]
        pub struct $py_name(pub $group);

        #[pymethods]
        impl $py_name {
            #[new]
            #[pyo3(signature = (**kwargs))]
            fn new(kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
                Ok(Self(apply_kwargs(<$group>::default(), kwargs)?))
            }

            /// Field name to value mapping, in a stable order
            fn to_dict<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
                fields_to_dict(py, &self.0)
            }

            /// A copy with the given fields replaced
            #[pyo3(signature = (**kwargs))]
            fn replace(&self, kwargs: Option<&Bound<'_, PyDict>>) -> PyResult<Self> {
                Ok(Self(apply_kwargs(self.0.clone(), kwargs)?))
            }

            fn __getattr__(&self, py: Python<'_>, name: &str) -> PyResult<PyObject> {
                get_field_attr(py, &self.0, name)
            }

            fn __setattr__(&self, name: &str, _value: &Bound<'_, PyAny>) -> PyResult<()> {
                Err(PyAttributeError::new_err(format!(
                    "{} is immutable, use `replace({}=...)` to get an updated copy",
                    $class_name, name
                )))
            }

            fn __repr__(&self) -> String {
                describe(&self.0)
            }

            fn __eq__(&self, other: &Self) -> bool {
                self.0 == other.0
            }
        }
    };
}

config_group_class!(PyBoxDimensions, BoxDimensions, "SixBoxModelBoxDimensions");
config_group_class!(
    PyInitialConditions,
    InitialConditions,
    "SixBoxModelInitConditions"
);
config_group_class!(PyParameters, Parameters, "SixBoxModelParameters");
config_group_class!(PyTimeStep, TimeStep, "SixBoxModelTimeStep");
config_group_class!(PyRandomization, Randomization, "SixBoxModelRandomization");
