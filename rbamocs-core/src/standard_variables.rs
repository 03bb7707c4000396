//! Output variables recorded by the six-box model.
//!
//! Every series in a [`SixBoxOutput`](crate::output::SixBoxOutput) is described here with its
//! name, unit and shape. The names are the keys used by
//! [`SixBoxOutput::get`](crate::output::SixBoxOutput::get) and by the Python result object.
//!
//! # Order
//!
//! [`UNPACK_ORDER`] is the order of
//! [`SixBoxOutput::unpack`](crate::output::SixBoxOutput::unpack). It is a public contract and must
//! not change:
//!
//! ```text
//! M_n_A, M_n_P, M_upw_A, M_upw_PI, M_eddy_A, M_eddy_PI, M_ex, D_low_A, D_low_PI, T, S, sigma_0
//! ```
//!
//! [`SUPPLEMENTARY`] lists the series that are recorded but only available by name.
//!
//! # Usage
//!
//! ```rust
//! use rbamocs_core::standard_variables::{lookup, VAR_M_N_A};
//!
//! assert_eq!(VAR_M_N_A.unit, "m^3 / s");
//! assert_eq!(lookup("sigma_0").unwrap().unit, "kg / m^3");
//! ```

use serde::Serialize;

/// Whether a series has one value per box or a single value per step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VariableShape {
    /// Shape `(6, n_steps)`
    PerBox,
    /// Shape `(n_steps,)`
    Scalar,
}

/// Definition of a recorded series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutputVariable {
    pub name: &'static str,
    pub unit: &'static str,
    pub shape: VariableShape,
    pub description: &'static str,
}

macro_rules! define_output_variable {
    (
        $ident:ident,
        name = $name:expr,
        unit = $unit:expr,
        shape = $shape:ident,
        description = $description:expr $(,)?
    ) => {
        pub const $ident: OutputVariable = OutputVariable {
            name: $name,
            unit: $unit,
            shape: VariableShape::$shape,
            description: $description,
        };
    };
}

// ============================================================================
// Transports
// ============================================================================

define_output_variable!(
    VAR_M_N_A,
    name = "M_n_A",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Atlantic overturning, positive when sinking in the North Atlantic",
);

define_output_variable!(
    VAR_M_N_P,
    name = "M_n_P",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Pacific overturning, positive when sinking in the North Pacific",
);

define_output_variable!(
    VAR_M_UPW_A,
    name = "M_upw_A",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Diffusive upwelling from the deep box into the low Atlantic",
);

define_output_variable!(
    VAR_M_UPW_PI,
    name = "M_upw_PI",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Diffusive upwelling from the deep box into the low Pacific/Indian",
);

define_output_variable!(
    VAR_M_EDDY_A,
    name = "M_eddy_A",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Eddy return flow from the low Atlantic to the Southern Ocean",
);

define_output_variable!(
    VAR_M_EDDY_PI,
    name = "M_eddy_PI",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Eddy return flow from the low Pacific/Indian to the Southern Ocean",
);

define_output_variable!(
    VAR_M_EX,
    name = "M_ex",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Inter-basin exchange, positive from the Pacific/Indian to the Atlantic",
);

define_output_variable!(
    VAR_M_LS_A,
    name = "M_ls_A",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Isopycnal mixing between the low Atlantic and the Southern Ocean",
);

define_output_variable!(
    VAR_M_LS_PI,
    name = "M_ls_PI",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Isopycnal mixing between the low Pacific/Indian and the Southern Ocean",
);

define_output_variable!(
    VAR_M_LN_A,
    name = "M_ln_A",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Isopycnal mixing between the low Atlantic and the North Atlantic",
);

define_output_variable!(
    VAR_M_LN_P,
    name = "M_ln_P",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Isopycnal mixing between the low Pacific/Indian and the North Pacific",
);

define_output_variable!(
    VAR_M_S,
    name = "M_s",
    unit = "m^3 / s",
    shape = Scalar,
    description = "Southern Ocean residual upwelling, positive from the deep box to the south box",
);

// ============================================================================
// Pycnocline
// ============================================================================

define_output_variable!(
    VAR_D_LOW_A,
    name = "D_low_A",
    unit = "m",
    shape = Scalar,
    description = "Pycnocline depth of the low Atlantic at the start of the step",
);

define_output_variable!(
    VAR_D_LOW_PI,
    name = "D_low_PI",
    unit = "m",
    shape = Scalar,
    description = "Pycnocline depth of the low Pacific/Indian at the start of the step",
);

// ============================================================================
// Tracers
// ============================================================================

define_output_variable!(
    VAR_TEMPERATURE,
    name = "T",
    unit = "degC",
    shape = PerBox,
    description = "Box temperature at the end of the step",
);

define_output_variable!(
    VAR_SALINITY,
    name = "S",
    unit = "psu",
    shape = PerBox,
    description = "Box salinity at the end of the step",
);

define_output_variable!(
    VAR_SIGMA_0,
    name = "sigma_0",
    unit = "kg / m^3",
    shape = PerBox,
    description = "Potential density anomaly the transports of the step were evaluated with",
);

/// Series returned by `unpack`, in order
pub static UNPACK_ORDER: [OutputVariable; 12] = [
    VAR_M_N_A,
    VAR_M_N_P,
    VAR_M_UPW_A,
    VAR_M_UPW_PI,
    VAR_M_EDDY_A,
    VAR_M_EDDY_PI,
    VAR_M_EX,
    VAR_D_LOW_A,
    VAR_D_LOW_PI,
    VAR_TEMPERATURE,
    VAR_SALINITY,
    VAR_SIGMA_0,
];

/// Recorded series that are not part of `unpack`
pub static SUPPLEMENTARY: [OutputVariable; 5] =
    [VAR_M_LS_A, VAR_M_LS_PI, VAR_M_LN_A, VAR_M_LN_P, VAR_M_S];

/// All recorded series
pub fn all() -> impl Iterator<Item = &'static OutputVariable> {
    UNPACK_ORDER.iter().chain(SUPPLEMENTARY.iter())
}

/// Find a series definition by name
pub fn lookup(name: &str) -> Option<&'static OutputVariable> {
    all().find(|var| var.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_unpack_order() {
        let names: Vec<_> = UNPACK_ORDER.iter().map(|v| v.name).collect();
        assert_eq!(
            names,
            [
                "M_n_A", "M_n_P", "M_upw_A", "M_upw_PI", "M_eddy_A", "M_eddy_PI", "M_ex",
                "D_low_A", "D_low_PI", "T", "S", "sigma_0"
            ]
        );
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = all().map(|v| v.name).collect();
        assert_eq!(names.len(), UNPACK_ORDER.len() + SUPPLEMENTARY.len());
    }

    #[test]
    fn test_per_box_variables() {
        let per_box: Vec<_> = all()
            .filter(|v| v.shape == VariableShape::PerBox)
            .map(|v| v.name)
            .collect();
        assert_eq!(per_box, ["T", "S", "sigma_0"]);
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("M_s"), Some(&VAR_M_S));
        assert_eq!(lookup("D_low_PI").unwrap().unit, "m");
        assert!(lookup("M_n").is_none());
    }
}
