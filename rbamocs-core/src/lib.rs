//! Six-box model of the ocean's meridional overturning circulation.
//!
//! The ocean is divided into a North Atlantic, North Pacific, Southern Ocean, low-latitude
//! Atlantic, low-latitude Pacific/Indian and deep box. The model steps temperature, salinity and
//! the two low-latitude pycnocline depths forward in time, driven by density-dependent transports
//! between the boxes, and records every transport term.
//!
//! ```rust
//! use rbamocs_core::config::{ModelConfig, TimeStep};
//! use rbamocs_core::LOW_A_IDX;
//!
//! let config = ModelConfig {
//!     time_step: TimeStep::new(20.0, 0.25).unwrap(),
//!     ..Default::default()
//! };
//! let output = config.run().unwrap();
//!
//! let (m_n_a, .., temperature, _salinity, _sigma_0) = output.unpack();
//! assert_eq!(m_n_a.len(), 80);
//! assert!(temperature[[LOW_A_IDX, 79]].is_finite());
//! ```

pub mod config;
pub mod eos;
pub mod errors;
pub mod fluxes;
pub mod model;
pub mod output;
#[cfg(feature = "python")]
pub mod python;
pub mod spatial;
pub mod standard_variables;
pub mod state;

pub type FloatValue = f64;

pub use config::{
    BoxDimensions, ConfigGroup, InitialConditions, ModelConfig, Parameters, Randomization,
    TimeStep,
};
pub use errors::{BoxModelError, BoxModelResult, ConfigurationError, NumericalError};
pub use model::run;
pub use output::SixBoxOutput;
pub use spatial::{
    SixBoxRegion, DEEP_IDX, LOW_A_IDX, LOW_PI_IDX, NORTH_A_IDX, NORTH_P_IDX, SOUTH_IDX,
};
