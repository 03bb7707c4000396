//! Conservation tests for the six-box integrator.
//!
//! With Ekman transport, freshwater fluxes and surface restoring switched off, every transport
//! only moves water between boxes, so:
//! - total volume is constant
//! - the volume-weighted heat and salt contents are constant

use approx::assert_relative_eq;
use rbamocs_core::config::{BoxDimensions, InitialConditions, ModelConfig, Parameters, TimeStep};
use rbamocs_core::output::SixBoxOutput;
use rbamocs_core::spatial::{SixBoxRegion, N_BOXES};
use rbamocs_core::state::{BoxState, SixBoxSlice};
use rbamocs_core::FloatValue;

fn unforced_config(initial_conditions: InitialConditions) -> ModelConfig {
    ModelConfig {
        initial_conditions,
        parameters: Parameters::unforced(),
        time_step: TimeStep::new(50.0, 0.25).unwrap(),
        ..Default::default()
    }
}

fn column(values: ndarray::ArrayView2<'_, FloatValue>, step: usize) -> SixBoxSlice {
    let mut slice = SixBoxSlice::new();
    for region in SixBoxRegion::ALL {
        slice[region] = values[[region.index(), step]];
    }
    slice
}

/// Volume-weighted contents after every step.
///
/// `D_low` is recorded at the start of each step, so the volumes belonging to the state at the
/// end of step `i` are those implied by the depths recorded at step `i + 1`.
fn contents_per_step(
    output: &SixBoxOutput,
    dims: &BoxDimensions,
) -> Vec<(FloatValue, FloatValue, FloatValue)> {
    (0..output.n_steps() - 1)
        .map(|i| {
            let volumes = dims.volumes(output.d_low_a()[i + 1], output.d_low_pi()[i + 1]);
            let total: FloatValue = volumes.as_array().iter().sum();
            let heat = column(output.temperature(), i).weighted_sum(&volumes);
            let salt = column(output.salinity(), i).weighted_sum(&volumes);
            (total, heat, salt)
        })
        .collect()
}

mod tracer_conservation {
    use super::*;

    #[test]
    fn test_heat_and_salt_conserved_without_forcing() {
        let config = unforced_config(InitialConditions::default());
        let dims = &config.dimensions;
        let output = config.run().unwrap();

        let initial = BoxState::from_initial_conditions(&config.initial_conditions);
        let volumes = initial.volumes(dims);
        let heat_0 = initial.temperature.weighted_sum(&volumes);
        let salt_0 = initial.salinity.weighted_sum(&volumes);
        let volume_0 = dims.total_volume();

        let contents = contents_per_step(&output, dims);
        for (step, (volume, heat, salt)) in contents.into_iter().enumerate() {
            assert_relative_eq!(volume, volume_0, max_relative = 1e-12);
            assert!(
                ((heat - heat_0) / heat_0).abs() < 1e-10,
                "heat drifted at step {}: {} vs {}",
                step,
                heat,
                heat_0
            );
            assert!(
                ((salt - salt_0) / salt_0).abs() < 1e-10,
                "salt drifted at step {}: {} vs {}",
                step,
                salt,
                salt_0
            );
        }
    }

    #[test]
    fn test_pycnocline_moves_without_forcing() {
        // Conservation must not come from a frozen state
        let config = unforced_config(InitialConditions::default());
        let output = config.run().unwrap();

        let d_low_a = output.d_low_a();
        assert_ne!(d_low_a[0], d_low_a[d_low_a.len() - 1]);
    }

    #[test]
    fn test_uniform_ocean_stays_uniform() {
        let config = unforced_config(InitialConditions::uniform(10.0, 35.0));
        let output = config.run().unwrap();

        for value in output.temperature().iter() {
            assert_relative_eq!(*value, 10.0, max_relative = 1e-10);
        }
        for value in output.salinity().iter() {
            assert_relative_eq!(*value, 35.0, max_relative = 1e-10);
        }
        // No density gradient, no overturning
        for value in output.m_n_a().iter().chain(output.m_n_p().iter()) {
            assert!(value.abs() < 1e-3, "M_n = {}", value);
        }
    }
}

mod volume_budget {
    use super::*;

    #[test]
    fn test_deep_box_fills_the_rest_of_the_ocean() {
        let config = ModelConfig {
            time_step: TimeStep::new(20.0, 0.25).unwrap(),
            ..Default::default()
        };
        let dims = &config.dimensions;
        let output = config.run().unwrap();

        for (d_a, d_pi) in output.d_low_a().iter().zip(output.d_low_pi().iter()) {
            let volumes = dims.volumes(*d_a, *d_pi);
            assert!(volumes[SixBoxRegion::Deep] > 0.0);
            assert_relative_eq!(
                volumes.as_array().iter().sum::<FloatValue>(),
                dims.total_volume(),
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_output_has_one_column_per_step() {
        let config = unforced_config(InitialConditions::default());
        let output = config.run().unwrap();
        assert_eq!(output.temperature().shape(), &[N_BOXES, 200]);
        assert_eq!(output.d_low_pi().len(), 200);
    }
}
