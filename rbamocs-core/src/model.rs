//! Explicit time stepping of the six-box model.
//!
//! Each step:
//!
//! 1. evaluates the potential density of every box,
//! 2. evaluates the transports ([`crate::fluxes`]),
//! 3. accumulates the tendencies of volume, heat (`V T`) and salt (`V S`) content of every box,
//! 4. advances the contents with a forward Euler step and recovers the new pycnocline depths,
//!    temperatures and salinities,
//! 5. optionally perturbs the upper boxes with random noise,
//! 6. records the step.
//!
//! Signed transports are advected upwind: the tracer concentration carried is the one of the box
//! the water leaves. Freshwater transports move volume only, so they concentrate salt (and heat)
//! in the box they leave. With surface forcing and freshwater switched off the volume-weighted heat
//! and salt contents are conserved to round-off.
//!
//! A run either completes every step or fails with the first error; there is no partial result.

use crate::config::{
    BoxDimensions, InitialConditions, ModelConfig, Parameters, Randomization, TimeStep,
};
use crate::eos::density_slice;
use crate::errors::{BoxModelResult, ConfigurationError, NumericalError};
use crate::fluxes::{FluxModel, Fluxes};
use crate::output::SixBoxOutput;
use crate::spatial::SixBoxRegion;
use crate::state::{BoxState, SixBoxSlice};
use crate::FloatValue;
use log::{debug, error, info};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

/// Thinnest admissible low-latitude box (m)
pub const MIN_PYCNOCLINE_DEPTH: FloatValue = 1.0;

/// Run the six-box model with the given configuration groups.
///
/// Every group is validated before the first step. The number of steps is
/// [`TimeStep::n_steps`].
///
/// # Example
///
/// ```rust
/// use rbamocs_core::config::{
///     BoxDimensions, InitialConditions, Parameters, Randomization, TimeStep,
/// };
/// use rbamocs_core::run;
///
/// let output = run(
///     &BoxDimensions::default(),
///     &InitialConditions::default(),
///     &Parameters::default(),
///     &TimeStep::new(10.0, 0.25).unwrap(),
///     &Randomization::default(),
/// )
/// .unwrap();
///
/// assert_eq!(output.n_steps(), 40);
/// assert_eq!(output.temperature().shape(), &[6, 40]);
/// ```
pub fn run(
    dimensions: &BoxDimensions,
    initial_conditions: &InitialConditions,
    parameters: &Parameters,
    time_step: &TimeStep,
    randomization: &Randomization,
) -> BoxModelResult<SixBoxOutput> {
    let config = ModelConfig {
        dimensions: dimensions.clone(),
        initial_conditions: initial_conditions.clone(),
        parameters: parameters.clone(),
        time_step: time_step.clone(),
        randomization: randomization.clone(),
    };
    config.run()
}

impl ModelConfig {
    /// Validate the configuration and run the model with it
    pub fn run(&self) -> BoxModelResult<SixBoxOutput> {
        SixBoxModel::new(self)?.run()
    }
}

/// Tendencies of the volume, heat and salt content of every box (per second)
struct Budget<'a> {
    temperature: &'a SixBoxSlice,
    salinity: &'a SixBoxSlice,
    volume: SixBoxSlice,
    heat: SixBoxSlice,
    salt: SixBoxSlice,
}

impl<'a> Budget<'a> {
    fn new(state: &'a BoxState) -> Self {
        Self {
            temperature: &state.temperature,
            salinity: &state.salinity,
            volume: SixBoxSlice::zeros(),
            heat: SixBoxSlice::zeros(),
            salt: SixBoxSlice::zeros(),
        }
    }

    /// Move `transport` from `from` to `to`, or the reverse when negative, carrying the tracers of
    /// the upstream box
    fn advect(&mut self, from: SixBoxRegion, to: SixBoxRegion, transport: FloatValue) {
        let (source, sink, q) = if transport >= 0.0 {
            (from, to, transport)
        } else {
            (to, from, -transport)
        };
        self.volume[source] -= q;
        self.volume[sink] += q;

        let heat = q * self.temperature[source];
        self.heat[source] -= heat;
        self.heat[sink] += heat;

        let salt = q * self.salinity[source];
        self.salt[source] -= salt;
        self.salt[sink] += salt;
    }

    /// Exchange equal volumes between `a` and `b`
    fn mix(&mut self, a: SixBoxRegion, b: SixBoxRegion, exchange: FloatValue) {
        let heat = exchange * (self.temperature[b] - self.temperature[a]);
        self.heat[a] += heat;
        self.heat[b] -= heat;

        let salt = exchange * (self.salinity[b] - self.salinity[a]);
        self.salt[a] += salt;
        self.salt[b] -= salt;
    }

    /// Move fresh water, which carries neither heat nor salt
    fn freshwater(&mut self, from: SixBoxRegion, to: SixBoxRegion, transport: FloatValue) {
        self.volume[from] -= transport;
        self.volume[to] += transport;
    }

    /// Relax the surface layer of the upper boxes towards their target temperatures
    fn restore(&mut self, dims: &BoxDimensions, params: &Parameters) {
        if params.restoring_rate == 0.0 {
            return;
        }
        let areas = dims.areas();
        for region in SixBoxRegion::UPPER {
            if let Some(target) = params.target_temperature(region) {
                self.heat[region] += areas[region]
                    * dims.depth_high
                    * params.restoring_rate
                    * (target - self.temperature[region]);
            }
        }
    }
}

/// Random perturbations of the upper boxes
struct Noise {
    active: bool,
    rng: ChaCha8Rng,
    temperature: Option<Normal<FloatValue>>,
    salinity: Option<Normal<FloatValue>>,
}

impl Noise {
    fn new(randomization: &Randomization) -> Result<Self, ConfigurationError> {
        let distribution = |field: &str, amplitude: FloatValue| {
            if amplitude > 0.0 {
                Normal::new(0.0, amplitude)
                    .map(Some)
                    .map_err(|e| ConfigurationError::new(field, e.to_string()))
            } else {
                Ok(None)
            }
        };
        Ok(Self {
            active: randomization.is_active(),
            rng: randomization.rng(),
            temperature: distribution("t_noise", randomization.t_noise)?,
            salinity: distribution("s_noise", randomization.s_noise)?,
        })
    }

    fn apply(&mut self, state: &mut BoxState) {
        if !self.active {
            return;
        }
        for region in SixBoxRegion::UPPER {
            if let Some(dist) = &self.temperature {
                state.temperature[region] += self.rng.sample(dist);
            }
            if let Some(dist) = &self.salinity {
                state.salinity[region] += self.rng.sample(dist);
            }
        }
    }
}

/// A single run of the six-box model.
///
/// Created from a validated [`ModelConfig`] and consumed by [`SixBoxModel::run`].
pub struct SixBoxModel<'a> {
    config: &'a ModelConfig,
    state: BoxState,
    output: SixBoxOutput,
    noise: Noise,
    step_index: usize,
}

impl<'a> SixBoxModel<'a> {
    pub fn new(config: &'a ModelConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            config,
            state: BoxState::from_initial_conditions(&config.initial_conditions),
            output: SixBoxOutput::new(config.time_step.n_steps()),
            noise: Noise::new(&config.randomization)?,
            step_index: 0,
        })
    }

    /// Step until the end of the run, returning the recorded output
    pub fn run(mut self) -> BoxModelResult<SixBoxOutput> {
        let n_steps = self.output.n_steps();
        info!(
            "Running six-box model: {} steps of {} years",
            n_steps, self.config.time_step.dt_years
        );

        let mut previous: Option<Fluxes> = None;
        while self.step_index < n_steps {
            let fluxes = self.step().map_err(|e| {
                let e = e.at_step(self.step_index);
                error!("Six-box model failed: {}", e);
                e
            })?;
            if let Some(previous) = previous {
                log_overturning_reversal(self.step_index, &previous, &fluxes);
            }
            previous = Some(fluxes);
            self.step_index += 1;
        }

        info!(
            "Six-box model finished: M_n_A={:.3e} m^3/s, M_n_P={:.3e} m^3/s",
            previous.map_or(FloatValue::NAN, |f| f.m_n_a),
            previous.map_or(FloatValue::NAN, |f| f.m_n_p),
        );
        Ok(self.output)
    }

    /// Advance the state by one step and record it at the current step index
    fn step(&mut self) -> Result<Fluxes, NumericalError> {
        let dims = &self.config.dimensions;
        let params = &self.config.parameters;
        let dt = self.config.time_step.dt_seconds();

        let sigma = density_slice(&self.state.temperature, &self.state.salinity)?;
        let fluxes = FluxModel::new(dims, params).compute(&self.state, &sigma)?;
        let budget = tendencies(&self.state, &fluxes, dims, params);

        let volumes = self.state.volumes(dims);
        let d_low_a = updated_depth(
            "D_low_A",
            volumes[SixBoxRegion::LowA] + dt * budget.volume[SixBoxRegion::LowA],
            dims.area_low_a,
        )?;
        let d_low_pi = updated_depth(
            "D_low_PI",
            volumes[SixBoxRegion::LowPI] + dt * budget.volume[SixBoxRegion::LowPI],
            dims.area_low_pi,
        )?;

        let new_volumes = dims.volumes(d_low_a, d_low_pi);
        if new_volumes[SixBoxRegion::Deep] <= 0.0 {
            return Err(NumericalError::new(
                "deep volume",
                new_volumes[SixBoxRegion::Deep],
                "the low-latitude boxes fill the whole water column",
            ));
        }

        let mut next = BoxState {
            temperature: SixBoxSlice::new(),
            salinity: SixBoxSlice::new(),
            d_low_a,
            d_low_pi,
        };
        for region in SixBoxRegion::ALL {
            let volume = volumes[region];
            let new_volume = new_volumes[region];
            next.temperature[region] = (volume * self.state.temperature[region]
                + dt * budget.heat[region])
                / new_volume;
            next.salinity[region] =
                (volume * self.state.salinity[region] + dt * budget.salt[region]) / new_volume;
        }

        self.noise.apply(&mut next);

        for (quantity, slice) in [("temperature", &next.temperature), ("salinity", &next.salinity)]
        {
            if let Some((region, value)) = slice.iter().find(|(_, v)| !v.is_finite()) {
                return Err(NumericalError::new(
                    quantity,
                    value,
                    format!("{} box is not finite after the update", region),
                ));
            }
        }

        self.output.record(
            self.step_index,
            &next.temperature,
            &next.salinity,
            &sigma,
            &fluxes,
        );
        self.state = next;
        Ok(fluxes)
    }
}

/// Tendencies of every box for the given transports
fn tendencies<'a>(
    state: &'a BoxState,
    fluxes: &Fluxes,
    dims: &BoxDimensions,
    params: &Parameters,
) -> Budget<'a> {
    use SixBoxRegion::*;

    let mut budget = Budget::new(state);

    let basins = [
        (
            LowA,
            NorthA,
            params.m_ek_a,
            fluxes.m_eddy_a,
            params.fws_a,
            fluxes.m_upw_a,
            fluxes.m_n_a,
            params.fwn_a,
            fluxes.m_ls_a,
            fluxes.m_ln_a,
        ),
        (
            LowPI,
            NorthP,
            params.m_ek_pi,
            fluxes.m_eddy_pi,
            params.fws_pi,
            fluxes.m_upw_pi,
            fluxes.m_n_p,
            params.fwn_p,
            fluxes.m_ls_pi,
            fluxes.m_ln_p,
        ),
    ];
    for (low, north, ekman, eddy, fws, upwelling, overturning, fwn, mix_south, mix_north) in basins
    {
        budget.advect(South, low, ekman);
        budget.advect(low, South, eddy);
        budget.freshwater(low, South, fws);
        budget.advect(Deep, low, upwelling);
        budget.advect(low, north, overturning);
        budget.freshwater(low, north, fwn);
        // Northern sinking closes the loop through the deep box
        budget.advect(north, Deep, overturning + fwn);
        budget.mix(low, South, mix_south);
        budget.mix(low, north, mix_north);
    }

    budget.advect(LowPI, LowA, fluxes.m_ex);
    budget.advect(Deep, South, fluxes.m_s);

    budget.restore(dims, params);
    budget
}

fn updated_depth(
    quantity: &str,
    volume: FloatValue,
    area: FloatValue,
) -> Result<FloatValue, NumericalError> {
    let depth = volume / area;
    if !depth.is_finite() || depth < MIN_PYCNOCLINE_DEPTH {
        return Err(NumericalError::new(
            quantity,
            depth,
            format!(
                "pycnocline depth fell below {} m; reduce dt_years or the forcing",
                MIN_PYCNOCLINE_DEPTH
            ),
        ));
    }
    Ok(depth)
}

fn log_overturning_reversal(step: usize, previous: &Fluxes, current: &Fluxes) {
    for (name, before, after) in [
        ("M_n_A", previous.m_n_a, current.m_n_a),
        ("M_n_P", previous.m_n_p, current.m_n_p),
    ] {
        if before * after < 0.0 {
            debug!(
                "{} changed sign at step {}: {:.3e} -> {:.3e} m^3/s",
                name, step, before, after
            );
        }
    }
}
