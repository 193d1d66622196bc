//! The contract between a model and the `Simulation` that drives it.
use context::*;
use effector::*;
use ports::*;
use std::f64::INFINITY;
use std::fmt;

/// Observational only: the `Simulation` schedules purely from `time_advance`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase
{
	Passive,
	Active,
}

impl fmt::Display for Phase
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		match *self {
			Phase::Passive => write!(formatter, "PASSIVE"),
			Phase::Active => write!(formatter, "ACTIVE"),
		}
	}
}

/// Sigma for a model with nothing scheduled.
pub const PASSIVE: f64 = INFINITY;

/// An indivisible finite-state model. Each model exclusively owns its state and
/// only changes it from within the transition functions. The `Simulation` calls
/// these in a fixed pattern for every instant:
///
/// 1. `output` on each model whose sigma has elapsed (an imminent model),
/// 2. the messages are routed along the couplings,
/// 3. `internal_transition` on imminent models that got no input,
///    `external_transition` on models that got input but were not imminent, and
///    `confluent_transition` on imminent models that also got input.
///
/// After each transition `time_advance` is asked for the new sigma and `record`
/// publishes the model's state.
pub trait Atomic
{
	fn input_ports(&self) -> &'static [InPort];

	fn output_ports(&self) -> &'static [OutPort];

	/// Sigma elapsed without input.
	fn internal_transition(&mut self, effector: &mut Effector);

	/// One or more messages arrived before sigma elapsed.
	fn external_transition(&mut self, inputs: &Inputs, context: &mut Context, effector: &mut Effector);

	/// Input arrived at the same instant sigma elapsed. By default the internal
	/// transition runs first.
	fn confluent_transition(&mut self, inputs: &Inputs, context: &mut Context, effector: &mut Effector)
	{
		self.internal_transition(effector);
		context.elapsed = 0.0;
		self.external_transition(inputs, context, effector);
	}

	/// Called just before the internal (or confluent) transition. Note that this
	/// cannot change state.
	fn output(&self, effector: &mut Effector);

	/// Seconds until the next internal transition, `PASSIVE` if none.
	fn time_advance(&self) -> f64;

	fn phase(&self) -> Phase;

	/// Writes the model's state into the effector's store.
	fn record(&self, effector: &mut Effector);
}

/// Shared by the models to publish the bits of state every model has.
pub fn record_schedule(effector: &mut Effector, sigma: f64, phase: Phase)
{
	effector.set_float_data("sigma", sigma);
	effector.set_string_data("phase", &phase.to_string());
}

/// Sigma for a model that keeps its pending schedule while handling input.
pub fn remaining(sigma: f64, elapsed: f64) -> f64
{
	(sigma - elapsed).max(0.0)
}
