use atomic::*;
use context::*;
use effector::*;
use ports::*;

/// Odds that a round fed from the magazine is good.
pub const GOOD_ROUND_PROBABILITY: f64 = 0.95;

static INPUTS: [InPort; 1] = [Bullet::BULLET_READY];
static OUTPUTS: [OutPort; 2] = [Bullet::IS_DUD, Bullet::BULLET_READY_OUT];

/// Decides whether the round being fed is a dud. Every feed gets a fresh
/// decision from the shared random source.
pub struct Bullet
{
	sigma: f64,
	phase: Phase,
	bullet_ready: bool,
	is_dud: bool,
}

impl Bullet
{
	/// 1 if the magazine has a round ready to feed.
	pub const BULLET_READY: InPort = InPort::new("bulletReady");

	/// 0 for a good round, 1 for a dud.
	pub const IS_DUD: OutPort = OutPort::new("isDud");

	/// Forwards the readiness that triggered the dud decision.
	pub const BULLET_READY_OUT: OutPort = OutPort::new("bulletReady");

	pub fn new() -> Bullet
	{
		Bullet{sigma: PASSIVE, phase: Phase::Passive, bullet_ready: false, is_dud: false}
	}

	pub fn is_dud(&self) -> bool
	{
		self.is_dud
	}

	pub fn bullet_ready(&self) -> bool
	{
		self.bullet_ready
	}
}

impl Atomic for Bullet
{
	fn input_ports(&self) -> &'static [InPort]
	{
		&INPUTS
	}

	fn output_ports(&self) -> &'static [OutPort]
	{
		&OUTPUTS
	}

	fn internal_transition(&mut self, _effector: &mut Effector)
	{
		self.phase = Phase::Passive;
		self.sigma = PASSIVE;
	}

	fn external_transition(&mut self, inputs: &Inputs, context: &mut Context, effector: &mut Effector)
	{
		if let Some(value) = inputs.latest(Bullet::BULLET_READY) {
			self.bullet_ready = value == 1;
		}

		self.is_dud = context.draw() >= GOOD_ROUND_PROBABILITY;
		if self.is_dud {
			log_debug!(effector, "round is a dud");
		}

		self.phase = Phase::Active;
		self.sigma = 0.0;
	}

	fn output(&self, effector: &mut Effector)
	{
		effector.send(Bullet::IS_DUD, self.is_dud as i32);
		effector.send(Bullet::BULLET_READY_OUT, self.bullet_ready as i32);
	}

	fn time_advance(&self) -> f64
	{
		self.sigma
	}

	fn phase(&self) -> Phase
	{
		self.phase
	}

	fn record(&self, effector: &mut Effector)
	{
		effector.set_int_data("bulletReady", self.bullet_ready as i64);
		effector.set_int_data("isDud", self.is_dud as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}
