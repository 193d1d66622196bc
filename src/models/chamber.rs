use atomic::*;
use context::*;
use effector::*;
use ports::*;

/// Seconds between a round being chambered and the discharge.
pub const IGNITION_DELAY: f64 = 5.0;

static INPUTS: [InPort; 2] = [Chamber::IS_DUD, Chamber::BULLET_LOADED];
static OUTPUTS: [OutPort; 3] = [Chamber::BOLT_BACK, Chamber::BULLET_FIRED, Chamber::CASING];

/// What the chamber knows about the round it holds.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DudFlag
{
	Good = 0,
	Dud = 1,
	Unset = 2,
}

impl DudFlag
{
	pub fn from_message(value: i32) -> DudFlag
	{
		match value {
			0 => DudFlag::Good,
			1 => DudFlag::Dud,
			_ => DudFlag::Unset,
		}
	}
}

/// Fires the chambered round after `IGNITION_DELAY` unless it is a dud. A
/// discharge ejects the casing and drives the bolt back.
pub struct Chamber
{
	sigma: f64,
	phase: Phase,
	dud_flag: DudFlag,
	round_chambered: bool,
}

impl Chamber
{
	/// 0 for a good round, 1 for a dud.
	pub const IS_DUD: InPort = InPort::new("isDud");

	/// 1 when the bolt chambers a round. Restarts the ignition delay.
	pub const BULLET_LOADED: InPort = InPort::new("bulletLoaded");

	pub const BOLT_BACK: OutPort = OutPort::new("boltBack");
	pub const BULLET_FIRED: OutPort = OutPort::new("bulletFired");
	pub const CASING: OutPort = OutPort::new("casing");

	pub fn new() -> Chamber
	{
		Chamber{sigma: PASSIVE, phase: Phase::Passive, dud_flag: DudFlag::Unset, round_chambered: false}
	}

	pub fn dud_flag(&self) -> DudFlag
	{
		self.dud_flag
	}

	pub fn round_chambered(&self) -> bool
	{
		self.round_chambered
	}
}

impl Atomic for Chamber
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
		self.dud_flag = DudFlag::Unset;
		self.round_chambered = false;
		self.phase = Phase::Passive;
		self.sigma = PASSIVE;
	}

	fn external_transition(&mut self, inputs: &Inputs, context: &mut Context, effector: &mut Effector)
	{
		if let Some(value) = inputs.latest(Chamber::IS_DUD) {
			self.dud_flag = DudFlag::from_message(value);
		}

		if let Some(value) = inputs.latest(Chamber::BULLET_LOADED) {
			self.round_chambered = value == 1;
			self.phase = Phase::Active;
			self.sigma = IGNITION_DELAY;
			log_excessive!(effector, "round chambered = {}", self.round_chambered);
		} else {
			self.sigma = remaining(self.sigma, context.elapsed);
		}
	}

	fn output(&self, effector: &mut Effector)
	{
		if self.dud_flag == DudFlag::Good && self.round_chambered {
			log_info!(effector, "fired");
			effector.send(Chamber::BOLT_BACK, 1);
			effector.send(Chamber::BULLET_FIRED, 1);
			effector.send(Chamber::CASING, 1);
		} else if self.round_chambered {
			log_info!(effector, "misfire");
		}
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
		effector.set_int_data("dudFlag", self.dud_flag as i64);
		effector.set_int_data("roundChambered", self.round_chambered as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}
