use atomic::*;
use context::*;
use effector::*;
use ports::*;

/// Capacity of the magazine. Loads must be strictly below this.
pub const MAX_ROUNDS: i32 = 30;

static INPUTS: [InPort; 3] = [Magazine::INIT_BULLETS, Magazine::INIT_MAG_SEATING, Magazine::BULLET_LOADED];
static OUTPUTS: [OutPort; 1] = [Magazine::BULLET_READY];

/// Tracks the round count and whether the magazine is seated in the rifle.
///
/// Only one kind of input is acted on per transition, in priority order: a
/// load, then a seating change, then a round leaving for the chamber.
pub struct Magazine
{
	sigma: f64,
	phase: Phase,
	bullets_left: i32,
	mag_seated: bool,
	bullet_ready: bool,
}

impl Magazine
{
	/// Loads the magazine with the given number of rounds.
	pub const INIT_BULLETS: InPort = InPort::new("initBullets");

	/// 1 to seat the magazine, anything else unseats it.
	pub const INIT_MAG_SEATING: InPort = InPort::new("initMagSeating");

	/// 1 when the bolt has pulled a round into the chamber.
	pub const BULLET_LOADED: InPort = InPort::new("bulletLoaded");

	/// 1 if a round can be fed, 0 otherwise.
	pub const BULLET_READY: OutPort = OutPort::new("bulletReady");

	pub fn new() -> Magazine
	{
		Magazine{sigma: PASSIVE, phase: Phase::Passive, bullets_left: 0, mag_seated: false, bullet_ready: false}
	}

	pub fn bullets_left(&self) -> i32
	{
		self.bullets_left
	}

	pub fn mag_seated(&self) -> bool
	{
		self.mag_seated
	}

	pub fn bullet_ready(&self) -> bool
	{
		self.bullet_ready
	}
}

impl Atomic for Magazine
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

	fn external_transition(&mut self, inputs: &Inputs, _context: &mut Context, effector: &mut Effector)
	{
		if let Some(count) = inputs.latest(Magazine::INIT_BULLETS) {
			if count >= 0 && count < MAX_ROUNDS {
				self.bullets_left = count;
				log_info!(effector, "loaded {} rounds", count);
			} else {
				log_warning!(effector, "ignoring load of {} rounds (max is {})", count, MAX_ROUNDS - 1);
			}
		} else if let Some(seated) = inputs.latest(Magazine::INIT_MAG_SEATING) {
			self.mag_seated = seated == 1;
			log_debug!(effector, "seated = {}", self.mag_seated);
		} else if let Some(loaded) = inputs.latest(Magazine::BULLET_LOADED) {
			if loaded == 1 {
				self.bullets_left -= 1;
				log_debug!(effector, "{} rounds left", self.bullets_left);
			}
		}

		// An empty magazine still reports ready: it is the chamber that notices
		// nothing was fed. Readiness only drops once the count goes negative.
		if self.bullets_left >= 0 {
			if self.mag_seated {
				self.bullet_ready = true;
			}
		} else {
			self.bullet_ready = false;
		}

		self.phase = Phase::Active;
		self.sigma = 0.0;
	}

	fn output(&self, effector: &mut Effector)
	{
		effector.send(Magazine::BULLET_READY, self.bullet_ready as i32);
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
		effector.set_int_data("bulletsLeft", self.bullets_left as i64);
		effector.set_int_data("magSeated", self.mag_seated as i64);
		effector.set_int_data("bulletReady", self.bullet_ready as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}
