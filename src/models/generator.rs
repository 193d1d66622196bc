use atomic::*;
use context::*;
use effector::*;
use ports::*;
use std::fmt;

static OUTPUTS: [OutPort; 5] = [
	StimulusGenerator::TRIGGER_PRESSED,
	StimulusGenerator::FIRING_SELECTOR,
	StimulusGenerator::BOLT_BACK,
	StimulusGenerator::MAG_SEATING,
	StimulusGenerator::BULLET_LOADED,
];

/// The canned sequences the generator can play.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Scenario
{
	/// Toggle the trigger each step, advancing the selector every fifth step.
	TriggerCycling = 1,

	/// Toggle seating every sixth step, pulling the trigger while seated.
	MagazineSeating = 2,

	/// Toggle the bolt each step, pulling the trigger while it is back.
	BoltCycling = 3,
}

impl Scenario
{
	pub fn from_number(number: i32) -> Option<Scenario>
	{
		match number {
			1 => Some(Scenario::TriggerCycling),
			2 => Some(Scenario::MagazineSeating),
			3 => Some(Scenario::BoltCycling),
			_ => None,
		}
	}
}

impl fmt::Display for Scenario
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		match *self {
			Scenario::TriggerCycling => write!(formatter, "trigger cycling"),
			Scenario::MagazineSeating => write!(formatter, "magazine seating"),
			Scenario::BoltCycling => write!(formatter, "bolt cycling"),
		}
	}
}

/// Plays a `Scenario` into the rifle's inputs, one batch of messages every
/// `interval` seconds, until `max_messages` batches have been sent or its own
/// round count runs out.
pub struct StimulusGenerator
{
	sigma: f64,
	phase: Phase,
	scenario: Scenario,
	max_messages: i32,
	interval: f64,

	messages_sent: i32,
	firing_mode: i32,
	trigger_pressed: bool,
	bolt_back: bool,
	mag_seated: bool,
	rounds: i32,
}

impl StimulusGenerator
{
	pub const TRIGGER_PRESSED: OutPort = OutPort::new("triggerPressed");
	pub const FIRING_SELECTOR: OutPort = OutPort::new("firingSelector");
	pub const BOLT_BACK: OutPort = OutPort::new("boltBack");
	pub const MAG_SEATING: OutPort = OutPort::new("magSeating");
	pub const BULLET_LOADED: OutPort = OutPort::new("bulletLoaded");

	/// The generator's own count of rounds it may consume.
	pub const ROUNDS: i32 = 10;

	pub fn new(scenario: Scenario, max_messages: i32, interval: f64) -> StimulusGenerator
	{
		assert!(max_messages > 0, "max_messages should be positive");
		assert!(interval > 0.0, "interval should be positive");

		StimulusGenerator{
			sigma: interval,
			phase: Phase::Active,
			scenario,
			max_messages,
			interval,
			messages_sent: 0,
			firing_mode: 0,
			trigger_pressed: false,
			bolt_back: false,
			mag_seated: true,
			rounds: StimulusGenerator::ROUNDS,
		}
	}

	pub fn messages_sent(&self) -> i32
	{
		self.messages_sent
	}

	pub fn rounds(&self) -> i32
	{
		self.rounds
	}

	fn press_if(&mut self, ready: bool)
	{
		if ready && self.rounds > 0 {
			self.trigger_pressed = true;
			self.rounds -= 1;
		} else {
			self.trigger_pressed = false;
		}
	}
}

impl Atomic for StimulusGenerator
{
	fn input_ports(&self) -> &'static [InPort]
	{
		&[]
	}

	fn output_ports(&self) -> &'static [OutPort]
	{
		&OUTPUTS
	}

	fn internal_transition(&mut self, effector: &mut Effector)
	{
		self.messages_sent += 1;

		match self.scenario {
			Scenario::TriggerCycling => {
				if self.messages_sent % 5 == 0 {
					self.firing_mode = (self.firing_mode + 1) % 3;
				}
				self.trigger_pressed = !self.trigger_pressed;
			},
			Scenario::MagazineSeating => {
				if self.messages_sent % 6 == 0 {
					self.mag_seated = !self.mag_seated;
				}
				let seated = self.mag_seated;
				self.press_if(seated);
			},
			Scenario::BoltCycling => {
				self.bolt_back = !self.bolt_back;
				let back = self.bolt_back;
				self.press_if(back);
			},
		}

		if self.messages_sent >= self.max_messages || self.rounds <= 0 {
			log_info!(effector, "done after {} messages", self.messages_sent);
			self.phase = Phase::Passive;
			self.sigma = PASSIVE;
		} else {
			self.sigma = self.interval;
		}
	}

	fn external_transition(&mut self, _inputs: &Inputs, context: &mut Context, _effector: &mut Effector)
	{
		self.sigma = remaining(self.sigma, context.elapsed);
	}

	fn output(&self, effector: &mut Effector)
	{
		effector.send(StimulusGenerator::TRIGGER_PRESSED, self.trigger_pressed as i32);
		effector.send(StimulusGenerator::FIRING_SELECTOR, self.firing_mode);
		effector.send(StimulusGenerator::BOLT_BACK, self.bolt_back as i32);
		effector.send(StimulusGenerator::MAG_SEATING, self.mag_seated as i32);
		if self.trigger_pressed && self.rounds > 0 {
			effector.send(StimulusGenerator::BULLET_LOADED, 1);
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
		effector.set_int_data("messagesSent", self.messages_sent as i64);
		effector.set_int_data("firingMode", self.firing_mode as i64);
		effector.set_int_data("triggerPressed", self.trigger_pressed as i64);
		effector.set_int_data("boltBack", self.bolt_back as i64);
		effector.set_int_data("magSeated", self.mag_seated as i64);
		effector.set_int_data("rounds", self.rounds as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use models::testing::*;

	#[test]
	fn first_batch()
	{
		let mut generator = StimulusGenerator::new(Scenario::TriggerCycling, 30, 1.0);
		assert_eq!(generator.time_advance(), 1.0);

		let effector = fire(&mut generator);
		assert_eq!(effector.sent(StimulusGenerator::TRIGGER_PRESSED), Some(0));
		assert_eq!(effector.sent(StimulusGenerator::FIRING_SELECTOR), Some(0));
		assert_eq!(effector.sent(StimulusGenerator::MAG_SEATING), Some(1));
		assert_eq!(effector.sent(StimulusGenerator::BULLET_LOADED), None);
		assert_eq!(generator.messages_sent(), 1);
	}

	#[test]
	fn trigger_cycling()
	{
		let mut generator = StimulusGenerator::new(Scenario::TriggerCycling, 30, 0.5);
		let mut selectors = Vec::new();
		let mut presses = Vec::new();
		for _ in 0..6 {
			let effector = fire(&mut generator);
			selectors.push(effector.sent(StimulusGenerator::FIRING_SELECTOR).unwrap_or(-1));
			presses.push(effector.sent(StimulusGenerator::TRIGGER_PRESSED).unwrap_or(-1));
			assert_eq!(generator.time_advance(), 0.5);
		}

		assert_eq!(presses, vec![0, 1, 0, 1, 0, 1]);
		assert_eq!(selectors, vec![0, 0, 0, 0, 0, 1]);
	}

	#[test]
	fn magazine_seating_consumes_rounds()
	{
		let mut generator = StimulusGenerator::new(Scenario::MagazineSeating, 30, 1.0);
		for _ in 0..5 {
			let _ = fire(&mut generator);
		}
		assert_eq!(generator.rounds(), StimulusGenerator::ROUNDS - 5);

		// the sixth step unseats the magazine
		let effector = fire(&mut generator);
		assert_eq!(effector.sent(StimulusGenerator::BULLET_LOADED), Some(1));
		assert_eq!(generator.rounds(), StimulusGenerator::ROUNDS - 5);

		let effector = fire(&mut generator);
		assert_eq!(effector.sent(StimulusGenerator::MAG_SEATING), Some(0));
		assert_eq!(effector.sent(StimulusGenerator::TRIGGER_PRESSED), Some(0));
	}

	#[test]
	fn stops_when_out_of_rounds()
	{
		let mut generator = StimulusGenerator::new(Scenario::BoltCycling, 100, 1.0);
		let mut steps = 0;
		while generator.time_advance() != PASSIVE {
			let _ = fire(&mut generator);
			steps += 1;
		}

		// a round is used on every other step
		assert_eq!(steps, 2*StimulusGenerator::ROUNDS - 1);
		assert_eq!(generator.rounds(), 0);
		assert_eq!(generator.phase(), Phase::Passive);
	}

	#[test]
	fn stops_at_max_messages()
	{
		let mut generator = StimulusGenerator::new(Scenario::TriggerCycling, 3, 1.0);
		for _ in 0..3 {
			let _ = fire(&mut generator);
		}
		assert_eq!(generator.messages_sent(), 3);
		assert_eq!(generator.time_advance(), PASSIVE);
	}
}
