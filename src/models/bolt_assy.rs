use atomic::*;
use context::*;
use effector::*;
use ports::*;
use std::fmt;

/// Odds that the bolt picks up a ready round without jamming.
pub const LOAD_PROBABILITY: f64 = 0.90;

static INPUTS: [InPort; 3] = [BoltAssy::BULLET_READY, BoltAssy::RELEASE_BOLT, BoltAssy::BOLT_BACK];
static OUTPUTS: [OutPort; 2] = [BoltAssy::BULLET_LOADED, BoltAssy::BOLT_POSITION];

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoltPosition
{
	Forward = 0,
	Back = 1,

	/// The bolt failed to feed a round. Nothing clears a jam.
	Jam = 2,
}

impl fmt::Display for BoltPosition
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		match *self {
			BoltPosition::Forward => write!(formatter, "FORWARD"),
			BoltPosition::Back => write!(formatter, "BACK"),
			BoltPosition::Jam => write!(formatter, "JAM"),
		}
	}
}

/// The bolt carrier: when released from the back position it strips a round
/// from the magazine into the chamber, occasionally jamming. The rifle fires
/// from an open bolt so it starts out back, ready to be released.
pub struct BoltAssy
{
	sigma: f64,
	phase: Phase,
	ready_bullet: bool,
	bolt_free: bool,
	position: BoltPosition,
}

impl BoltAssy
{
	/// 1 if the magazine has a round to feed.
	pub const BULLET_READY: InPort = InPort::new("bulletReady");

	/// 1 when the trigger group lets the bolt go.
	pub const RELEASE_BOLT: InPort = InPort::new("releaseBolt");

	/// 1 when the bolt is driven back, either by hand or by a discharge.
	pub const BOLT_BACK: InPort = InPort::new("boltBack");

	/// 1 if a round was chambered, 0 if the bolt jammed.
	pub const BULLET_LOADED: OutPort = OutPort::new("bulletLoaded");

	/// A `BoltPosition` value.
	pub const BOLT_POSITION: OutPort = OutPort::new("boltPosition");

	pub fn new() -> BoltAssy
	{
		BoltAssy{sigma: PASSIVE, phase: Phase::Passive, ready_bullet: false, bolt_free: false, position: BoltPosition::Back}
	}

	pub fn position(&self) -> BoltPosition
	{
		self.position
	}

	pub fn bolt_free(&self) -> bool
	{
		self.bolt_free
	}

	pub fn ready_bullet(&self) -> bool
	{
		self.ready_bullet
	}

	fn load(&mut self, context: &mut Context, effector: &mut Effector)
	{
		let sample = context.draw();
		if self.ready_bullet {
			if sample < LOAD_PROBABILITY {
				self.position = BoltPosition::Forward;
				log_debug!(effector, "chambered a round");
			} else {
				self.position = BoltPosition::Jam;
				log_warning!(effector, "jammed");
			}
		} else {
			self.position = BoltPosition::Forward;
			log_debug!(effector, "closed on an empty magazine");
		}

		self.ready_bullet = false;
		self.bolt_free = false;
		self.phase = Phase::Active;
		self.sigma = 0.0;
	}
}

impl Atomic for BoltAssy
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
		if let Some(value) = inputs.latest(BoltAssy::BULLET_READY) {
			self.ready_bullet = value == 1;
		}

		if let Some(value) = inputs.latest(BoltAssy::RELEASE_BOLT) {
			if value == 1 && self.position == BoltPosition::Back {
				self.bolt_free = true;
			}
		} else if inputs.latest(BoltAssy::BOLT_BACK) == Some(1) {
			match self.position {
				BoltPosition::Forward => self.position = BoltPosition::Back,
				BoltPosition::Back => self.position = BoltPosition::Forward,
				BoltPosition::Jam => log_debug!(effector, "jammed bolt cannot cycle"),
			}
		}

		if self.bolt_free && self.position == BoltPosition::Back {
			self.load(context, effector);
		} else {
			self.sigma = remaining(self.sigma, context.elapsed);
		}
	}

	fn output(&self, effector: &mut Effector)
	{
		match self.position {
			BoltPosition::Forward => effector.send(BoltAssy::BULLET_LOADED, 1),
			BoltPosition::Jam => effector.send(BoltAssy::BULLET_LOADED, 0),
			BoltPosition::Back => (),
		}
		effector.send(BoltAssy::BOLT_POSITION, self.position as i32);
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
		effector.set_int_data("readyBullet", self.ready_bullet as i64);
		effector.set_int_data("boltFree", self.bolt_free as i64);
		effector.set_int_data("boltPosition", self.position as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use models::testing::*;
	use random::*;

	fn pulled_back() -> BoltAssy
	{
		let bolt = BoltAssy::new();
		assert_eq!(bolt.position(), BoltPosition::Back);
		assert_eq!(bolt.time_advance(), PASSIVE);
		bolt
	}

	fn closed() -> BoltAssy
	{
		let mut bolt = BoltAssy::new();
		let _ = deliver(&mut bolt, &[(BoltAssy::BOLT_BACK, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Forward);
		assert_eq!(bolt.time_advance(), PASSIVE);
		bolt
	}

	#[test]
	fn starts_open()
	{
		let mut bolt = BoltAssy::new();
		assert_eq!(bolt.phase(), Phase::Passive);

		// the first release loads without any cocking
		let mut rng = ScriptedDraws::new(vec![0.0]);
		let _ = external(&mut bolt, 0.0, &[(BoltAssy::BULLET_READY, 1), (BoltAssy::RELEASE_BOLT, 1)], &mut rng);
		assert_eq!(bolt.position(), BoltPosition::Forward);
		let effector = fire(&mut bolt);
		assert_eq!(effector.sent(BoltAssy::BULLET_LOADED), Some(1));
	}

	#[test]
	fn loads_a_round()
	{
		let mut bolt = pulled_back();
		let mut rng = ScriptedDraws::new(vec![0.5]);
		let _ = external(&mut bolt, 0.0, &[(BoltAssy::BULLET_READY, 1), (BoltAssy::RELEASE_BOLT, 1)], &mut rng);
		assert_eq!(rng.count(), 1);
		assert_eq!(bolt.position(), BoltPosition::Forward);
		assert!(!bolt.bolt_free());
		assert!(!bolt.ready_bullet());
		assert_eq!(bolt.time_advance(), 0.0);

		let effector = fire(&mut bolt);
		assert_eq!(effector.sent(BoltAssy::BULLET_LOADED), Some(1));
		assert_eq!(effector.sent(BoltAssy::BOLT_POSITION), Some(0));
		assert_eq!(bolt.phase(), Phase::Passive);
	}

	#[test]
	fn jams()
	{
		let mut bolt = pulled_back();
		let mut rng = ScriptedDraws::new(vec![0.9]);
		let _ = external(&mut bolt, 0.0, &[(BoltAssy::BULLET_READY, 1), (BoltAssy::RELEASE_BOLT, 1)], &mut rng);
		assert_eq!(bolt.position(), BoltPosition::Jam);

		let effector = fire(&mut bolt);
		assert_eq!(effector.sent(BoltAssy::BULLET_LOADED), Some(0));
		assert_eq!(effector.sent(BoltAssy::BOLT_POSITION), Some(2));

		// jams are terminal
		let _ = deliver(&mut bolt, &[(BoltAssy::BOLT_BACK, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Jam);
		let _ = deliver(&mut bolt, &[(BoltAssy::RELEASE_BOLT, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Jam);
	}

	#[test]
	fn empty_magazine()
	{
		// the draw is still made even though nothing can jam
		let mut bolt = pulled_back();
		let mut rng = ScriptedDraws::new(vec![0.99]);
		let _ = external(&mut bolt, 0.0, &[(BoltAssy::RELEASE_BOLT, 1)], &mut rng);
		assert_eq!(rng.count(), 1);
		assert_eq!(bolt.position(), BoltPosition::Forward);
	}

	#[test]
	fn release_shadows_bolt_back()
	{
		let mut bolt = closed();
		let _ = deliver(&mut bolt, &[(BoltAssy::RELEASE_BOLT, 1), (BoltAssy::BOLT_BACK, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Forward);
		assert!(!bolt.bolt_free());

		let _ = deliver(&mut bolt, &[(BoltAssy::RELEASE_BOLT, 0), (BoltAssy::BOLT_BACK, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Forward);
	}

	#[test]
	fn bolt_back_toggles()
	{
		let mut bolt = pulled_back();
		let _ = deliver(&mut bolt, &[(BoltAssy::BOLT_BACK, 1)]);
		assert_eq!(bolt.position(), BoltPosition::Forward);

		let _ = deliver(&mut bolt, &[(BoltAssy::BOLT_BACK, 0)]);
		assert_eq!(bolt.position(), BoltPosition::Forward);
	}

	#[test]
	fn ready_round_waits_for_release()
	{
		let mut bolt = pulled_back();
		let _ = deliver(&mut bolt, &[(BoltAssy::BULLET_READY, 1)]);
		assert!(bolt.ready_bullet());
		assert_eq!(bolt.position(), BoltPosition::Back);

		let mut rng = ScriptedDraws::new(vec![0.1]);
		let _ = external(&mut bolt, 2.0, &[(BoltAssy::RELEASE_BOLT, 1)], &mut rng);
		assert_eq!(bolt.position(), BoltPosition::Forward);
		assert!(!bolt.ready_bullet());
	}

	#[test]
	fn jam_rate()
	{
		let mut rng = new_rng(23);
		let attempts = 10_000;
		let mut jams = 0;
		for _ in 0..attempts {
			let mut bolt = pulled_back();
			let _ = external(&mut bolt, 0.0, &[(BoltAssy::BULLET_READY, 1), (BoltAssy::RELEASE_BOLT, 1)], &mut rng);
			if bolt.position() == BoltPosition::Jam {
				jams += 1;
			}
		}

		let rate = (jams as f64)/(attempts as f64);
		assert!(rate >= 0.07 && rate <= 0.13, "jam rate was {:.3}", rate);
	}
}
