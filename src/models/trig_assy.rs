use atomic::*;
use context::*;
use effector::*;
use ports::*;
use std::fmt;

static INPUTS: [InPort; 3] = [TrigAssy::TRIGGER_PRESSED, TrigAssy::FIRING_SELECTOR, TrigAssy::BOLT_BACK];
static OUTPUTS: [OutPort; 1] = [TrigAssy::RELEASE_BOLT];

/// Position of the fire selector.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FiringMode
{
	Safe = 0,
	Single = 1,
	Auto = 2,
}

impl FiringMode
{
	pub fn from_selector(value: i32) -> Option<FiringMode>
	{
		match value {
			0 => Some(FiringMode::Safe),
			1 => Some(FiringMode::Single),
			2 => Some(FiringMode::Auto),
			_ => None,
		}
	}
}

impl fmt::Display for FiringMode
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		match *self {
			FiringMode::Safe => write!(formatter, "SAFE"),
			FiringMode::Single => write!(formatter, "SINGLE"),
			FiringMode::Auto => write!(formatter, "AUTO"),
		}
	}
}

/// Trigger group: turns trigger pulls into bolt releases according to the
/// selector.
pub struct TrigAssy
{
	sigma: f64,
	phase: Phase,
	trigger_pulled: bool,
	firing_mode: FiringMode,
}

impl TrigAssy
{
	/// 1 while the trigger is held.
	pub const TRIGGER_PRESSED: InPort = InPort::new("triggerPressed");

	/// A `FiringMode` value.
	pub const FIRING_SELECTOR: InPort = InPort::new("firingSelector");

	/// Received when the bolt cycles. The trigger group does not react to it.
	pub const BOLT_BACK: InPort = InPort::new("boltBack");

	/// 1 to release the bolt, 0 to hold it.
	pub const RELEASE_BOLT: OutPort = OutPort::new("releaseBolt");

	pub fn new() -> TrigAssy
	{
		TrigAssy{sigma: PASSIVE, phase: Phase::Passive, trigger_pulled: false, firing_mode: FiringMode::Single}
	}

	pub fn trigger_pulled(&self) -> bool
	{
		self.trigger_pulled
	}

	pub fn firing_mode(&self) -> FiringMode
	{
		self.firing_mode
	}
}

impl Atomic for TrigAssy
{
	fn input_ports(&self) -> &'static [InPort]
	{
		&INPUTS
	}

	fn output_ports(&self) -> &'static [OutPort]
	{
		&OUTPUTS
	}

	fn internal_transition(&mut self, effector: &mut Effector)
	{
		if self.firing_mode == FiringMode::Single && self.trigger_pulled {
			self.trigger_pulled = false;
			log_excessive!(effector, "trigger reset");
		}

		self.phase = Phase::Passive;
		self.sigma = PASSIVE;
	}

	fn external_transition(&mut self, inputs: &Inputs, _context: &mut Context, effector: &mut Effector)
	{
		if let Some(value) = inputs.latest(TrigAssy::TRIGGER_PRESSED) {
			self.trigger_pulled = value == 1;
		}

		if let Some(value) = inputs.latest(TrigAssy::FIRING_SELECTOR) {
			match FiringMode::from_selector(value) {
				Some(mode) => {
					if mode != self.firing_mode {
						log_info!(effector, "selector moved to {}", mode);
					}
					self.firing_mode = mode;
				},
				None => log_warning!(effector, "ignoring selector value {}", value),
			}
		}

		if inputs.contains(TrigAssy::BOLT_BACK) {
			log_excessive!(effector, "bolt cycled");
		}

		self.phase = Phase::Active;
		self.sigma = 0.0;
	}

	fn output(&self, effector: &mut Effector)
	{
		if self.trigger_pulled {
			match self.firing_mode {
				FiringMode::Safe => effector.send(TrigAssy::RELEASE_BOLT, 0),
				FiringMode::Single | FiringMode::Auto => effector.send(TrigAssy::RELEASE_BOLT, 1),
			}
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
		effector.set_int_data("triggerPulled", self.trigger_pulled as i64);
		effector.set_int_data("firingMode", self.firing_mode as i64);
		record_schedule(effector, self.sigma, self.phase);
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use models::testing::*;

	#[test]
	fn safe_never_releases()
	{
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::FIRING_SELECTOR, 0), (TrigAssy::TRIGGER_PRESSED, 1)]);
		assert_eq!(trigger.firing_mode(), FiringMode::Safe);

		for _ in 0..3 {
			let effector = fire(&mut trigger);
			assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), Some(0));
			let _ = deliver(&mut trigger, &[(TrigAssy::BOLT_BACK, 1)]);
		}
	}

	#[test]
	fn single_releases_once()
	{
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, 1)]);
		assert_eq!(trigger.firing_mode(), FiringMode::Single);

		let effector = fire(&mut trigger);
		assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), Some(1));
		assert!(!trigger.trigger_pulled());

		let _ = deliver(&mut trigger, &[(TrigAssy::BOLT_BACK, 1)]);
		let effector = fire(&mut trigger);
		assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), None);
	}

	#[test]
	fn single_releases_per_press()
	{
		let mut trigger = TrigAssy::new();
		let mut releases = 0;
		for &pressed in [1, 0, 1].iter() {
			let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, pressed)]);
			let effector = fire(&mut trigger);
			if effector.sent(TrigAssy::RELEASE_BOLT) == Some(1) {
				releases += 1;
			}
		}
		assert_eq!(releases, 2);
	}

	#[test]
	fn repeated_press_rearms()
	{
		// every pressed message latches the trigger, there is no edge detection
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, 1)]);
		let effector = fire(&mut trigger);
		assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), Some(1));

		let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, 1)]);
		assert!(trigger.trigger_pulled());
		let effector = fire(&mut trigger);
		assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), Some(1));
		assert!(!trigger.trigger_pulled());
	}

	#[test]
	fn auto_keeps_releasing()
	{
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::FIRING_SELECTOR, 2), (TrigAssy::TRIGGER_PRESSED, 1)]);

		for _ in 0..3 {
			let effector = fire(&mut trigger);
			assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), Some(1));
			assert!(trigger.trigger_pulled());
			let _ = deliver(&mut trigger, &[(TrigAssy::BOLT_BACK, 1)]);
		}

		let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, 0)]);
		let effector = fire(&mut trigger);
		assert_eq!(effector.sent(TrigAssy::RELEASE_BOLT), None);
	}

	#[test]
	fn bad_selector()
	{
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::FIRING_SELECTOR, 2)]);
		let effector = deliver(&mut trigger, &[(TrigAssy::FIRING_SELECTOR, 3)]);
		assert_eq!(trigger.firing_mode(), FiringMode::Auto);
		assert_eq!(effector.logs.len(), 1);
	}

	#[test]
	fn bolt_back_changes_nothing()
	{
		let mut trigger = TrigAssy::new();
		let _ = deliver(&mut trigger, &[(TrigAssy::TRIGGER_PRESSED, 1)]);
		let _ = deliver(&mut trigger, &[(TrigAssy::BOLT_BACK, 1)]);
		assert!(trigger.trigger_pulled());
		assert_eq!(trigger.firing_mode(), FiringMode::Single);
		assert_eq!(trigger.time_advance(), 0.0);
	}
}
