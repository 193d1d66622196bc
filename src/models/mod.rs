//! The rifle's models: five atomic state machines, the two coupled models built
//! from them, and the scripted stimulus generator used to exercise the rifle.
//! All messages are integers, see the port constants for their encodings.
pub mod bolt_assy;
pub mod bullet;
pub mod chamber;
pub mod generator;
pub mod mag_assy;
pub mod magazine;
pub mod rifle;
pub mod top;
pub mod trig_assy;

pub use self::bolt_assy::{BoltAssy, BoltPosition};
pub use self::bullet::Bullet;
pub use self::chamber::{Chamber, DudFlag};
pub use self::generator::{Scenario, StimulusGenerator};
pub use self::magazine::Magazine;
pub use self::trig_assy::{FiringMode, TrigAssy};

#[cfg(test)]
pub mod testing
{
	use atomic::*;
	use context::*;
	use effector::*;
	use ports::*;
	use random::*;

	/// Runs an external transition with the messages delivered in order.
	pub fn external<T: Atomic>(model: &mut T, elapsed: f64, messages: &[(InPort, i32)], rng: &mut dyn Uniform) -> Effector
	{
		let mut inputs = Inputs::new();
		for &(port, value) in messages.iter() {
			inputs.push(port, value);
		}

		let mut effector = Effector::new();
		let mut context = Context{elapsed, rng};
		model.external_transition(&inputs, &mut context, &mut effector);
		effector
	}

	/// Same as external but with a generator that should never be used.
	pub fn deliver<T: Atomic>(model: &mut T, messages: &[(InPort, i32)]) -> Effector
	{
		let mut rng = ScriptedDraws::new(vec![0.5]);
		let effector = external(model, 0.0, messages, &mut rng);
		assert_eq!(rng.count(), 0, "model unexpectedly drew a random number");
		effector
	}

	/// Produces output and then runs the internal transition, i.e. what
	/// happens when sigma elapses.
	pub fn fire<T: Atomic>(model: &mut T) -> Effector
	{
		let mut effector = Effector::new();
		model.output(&mut effector);
		model.internal_transition(&mut effector);
		effector
	}
}
