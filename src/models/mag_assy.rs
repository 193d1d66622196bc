//! The magazine assembly: the magazine feeding rounds to the `Bullet` model
//! which decides if each one is a dud.
use coupled::*;
use models::bullet::*;
use models::magazine::*;
use ports::*;

pub const INIT_BULLETS: InPort = InPort::new("initBullets");
pub const INIT_MAG_SEATING: InPort = InPort::new("initMagSeating");
pub const BULLET_LOADED: InPort = InPort::new("bulletLoaded");

pub const BULLET_READY: OutPort = OutPort::new("bulletReady");
pub const IS_DUD: OutPort = OutPort::new("isDud");

pub fn new() -> Coupled
{
	let mut assy = Coupled::new(&[INIT_BULLETS, INIT_MAG_SEATING, BULLET_LOADED], &[BULLET_READY, IS_DUD]);
	assy.add_atomic("magazine", Magazine::new());
	assy.add_atomic("bullet", Bullet::new());

	assy.add_input_coupling(INIT_BULLETS, "magazine", Magazine::INIT_BULLETS);
	assy.add_input_coupling(INIT_MAG_SEATING, "magazine", Magazine::INIT_MAG_SEATING);
	assy.add_input_coupling(BULLET_LOADED, "magazine", Magazine::BULLET_LOADED);

	assy.add_coupling("magazine", Magazine::BULLET_READY, "bullet", Bullet::BULLET_READY);

	assy.add_output_coupling("bullet", Bullet::IS_DUD, IS_DUD);
	assy.add_output_coupling("bullet", Bullet::BULLET_READY_OUT, BULLET_READY);
	assy
}

#[cfg(test)]
mod tests
{
	use super::*;
	use config::*;
	use random::*;
	use simulation::*;
	use store::*;

	fn simulation(draws: Vec<f64>) -> Simulation
	{
		let mut config = Config::new();
		config.log_level = ::logging::LogLevel::Error;
		Simulation::with_rng(config, "mag_assy", Child::Coupled(new()), Box::new(ScriptedDraws::new(draws)))
	}

	#[test]
	fn wiring()
	{
		let assy = new();
		assert_eq!(assy.child_names(), vec!["magazine", "bullet"]);
		assert_eq!(assy.couplings().len(), 6);
	}

	#[test]
	fn seating_feeds_a_round()
	{
		let mut sim = simulation(vec![0.1]);
		sim.inject(0.0, INIT_BULLETS, 3);
		sim.inject(1.0, INIT_MAG_SEATING, 1);
		sim.run();

		assert_eq!(sim.count(BULLET_READY, 0), 1);
		assert_eq!(sim.count(BULLET_READY, 1), 1);
		assert_eq!(sim.count(IS_DUD, 0), 2);
		assert_eq!(sim.store().get_int_data("magazine.bulletsLeft"), 3);
		assert_eq!(sim.store().get_int_data("magazine.bulletReady"), 1);
	}

	#[test]
	fn every_change_feeds_the_bullet()
	{
		// unseated magazines still tell the bullet they are not ready
		let mut sim = simulation(vec![0.99]);
		sim.inject(0.0, INIT_BULLETS, 3);
		sim.run();

		assert_eq!(sim.count(BULLET_READY, 0), 1);
		assert_eq!(sim.count(IS_DUD, 1), 1);
		assert_eq!(sim.store().get_int_data("bullet.isDud"), 1);
	}
}
