//! The rifle driven by a `StimulusGenerator`. Only the magazine load comes from
//! outside, everything else is played by the generator.
use coupled::*;
use models::generator::*;
use models::rifle;
use ports::*;

pub const INIT_BULLETS: InPort = InPort::new("initBullets");

pub fn new(generator: StimulusGenerator) -> Coupled
{
	let outputs = rifle::outputs();
	let mut top = Coupled::new(&[INIT_BULLETS], &outputs);
	top.add_atomic("generator", generator);
	top.add_coupled("rifle", rifle::new());

	top.add_input_coupling(INIT_BULLETS, "rifle", rifle::INIT_BULLETS);

	top.add_coupling("generator", StimulusGenerator::TRIGGER_PRESSED, "rifle", rifle::TRIGGER_PRESSED);
	top.add_coupling("generator", StimulusGenerator::FIRING_SELECTOR, "rifle", rifle::FIRING_SELECTOR);
	top.add_coupling("generator", StimulusGenerator::BOLT_BACK, "rifle", rifle::BOLT_BACK);
	top.add_coupling("generator", StimulusGenerator::MAG_SEATING, "rifle", rifle::MAG_SEATING);
	top.add_coupling("generator", StimulusGenerator::BULLET_LOADED, "rifle", rifle::BULLET_LOADED);

	for port in outputs.iter() {
		top.add_output_coupling("rifle", *port, *port);
	}
	top
}
