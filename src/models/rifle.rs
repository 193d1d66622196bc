//! The whole rifle: magazine assembly, trigger group, bolt and chamber.
use coupled::*;
use models::bolt_assy::*;
use models::chamber::*;
use models::mag_assy;
use models::trig_assy::*;
use ports::*;

pub const TRIGGER_PRESSED: InPort = InPort::new("triggerPressed");
pub const FIRING_SELECTOR: InPort = InPort::new("firingSelector");
pub const BOLT_BACK: InPort = InPort::new("boltBack");
pub const MAG_SEATING: InPort = InPort::new("magSeating");
pub const BULLET_LOADED: InPort = InPort::new("bulletLoaded");
pub const INIT_BULLETS: InPort = InPort::new("initBullets");

pub const RELEASE_BOLT: OutPort = OutPort::new("releaseBolt");
pub const BOLT_BACK_OUT: OutPort = OutPort::new("boltBack");
pub const BULLET_FIRED: OutPort = OutPort::new("bulletFired");
pub const CASING: OutPort = OutPort::new("casing");
pub const BULLET_LOADED_OUT: OutPort = OutPort::new("bulletLoaded");
pub const BOLT_POSITION: OutPort = OutPort::new("boltPosition");
pub const IS_DUD: OutPort = OutPort::new("isDud");

pub fn inputs() -> Vec<InPort>
{
	vec![TRIGGER_PRESSED, FIRING_SELECTOR, BOLT_BACK, MAG_SEATING, BULLET_LOADED, INIT_BULLETS]
}

pub fn outputs() -> Vec<OutPort>
{
	vec![RELEASE_BOLT, BOLT_BACK_OUT, BULLET_FIRED, CASING, BULLET_LOADED_OUT, BOLT_POSITION, IS_DUD]
}

pub fn new() -> Coupled
{
	let mut rifle = Coupled::new(&inputs(), &outputs());
	rifle.add_coupled("mag_assy", mag_assy::new());
	rifle.add_atomic("trig_assy", TrigAssy::new());
	rifle.add_atomic("bolt_assy", BoltAssy::new());
	rifle.add_atomic("chamber", Chamber::new());

	rifle.add_input_coupling(TRIGGER_PRESSED, "trig_assy", TrigAssy::TRIGGER_PRESSED);
	rifle.add_input_coupling(FIRING_SELECTOR, "trig_assy", TrigAssy::FIRING_SELECTOR);
	rifle.add_input_coupling(BOLT_BACK, "bolt_assy", BoltAssy::BOLT_BACK);
	rifle.add_input_coupling(MAG_SEATING, "mag_assy", mag_assy::INIT_MAG_SEATING);
	rifle.add_input_coupling(BULLET_LOADED, "mag_assy", mag_assy::BULLET_LOADED);
	rifle.add_input_coupling(INIT_BULLETS, "mag_assy", mag_assy::INIT_BULLETS);

	rifle.add_coupling("mag_assy", mag_assy::BULLET_READY, "bolt_assy", BoltAssy::BULLET_READY);
	rifle.add_coupling("mag_assy", mag_assy::IS_DUD, "chamber", Chamber::IS_DUD);
	rifle.add_coupling("trig_assy", TrigAssy::RELEASE_BOLT, "bolt_assy", BoltAssy::RELEASE_BOLT);
	rifle.add_coupling("bolt_assy", BoltAssy::BULLET_LOADED, "chamber", Chamber::BULLET_LOADED);
	rifle.add_coupling("bolt_assy", BoltAssy::BULLET_LOADED, "mag_assy", mag_assy::BULLET_LOADED);
	rifle.add_coupling("chamber", Chamber::BOLT_BACK, "bolt_assy", BoltAssy::BOLT_BACK);
	rifle.add_coupling("chamber", Chamber::BOLT_BACK, "trig_assy", TrigAssy::BOLT_BACK);

	rifle.add_output_coupling("trig_assy", TrigAssy::RELEASE_BOLT, RELEASE_BOLT);
	rifle.add_output_coupling("chamber", Chamber::BOLT_BACK, BOLT_BACK_OUT);
	rifle.add_output_coupling("chamber", Chamber::BULLET_FIRED, BULLET_FIRED);
	rifle.add_output_coupling("chamber", Chamber::CASING, CASING);
	rifle.add_output_coupling("bolt_assy", BoltAssy::BULLET_LOADED, BULLET_LOADED_OUT);
	rifle.add_output_coupling("bolt_assy", BoltAssy::BOLT_POSITION, BOLT_POSITION);
	rifle.add_output_coupling("mag_assy", mag_assy::IS_DUD, IS_DUD);
	rifle
}
