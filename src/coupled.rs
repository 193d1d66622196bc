use atomic::*;
use ports::*;

/// A node of the model tree handed to a `Coupled` model or to the `Simulation`.
pub enum Child
{
	Atomic(Box<dyn Atomic>),
	Coupled(Coupled),
}

impl Child
{
	pub fn input_ports(&self) -> Vec<InPort>
	{
		match *self {
			Child::Atomic(ref model) => model.input_ports().to_vec(),
			Child::Coupled(ref coupled) => coupled.inputs.clone(),
		}
	}

	pub fn output_ports(&self) -> Vec<OutPort>
	{
		match *self {
			Child::Atomic(ref model) => model.output_ports().to_vec(),
			Child::Coupled(ref coupled) => coupled.outputs.clone(),
		}
	}
}

/// Port-to-port links within a `Coupled` model. Children are referred to by name.
#[derive(Clone, Debug, PartialEq)]
pub enum Coupling
{
	/// One of the coupled model's own inputs feeds a child input.
	ExternalInput{from: InPort, to_child: String, to: InPort},

	/// A child output feeds another child's input.
	Internal{from_child: String, from: OutPort, to_child: String, to: InPort},

	/// A child output is exposed as one of the coupled model's own outputs.
	ExternalOutput{from_child: String, from: OutPort, to: OutPort},
}

/// A model built purely from child models and the couplings between them. It has
/// no state and no transitions of its own: the `Simulation` flattens the
/// hierarchy into routes between atomic models when it is created.
///
/// Coupling methods check that the ports exist, so children have to be added
/// before they are coupled. Mistakes here are programmer errors and panic.
pub struct Coupled
{
	inputs: Vec<InPort>,
	outputs: Vec<OutPort>,
	children: Vec<(String, Child)>,
	couplings: Vec<Coupling>,
}

impl Coupled
{
	pub fn new(inputs: &[InPort], outputs: &[OutPort]) -> Coupled
	{
		Coupled{inputs: inputs.to_vec(), outputs: outputs.to_vec(), children: Vec::new(), couplings: Vec::new()}
	}

	pub fn add_atomic<T: Atomic + 'static>(&mut self, name: &str, model: T)
	{
		self.add_child(name, Child::Atomic(Box::new(model)));
	}

	pub fn add_coupled(&mut self, name: &str, coupled: Coupled)
	{
		self.add_child(name, Child::Coupled(coupled));
	}

	pub fn add_input_coupling(&mut self, from: InPort, to_child: &str, to: InPort)
	{
		assert!(self.inputs.contains(&from), "coupled model has no input port {}", from);
		assert!(self.child(to_child).input_ports().contains(&to), "{} has no input port {}", to_child, to);

		self.couplings.push(Coupling::ExternalInput{from, to_child: to_child.to_string(), to});
	}

	pub fn add_coupling(&mut self, from_child: &str, from: OutPort, to_child: &str, to: InPort)
	{
		assert!(self.child(from_child).output_ports().contains(&from), "{} has no output port {}", from_child, from);
		assert!(self.child(to_child).input_ports().contains(&to), "{} has no input port {}", to_child, to);

		self.couplings.push(Coupling::Internal{from_child: from_child.to_string(), from, to_child: to_child.to_string(), to});
	}

	pub fn add_output_coupling(&mut self, from_child: &str, from: OutPort, to: OutPort)
	{
		assert!(self.child(from_child).output_ports().contains(&from), "{} has no output port {}", from_child, from);
		assert!(self.outputs.contains(&to), "coupled model has no output port {}", to);

		self.couplings.push(Coupling::ExternalOutput{from_child: from_child.to_string(), from, to});
	}

	pub fn inputs(&self) -> &[InPort]
	{
		&self.inputs
	}

	pub fn outputs(&self) -> &[OutPort]
	{
		&self.outputs
	}

	pub fn couplings(&self) -> &[Coupling]
	{
		&self.couplings
	}

	pub fn child_names(&self) -> Vec<&str>
	{
		self.children.iter().map(|c| c.0.as_str()).collect()
	}

	#[doc(hidden)]
	pub fn into_parts(self) -> (Vec<(String, Child)>, Vec<Coupling>)
	{
		(self.children, self.couplings)
	}

	fn add_child(&mut self, name: &str, child: Child)
	{
		assert!(!name.is_empty(), "name should not be empty");
		assert!(!name.contains('.'), "name ({}) should not contain a period", name);
		assert!(self.children.iter().all(|c| c.0 != name), "already have a child named {}", name);

		self.children.push((name.to_string(), child));
	}

	fn child(&self, name: &str) -> &Child
	{
		match self.children.iter().find(|c| c.0 == name) {
			Some(&(_, ref child)) => child,
			None => panic!("coupled model has no child named {}", name),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;
	use models::*;

	fn assy() -> Coupled
	{
		let mut assy = Coupled::new(&[InPort::new("initBullets")], &[OutPort::new("isDud")]);
		assy.add_atomic("magazine", Magazine::new());
		assy.add_atomic("bullet", Bullet::new());
		assy
	}

	#[test]
	fn couplings()
	{
		let mut assy = assy();
		assy.add_input_coupling(InPort::new("initBullets"), "magazine", Magazine::INIT_BULLETS);
		assy.add_coupling("magazine", Magazine::BULLET_READY, "bullet", Bullet::BULLET_READY);
		assy.add_output_coupling("bullet", Bullet::IS_DUD, OutPort::new("isDud"));

		assert_eq!(assy.couplings().len(), 3);
		assert_eq!(assy.couplings()[1], Coupling::Internal{
			from_child: "magazine".to_string(),
			from: Magazine::BULLET_READY,
			to_child: "bullet".to_string(),
			to: Bullet::BULLET_READY});
	}

	#[test]
	fn nested_ports()
	{
		let mut outer = Coupled::new(&[], &[]);
		outer.add_coupled("mag_assy", assy());
		let child = Child::Coupled(assy());
		assert_eq!(child.input_ports(), vec![InPort::new("initBullets")]);
		assert_eq!(child.output_ports(), vec![OutPort::new("isDud")]);
		assert_eq!(outer.child_names(), vec!["mag_assy"]);
	}

	#[test]
	#[should_panic(expected = "already have a child named bullet")]
	fn duplicate_child()
	{
		let mut assy = assy();
		assy.add_atomic("bullet", Bullet::new());
	}

	#[test]
	#[should_panic(expected = "should not contain a period")]
	fn dotted_name()
	{
		let mut assy = assy();
		assy.add_atomic("mag.bullet", Bullet::new());
	}

	#[test]
	#[should_panic(expected = "coupled model has no child named chamber")]
	fn unknown_child()
	{
		let mut assy = assy();
		assy.add_coupling("magazine", Magazine::BULLET_READY, "chamber", Bullet::BULLET_READY);
	}

	#[test]
	#[should_panic(expected = "bullet has no input port bulletLoaded")]
	fn unknown_child_port()
	{
		let mut assy = assy();
		assy.add_coupling("magazine", Magazine::BULLET_READY, "bullet", Magazine::BULLET_LOADED);
	}

	#[test]
	#[should_panic(expected = "coupled model has no output port casing")]
	fn unknown_output()
	{
		let mut assy = assy();
		assy.add_output_coupling("bullet", Bullet::IS_DUD, OutPort::new("casing"));
	}
}
