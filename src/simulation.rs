use atomic::*;
use component::*;
use components::*;
use config::*;
use context::*;
use coupled::*;
use effector::*;
use event::*;
use logging::*;
use ports::*;
use random::*;
use sim_time::*;
use std::cmp::max;
use std::collections::{BTreeMap, BinaryHeap, HashMap};
use store::*;

/// This is the top-level data structure. It owns the model tree, the clock, and
/// the single random number generator used by the models. Once a driver injects
/// its stimuli the simulation will run until either every model is passive and
/// no stimuli remain or config.max_secs elapses.
///
/// Each step advances the clock to the earliest scheduled internal transition or
/// stimulus. Every model due at that time produces its output, the messages are
/// routed to the receiving models at the same instant, and then the transitions
/// run. Models that schedule themselves with a zero sigma are due again at the
/// same time which is how messages cascade through the model tree.
pub struct Simulation
{
	store: Store,
	components: Components,
	models: Vec<Option<Box<dyn Atomic>>>,	// all of these are indexed by ComponentID
	couplings: Vec<Vec<Link>>,
	last_time: Vec<Time>,
	next_time: Vec<Option<Time>>,
	routes: HashMap<(ComponentID, OutPort), Vec<Destination>>,
	input_routes: HashMap<InPort, Vec<Destination>>,
	config: Config,
	precision: usize,	// number of decimal places to include when logging, derived from config.time_units
	current_time: Time,
	steps_at_time: usize,
	stimuli: BinaryHeap<Event>,
	num_injected: u64,
	observations: Vec<Observation>,
	rng: Box<dyn Uniform>,
	max_path_len: usize,
}

impl Simulation
{
	/// Assembles the simulation using a random number generator seeded from
	/// config.seed.
	pub fn new(config: Config, name: &str, root: Child) -> Simulation
	{
		let rng = new_rng(config.seed);
		Simulation::with_rng(config, name, root, Box::new(rng))
	}

	/// Use this to substitute the random source, e.g. with `ScriptedDraws`.
	pub fn with_rng(config: Config, name: &str, root: Child, rng: Box<dyn Uniform>) -> Simulation
	{
		assert!(config.time_units > 0.0, "time units ({}) are not positive", config.time_units);
		assert!(config.max_secs > 0.0, "max secs ({}) is not positive", config.max_secs);
		assert!(!name.is_empty(), "name should not be empty");

		let precision = config.time_units.log10().max(0.0) as usize;
		let root_inputs = root.input_ports();
		let mut sim = Simulation {
			store: Store::new(),
			components: Components::new(),
			models: Vec::new(),
			couplings: Vec::new(),
			last_time: Vec::new(),
			next_time: Vec::new(),
			routes: HashMap::new(),
			input_routes: HashMap::new(),
			config,
			precision,
			current_time: Time(0),
			steps_at_time: 0,
			stimuli: BinaryHeap::new(),
			num_injected: 0,
			observations: Vec::new(),
			rng,
			max_path_len: 0,
		};

		let root_id = sim.add_child(name, NO_COMPONENT, root);
		sim.build_routes(root_id, &root_inputs);

		sim.store.set_int_setting("seed", sim.config.seed as i64, Time(0));
		sim.store.set_float_setting("time-units", sim.config.time_units, Time(0));
		for i in 0..sim.models.len() {
			sim.schedule_initial(ComponentID(i));
		}
		sim
	}

	/// Queues up a message for one of the root model's input ports at the given
	/// absolute time.
	pub fn inject(&mut self, secs: f64, port: InPort, value: i32)
	{
		assert!(secs.is_finite(), "secs ({:.3}) should be finite", secs);
		assert!(self.input_routes.contains_key(&port), "root model has no input port {}", port);

		let time = self.to_time(secs);
		assert!(time >= self.current_time, "can't inject {} at {:.3}s which is before the current time", port, secs);

		let sequence = self.num_injected;
		self.num_injected += 1;
		self.stimuli.push(Event{time, port, value, sequence});
	}

	/// Processes instants until there is nothing left to do or config.max_secs
	/// elapses.
	pub fn run(&mut self)
	{
		while self.step() {
		}
		let message = format!("finished with {} observations", self.observations.len());
		self.log(LogLevel::Debug, NO_COMPONENT, &message);
	}

	/// Like run except that the simulation stops before any instant later than
	/// secs. Stimuli can then be injected and the simulation resumed.
	pub fn run_until(&mut self, secs: f64)
	{
		let limit = self.to_time(secs);
		while self.peek_time().map_or(false, |time| time <= limit) && self.step() {
		}
	}

	/// Processes a single step, returning false if there was nothing left to do.
	/// Note that an instant may take several steps when messages cascade.
	pub fn step(&mut self) -> bool
	{
		let time = match self.peek_time() {
			Some(time) => time,
			None => return false,
		};
		if self.to_secs(time) > self.config.max_secs {
			return false;
		}

		if time == self.current_time {
			self.steps_at_time += 1;
			assert!(self.steps_at_time < 10_000, "models are cascading without time advancing at {:.3}s", self.to_secs(time));
		} else {
			self.steps_at_time = 0;
		}
		self.current_time = time;

		let mut inboxes: BTreeMap<ComponentID, Inputs> = BTreeMap::new();
		while let Some(event) = self.pop_stimulus(time) {
			let message = format!("injecting {} = {}", event.port, event.value);
			self.log(LogLevel::Excessive, NO_COMPONENT, &message);

			let destinations = self.input_routes.get(&event.port).cloned().unwrap_or_default();
			self.deliver(&destinations, &mut inboxes, event.port.name, event.value);
		}

		let imminent: Vec<ComponentID> = (0..self.next_time.len())
			.filter(|i| self.next_time[*i] == Some(time))
			.map(ComponentID)
			.collect();
		for &id in imminent.iter() {
			let mut effector = Effector::new();
			if let Some(ref model) = self.models[id.0] {
				model.output(&mut effector);
			}
			self.apply_logs(id, &effector);

			for message in effector.outputs.iter() {
				let destinations = self.routes.get(&(id, message.port)).cloned().unwrap_or_default();
				if destinations.is_empty() {
					let text = format!("{} = {} isn't coupled to anything", message.port, message.value);
					self.log(LogLevel::Excessive, id, &text);
				}
				self.deliver(&destinations, &mut inboxes, message.port.name, message.value);
			}
		}

		let mut ids = imminent.clone();
		ids.extend(inboxes.keys().filter(|id| !imminent.contains(*id)).cloned());
		ids.sort();

		for id in ids {
			let inputs = inboxes.remove(&id);
			let elapsed = self.to_secs(Time(time.0 - self.last_time[id.0].0));

			let mut effector = Effector::new();
			let sigma = {
				let rng = &mut *self.rng;
				let model = match self.models[id.0] {
					Some(ref mut model) => model,
					None => continue,
				};
				let mut context = Context{elapsed, rng};
				match (imminent.contains(&id), inputs) {
					(true, None) => model.internal_transition(&mut effector),
					(true, Some(ref inputs)) => model.confluent_transition(inputs, &mut context, &mut effector),
					(false, Some(ref inputs)) => model.external_transition(inputs, &mut context, &mut effector),
					(false, None) => continue,
				}
				model.record(&mut effector);
				model.time_advance()
			};
			assert!(sigma >= 0.0, "{} returned a negative sigma ({})", self.components.path(id), sigma);

			self.last_time[id.0] = time;
			self.next_time[id.0] = self.add_secs(time, sigma);
			self.apply_logs(id, &effector);
			self.apply_stores(id, &effector, time);
		}
		true
	}

	/// True if no model has an internal transition scheduled and no stimuli remain.
	pub fn is_passive(&self) -> bool
	{
		self.peek_time().is_none()
	}

	pub fn time(&self) -> Time
	{
		self.current_time
	}

	/// The current time in seconds.
	pub fn secs(&self) -> f64
	{
		self.to_secs(self.current_time)
	}

	pub fn store(&self) -> &Store
	{
		&self.store
	}

	pub fn components(&self) -> &Components
	{
		&self.components
	}

	/// Messages that reached the root model's output ports, oldest first.
	pub fn observations(&self) -> &[Observation]
	{
		&self.observations
	}

	/// Number of times value was observed on port.
	pub fn count(&self, port: OutPort, value: i32) -> usize
	{
		self.observations.iter().filter(|o| o.port == port && o.value == value).count()
	}

	/// Returns the phase of the model at path, e.g. "mag_assy.bullet".
	pub fn phase(&self, path: &str) -> Option<Phase>
	{
		let id = self.components.find(path)?;
		match self.models[id.0] {
			Some(ref model) => Some(model.phase()),
			None => None,
		}
	}

	fn add_child(&mut self, name: &str, parent: ComponentID, child: Child) -> ComponentID
	{
		let id = ComponentID(self.models.len());
		let atomic = match child {
			Child::Atomic(_) => true,
			Child::Coupled(_) => false,
		};
		self.components.append(id, Component{name: name.to_string(), parent, children: Vec::new(), atomic});
		self.max_path_len = max(self.components.path(id).len(), self.max_path_len);
		self.last_time.push(Time(0));
		self.next_time.push(None);

		match child {
			Child::Atomic(model) => {
				self.models.push(Some(model));
				self.couplings.push(Vec::new());
			},
			Child::Coupled(coupled) => {
				self.models.push(None);
				self.couplings.push(Vec::new());

				let (children, couplings) = coupled.into_parts();
				for (child_name, child) in children {
					let _ = self.add_child(&child_name, id, child);
				}

				let links: Vec<Link> = couplings.iter().map(|c| self.resolve_link(id, c)).collect();
				self.couplings[id.0] = links;
			},
		}
		id
	}

	fn resolve_link(&self, id: ComponentID, coupling: &Coupling) -> Link
	{
		let child = |name: &str| match self.components.get_child_id(id, name) {
			Some(child) => child,
			None => panic!("{} has no child named {}", self.components.get(id).name, name),
		};
		match *coupling {
			Coupling::ExternalInput{from, ref to_child, to} => Link::ExternalInput{from, to: (child(to_child.as_str()), to)},
			Coupling::Internal{ref from_child, from, ref to_child, to} => Link::Internal{from: (child(from_child.as_str()), from), to: (child(to_child.as_str()), to)},
			Coupling::ExternalOutput{ref from_child, from, to} => Link::ExternalOutput{from: (child(from_child.as_str()), from), to},
		}
	}

	fn build_routes(&mut self, root: ComponentID, root_inputs: &[InPort])
	{
		for port in root_inputs.iter() {
			let mut destinations = Vec::new();
			self.resolve_input(root, *port, &mut destinations);
			self.input_routes.insert(*port, destinations);
		}

		for i in 0..self.models.len() {
			let id = ComponentID(i);
			let ports = match self.models[i] {
				Some(ref model) => model.output_ports(),
				None => continue,
			};
			for port in ports.iter() {
				let mut destinations = Vec::new();
				self.resolve_output(id, *port, &mut destinations);
				self.routes.insert((id, *port), destinations);
			}
		}
	}

	// Follows a message arriving on an input port down to the atomic models that receive it.
	fn resolve_input(&self, id: ComponentID, port: InPort, destinations: &mut Vec<Destination>)
	{
		if self.components.get(id).atomic {
			destinations.push(Destination::Model(id, port));
			return;
		}

		for link in self.couplings[id.0].iter() {
			if let Link::ExternalInput{from, to} = *link {
				if from == port {
					self.resolve_input(to.0, to.1, destinations);
				}
			}
		}
	}

	// Follows a message sent on an output port up and across the tree.
	fn resolve_output(&self, id: ComponentID, port: OutPort, destinations: &mut Vec<Destination>)
	{
		let parent = self.components.get(id).parent;
		if parent == NO_COMPONENT {
			destinations.push(Destination::Observed(port));
			return;
		}

		for link in self.couplings[parent.0].iter() {
			match *link {
				Link::Internal{from, to} if from == (id, port) => self.resolve_input(to.0, to.1, destinations),
				Link::ExternalOutput{from, to} if from == (id, port) => self.resolve_output(parent, to, destinations),
				_ => {},
			}
		}
	}

	fn schedule_initial(&mut self, id: ComponentID)
	{
		let mut effector = Effector::new();
		let sigma = match self.models[id.0] {
			Some(ref model) => {
				model.record(&mut effector);
				model.time_advance()
			},
			None => return,
		};
		self.next_time[id.0] = self.add_secs(Time(0), sigma);
		self.apply_stores(id, &effector, Time(0));
	}

	fn deliver(&mut self, destinations: &[Destination], inboxes: &mut BTreeMap<ComponentID, Inputs>, name: &str, value: i32)
	{
		for destination in destinations.iter() {
			match *destination {
				Destination::Model(id, port) => {
					let message = format!("{} -> {} {} = {}", name, self.components.path(id), port, value);
					self.log(LogLevel::Excessive, NO_COMPONENT, &message);
					inboxes.entry(id).or_insert_with(Inputs::new).push(port, value);
				},
				Destination::Observed(port) => {
					let secs = self.secs();
					self.observations.push(Observation{time: self.current_time, secs, port, value});
				},
			}
		}
	}

	fn pop_stimulus(&mut self, time: Time) -> Option<Event>
	{
		let due = match self.stimuli.peek() {
			Some(event) => event.time == time,
			None => false,
		};
		if due {self.stimuli.pop()} else {None}
	}

	fn peek_time(&self) -> Option<Time>
	{
		let stimulus = self.stimuli.peek().map(|e| e.time);
		self.next_time.iter().cloned().chain(Some(stimulus)).filter_map(|t| t).min()
	}

	fn apply_logs(&self, id: ComponentID, effects: &Effector)
	{
		for record in effects.logs.iter() {
			self.log(record.level, id, &record.message);
		}
	}

	fn apply_stores(&mut self, id: ComponentID, effects: &Effector, time: Time)
	{
		let path = self.components.path(id);
		let key = |name: &String| if path.is_empty() {name.clone()} else {format!("{}.{}", path, name)};

		for (name, value) in effects.store.int_data.iter() {
			self.store.set_int_data(&key(name), value.1, time);
		}
		for (name, value) in effects.store.float_data.iter() {
			self.store.set_float_data(&key(name), value.1, time);
		}
		for (name, value) in effects.store.string_data.iter() {
			self.store.set_string_data(&key(name), &value.1, time);
		}
	}

	fn log(&self, level: LogLevel, id: ComponentID, message: &str)
	{
		if self.should_log(level, id) {
			let t = self.secs();

			let path = self.logged_path(id);
			if self.config.colorize {
				let begin_escape = match level {
					LogLevel::Error		=> &self.config.error_escape_code,
					LogLevel::Warning	=> &self.config.warning_escape_code,
					LogLevel::Info		=> &self.config.info_escape_code,
					LogLevel::Debug		=> &self.config.debug_escape_code,
					LogLevel::Excessive	=> &self.config.excessive_escape_code,
				};
				print!("{0}{1:.2$}   {3} {4}{5}\n", begin_escape, t, self.precision, path, message, end_escape());
			} else {
				let prefix = match level {
					LogLevel::Error		=> "Error",
					LogLevel::Warning	=> "Warn ",
					LogLevel::Info		=> "Info ",
					LogLevel::Debug		=> "Debug",
					LogLevel::Excessive	=> "Exces",
				};
				print!("{0:.1$}  {2} {3}  {4}\n", t, self.precision, prefix, path, message);
			}
		}
	}

	fn logged_path(&self, id: ComponentID) -> String
	{
		let mut path = if id == NO_COMPONENT {"simulation".to_string()} else {self.components.path(id)};
		if path.is_empty() {
			path = self.components.get(id).name.clone();
		}
		if self.config.max_log_path > 0 && self.max_path_len > self.config.max_log_path {
			let len = path.len();
			if len > self.config.max_log_path {
				format!("…{}", path.split_off(len - self.config.max_log_path))
			} else {
				format!("{0:<1$}", path, self.config.max_log_path)
			}
		} else {
			format!("{0:<1$}", path, self.max_path_len)
		}
	}

	fn should_log(&self, level: LogLevel, id: ComponentID) -> bool
	{
		if !self.config.log_levels.is_empty() {	// short circuit some work if we have no overrides
			let name = if id == NO_COMPONENT {"simulation"} else {self.components.get(id).name.as_str()};

			for &(ref pattern, clevel) in self.config.log_levels.iter() {
				if pattern.matches(name) {
					return level <= clevel
				}
			}
		}

		level <= self.config.log_level
	}

	fn to_time(&self, secs: f64) -> Time
	{
		Time((secs*self.config.time_units).round() as i64)
	}

	fn to_secs(&self, time: Time) -> f64
	{
		(time.0 as f64)/self.config.time_units
	}

	fn add_secs(&self, time: Time, secs: f64) -> Option<Time>
	{
		if secs.is_infinite() {
			None
		} else {
			let delta = self.to_time(secs);
			Some(Time(time.0 + delta.0))
		}
	}
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Link
{
	ExternalInput{from: InPort, to: (ComponentID, InPort)},
	Internal{from: (ComponentID, OutPort), to: (ComponentID, InPort)},
	ExternalOutput{from: (ComponentID, OutPort), to: OutPort},
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Destination
{
	Model(ComponentID, InPort),
	Observed(OutPort),
}

fn end_escape() -> &'static str
{
	"\x1b[0m"
}
