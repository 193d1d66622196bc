use logging::*;
use ports::*;
use sim_time::*;
use store::*;

/// Effectors are handed to models when the `Simulation` asks them to produce
/// output or to transition. The effector encapsulates the effects the model wishes
/// to have on the rest of the simulation: messages sent on output ports, log lines,
/// and state published to the `Store`. The `Simulation` applies these after the
/// model returns.
pub struct Effector
{
	#[doc(hidden)]
	pub logs: Vec<LogRecord>,

	#[doc(hidden)]
	pub outputs: Vec<Message>,

	#[doc(hidden)]
	pub store: Store,
}

impl Effector
{
	pub fn new() -> Effector
	{
		Effector{logs: Vec::new(), outputs: Vec::new(), store: Store::new()}
	}

	/// Normally you'll use one of the log macros, e.g. log_info!.
	pub fn log(&mut self, level: LogLevel, message: &str)
	{
		self.logs.push(LogRecord{level, message: message.to_string()});
	}

	/// Sends a message on one of the model's output ports. The message is
	/// delivered at the current time.
	pub fn send(&mut self, port: OutPort, value: i32)
	{
		self.outputs.push(Message{port, value});
	}

	/// Use these methods to publish state associated with the model.
	/// Note that when the data is written to the main store the name will be appended
	/// onto the component's path.
	pub fn set_int_data(&mut self, name: &str, value: i64)
	{
		assert!(!name.is_empty(), "name should not be empty");
		self.store.set_int_data(name, value, Time(0));
	}

	pub fn set_float_data(&mut self, name: &str, value: f64)
	{
		assert!(!name.is_empty(), "name should not be empty");
		self.store.set_float_data(name, value, Time(0));
	}

	pub fn set_string_data(&mut self, name: &str, value: &str)
	{
		assert!(!name.is_empty(), "name should not be empty");
		self.store.set_string_data(name, value, Time(0));
	}

	/// Value sent on the port, if any. The last send wins.
	pub fn sent(&self, port: OutPort) -> Option<i32>
	{
		self.outputs.iter().rev().find(|m| m.port == port).map(|m| m.value)
	}
}

#[doc(hidden)]
pub struct LogRecord
{
	#[doc(hidden)]
	pub level: LogLevel,

	#[doc(hidden)]
	pub message: String,
}
