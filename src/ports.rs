//! Ports are named, directional channels carrying integer messages. Models declare
//! their ports as constants so that couplings and port reads are checked by name
//! instead of by ad-hoc strings, see `Coupled` for how they are wired up.
use std::fmt;

/// A port a model receives messages on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct InPort
{
	pub name: &'static str,
}

/// A port a model sends messages on.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OutPort
{
	pub name: &'static str,
}

impl InPort
{
	pub const fn new(name: &'static str) -> InPort
	{
		InPort{name}
	}
}

impl OutPort
{
	pub const fn new(name: &'static str) -> OutPort
	{
		OutPort{name}
	}
}

impl fmt::Display for InPort
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		write!(formatter, "{}", self.name)
	}
}

impl fmt::Display for OutPort
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		write!(formatter, "{}", self.name)
	}
}

/// A value sent on an output port.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Message
{
	pub port: OutPort,
	pub value: i32,
}

/// The messages that arrived on each input port of a model within the current
/// instant, kept in arrival order.
///
/// Several senders may write the same port in one instant and nothing orders
/// them by priority. Readers use `latest`, i.e. the last write wins. Arrival order
/// is fixed by the `Simulation`: injected stimuli first (in injection order) and
/// then model outputs in ascending component id order.
#[derive(Debug)]
pub struct Inputs
{
	bags: Vec<(InPort, Vec<i32>)>,
}

impl Inputs
{
	pub fn new() -> Inputs
	{
		Inputs{bags: Vec::new()}
	}

	pub fn push(&mut self, port: InPort, value: i32)
	{
		if let Some(&mut (_, ref mut bag)) = self.bags.iter_mut().find(|b| b.0 == port) {
			bag.push(value);
			return;
		}
		self.bags.push((port, vec![value]));
	}

	/// All the messages for a port, oldest first.
	pub fn bag(&self, port: InPort) -> &[i32]
	{
		match self.bags.iter().find(|b| b.0 == port) {
			Some(&(_, ref bag)) => bag.as_slice(),
			None => &[],
		}
	}

	/// The most recently arrived message on the port.
	pub fn latest(&self, port: InPort) -> Option<i32>
	{
		self.bag(port).last().cloned()
	}

	pub fn contains(&self, port: InPort) -> bool
	{
		!self.bag(port).is_empty()
	}

	pub fn is_empty(&self) -> bool
	{
		self.bags.is_empty()
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	const READY: InPort = InPort::new("bulletReady");
	const BACK: InPort = InPort::new("boltBack");

	#[test]
	fn last_write_wins()
	{
		let mut inputs = Inputs::new();
		inputs.push(READY, 1);
		inputs.push(BACK, 1);
		inputs.push(READY, 0);

		assert_eq!(inputs.bag(READY), &[1, 0]);
		assert_eq!(inputs.latest(READY), Some(0));
		assert_eq!(inputs.latest(BACK), Some(1));
	}

	#[test]
	fn empty_ports()
	{
		let inputs = Inputs::new();
		assert!(inputs.is_empty());
		assert!(!inputs.contains(READY));
		assert_eq!(inputs.latest(READY), None);
	}
}
