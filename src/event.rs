// Copyright (C) 2017 Jesse Jones
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 3, or (at your option)
// any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program; if not, write to the Free Software Foundation,
// Inc., 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301, USA.
use ports::*;
use rustc_serialize::json::{Json, ToJson};
use sim_time::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Events are messages injected on one of the root model's input ports at a
/// particular `Time`. This is how drivers and tests feed stimuli to the models.
#[derive(Clone, Debug)]
pub struct Event
{
	pub time: Time,
	pub port: InPort,
	pub value: i32,

	/// Events scheduled for the same time are delivered in the order they were
	/// injected.
	pub sequence: u64,
}

impl PartialEq for Event
{
	fn eq(&self, other: &Event) -> bool
	{
		self.time == other.time && self.sequence == other.sequence
	}
}

impl Eq for Event {}

impl PartialOrd for Event
{
	fn partial_cmp(&self, other: &Event) -> Option<Ordering>
	{
		Some(self.cmp(other))
	}
}

impl Ord for Event
{
	fn cmp(&self, other: &Event) -> Ordering
	{
		// reversed because BinaryHeap returns the largest values first
		other.time.cmp(&self.time).then_with(|| other.sequence.cmp(&self.sequence))
	}
}

/// A message that reached one of the root model's output ports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Observation
{
	pub time: Time,

	/// time in seconds
	pub secs: f64,

	pub port: OutPort,
	pub value: i32,
}

impl ToJson for Observation
{
	fn to_json(&self) -> Json
	{
		let mut object = BTreeMap::new();
		object.insert("time".to_string(), self.secs.to_json());
		object.insert("port".to_string(), self.port.name.to_json());
		object.insert("value".to_string(), self.value.to_json());
		Json::Object(object)
	}
}
