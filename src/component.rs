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
use std;
use std::fmt;

/// `Component`s are the nodes of the model tree a `Simulation` is built from.
/// Leaves are `Atomic` models with their own state and transitions. Inner nodes
/// come from `Coupled` models and own nothing except their children and the
/// couplings between them. Components are created once, when the simulation is
/// assembled, and live until it is dropped.
pub struct Component
{
	/// The name of the component. These are unique among siblings.
	pub name: String,

	/// ID for the component's parent. The root component will return NO_COMPONENT.
	pub parent: ComponentID,

	pub children: Vec<ComponentID>,

	/// True for leaves, i.e. components backed by an `Atomic` model.
	pub atomic: bool,
}

/// To make lifetime management easier components are referenced using a small
/// integer instead of a rust reference.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ComponentID(pub usize);

/// The parent of the root component.
pub const NO_COMPONENT: ComponentID = ComponentID(std::usize::MAX);

impl fmt::Display for ComponentID
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		write!(formatter, "{}", self.0)
	}
}
