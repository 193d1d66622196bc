use component::*;

/// Contains all the `Component`s used within the `Simulation`.
pub struct Components
{
	components: Vec<Component>
}

impl Components
{
	pub fn new() -> Components
	{
		Components {components: Vec::new()}
	}

	pub fn get(&self, id: ComponentID) -> &Component
	{
		assert!(id != NO_COMPONENT);
		&self.components[id.0]
	}

	/// Returns the id for a path as returned by the path method, e.g.
	/// "mag_assy.magazine".
	pub fn find(&self, path: &str) -> Option<ComponentID>
	{
		(0..self.components.len()).map(ComponentID).find(|id| self.path(*id) == path)
	}

	pub fn get_child_id(&self, id: ComponentID, name: &str) -> Option<ComponentID>
	{
		let c = self.get(id);
		c.children.iter().cloned().find(|candidate| self.get(*candidate).name == name)
	}

	/// Iterates over all the components.
	pub fn iter<'a>(&'a self) -> Box<dyn Iterator<Item=&'a Component> + 'a>
	{
		Box::new(self.components.iter())
	}

	/// Returns the path from the top component downwards.
	/// Note that this does not include the root component because it's a little silly
	/// to include it everywhere when it never changes.
	pub fn path(&self, id: ComponentID) -> String
	{
		let mut path = Vec::new();

		let mut c = self.get(id);
		while c.parent != NO_COMPONENT {
			path.insert(0, c.name.clone());
			c = self.get(c.parent);
		}

		path.join(".")
	}

	pub fn len(&self) -> usize
	{
		self.components.len()
	}

	pub fn is_empty(&self) -> bool
	{
		self.components.is_empty()
	}

	pub fn append(&mut self, id: ComponentID, component: Component)
	{
		assert!(id != NO_COMPONENT);
		assert_eq!(id.0, self.components.len(), "components must be appended in id order");

		let parent = component.parent;
		if parent != NO_COMPONENT {
			assert!(self.get_child_id(parent, &component.name).is_none(),
				"{} already has a child named {}", self.get(parent).name, component.name);
			let p = &mut self.components[parent.0];
			p.children.push(id);
		}

		self.components.push(component);
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	fn node(name: &str, parent: ComponentID, atomic: bool) -> Component
	{
		Component{name: name.to_string(), parent, children: Vec::new(), atomic}
	}

	fn tree() -> Components
	{
		let mut components = Components::new();
		components.append(ComponentID(0), node("rifle", NO_COMPONENT, false));
		components.append(ComponentID(1), node("mag_assy", ComponentID(0), false));
		components.append(ComponentID(2), node("magazine", ComponentID(1), true));
		components
	}

	#[test]
	fn paths_skip_the_root()
	{
		let components = tree();
		assert_eq!(components.path(ComponentID(0)), "");
		assert_eq!(components.path(ComponentID(2)), "mag_assy.magazine");
		assert_eq!(components.find("mag_assy.magazine"), Some(ComponentID(2)));
		assert_eq!(components.find("chamber"), None);
	}

	#[test]
	fn children()
	{
		let components = tree();
		assert_eq!(components.get_child_id(ComponentID(0), "mag_assy"), Some(ComponentID(1)));
		assert_eq!(components.get(ComponentID(1)).children, vec![ComponentID(2)]);
	}

	#[test]
	#[should_panic(expected = "already has a child named magazine")]
	fn duplicate_names()
	{
		let mut components = tree();
		components.append(ComponentID(3), node("magazine", ComponentID(1), true));
	}
}
