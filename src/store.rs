use sim_time::*;
use std::collections::HashMap;

/// This is used to record all of the significant state within a simulation so
/// that tests and drivers can see what is happening inside the models without
/// reaching into them. The store contains settings and data.
///
/// _Settings_ are configured on startup and not changed, e.g. the seed used
/// for the random number generator.
///
/// _Data_, on the other hand, does change as the simulation runs, e.g. the
/// number of rounds left in the magazine. Components may transition several
/// times within one instant (zero time cascades) so data can be overwritten
/// at the current time. Settings are write-once per time.
///
/// _Getters_ take a &str key and return either an i64, an f64, or a String. The key
/// is normally a path from the top component through the inner components to a setting
/// or data name, e.g. "mag_assy.magazine.bulletsLeft". The value returned is that for
/// the current time. Note that it is a programmer error if the key is missing.
pub struct Store
{
	pub(crate) int_settings: HashMap<String, (Time, i64)>,
	pub(crate) int_data: HashMap<String, (Time, i64)>,

	pub(crate) float_settings: HashMap<String, (Time, f64)>,
	pub(crate) float_data: HashMap<String, (Time, f64)>,

	pub(crate) string_data: HashMap<String, (Time, String)>,
}

pub trait ReadableStore
{
	fn get_int_setting(&self, key: &str) -> i64;
	fn get_float_setting(&self, key: &str) -> f64;
	fn get_int_data(&self, key: &str) -> i64;
	fn get_float_data(&self, key: &str) -> f64;
	fn get_string_data(&self, key: &str) -> String;
}

pub trait WriteableStore
{
	fn set_int_setting(&mut self, key: &str, value: i64, time: Time);
	fn set_float_setting(&mut self, key: &str, value: f64, time: Time);
	fn set_int_data(&mut self, key: &str, value: i64, time: Time);
	fn set_float_data(&mut self, key: &str, value: f64, time: Time);
	fn set_string_data(&mut self, key: &str, value: &str, time: Time);
}

impl ReadableStore for Store
{
	// --- settings --------------------------------------------------------------
	fn get_int_setting(&self, key: &str) -> i64
	{
		match self.int_settings.get(key) {
			Some(value) => value.1,
			_ => panic!("int key '{}' is missing", key)
		}
	}

	fn get_float_setting(&self, key: &str) -> f64
	{
		match self.float_settings.get(key) {
			Some(value) => value.1,
			_ => panic!("float key '{}' is missing", key)
		}
	}

	// --- data ------------------------------------------------------------------
	fn get_int_data(&self, key: &str) -> i64
	{
		match self.int_data.get(key) {
			Some(value) => value.1,
			_ => panic!("int key '{}' is missing", key)
		}
	}

	fn get_float_data(&self, key: &str) -> f64
	{
		match self.float_data.get(key) {
			Some(value) => value.1,
			_ => panic!("float key '{}' is missing", key)
		}
	}

	fn get_string_data(&self, key: &str) -> String
	{
		match self.string_data.get(key) {
			Some(value) => value.1.clone(),
			_ => panic!("string key '{}' is missing", key)
		}
	}
}

impl WriteableStore for Store
{
	// --- settings --------------------------------------------------------------
	fn set_int_setting(&mut self, key: &str, value: i64, time: Time)
	{
		if let Some(old) = self.int_settings.insert(key.to_string(), (time, value)) {
			if old.0 == time {
				panic!("int key '{}' has already been set", key)
			}
		}
	}

	fn set_float_setting(&mut self, key: &str, value: f64, time: Time)
	{
		if let Some(old) = self.float_settings.insert(key.to_string(), (time, value)) {
			if old.0 == time {
				panic!("float key '{}' has already been set", key)
			}
		}
	}

	// --- data ------------------------------------------------------------------
	fn set_int_data(&mut self, key: &str, value: i64, time: Time)
	{
		self.int_data.insert(key.to_string(), (time, value));
	}

	fn set_float_data(&mut self, key: &str, value: f64, time: Time)
	{
		self.float_data.insert(key.to_string(), (time, value));
	}

	fn set_string_data(&mut self, key: &str, value: &str, time: Time)
	{
		self.string_data.insert(key.to_string(), (time, value.to_string()));
	}
}

impl Store
{
	pub fn new() -> Store
	{
		Store{
			int_settings: HashMap::new(),
			int_data: HashMap::new(),

			float_settings: HashMap::new(),
			float_data: HashMap::new(),

			string_data: HashMap::new(),
		}
	}
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	#[should_panic(expected = "key 'foo' is missing")]
	fn mising_key()
	{
		let store = Store::new();
		store.get_int_setting("foo");
	}

	#[test]
	fn has_value()
	{
		let mut store = Store::new();
		store.set_int_setting("seed", 120, Time(0));
		let seed = store.get_int_setting("seed");
		assert_eq!(seed, 120);
	}

	#[test]
	fn has_new_value()
	{
		let mut store = Store::new();
		store.set_int_setting("seed", 120, Time(0));
		store.set_int_setting("seed", 130, Time(1));
		let seed = store.get_int_setting("seed");
		assert_eq!(seed, 130);
	}

	#[test]
	#[should_panic(expected = "already been set")]
	fn changing_setting()
	{
		let mut store = Store::new();
		store.set_int_setting("seed", 120, Time(1));
		store.set_int_setting("seed", 130, Time(1));
	}

	#[test]
	fn data_can_change_within_an_instant()
	{
		let mut store = Store::new();
		store.set_int_data("magazine.bulletsLeft", 3, Time(5));
		store.set_int_data("magazine.bulletsLeft", 2, Time(5));
		assert_eq!(store.get_int_data("magazine.bulletsLeft"), 2);

		store.set_int_data("magazine.bulletsLeft", 1, Time(6));
		assert_eq!(store.get_int_data("magazine.bulletsLeft"), 1);
	}
}
