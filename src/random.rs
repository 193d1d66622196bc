//! The single source of randomness used by the models. The `Simulation` owns one
//! `Uniform` and lends it to each external transition so that every decision in
//! a run comes from the same stream.
use rand::{Rng, SeedableRng, XorShiftRng};
use time::get_time;

/// Anything that can produce uniform samples in [0, 1).
pub trait Uniform
{
	fn draw(&mut self) -> f64;
}

impl Uniform for XorShiftRng
{
	fn draw(&mut self) -> f64
	{
		self.next_f64()
	}
}

/// Replays a fixed list of samples, wrapping around at the end. Handy for
/// forcing a particular dud or jam outcome.
pub struct ScriptedDraws
{
	draws: Vec<f64>,
	next: usize,
}

impl ScriptedDraws
{
	pub fn new(draws: Vec<f64>) -> ScriptedDraws
	{
		assert!(!draws.is_empty(), "draws should not be empty");
		assert!(draws.iter().all(|d| *d >= 0.0 && *d < 1.0), "draws should be in [0, 1)");
		ScriptedDraws{draws, next: 0}
	}

	/// Number of samples handed out so far.
	pub fn count(&self) -> usize
	{
		self.next
	}
}

impl Uniform for ScriptedDraws
{
	fn draw(&mut self) -> f64
	{
		let value = self.draws[self.next % self.draws.len()];
		self.next += 1;
		value
	}
}

// We care about speed much more than we care about a cryptographic RNG so
// XorShiftRng should be plenty good enough.
pub fn new_rng(seed: u32) -> XorShiftRng
{
	let seed = if seed != 0 {seed} else {get_time().nsec as u32 | 1};	// XorShiftRng panics on an all zero seed
	XorShiftRng::from_seed([seed, seed.rotate_left(8), seed.rotate_left(16), seed.rotate_left(24)])
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn scripted_wraps()
	{
		let mut draws = ScriptedDraws::new(vec![0.1, 0.9]);
		assert_eq!(draws.draw(), 0.1);
		assert_eq!(draws.draw(), 0.9);
		assert_eq!(draws.draw(), 0.1);
		assert_eq!(draws.count(), 3);
	}

	#[test]
	#[should_panic(expected = "should be in [0, 1)")]
	fn scripted_range()
	{
		let _ = ScriptedDraws::new(vec![1.0]);
	}

	#[test]
	fn seeded_streams_repeat()
	{
		let mut a = new_rng(42);
		let mut b = new_rng(42);
		for _ in 0..10 {
			let x = a.draw();
			assert!(x >= 0.0 && x < 1.0);
			assert_eq!(x, b.draw());
		}
	}
}
