use random::*;

/// Encapsulates information related to the external transition currently being
/// executed.
pub struct Context<'a>
{
	/// Seconds since the model's previous transition. Models that keep their
	/// pending schedule across an input subtract this from sigma.
	pub elapsed: f64,

	/// The simulation's shared source of randomness. This should be the only
	/// source of randomness used by models.
	pub rng: &'a mut dyn Uniform,
}

impl<'a> Context<'a>
{
	pub fn draw(&mut self) -> f64
	{
		self.rng.draw()
	}
}
