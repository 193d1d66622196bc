use std::fmt;

/// To better support deterministic execution time is stored
/// using 64-bit integers. The units are set by `Config::time_units`,
/// by default micro-seconds.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Time(pub i64);	// unsigned would give us more range, but makes it awkward to use times in the past

impl fmt::Display for Time
{
	fn fmt(&self, formatter: &mut fmt::Formatter) -> fmt::Result
	{
		write!(formatter, "{}", self.0)
	}
}
