use glob;
use logging::*;
use std::f64::INFINITY;

/// Used to configure the `Simulation`.
pub struct Config
{
	/// Use 1_000.0 for ms, 1.0 for seconds, 0.1667 for minutes, etc.
	/// Model delays are expressed in seconds and rounded to these units.
	/// Defaults to micro-second resolution.
	pub time_units: f64,

	/// Maximum time to run the simulation for.
	/// Defaults to INFINITY.
	pub max_secs: f64,

	/// Random number generator seed.
	/// Defaults to 0 which means seed with entropy. Note that if you want
	/// deterministic results you should use a fixed seed.
	pub seed: u32,

	/// Default level for components that don't match an entry in log_levels.
	/// Defaults to Info.
	pub log_level: LogLevel,

	/// Overrides log_level for components whose names match the glob.
	/// The first match wins.
	pub log_levels: Vec<(glob::Pattern, LogLevel)>,

	/// Paths longer than this are truncated when logging, 0 means never
	/// truncate. Defaults to 0.
	pub max_log_path: usize,

	/// Use escape sequences to color code stdout.
	/// Defaults to true.
	pub colorize: bool,

	/// Used when logging to stdout when colorize is on.
	/// Defaults to bright red. See https://en.wikipedia.org/wiki/ANSI_escape_code#Colors
	/// and https://aweirdimagination.net/2015/02/21/256-color-terminals for information on
	/// color escape codes.
	pub error_escape_code: String,

	/// Used when logging to stdout when colorize is on.
	/// Defaults to red.
	pub warning_escape_code: String,

	/// Used when logging to stdout when colorize is on.
	/// Defaults to bold black.
	pub info_escape_code: String,

	/// Used when logging to stdout when colorize is on.
	/// Defaults to black.
	pub debug_escape_code: String,

	/// Used when logging to stdout when colorize is on.
	/// Defaults to light gray.
	pub excessive_escape_code: String,
}

impl Config
{
	pub fn new() -> Config
	{
		Config {
			time_units: 1_000_000.0,
			max_secs: INFINITY,
			seed: 0,
			log_level: LogLevel::Info,
			log_levels: Vec::new(),
			max_log_path: 0,
			colorize: true,
			error_escape_code: "\x1b[31;1m".to_string(),
			warning_escape_code: "\x1b[31m".to_string(),
			info_escape_code: "\x1b[30;1m".to_string(),
			debug_escape_code: "".to_string(),
			excessive_escape_code: "\x1b[1;38;5;244m".to_string(),
		}
	}

	/// Sets the default log level, e.g. "debug".
	pub fn parse_log_level(&mut self, value: &str) -> Result<(), String>
	{
		self.log_level = value.parse::<LogLevel>().map_err(|e| format!("--log-level {}", e))?;
		Ok(())
	}

	/// Each value should look like "LEVEL:GLOB", e.g. "excessive:bolt*".
	pub fn parse_log_levels(&mut self, values: Vec<&str>) -> Result<(), String>
	{
		for value in values {
			let mut parts = value.splitn(2, ':');
			let level = parts.next().unwrap_or("");
			let text = match parts.next() {
				Some(text) if !text.is_empty() => text,
				_ => return Err(format!("--log={} should be formatted as LEVEL:GLOB", value)),
			};

			let level = level.parse::<LogLevel>().map_err(|e| format!("--log={} {}", value, e))?;
			let pattern = glob::Pattern::new(text).map_err(|e| format!("--log={} has a bad glob: {}", value, e))?;
			self.log_levels.push((pattern, level));
		}
		Ok(())
	}

	/// Parses a time with an optional suffix, see `time_suffixes`.
	pub fn parse_max_secs(&mut self, value: &str) -> Result<(), String>
	{
		let (digits, scale) = if value.ends_with("ms") {
			(&value[..value.len()-2], 0.001)
		} else if value.ends_with('s') {
			(&value[..value.len()-1], 1.0)
		} else if value.ends_with('m') {
			(&value[..value.len()-1], 60.0)
		} else if value.ends_with('h') {
			(&value[..value.len()-1], 60.0*60.0)
		} else {
			(value, 1.0)
		};

		match digits.parse::<f64>() {
			Ok(secs) if secs > 0.0 => {
				self.max_secs = scale*secs;
				Ok(())
			},
			Ok(_) => Err(format!("--max-time ({}) should be positive", value)),
			Err(_) => Err(format!("--max-time ({}) should be a number with an optional {} suffix", value, time_suffixes())),
		}
	}
}

/// For use in --help messages.
pub fn time_suffixes() -> &'static str
{
	"ms, s, m, or h"
}
