use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub enum LogLevel
{
	Error,	// update log_levels if this changes
	Warning,
	Info,
	Debug,
	Excessive
}

/// For use in --help messages.
pub fn log_levels() -> &'static str
{
	"error, warning, info, debug, or excessive"
}

impl FromStr for LogLevel
{
	type Err = String;

	fn from_str(s: &str) -> Result<LogLevel, String>
	{
		match s {
			"error" => Ok(LogLevel::Error),
			"warning" => Ok(LogLevel::Warning),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			"excessive" => Ok(LogLevel::Excessive),
			_ => Err(format!("log level should be {}", log_levels())),
		}
	}
}

#[macro_export]
macro_rules! log_error
{
	($effector:expr) => ($effector.log($crate::logging::LogLevel::Error, ""));
	($effector:expr, $msg:expr) => ($effector.log($crate::logging::LogLevel::Error, $msg));
	($effector:expr, $fmt:expr, $($arg:tt)*) => ($effector.log($crate::logging::LogLevel::Error, &format!($fmt, $($arg)*)));
}

#[macro_export]
macro_rules! log_warning
{
	($effector:expr) => ($effector.log($crate::logging::LogLevel::Warning, ""));
	($effector:expr, $msg:expr) => ($effector.log($crate::logging::LogLevel::Warning, $msg));
	($effector:expr, $fmt:expr, $($arg:tt)*) => ($effector.log($crate::logging::LogLevel::Warning, &format!($fmt, $($arg)*)));
}

/// # Examples
///
/// ```rust,ignore
/// log_info!(effector);						// logs an empty line
/// log_info!(effector, "hello");			// logs a string
/// log_info!(effector, "x = {:?}", x);	// logs using a format string
/// ```
#[macro_export]
macro_rules! log_info
{
	($effector:expr) => ($effector.log($crate::logging::LogLevel::Info, ""));
	($effector:expr, $msg:expr) => ($effector.log($crate::logging::LogLevel::Info, $msg));
	($effector:expr, $fmt:expr, $($arg:tt)*) => ($effector.log($crate::logging::LogLevel::Info, &format!($fmt, $($arg)*)));
}

#[macro_export]
macro_rules! log_debug
{
	($effector:expr) => ($effector.log($crate::logging::LogLevel::Debug, ""));
	($effector:expr, $msg:expr) => ($effector.log($crate::logging::LogLevel::Debug, $msg));
	($effector:expr, $fmt:expr, $($arg:tt)*) => ($effector.log($crate::logging::LogLevel::Debug, &format!($fmt, $($arg)*)));
}

#[macro_export]
macro_rules! log_excessive
{
	($effector:expr) => ($effector.log($crate::logging::LogLevel::Excessive, ""));
	($effector:expr, $msg:expr) => ($effector.log($crate::logging::LogLevel::Excessive, $msg));
	($effector:expr, $fmt:expr, $($arg:tt)*) => ($effector.log($crate::logging::LogLevel::Excessive, &format!($fmt, $($arg)*)));
}

#[cfg(test)]
mod tests
{
	use super::*;

	#[test]
	fn parses_levels()
	{
		assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
		assert_eq!("excessive".parse::<LogLevel>(), Ok(LogLevel::Excessive));
		assert!("loud".parse::<LogLevel>().is_err());
	}

	#[test]
	fn levels_are_ordered()
	{
		assert!(LogLevel::Error < LogLevel::Warning);
		assert!(LogLevel::Debug < LogLevel::Excessive);
	}
}
