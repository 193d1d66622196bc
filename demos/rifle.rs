//! Plays one of the stimulus generator's scenarios into the rifle and reports
//! what happened. Use --json to get the full observation trace instead of the
//! summary.
#[macro_use]
extern crate clap;
extern crate rifle_devs;
extern crate rustc_serialize;

use clap::{App, ArgMatches};
use rifle_devs::*;
use rifle_devs::models::*;
use rustc_serialize::json::{Json, ToJson};
use std::fmt::Display;
use std::io::{Write, stderr};
use std::process;
use std::str::FromStr;

struct LocalConfig
{
	scenario: Scenario,
	max_messages: i32,
	interval: f64,
	rounds: i32,
	json: bool,
}

impl LocalConfig
{
	fn new() -> LocalConfig
	{
		// These are the defaults: all of them can be overriden using command line options.
		LocalConfig {
			scenario: Scenario::TriggerCycling,
			max_messages: 30,
			interval: 1.0,
			rounds: StimulusGenerator::ROUNDS,
			json: false,
		}
	}
}

fn fatal_err(message: &str) -> !
{
	let _ = writeln!(&mut stderr(), "{}", message);
	process::exit(1);
}

// Min and max are inclusive.
fn match_num<T>(matches: &ArgMatches, name: &str, min: T, max: T) -> T
		where T: Copy + Display + FromStr + PartialOrd
{
	match value_t!(matches.value_of(name), T) {
		Ok(value) if value < min => fatal_err(&format!("--{} should be greater than {}", name, min)),
		Ok(value) if value > max => fatal_err(&format!("--{} should be less than {}", name, max)),
		Ok(value) => value,
		_ => fatal_err(&format!("--{} should be a number", name)),
	}
}

fn parse_options() -> (LocalConfig, Config)
{
	let mut local = LocalConfig::new();
	let mut config = Config::new();

	// see https://docs.rs/clap/2.24.2/clap/struct.Arg.html#method.from_usage for syntax
	let usage = format!(
		"--interval=[SECS] 'Time between generator messages [{default_interval}]'
		--json 'Print the observed messages as JSON instead of a summary'
		--log=[LEVEL:GLOB]... 'Overrides --log-level, glob is used to match component names'
		--log-level=[LEVEL] 'Default log level: {log_levels} [{default_level}]'
		--max-messages=[N] 'Number of messages the generator sends [{default_messages}]'
		--max-time=[TIME] 'Maximum time to run the simulation, use {time_suffixes} suffixes [no limit]'
		--no-colors 'Don't color code console output'
		--rounds=[N] 'Rounds loaded into the magazine at startup [{default_rounds}]'
		--scenario=[N] '1 cycles the trigger, 2 cycles magazine seating, 3 cycles the bolt [1]'
		--seed=[N] 'Random number generator seed [random]'",
		default_interval = local.interval,
		default_messages = local.max_messages,
		default_rounds = local.rounds,
		default_level = format!("{:?}", config.log_level).to_lowercase(),
		log_levels = log_levels(),
		time_suffixes = time_suffixes());

	let matches = App::new("rifle")
		.version("0.1")
		.author("Jesse Jones <jesse9jones@gmail.com>")
		.about("Simulates the firing cycle of a rifle.")
		.args_from_usage(&usage)
	.get_matches();

	if matches.is_present("scenario") {
		let number = match_num(&matches, "scenario", 1, 3);
		local.scenario = match Scenario::from_number(number) {
			Some(scenario) => scenario,
			None => fatal_err(&format!("--scenario {} is not a scenario", number)),
		};
	}

	if matches.is_present("max-messages") {
		local.max_messages = match_num(&matches, "max-messages", 1, 100_000);
	}

	if matches.is_present("interval") {
		local.interval = match_num(&matches, "interval", 0.001, 3600.0);
	}

	if matches.is_present("rounds") {
		local.rounds = match_num(&matches, "rounds", 0, magazine::MAX_ROUNDS - 1);
	}

	if matches.is_present("seed") {
		config.seed = match_num(&matches, "seed", 1, u32::max_value());
	}

	if matches.is_present("log-level") {
		if let Err(e) = config.parse_log_level(matches.value_of("log-level").unwrap()) {
			fatal_err(&e);
		}
	}

	if matches.is_present("log") {
		if let Err(e) = config.parse_log_levels(matches.values_of("log").unwrap().collect()) {
			fatal_err(&e);
		}
	}

	let max_secs = matches.value_of("max-time").unwrap_or("");
	if !max_secs.is_empty() {
		if let Err(e) = config.parse_max_secs(max_secs) {
			fatal_err(&e);
		}
	}

	config.colorize = !matches.is_present("no-colors");
	local.json = matches.is_present("json");

	(local, config)
}

fn bolt_position(value: i64) -> &'static str
{
	match value {
		0 => "forward",
		1 => "back",
		2 => "jammed",
		_ => "unknown",
	}
}

fn print_summary(local: &LocalConfig, sim: &Simulation)
{
	let store = sim.store();
	let models = sim.components().iter().filter(|c| c.atomic).count();
	println!("scenario:      {} ({} models)", local.scenario, models);
	println!("elapsed:       {:.1}s", sim.secs());
	println!("messages sent: {}", store.get_int_data("generator.messagesSent"));
	println!("shots fired:   {}", sim.count(rifle::BULLET_FIRED, 1));
	println!("casings:       {}", sim.count(rifle::CASING, 1));
	println!("duds fed:      {}", sim.count(rifle::IS_DUD, 1));
	println!("rounds left:   {}", store.get_int_data("rifle.mag_assy.magazine.bulletsLeft"));
	println!("bolt:          {}", bolt_position(store.get_int_data("rifle.bolt_assy.boltPosition")));
}

fn print_json(sim: &Simulation)
{
	let trace: Vec<Json> = sim.observations().iter().map(|o| o.to_json()).collect();
	println!("{}", Json::Array(trace).pretty());
}

fn main()
{
	let (local, config) = parse_options();

	let generator = StimulusGenerator::new(local.scenario, local.max_messages, local.interval);
	let mut sim = Simulation::new(config, "top", Child::Coupled(top::new(generator)));
	sim.inject(0.0, top::INIT_BULLETS, local.rounds);
	sim.run();

	if local.json {
		print_json(&sim);
	} else {
		print_summary(&local, &sim);
	}
}
