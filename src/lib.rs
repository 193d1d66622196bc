//! Discrete event (DEVS) simulation of a rifle's firing cycle. Atomic models
//! (magazine, bullet, trigger group, bolt, chamber) are wired together by
//! coupled models and driven by a `Simulation` which owns the clock.
extern crate glob;
extern crate rand;
extern crate rustc_serialize;
extern crate time;

#[macro_use]
pub mod logging;

pub mod atomic;
pub mod component;
pub mod components;
pub mod config;
pub mod context;
pub mod coupled;
pub mod effector;
pub mod event;
pub mod models;
pub mod ports;
pub mod random;
pub mod sim_time;
pub mod simulation;
pub mod store;

pub use atomic::*;
pub use component::*;
pub use components::*;
pub use config::*;
pub use context::*;
pub use coupled::*;
pub use effector::*;
pub use event::*;
pub use logging::*;
pub use ports::*;
pub use random::*;
pub use sim_time::*;
pub use simulation::*;
pub use store::*;
