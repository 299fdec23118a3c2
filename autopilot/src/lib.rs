pub mod benchmark;
pub mod config;
pub mod pacing;
pub mod pilots;
pub mod rng;
pub mod runner;
pub mod util;
