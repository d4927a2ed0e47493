//! Random-walk simulation engine.
//!
//! This module implements the snake that wanders the field: the trail it
//! drags behind it, the choice of the next cell, and the run lifecycle that
//! records finished runs and starts new ones.

pub mod rng;
pub mod trail;
pub mod planner;
pub mod observer;
pub mod controller;

pub use rng::RandomSource;
pub use trail::TrailLog;
pub use observer::{NoopObserver, Observer};
pub use controller::{SimulationController, SimulationState, TickOutcome};
