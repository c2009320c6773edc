//! Scythefall library.
//!
//! Exposes the actor simulation (components, resources, systems, events and
//! the [`simulation::Simulation`] driver) for the binary and integration tests.

pub mod components;
pub mod events;
pub mod game;
pub mod resources;
pub mod simulation;
pub mod systems;
