//! Simulation and presentation systems.
//!
//! Submodules overview
//! - [`attack`] – age, move and hit-test live attacks
//! - [`input`] – read the keyboard into [`crate::resources::input::InputState`]
//! - [`player`] – player animation, attacks and blocked movement
//! - [`render`] – draw actors and the debug overlay using Raylib
//! - [`setup`] – resolve texture handles for newly added actors
//! - [`time`] – advance the simulation clock

pub mod attack;
pub mod input;
pub mod player;
pub mod render;
pub mod setup;
pub mod time;
