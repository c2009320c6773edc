//! ECS components for actors.
//!
//! Submodules overview:
//! - [`actor`] – actor kind, collision layers, health and the shared actor bundle
//! - [`attack`] – attack directions, templates and the live attack state
//! - [`boxcollider`] – corner-pair rectangles for collision and hit boxes
//! - [`mapposition`] – world-space position (pivot) of an actor
//! - [`player`] – player state machine and its bundle
//! - [`rigidbody`] – velocity and speed of an actor
//! - [`sprite`] – texture reference used when drawing an actor

pub mod actor;
pub mod attack;
pub mod boxcollider;
pub mod mapposition;
pub mod player;
pub mod rigidbody;
pub mod sprite;
