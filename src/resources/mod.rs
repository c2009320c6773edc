//! ECS resources made available to systems.
//!
//! Overview
//! - `debugmode` – presence toggles the collision/hit box overlay
//! - `gameconfig` – INI-backed window and simulation settings
//! - `input` – per-frame snapshot of the logical actions
//! - `simconfig` – frame-skip and other constants shared by all actors
//! - `texturestore` – asset path to opaque texture handle registry
//! - `worldtime` – simulation clock and frame time-scale
pub mod debugmode;
pub mod gameconfig;
pub mod input;
pub mod simconfig;
pub mod texturestore;
pub mod worldtime;
