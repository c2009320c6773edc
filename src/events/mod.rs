//! Events and the observers that react to them.
//!
//! Submodules:
//! - [`damage`] – damage dealt by attacks, applied to victims' health
//! - [`switchdebug`] – toggle the debug box overlay
pub mod damage;
pub mod switchdebug;
