//! Roadrush - pseudo-3D lane racer.
//!
//! A cyclic track of fixed-length segments is projected through a pinhole
//! camera each tick, painted far to near, and populated with lane traffic and
//! roadside scenery. The binary wires the plugins below into a Bevy app.

pub mod audio;
pub mod camera;
pub mod game_state;
pub mod render;
pub mod simulation;
pub mod ui;
pub mod world;
