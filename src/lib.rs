//! Orrery - Kepler orbits with pointer picking
//!
//! A library crate providing the orbit solver, the picker and the Bevy
//! plugins that wire them into an interactive scene.

pub mod camera;
pub mod ephemeris;
pub mod input;
pub mod picking;
pub mod render;
pub mod time;
pub mod types;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
