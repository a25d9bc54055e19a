//! Intersection Simulation Library
//!
//! A single four-way signalized intersection with adaptive green times and
//! emergency preemption. Runs headless or with a Bevy UI.

pub mod simulation;

#[cfg(feature = "ui")]
pub mod ui;
