// Library crate: the configurator core (store, persistence, derivation,
// composition) plus the headless harness and command protocol.
// GUI-specific modules (app, ui, viewport painter) remain in the binary crate.

pub mod appearance;
pub mod command;
pub mod compose;
pub mod controls;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod model;
pub mod persistence;
pub mod sound;
pub mod state;
