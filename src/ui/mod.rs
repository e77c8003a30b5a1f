//! egui rendering of the application state.

pub mod panels;
pub mod pie;
pub mod plot;
