//! UI components.

pub mod wave_field;
