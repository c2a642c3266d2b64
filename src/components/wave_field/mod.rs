//! Interactive wave-field background.
//!
//! Renders a grid of vertical polylines as SVG paths, displaced every frame by:
//! - A seeded simplex-noise oscillation
//! - A damped spring pushed by nearby pointer movement
//!
//! The animation pauses when the container scrolls out of view and the grid is
//! rebuilt when the container is resized or its geometry settings change.
//!
//! # Example
//!
//! ```ignore
//! use desia_waves::{WaveBackground, WaveConfig};
//!
//! view! { <WaveBackground config=WaveConfig::translator() /> }
//! ```

mod component;
pub mod config;
pub mod grid;
pub mod host;
pub mod lifecycle;
pub mod noise;
pub mod pointer;
pub mod render;
pub mod simulate;
mod web;

pub use component::WaveBackground;
pub use config::{AnimatePolicy, Color, WaveConfig};
pub use host::{Host, Measurement};
pub use lifecycle::{LoopState, WaveController};
