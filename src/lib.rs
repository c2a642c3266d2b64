//! desia-waves: interactive wave-field background for the Desia translator.
//!
//! This crate provides a WASM-based background component that renders a
//! seeded noise-driven field of polylines reacting to pointer movement.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::wave_field::{AnimatePolicy, Color, WaveBackground, WaveConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("desia-waves: logging initialized");
}

/// Load wave settings from a script element with id="wave-config".
/// Expected format: JSON with camelCase keys, e.g. { "waveSpeed": 0.7 }
fn load_wave_config() -> Option<WaveConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("wave-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<WaveConfig>(&json_text) {
		Ok(config) => {
			info!("desia-waves: loaded wave config (seed {})", config.seed);
			Some(config)
		}
		Err(e) => {
			warn!("desia-waves: failed to parse wave config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads settings from the DOM and renders the full-page background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_wave_config().unwrap_or_else(WaveConfig::translator);
	let config_signal = Signal::derive(move || config.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Desia Translator" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-waves">
			<WaveBackground config=config_signal />
			<div class="waves-overlay">
				<h1>"Desia"</h1>
				<p class="subtitle">"Translate between Desia, Odia and English."</p>
			</div>
		</div>
	}
}
