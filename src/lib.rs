//! backdrop: Animated particle backdrop for a portfolio landing page.
//!
//! This crate provides a WASM canvas component that renders a drifting particle
//! field with proximity links over a slowly shifting gradient.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::backdrop::{AnimatedBackdrop, BackdropState, BackdropTheme, FieldConfig};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("backdrop: logging initialized");
}

/// Load simulation overrides from a script element with id="backdrop-config".
/// Expected format: a JSON object with any subset of [`FieldConfig`] fields.
pub fn load_config() -> Option<FieldConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("backdrop-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match FieldConfig::from_json(&json_text) {
		Ok(config) => {
			info!("backdrop: loaded config for {} particles", config.count);
			Some(config)
		}
		Err(e) => {
			warn!("backdrop: failed to parse config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Hosts the animated backdrop behind the page content.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Portfolio" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<AnimatedBackdrop config=config.unwrap_or_default() />
		<main class="page-content" style="position: relative;">
			<h1>"Portfolio"</h1>
		</main>
	}
}
