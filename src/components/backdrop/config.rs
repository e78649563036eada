//! Simulation constants for the particle field.
//!
//! Every value here has a default matching the stock backdrop. The host page can
//! override any subset through JSON (see [`crate::load_config`]); fields left out
//! keep their defaults.

use serde::Deserialize;

/// Tunables for spawning, moving and linking particles.
///
/// All distances are in canvas pixels, all durations in frames.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
	/// Number of particles in the pool.
	pub count: usize,
	/// Half-open range the resting radius is sampled from.
	pub size_range: (f64, f64),
	/// Half-open range the lifetime is sampled from, in frames.
	pub life_range: (u32, u32),
	/// Each velocity component is sampled from `[-max_speed, max_speed)`.
	pub max_speed: f64,
	/// Radius change per frame while oscillating.
	pub size_step: f64,
	/// Oscillation amplitude as a fraction of the resting radius.
	pub size_swing: f64,
	/// Pairs closer than this are linked.
	pub link_distance: f64,
	/// Stroke width of proximity links.
	pub link_width: f64,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			count: 150,
			size_range: (1.0, 3.0),
			life_range: (200, 300),
			max_speed: 0.5,
			size_step: 0.05,
			size_swing: 0.5,
			link_distance: 100.0,
			link_width: 0.5,
		}
	}
}

impl FieldConfig {
	/// Parses a JSON override document on top of the defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn partial_json_keeps_defaults() {
		let config = FieldConfig::from_json(r#"{ "count": 40, "link_distance": 80.0 }"#).unwrap();
		assert_eq!(config.count, 40);
		assert_eq!(config.link_distance, 80.0);
		assert_eq!(config.size_range, (1.0, 3.0));
		assert_eq!(config.life_range, (200, 300));
	}

	#[test]
	fn empty_object_is_default() {
		assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
	}

	#[test]
	fn malformed_json_is_rejected() {
		assert!(FieldConfig::from_json("{ count: }").is_err());
		assert!(FieldConfig::from_json(r#"{ "count": -1 }"#).is_err());
	}
}
