//! Tunables for the particle field and the default marker layout.

use std::str::FromStr;

use thiserror::Error;

use super::types::{ColorTag, MarkerSeed, SizeClass, Viewport};

/// Upper bound for random velocity noise, in pixels per tick.
pub const MAX_NOISE: f64 = 50.0;

/// Every constant the simulation reads. Two presets ship: [`FieldConfig::default`]
/// (lively, 20 Hz) and [`FieldConfig::relaxed`] (10 Hz).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
	pub tick_interval_ms: u32,
	pub repulsion_radius: f64,
	/// Impulse per pixel of penetration into the repulsion radius.
	pub repulsion_strength: f64,
	pub connection_threshold: f64,
	pub connection_opacity_scale: f64,
	/// Uniform velocity multiplier applied every tick.
	pub damping_factor: f64,
	/// Velocity multiplier applied on a wall bounce.
	pub bounce_damping: f64,
	pub opacity_floor: f64,
	pub opacity_ceiling: f64,
	pub opacity_rise: f64,
	pub opacity_decay: f64,
	pub jitter: f64,
	/// Half-width of the uniform velocity given to a released marker.
	pub release_speed: f64,
	pub hit_radius: f64,
	pub boundary_margin: f64,
	pub marker_count: usize,
}

impl Default for FieldConfig {
	fn default() -> Self {
		Self {
			tick_interval_ms: 50,
			repulsion_radius: 160.0,
			repulsion_strength: 0.003,
			connection_threshold: 150.0,
			connection_opacity_scale: 0.5,
			damping_factor: 0.999,
			bounce_damping: 0.8,
			opacity_floor: 0.4,
			opacity_ceiling: 1.0,
			opacity_rise: 0.1,
			opacity_decay: 0.01,
			jitter: 0.001,
			release_speed: 0.3,
			hit_radius: 30.0,
			boundary_margin: 20.0,
			marker_count: LAYOUT.len(),
		}
	}
}

impl FieldConfig {
	/// Slower 10 Hz variant with a tighter repulsion zone and longer lines.
	pub fn relaxed() -> Self {
		Self {
			tick_interval_ms: 100,
			repulsion_radius: 120.0,
			connection_threshold: 180.0,
			connection_opacity_scale: 0.8,
			jitter: 0.002,
			release_speed: 0.5,
			..Self::default()
		}
	}

	/// Check every tunable against the range the simulation can handle.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.tick_interval_ms == 0 {
			return Err(ConfigError::ZeroTickInterval);
		}
		for (field, value) in [
			("repulsion_radius", self.repulsion_radius),
			("connection_threshold", self.connection_threshold),
			("hit_radius", self.hit_radius),
		] {
			if !(value.is_finite() && value > 0.0) {
				return Err(ConfigError::NotPositive { field, value });
			}
		}
		for (field, value) in [
			("repulsion_strength", self.repulsion_strength),
			("opacity_rise", self.opacity_rise),
			("opacity_decay", self.opacity_decay),
			("boundary_margin", self.boundary_margin),
		] {
			if !(value.is_finite() && value >= 0.0) {
				return Err(ConfigError::Negative { field, value });
			}
		}
		for (field, value, low, high) in [
			("damping_factor", self.damping_factor, f64::MIN_POSITIVE, 1.0),
			("bounce_damping", self.bounce_damping, 0.0, 1.0),
			("connection_opacity_scale", self.connection_opacity_scale, 0.0, 1.0),
			("opacity_floor", self.opacity_floor, 0.0, 1.0),
			("opacity_ceiling", self.opacity_ceiling, 0.0, 1.0),
			("jitter", self.jitter, 0.0, MAX_NOISE),
			("release_speed", self.release_speed, 0.0, MAX_NOISE),
		] {
			if !(low..=high).contains(&value) {
				return Err(ConfigError::OutOfRange {
					field,
					value,
					low,
					high,
				});
			}
		}
		if self.opacity_floor > self.opacity_ceiling {
			return Err(ConfigError::InvertedOpacity {
				floor: self.opacity_floor,
				ceiling: self.opacity_ceiling,
			});
		}
		Ok(())
	}

	/// Lay out `marker_count` markers over `viewport` from the built-in table.
	pub fn seed_markers(&self, viewport: Viewport) -> Vec<MarkerSeed> {
		let (x_lo, x_hi) = Viewport::axis_bounds(viewport.width, self.boundary_margin);
		let (y_lo, y_hi) = Viewport::axis_bounds(viewport.height, self.boundary_margin);

		(0..self.marker_count)
			.map(|i| {
				let slot = &LAYOUT[i % LAYOUT.len()];
				// Later rounds of the table shift slightly so markers do not stack.
				let round = (i / LAYOUT.len()) as f64;
				let fx = (slot.fx + round * 0.037) % 1.0;
				let fy = (slot.fy + round * 0.053) % 1.0;
				MarkerSeed {
					id: i as u32,
					x: x_lo + fx * (x_hi - x_lo),
					y: y_lo + fy * (y_hi - y_lo),
					vx: slot.vx,
					vy: slot.vy,
					size: slot.size,
					opacity: 0.4 + 0.3 * ((i % 3) as f64 / 2.0),
					color: if i % 2 == 0 {
						ColorTag::Primary
					} else {
						ColorTag::Accent
					},
					phase: i as f64 * 0.4,
				}
			})
			.collect()
	}
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
	#[error("tick interval must be at least 1 ms")]
	ZeroTickInterval,
	#[error("{field} must be a positive finite number, got {value}")]
	NotPositive { field: &'static str, value: f64 },
	#[error("{field} must not be negative, got {value}")]
	Negative { field: &'static str, value: f64 },
	#[error("{field} must lie in [{low}, {high}], got {value}")]
	OutOfRange {
		field: &'static str,
		value: f64,
		low: f64,
		high: f64,
	},
	#[error("opacity floor {floor} is above ceiling {ceiling}")]
	InvertedOpacity { floor: f64, ceiling: f64 },
	#[error("unknown field preset {0:?}")]
	UnknownPreset(String),
}

/// Named configurations, selectable from the page URL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FieldPreset {
	#[default]
	Lively,
	Relaxed,
}

impl FieldPreset {
	/// The configuration this preset names.
	pub fn config(self) -> FieldConfig {
		match self {
			FieldPreset::Lively => FieldConfig::default(),
			FieldPreset::Relaxed => FieldConfig::relaxed(),
		}
	}
}

impl FromStr for FieldPreset {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"lively" => Ok(FieldPreset::Lively),
			"relaxed" => Ok(FieldPreset::Relaxed),
			_ => Err(ConfigError::UnknownPreset(s.to_string())),
		}
	}
}

struct Slot {
	fx: f64,
	fy: f64,
	vx: f64,
	vy: f64,
	size: SizeClass,
}

const fn slot(fx: f64, fy: f64, vx: f64, vy: f64, size: SizeClass) -> Slot {
	Slot {
		fx,
		fy,
		vx,
		vy,
		size,
	}
}

const LAYOUT: [Slot; 14] = [
	slot(0.08, 0.12, 0.20, 0.15, SizeClass::Large),
	slot(0.85, 0.10, -0.15, 0.20, SizeClass::Medium),
	slot(0.22, 0.78, 0.18, -0.12, SizeClass::Small),
	slot(0.72, 0.82, -0.22, -0.10, SizeClass::Large),
	slot(0.45, 0.30, 0.10, 0.25, SizeClass::Small),
	slot(0.15, 0.45, 0.25, -0.05, SizeClass::Medium),
	slot(0.92, 0.50, -0.12, 0.18, SizeClass::Small),
	slot(0.55, 0.62, 0.15, 0.12, SizeClass::Medium),
	slot(0.35, 0.08, -0.18, 0.22, SizeClass::Large),
	slot(0.65, 0.25, 0.22, -0.15, SizeClass::Small),
	slot(0.05, 0.90, 0.12, -0.20, SizeClass::Medium),
	slot(0.95, 0.92, -0.20, -0.18, SizeClass::Small),
	slot(0.40, 0.95, 0.08, -0.25, SizeClass::Large),
	slot(0.78, 0.42, -0.25, 0.08, SizeClass::Medium),
];
