use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::config::FieldConfig;
use super::types::{
	Connection, ConnectionColor, FieldSnapshot, Marker, MarkerId, MarkerSeed, MarkerSnapshot,
	MarkerState, Viewport,
};

/// Distances below this are treated as this, so directions never divide by zero.
const MIN_DISTANCE: f64 = 1e-6;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragState {
	pub marker: MarkerId,
	pub offset_x: f64,
	pub offset_y: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerState {
	/// `None` until the first pointer event, and after the pointer leaves.
	pub position: Option<(f64, f64)>,
	pub down: bool,
	pub drag: Option<DragState>,
}

/// Floating-logo simulation: markers, their proximity graph and pointer interaction.
pub struct ParticleField {
	config: FieldConfig,
	markers: Vec<Marker>,
	connections: Vec<Connection>,
	pointer: PointerState,
	rng: StdRng,
	running: bool,
	ticks: u64,
	/// Clamp range `(x_lo, x_hi, y_lo, y_hi)` from the most recent tick.
	bounds: Option<(f64, f64, f64, f64)>,
}

impl ParticleField {
	/// Build a field from `seeds` with a deterministic random source.
	pub fn new(config: FieldConfig, seeds: Vec<MarkerSeed>, seed: u64) -> Self {
		Self::with_rng(config, seeds, StdRng::seed_from_u64(seed))
	}

	/// Build a field whose jitter and release velocities come from system entropy.
	pub fn from_entropy(config: FieldConfig, seeds: Vec<MarkerSeed>) -> Self {
		Self::with_rng(config, seeds, StdRng::from_entropy())
	}

	fn with_rng(config: FieldConfig, seeds: Vec<MarkerSeed>, rng: StdRng) -> Self {
		let markers: Vec<Marker> = seeds.into_iter().map(Marker::from).collect();
		let mut field = Self {
			config,
			markers,
			connections: Vec::new(),
			pointer: PointerState::default(),
			rng,
			running: false,
			ticks: 0,
			bounds: None,
		};
		field.rebuild_connections();
		field
	}

	/// Resume advancing on `tick`.
	pub fn start(&mut self) {
		self.running = true;
	}

	/// Freeze the field; `tick` then only reports the current state.
	pub fn stop(&mut self) {
		self.running = false;
	}

	/// Whether `tick` currently advances the simulation.
	pub fn is_running(&self) -> bool {
		self.running
	}

	/// The tunables this field was built with.
	pub fn config(&self) -> &FieldConfig {
		&self.config
	}

	/// Markers in creation order.
	pub fn markers(&self) -> &[Marker] {
		&self.markers
	}

	/// Connections from the latest rebuild.
	pub fn connections(&self) -> &[Connection] {
		&self.connections
	}

	/// Current pointer and drag state.
	pub fn pointer(&self) -> &PointerState {
		&self.pointer
	}

	/// Number of ticks advanced while running.
	pub fn tick_count(&self) -> u64 {
		self.ticks
	}

	/// Look up a marker by id.
	pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
		self.markers.iter().find(|m| m.id == id)
	}

	/// Id of the marker being dragged, if any.
	pub fn dragged(&self) -> Option<MarkerId> {
		self.pointer.drag.map(|d| d.marker)
	}

	/// `Free` or `Dragged` for a known marker, `None` for an unknown id.
	pub fn marker_state(&self, id: MarkerId) -> Option<MarkerState> {
		self.marker(id).map(|_| {
			if self.dragged() == Some(id) {
				MarkerState::Dragged
			} else {
				MarkerState::Free
			}
		})
	}

	/// Advance one step inside `viewport` and report what to draw.
	pub fn tick(&mut self, viewport: Viewport) -> FieldSnapshot {
		if !self.running {
			return self.snapshot();
		}

		let cfg = self.config;
		let (x_lo, x_hi) = Viewport::axis_bounds(viewport.width, cfg.boundary_margin);
		let (y_lo, y_hi) = Viewport::axis_bounds(viewport.height, cfg.boundary_margin);
		let (cx, cy) = ((x_lo + x_hi) / 2.0, (y_lo + y_hi) / 2.0);
		self.bounds = Some((x_lo, x_hi, y_lo, y_hi));
		let pointer = self.pointer.position;
		let drag = self.pointer.drag;

		for marker in &mut self.markers {
			if let Some(drag) = drag.filter(|d| d.marker == marker.id) {
				if let Some((px, py)) = pointer {
					marker.x = px - drag.offset_x;
					marker.y = py - drag.offset_y;
				}
				marker.vx = 0.0;
				marker.vy = 0.0;
				marker.x = finite_or(marker.x, cx).clamp(x_lo, x_hi);
				marker.y = finite_or(marker.y, cy).clamp(y_lo, y_hi);
				continue;
			}

			let near = pointer.and_then(|(px, py)| {
				let dist = marker.distance_to(px, py);
				(dist < cfg.repulsion_radius).then_some((px, py, dist))
			});
			match near {
				Some((px, py, dist)) => {
					let safe = dist.max(MIN_DISTANCE);
					let push = (cfg.repulsion_radius - dist) * cfg.repulsion_strength;
					marker.vx += (marker.x - px) / safe * push;
					marker.vy += (marker.y - py) / safe * push;
					marker.opacity = (marker.opacity + cfg.opacity_rise).min(cfg.opacity_ceiling);
				}
				None => {
					marker.opacity = if marker.opacity > cfg.opacity_floor {
						(marker.opacity - cfg.opacity_decay).max(cfg.opacity_floor)
					} else {
						(marker.opacity + cfg.opacity_decay).min(cfg.opacity_floor)
					};
				}
			}
			marker.opacity = finite_or(marker.opacity, cfg.opacity_floor).clamp(0.0, 1.0);

			marker.x += marker.vx;
			marker.y += marker.vy;

			bounce(&mut marker.x, &mut marker.vx, x_lo, x_hi, cx, cfg.bounce_damping);
			bounce(&mut marker.y, &mut marker.vy, y_lo, y_hi, cy, cfg.bounce_damping);

			marker.vx *= cfg.damping_factor;
			marker.vy *= cfg.damping_factor;

			marker.vx += spread(&mut self.rng, cfg.jitter);
			marker.vy += spread(&mut self.rng, cfg.jitter);
		}

		self.rebuild_connections();
		self.ticks += 1;
		self.snapshot()
	}

	/// Record a pointer move; a dragged marker follows it immediately.
	pub fn pointer_move(&mut self, x: f64, y: f64) {
		self.pointer.position = Some((x, y));
		let Some(drag) = self.pointer.drag else {
			return;
		};
		let bounds = self.bounds;
		if let Some(marker) = self.markers.iter_mut().find(|m| m.id == drag.marker) {
			marker.x = x - drag.offset_x;
			marker.y = y - drag.offset_y;
			// Before the first tick there is no viewport to clamp against.
			if let Some((x_lo, x_hi, y_lo, y_hi)) = bounds {
				marker.x = finite_or(marker.x, (x_lo + x_hi) / 2.0).clamp(x_lo, x_hi);
				marker.y = finite_or(marker.y, (y_lo + y_hi) / 2.0).clamp(y_lo, y_hi);
			}
		}
	}

	/// Press at `(x, y)`: grabs the first marker, in creation order, within the hit radius.
	pub fn pointer_down(&mut self, x: f64, y: f64) {
		self.pointer.position = Some((x, y));
		self.pointer.down = true;
		if self.pointer.drag.is_some() {
			return;
		}

		let hit_radius = self.config.hit_radius;
		let Some(marker) = self
			.markers
			.iter_mut()
			.find(|m| m.distance_to(x, y) < hit_radius)
		else {
			return;
		};

		marker.vx = 0.0;
		marker.vy = 0.0;
		self.pointer.drag = Some(DragState {
			marker: marker.id,
			offset_x: x - marker.x,
			offset_y: y - marker.y,
		});
		debug!("[field] begin drag on marker {}", marker.id);
	}

	/// Release: frees the dragged marker, if any, with a small random velocity.
	pub fn pointer_up(&mut self) {
		self.pointer.down = false;
		let Some(drag) = self.pointer.drag.take() else {
			return;
		};

		let speed = self.config.release_speed;
		if let Some(marker) = self.markers.iter_mut().find(|m| m.id == drag.marker) {
			marker.vx = spread(&mut self.rng, speed);
			marker.vy = spread(&mut self.rng, speed);
			debug!(
				"[field] released marker {} at ({:.1}, {:.1})",
				marker.id, marker.x, marker.y
			);
		}
	}

	/// The gesture was cancelled by the platform; ends it like a release.
	pub fn pointer_cancel(&mut self) {
		if let Some(id) = self.dragged() {
			debug!("[field] drag on marker {} cancelled", id);
		}
		self.pointer_up();
	}

	/// The pointer left the window. Repulsion stops until it returns; a drag is kept.
	pub fn pointer_leave(&mut self) {
		if self.pointer.drag.is_none() {
			self.pointer.position = None;
		}
	}

	/// Copy of the current state in render form.
	pub fn snapshot(&self) -> FieldSnapshot {
		let dragged = self.dragged();
		FieldSnapshot {
			tick: self.ticks,
			elapsed: self.ticks as f64 * self.config.tick_interval_ms as f64 / 1000.0,
			markers: self
				.markers
				.iter()
				.map(|m| MarkerSnapshot {
					id: m.id,
					x: m.x,
					y: m.y,
					size: m.size,
					opacity: m.opacity,
					color: m.color,
					phase: m.phase,
					state: if dragged == Some(m.id) {
						MarkerState::Dragged
					} else {
						MarkerState::Free
					},
				})
				.collect(),
			connections: self.connections.clone(),
		}
	}

	fn rebuild_connections(&mut self) {
		let threshold = self.config.connection_threshold;
		let scale = self.config.connection_opacity_scale;
		self.connections.clear();

		for (i, a) in self.markers.iter().enumerate() {
			for b in &self.markers[i + 1..] {
				let dist = a.distance_to(b.x, b.y);
				if !(dist < threshold) {
					continue;
				}
				let opacity = ((threshold - dist) / threshold).max(0.0) * scale;
				self.connections.push(Connection {
					ids: (a.id.min(b.id), a.id.max(b.id)),
					x1: a.x,
					y1: a.y,
					x2: b.x,
					y2: b.y,
					opacity: opacity.clamp(0.0, 1.0),
					color: ConnectionColor::resolve(a.color, b.color),
				});
			}
		}
	}
}

/// Uniform draw in `[-half_width, half_width]`; non-finite or negative widths give 0.
fn spread(rng: &mut StdRng, half_width: f64) -> f64 {
	if half_width.is_finite() && half_width > 0.0 {
		rng.gen_range(-1.0f64..=1.0) * half_width
	} else {
		0.0
	}
}

fn finite_or(value: f64, fallback: f64) -> f64 {
	if value.is_finite() { value } else { fallback }
}

/// Keep one axis inside `[lo, hi]`, reflecting and damping velocity on contact.
fn bounce(pos: &mut f64, vel: &mut f64, lo: f64, hi: f64, fallback: f64, damping: f64) {
	if !pos.is_finite() || !vel.is_finite() {
		*pos = fallback;
		*vel = 0.0;
	}
	if *pos < lo {
		*pos = lo;
		*vel = -*vel * damping;
	} else if *pos > hi {
		*pos = hi;
		*vel = -*vel * damping;
	}
}
