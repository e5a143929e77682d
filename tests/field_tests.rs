// Host-side checks of the particle field through its public API.

use logo_field::components::particle_field::{
	ColorTag, ConnectionColor, FieldConfig, MarkerSeed, MarkerState, ParticleField, SizeClass,
	Viewport,
};

const VIEWPORT: Viewport = Viewport {
	width: 1200.0,
	height: 800.0,
};

fn seed(id: u32, x: f64, y: f64, color: ColorTag) -> MarkerSeed {
	MarkerSeed {
		id,
		x,
		y,
		vx: 0.0,
		vy: 0.0,
		size: SizeClass::Small,
		opacity: 0.6,
		color,
		phase: 0.0,
	}
}

fn running(config: FieldConfig, seeds: Vec<MarkerSeed>) -> ParticleField {
	let mut field = ParticleField::new(config, seeds, 7);
	field.start();
	field
}

#[test]
fn markers_stay_inside_the_margins() {
	let config = FieldConfig::default();
	let mut field = running(config, config.seed_markers(VIEWPORT));
	let margin = config.boundary_margin;

	// Chase markers around so repulsion throws them at the walls.
	for step in 0..2000 {
		let t = step as f64 * 0.05;
		field.pointer_move(600.0 + 500.0 * t.cos(), 400.0 + 350.0 * (t * 1.3).sin());
		let snapshot = field.tick(VIEWPORT);
		for m in &snapshot.markers {
			assert!(m.x >= margin && m.x <= VIEWPORT.width - margin, "x out of bounds: {}", m.x);
			assert!(m.y >= margin && m.y <= VIEWPORT.height - margin, "y out of bounds: {}", m.y);
			assert!((0.0..=1.0).contains(&m.opacity));
		}
		for c in &snapshot.connections {
			assert!((0.0..=1.0).contains(&c.opacity));
		}
	}
}

#[test]
fn shrinking_viewport_applies_on_next_tick() {
	let config = FieldConfig::default();
	let mut field = running(config, config.seed_markers(VIEWPORT));
	let small = Viewport::new(300.0, 200.0);
	let snapshot = field.tick(small);
	for m in &snapshot.markers {
		assert!(m.x >= 20.0 && m.x <= 280.0);
		assert!(m.y >= 20.0 && m.y <= 180.0);
	}
}

#[test]
fn each_close_pair_appears_once() {
	let config = FieldConfig::default();
	let mut field = running(config, config.seed_markers(VIEWPORT));
	for _ in 0..200 {
		let snapshot = field.tick(VIEWPORT);
		let markers = &snapshot.markers;
		let mut expected = 0;
		for (i, a) in markers.iter().enumerate() {
			for b in &markers[i + 1..] {
				let d = ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt();
				let count = snapshot
					.connections
					.iter()
					.filter(|c| c.ids == (a.id.min(b.id), a.id.max(b.id)))
					.count();
				if d < config.connection_threshold {
					expected += 1;
					assert_eq!(count, 1);
				} else {
					assert_eq!(count, 0);
				}
			}
		}
		assert_eq!(snapshot.connections.len(), expected);
		assert!(snapshot.connections.iter().all(|c| c.ids.0 < c.ids.1));
	}
}

#[test]
fn connection_threshold_is_strict() {
	let config = FieldConfig {
		jitter: 0.0,
		..FieldConfig::default()
	};
	let t = config.connection_threshold;

	let mut near = running(
		config,
		vec![
			seed(0, 300.0, 400.0, ColorTag::Primary),
			seed(1, 300.0 + t - 1.0, 400.0, ColorTag::Primary),
		],
	);
	let snapshot = near.tick(VIEWPORT);
	assert_eq!(snapshot.connections.len(), 1);
	let c = &snapshot.connections[0];
	assert!(c.opacity > 0.0);
	assert_eq!(c.color, ConnectionColor::Solid(ColorTag::Primary));

	let mut far = running(
		config,
		vec![
			seed(0, 300.0, 400.0, ColorTag::Primary),
			seed(1, 300.0 + t + 1.0, 400.0, ColorTag::Accent),
		],
	);
	assert!(far.tick(VIEWPORT).connections.is_empty());
}

#[test]
fn mixed_colors_give_mixed_connection() {
	let field = ParticleField::new(
		FieldConfig::default(),
		vec![
			seed(4, 500.0, 400.0, ColorTag::Accent),
			seed(2, 540.0, 400.0, ColorTag::Primary),
		],
		1,
	);
	let c = &field.connections()[0];
	assert_eq!(c.ids, (2, 4));
	assert_eq!(c.color, ConnectionColor::Mixed);
	assert!((c.opacity - (110.0 / 150.0) * 0.5).abs() < 1e-9);
}

#[test]
fn repulsion_pushes_markers_away() {
	let mut field = running(
		FieldConfig::default(),
		vec![seed(0, 600.0, 400.0, ColorTag::Primary)],
	);
	let (px, py) = (540.0, 380.0);
	field.pointer_move(px, py);

	let mut last = field.markers()[0].distance_to(px, py);
	for _ in 0..10 {
		field.tick(VIEWPORT);
		let d = field.markers()[0].distance_to(px, py);
		assert!(d >= last, "distance shrank from {last} to {d}");
		last = d;
	}
}

#[test]
fn idle_opacity_settles_on_floor() {
	let config = FieldConfig::default();
	let mut s = seed(0, 600.0, 400.0, ColorTag::Accent);
	s.opacity = 0.95;
	let mut field = running(config, vec![s]);
	field.pointer_move(50.0, 50.0);

	for _ in 0..500 {
		field.tick(VIEWPORT);
		let m = &field.markers()[0];
		assert!(m.distance_to(50.0, 50.0) >= config.repulsion_radius);
		assert!(m.opacity >= config.opacity_floor);
	}
	assert_eq!(field.markers()[0].opacity, config.opacity_floor);
}

#[test]
fn markers_never_settle() {
	let mut field = running(
		FieldConfig::default(),
		vec![seed(0, 600.0, 400.0, ColorTag::Primary)],
	);
	// Jitter lands after integration, so motion starts on the second tick.
	field.tick(VIEWPORT);
	let mut previous = (600.0, 400.0);
	for _ in 0..50 {
		field.tick(VIEWPORT);
		let m = &field.markers()[0];
		assert_ne!((m.x, m.y), previous);
		previous = (m.x, m.y);
	}
}

#[test]
fn drag_round_trip() {
	let mut field = running(
		FieldConfig::default(),
		vec![
			seed(0, 200.0, 200.0, ColorTag::Primary),
			seed(1, 600.0, 400.0, ColorTag::Accent),
		],
	);
	let (x, y) = (600.0, 400.0);

	field.pointer_down(x, y);
	assert_eq!(field.dragged(), Some(1));
	assert_eq!(field.marker_state(1), Some(MarkerState::Dragged));
	assert_eq!(field.marker_state(0), Some(MarkerState::Free));

	field.pointer_move(x + 50.0, y + 30.0);
	field.tick(VIEWPORT);
	let m = field.marker(1).map(|m| (m.x, m.y, m.vx, m.vy));
	assert_eq!(m, Some((x + 50.0, y + 30.0, 0.0, 0.0)));
	assert_eq!(
		field.snapshot().markers[1].state,
		MarkerState::Dragged
	);

	field.pointer_up();
	assert_eq!(field.dragged(), None);
	assert_eq!(field.marker_state(1), Some(MarkerState::Free));
	assert!(!field.pointer().down);
	let m = field.marker(1).map(|m| (m.x, m.y));
	assert_eq!(m, Some((x + 50.0, y + 30.0)));
}

#[test]
fn drag_keeps_grab_offset() {
	let mut field = running(
		FieldConfig::default(),
		vec![seed(0, 600.0, 400.0, ColorTag::Primary)],
	);
	field.pointer_down(610.0, 395.0);
	field.pointer_move(700.0, 500.0);
	let m = field.marker(0).map(|m| (m.x, m.y));
	assert_eq!(m, Some((690.0, 505.0)));
}

#[test]
fn first_marker_wins_overlapping_hit() {
	let mut field = running(
		FieldConfig::default(),
		vec![
			seed(5, 600.0, 400.0, ColorTag::Primary),
			seed(3, 605.0, 400.0, ColorTag::Accent),
		],
	);
	field.pointer_down(604.0, 400.0);
	assert_eq!(field.dragged(), Some(5));
}

#[test]
fn empty_space_click_grabs_nothing() {
	let config = FieldConfig {
		jitter: 0.0,
		..FieldConfig::default()
	};
	let seeds = vec![
		seed(0, 200.0, 200.0, ColorTag::Primary),
		seed(1, 900.0, 600.0, ColorTag::Accent),
	];
	let mut clicked = running(config, seeds.clone());
	let mut idle = running(config, seeds);

	clicked.pointer_down(550.0, 400.0);
	assert_eq!(clicked.dragged(), None);
	assert!(clicked.pointer().down);
	clicked.pointer_move(560.0, 410.0);
	idle.pointer_move(560.0, 410.0);

	for _ in 0..20 {
		assert_eq!(clicked.tick(VIEWPORT).markers, idle.tick(VIEWPORT).markers);
	}
	clicked.pointer_up();
	assert!(!clicked.pointer().down);
}

#[test]
fn pointer_up_without_drag_only_clears_press() {
	let mut field = running(
		FieldConfig::default(),
		vec![seed(0, 600.0, 400.0, ColorTag::Primary)],
	);
	let before = field.markers()[0].clone();
	field.pointer_up();
	assert_eq!(field.markers()[0], before);
	assert!(!field.pointer().down);
}
