/// Stable marker identity, unique for the life of a field.
pub type MarkerId = u32;

/// Discrete marker sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizeClass {
	Small,
	Medium,
	Large,
}

impl SizeClass {
	/// Drawn radius in CSS pixels.
	pub fn radius(self) -> f64 {
		match self {
			SizeClass::Small => 8.0,
			SizeClass::Medium => 12.0,
			SizeClass::Large => 16.0,
		}
	}
}

/// The two-color studio palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorTag {
	Primary,
	Accent,
}

impl ColorTag {
	/// Palette color as 8-bit RGB.
	pub fn rgb(self) -> (u8, u8, u8) {
		match self {
			ColorTag::Primary => (99, 102, 241),
			ColorTag::Accent => (236, 72, 153),
		}
	}

	/// CSS `rgba(...)` string at the given alpha.
	pub fn rgba(self, alpha: f64) -> String {
		let (r, g, b) = self.rgb();
		format!("rgba({}, {}, {}, {})", r, g, b, alpha)
	}
}

/// Color of a connection line: one palette color when both ends agree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionColor {
	Solid(ColorTag),
	Mixed,
}

impl ConnectionColor {
	/// Solid when both ends share a color, otherwise mixed.
	pub fn resolve(a: ColorTag, b: ColorTag) -> Self {
		if a == b {
			ConnectionColor::Solid(a)
		} else {
			ConnectionColor::Mixed
		}
	}
}

/// Per-marker interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerState {
	Free,
	Dragged,
}

/// Initial values for one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSeed {
	pub id: MarkerId,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: SizeClass,
	pub opacity: f64,
	pub color: ColorTag,
	pub phase: f64,
}

/// A live marker owned by the field.
#[derive(Clone, Debug, PartialEq)]
pub struct Marker {
	pub id: MarkerId,
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub size: SizeClass,
	pub opacity: f64,
	pub color: ColorTag,
	pub phase: f64,
}

impl From<MarkerSeed> for Marker {
	fn from(seed: MarkerSeed) -> Self {
		Self {
			id: seed.id,
			x: seed.x,
			y: seed.y,
			vx: seed.vx,
			vy: seed.vy,
			size: seed.size,
			opacity: seed.opacity.clamp(0.0, 1.0),
			color: seed.color,
			phase: seed.phase,
		}
	}
}

impl Marker {
	/// Euclidean distance from this marker to `(x, y)`.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		let (dx, dy) = (self.x - x, self.y - y);
		(dx * dx + dy * dy).sqrt()
	}
}

/// A proximity line between two markers, rebuilt every tick.
#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
	/// Marker ids, smaller first.
	pub ids: (MarkerId, MarkerId),
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,
	pub opacity: f64,
	pub color: ConnectionColor,
}

/// What the renderer needs to know about one marker.
#[derive(Clone, Debug, PartialEq)]
pub struct MarkerSnapshot {
	pub id: MarkerId,
	pub x: f64,
	pub y: f64,
	pub size: SizeClass,
	pub opacity: f64,
	pub color: ColorTag,
	pub phase: f64,
	pub state: MarkerState,
}

/// Immutable result of one tick, handed to the render step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FieldSnapshot {
	pub tick: u64,
	/// Simulated time in seconds, used only for cosmetic pulsing.
	pub elapsed: f64,
	pub markers: Vec<MarkerSnapshot>,
	pub connections: Vec<Connection>,
}

/// Drawable area in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
}

impl Viewport {
	/// Viewport of the given size.
	pub fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}

	/// Inclusive `(min, max)` range for one axis, never inverted.
	pub fn axis_bounds(extent: f64, margin: f64) -> (f64, f64) {
		let extent = if extent.is_finite() { extent.max(0.0) } else { 0.0 };
		if extent < margin * 2.0 {
			let mid = extent / 2.0;
			(mid, mid)
		} else {
			(margin, extent - margin)
		}
	}

	/// Midpoint of the viewport.
	pub fn center(&self) -> (f64, f64) {
		(self.width / 2.0, self.height / 2.0)
	}
}
