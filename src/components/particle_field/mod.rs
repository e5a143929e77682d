mod component;
pub mod config;
mod render;
pub mod state;
pub mod types;

pub use component::ParticleFieldCanvas;
pub use config::{ConfigError, FieldConfig, FieldPreset};
pub use state::{DragState, ParticleField, PointerState};
pub use types::{
	ColorTag, Connection, ConnectionColor, FieldSnapshot, Marker, MarkerId, MarkerSeed,
	MarkerSnapshot, MarkerState, SizeClass, Viewport,
};
