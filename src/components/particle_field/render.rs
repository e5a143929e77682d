use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::types::{ColorTag, Connection, ConnectionColor, FieldSnapshot, MarkerSnapshot, Viewport};

const BACKGROUND: &str = "#0f0f1a";

/// Pulse amplitude as a fraction of the marker radius.
const PULSE: f64 = 0.08;

pub fn render(snapshot: &FieldSnapshot, viewport: Viewport, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
	for connection in &snapshot.connections {
		draw_connection(connection, ctx);
	}
	for marker in &snapshot.markers {
		draw_marker(marker, snapshot.elapsed, ctx);
	}
}

fn draw_connection(c: &Connection, ctx: &CanvasRenderingContext2d) {
	if c.opacity <= 0.0 {
		return;
	}
	ctx.set_line_width(1.0);
	match c.color {
		ConnectionColor::Solid(tag) => {
			ctx.set_stroke_style_str(&tag.rgba(c.opacity));
		}
		ConnectionColor::Mixed => {
			let gradient = ctx.create_linear_gradient(c.x1, c.y1, c.x2, c.y2);
			let _ = gradient.add_color_stop(0.0, &ColorTag::Primary.rgba(c.opacity));
			let _ = gradient.add_color_stop(1.0, &ColorTag::Accent.rgba(c.opacity));
			#[allow(deprecated)]
			ctx.set_stroke_style(&gradient);
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(6.0),
				&JsValue::from_f64(4.0),
			));
		}
	}
	ctx.begin_path();
	ctx.move_to(c.x1, c.y1);
	ctx.line_to(c.x2, c.y2);
	ctx.stroke();
	let _ = ctx.set_line_dash(&js_sys::Array::new());
}

fn draw_marker(m: &MarkerSnapshot, elapsed: f64, ctx: &CanvasRenderingContext2d) {
	let pulse = 1.0 + PULSE * (elapsed * 2.0 + m.phase).sin();
	let radius = m.size.radius() * pulse;

	// Halo first so the disc sits on top of it.
	if let Ok(halo) = ctx.create_radial_gradient(m.x, m.y, radius * 0.5, m.x, m.y, radius * 2.2) {
		let _ = halo.add_color_stop(0.0, &m.color.rgba(m.opacity * 0.35));
		let _ = halo.add_color_stop(1.0, &m.color.rgba(0.0));
		ctx.begin_path();
		let _ = ctx.arc(m.x, m.y, radius * 2.2, 0.0, 2.0 * PI);
		#[allow(deprecated)]
		ctx.set_fill_style(&halo);
		ctx.fill();
	}

	ctx.begin_path();
	let _ = ctx.arc(m.x, m.y, radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&m.color.rgba(m.opacity));
	ctx.fill();

	// Inner ring reads as the studio mark at small sizes.
	ctx.begin_path();
	let _ = ctx.arc(m.x, m.y, radius * 0.55, 0.0, 2.0 * PI);
	ctx.set_stroke_style_str(&format!("rgba(255, 255, 255, {})", m.opacity * 0.6));
	ctx.set_line_width(1.5);
	ctx.stroke();
}
