use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use leptos::ev;
use leptos::prelude::*;
use log::{error, info, trace, warn};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, PointerEvent, Window};

use super::config::FieldConfig;
use super::render;
use super::state::ParticleField;
use super::types::Viewport;

const FALLBACK_VIEWPORT: Viewport = Viewport {
	width: 800.0,
	height: 600.0,
};

/// Full-window canvas running a [`ParticleField`] behind the page content.
#[component]
pub fn ParticleFieldCanvas(#[prop(default = FieldConfig::default())] config: FieldConfig) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = match config.validate() {
		Ok(()) => config,
		Err(e) => {
			warn!("invalid particle field config ({e}), using defaults");
			FieldConfig::default()
		}
	};

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = context_2d(&canvas) else {
			error!("canvas has no 2d context, particle field disabled");
			return;
		};

		let viewport = window_viewport(&window);
		fit_canvas(&canvas, viewport);
		let mut field = ParticleField::from_entropy(config, config.seed_markers(viewport));
		field.start();
		info!(
			"particle field started: {} markers, {} ms tick",
			field.markers().len(),
			config.tick_interval_ms
		);
		let field = Rc::new(RefCell::new(field));

		let (field_tick, canvas_tick) = (field.clone(), canvas.clone());
		let interval = match set_interval_with_handle(
			move || {
				// A tick still holding the field means this one fires re-entrantly.
				let Ok(mut field) = field_tick.try_borrow_mut() else {
					trace!("particle field busy, tick skipped");
					return;
				};
				let viewport = web_sys::window()
					.map(|w| window_viewport(&w))
					.unwrap_or(FALLBACK_VIEWPORT);
				fit_canvas(&canvas_tick, viewport);
				let snapshot = field.tick(viewport);
				drop(field);
				render::render(&snapshot, viewport, &ctx);
			},
			Duration::from_millis(config.tick_interval_ms as u64),
		) {
			Ok(handle) => handle,
			Err(e) => {
				error!("failed to schedule particle field ticks: {e:?}");
				return;
			}
		};

		let (field_mv, canvas_mv) = (field.clone(), canvas.clone());
		let on_move = window_event_listener(ev::pointermove, move |ev: PointerEvent| {
			let (x, y) = pointer_position(&ev, &canvas_mv);
			if let Ok(mut f) = field_mv.try_borrow_mut() {
				f.pointer_move(x, y);
			}
		});

		let (field_down, canvas_down) = (field.clone(), canvas.clone());
		let on_down = window_event_listener(ev::pointerdown, move |ev: PointerEvent| {
			let (x, y) = pointer_position(&ev, &canvas_down);
			if let Ok(mut f) = field_down.try_borrow_mut() {
				f.pointer_down(x, y);
			}
		});

		let field_up = field.clone();
		let on_up = window_event_listener(ev::pointerup, move |_: PointerEvent| {
			if let Ok(mut f) = field_up.try_borrow_mut() {
				f.pointer_up();
			}
		});

		// Touch gestures taken over by the browser end with pointercancel, not pointerup.
		let field_cancel = field.clone();
		let on_cancel = window_event_listener(ev::pointercancel, move |_: PointerEvent| {
			if let Ok(mut f) = field_cancel.try_borrow_mut() {
				f.pointer_cancel();
			}
		});

		let field_out = field.clone();
		let on_out = window_event_listener(ev::pointerout, move |ev: PointerEvent| {
			// No related target: the pointer left the window, not just an element.
			if ev.related_target().is_some() {
				return;
			}
			if let Ok(mut f) = field_out.try_borrow_mut() {
				f.pointer_leave();
			}
		});

		let owned = StoredValue::new_local(field);
		on_cleanup(move || {
			interval.clear();
			for listener in [on_move, on_down, on_up, on_cancel, on_out] {
				listener.remove();
			}
			owned.try_with_value(|field| {
				if let Ok(mut f) = field.try_borrow_mut() {
					f.stop();
				}
			});
			info!("particle field stopped");
		});
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="particle-field-canvas"
			style="position: fixed; inset: 0; display: block; pointer-events: none; z-index: 0;"
		/>
	}
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
	canvas
		.get_context("2d")
		.ok()
		.flatten()
		.and_then(|ctx| ctx.dyn_into().ok())
}

fn window_viewport(window: &Window) -> Viewport {
	let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>, fallback: f64| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(fallback)
	};
	Viewport::new(
		read(window.inner_width(), FALLBACK_VIEWPORT.width),
		read(window.inner_height(), FALLBACK_VIEWPORT.height),
	)
}

fn fit_canvas(canvas: &HtmlCanvasElement, viewport: Viewport) {
	let (w, h) = (viewport.width as u32, viewport.height as u32);
	if canvas.width() != w {
		canvas.set_width(w);
	}
	if canvas.height() != h {
		canvas.set_height(h);
	}
}

fn pointer_position(ev: &PointerEvent, canvas: &HtmlCanvasElement) -> (f64, f64) {
	let rect = canvas.get_bounding_client_rect();
	(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	)
}
