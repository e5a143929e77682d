use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use log::warn;

use crate::components::particle_field::{FieldConfig, FieldPreset, ParticleFieldCanvas};

/// Resolve the `?field=` query value, falling back to the lively preset.
fn preset_config(value: Option<String>) -> FieldConfig {
	match value.as_deref().map(str::parse::<FieldPreset>) {
		None => FieldPreset::default().config(),
		Some(Ok(preset)) => preset.config(),
		Some(Err(e)) => {
			warn!("{e}, using the default field");
			FieldPreset::default().config()
		}
	}
}

/// Landing page: studio hero over the floating-logo field.
#[component]
pub fn Home() -> impl IntoView {
	let query = use_query_map();
	let config = preset_config(query.with_untracked(|q| q.get("field")));

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>

			<div class="fullscreen-field">
				<ParticleFieldCanvas config=config />
				<div class="field-overlay">
					<h1>"We design things people remember."</h1>
					<p class="subtitle">"Brand, web and motion for teams that care about the details."</p>
				</div>
			</div>
		</ErrorBoundary>
	}
}
