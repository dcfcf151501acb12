//! skill-graph: interactive skill visualization for a portfolio page.
//!
//! This crate provides a WASM-based component that draws a set of skills as a
//! bouncing, draggable graph over a warped grid, with selectable nodes and a
//! detail panel.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::skill_graph::{
	GraphConfig, GroupingMode, SkillData, SkillDescriptor, SkillGraph, Theme,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("skill-graph: logging initialized");
}

/// Load skills from a script element with id="skill-data".
/// Expected format: a JSON array of skills, or `{ "skills": [...] }`.
fn load_skill_data() -> Option<SkillData> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("skill-data")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match SkillData::from_json(&json_text) {
		Ok(data) => {
			info!("skill-graph: loaded {} skills", data.skills.len());
			Some(data)
		}
		Err(e) => {
			warn!("skill-graph: failed to parse skill data: {}", e);
			None
		}
	}
}

/// Main application component.
/// Loads skills from the DOM and renders the graph.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let skill_data = load_skill_data().unwrap_or_default();
	let skill_signal = Signal::derive(move || skill_data.clone());

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Skills" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<SkillGraph data=skill_signal />
	}
}
