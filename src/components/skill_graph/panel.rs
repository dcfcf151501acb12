//! Overlay widgets around the canvas: grouping picker, usage hint, and the
//! detail panel listing selected skills.

use leptos::prelude::*;

use super::component::GraphHandle;
use super::model::GroupingMode;
use super::state::SkillDetail;

const OVERLAY_STYLE: &str = "position: absolute; color: #e6e8ee; \
	font: 13px system-ui, sans-serif; background: rgba(16, 19, 27, 0.82); \
	border: 1px solid rgba(120, 130, 150, 0.3); border-radius: 8px;";

/// One button per grouping mode; the active one is highlighted.
#[component]
pub fn GroupingPicker(handle: GraphHandle) -> impl IntoView {
	let mode = handle.mode();

	view! {
		<nav
			class="skill-graph-grouping"
			style=format!("{} top: 16px; left: 16px; padding: 4px; display: flex; gap: 4px;", OVERLAY_STYLE)
		>
			{GroupingMode::ALL
				.into_iter()
				.map(|option| {
					view! {
						<button
							class="grouping-option"
							class:active=move || mode.get() == option
							style:opacity=move || if mode.get() == option { "1" } else { "0.55" }
							on:click=move |_| handle.set_grouping(option)
						>
							{option.label()}
						</button>
					}
				})
				.collect_view()}
		</nav>
	}
}

/// Shown until the first click or drag.
#[component]
pub fn UsageHint(handle: GraphHandle) -> impl IntoView {
	let hint = handle.hint();

	view! {
		<Show when=move || hint.get()>
			<div
				class="skill-graph-hint"
				style=format!(
					"{} bottom: 24px; left: 50%; transform: translateX(-50%); padding: 8px 14px; pointer-events: none;",
					OVERLAY_STYLE,
				)
			>
				"Click a skill to see details. Drag to toss it around."
			</div>
		</Show>
	}
}

/// Selected skills in selection order, each with a collapsible detail section.
#[component]
pub fn DetailPanel(handle: GraphHandle) -> impl IntoView {
	let details = handle.details();

	view! {
		<Show when=move || details.with(|d| !d.is_empty())>
			<aside
				class="skill-graph-details"
				style=format!(
					"{} top: 16px; right: 16px; width: 280px; max-height: calc(100% - 32px); overflow-y: auto; padding: 10px;",
					OVERLAY_STYLE,
				)
			>
				<header style="display: flex; justify-content: space-between; align-items: center; margin-bottom: 8px;">
					<span>{move || format!("{} selected", details.with(Vec::len))}</span>
					<button class="skill-graph-clear" on:click=move |_| handle.deselect_all()>
						"Clear"
					</button>
				</header>
				<For
					each=move || details.get()
					key=|detail| (detail.id.clone(), detail.expanded)
					children=move |detail| view! { <SkillCard detail=detail handle=handle /> }
				/>
			</aside>
		</Show>
	}
}

#[component]
fn SkillCard(detail: SkillDetail, handle: GraphHandle) -> impl IntoView {
	let summary = detail.summary();
	let SkillDetail {
		id,
		description,
		learned_from,
		color,
		expanded,
		..
	} = detail;
	let marker = if expanded { "\u{25be}" } else { "\u{25b8}" };
	let title = id.clone();

	let body = expanded.then(move || {
		let empty = description.is_empty() && learned_from.is_empty();
		let description = (!description.is_empty()).then(|| view! { <p>{description}</p> });
		let learned_from = (!learned_from.is_empty())
			.then(|| view! { <p class="learned-from">"Learned from: " {learned_from}</p> });
		view! {
			<div class="skill-card-body" style="padding: 4px 0 4px 18px; opacity: 0.85;">
				{description}
				{learned_from}
				{empty.then(|| view! { <p style="opacity: 0.6;">"No further details."</p> })}
			</div>
		}
	});

	view! {
		<section
			class="skill-card"
			style=format!("border-left: 3px solid {}; padding-left: 8px; margin: 6px 0;", color)
		>
			<button
				class="skill-card-title"
				style="background: none; border: none; color: inherit; font: inherit; cursor: pointer; padding: 2px 0;"
				on:click=move |_| handle.toggle_expanded(&id)
			>
				{marker} " " {title}
			</button>
			<span class="skill-card-summary" style="margin-left: 8px; opacity: 0.7;">
				{summary}
			</span>
			{body}
		</section>
	}
}
