//! Graph model: skill nodes and the links derived from a grouping mode.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use log::warn;

use super::scale::ProficiencyScale;
use super::theme::Color;
use super::types::SkillData;
use super::util::stable_hash;

/// Index of a node in the node list. Used by all per-frame loops.
pub type NodeHandle = usize;

/// Category assigned to skills that arrive without one.
pub const DEFAULT_CATEGORY: &str = "Other";

/// A skill with its derived visual attributes.
#[derive(Clone, Debug)]
pub struct SkillNode {
	/// Unique id, also the label.
	pub id: String,
	/// Category, or [`DEFAULT_CATEGORY`].
	pub category: String,
	/// Proficiency clamped to 1..=10.
	pub proficiency: u8,
	/// Empty when the descriptor had none.
	pub description: String,
	/// Empty when the descriptor had none.
	pub learned_from: String,
	/// Deterministic per-id color used for selection highlighting.
	pub ring_color: Color,
	/// Visual and collision radius in CSS pixels.
	pub radius: f64,
	/// Area relative to the largest possible node, in `(0, 1]`.
	pub relative_area: f64,
}

/// An unordered pair of linked nodes, stored with `source < target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Link {
	/// The lower handle.
	pub source: NodeHandle,
	/// The higher handle.
	pub target: NodeHandle,
}

impl Link {
	/// Link `a` and `b` in either order.
	pub fn new(a: NodeHandle, b: NodeHandle) -> Self {
		Self {
			source: a.min(b),
			target: a.max(b),
		}
	}
}

/// How nodes are grouped into linked clusters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupingMode {
	/// One cluster per category.
	#[default]
	Category,
	/// One cluster per proficiency level.
	Proficiency,
	/// No links at all.
	None,
}

impl GroupingMode {
	/// Every mode, in picker order.
	pub const ALL: [GroupingMode; 3] = [
		GroupingMode::Category,
		GroupingMode::Proficiency,
		GroupingMode::None,
	];

	/// Lowercase name, accepted back by `FromStr`.
	pub fn as_str(self) -> &'static str {
		match self {
			GroupingMode::Category => "category",
			GroupingMode::Proficiency => "proficiency",
			GroupingMode::None => "none",
		}
	}

	/// Human-readable label for the picker.
	pub fn label(self) -> &'static str {
		match self {
			GroupingMode::Category => "Category",
			GroupingMode::Proficiency => "Proficiency",
			GroupingMode::None => "None",
		}
	}
}

impl fmt::Display for GroupingMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GroupingMode {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"category" => Ok(GroupingMode::Category),
			"proficiency" => Ok(GroupingMode::Proficiency),
			"none" | "ungrouped" => Ok(GroupingMode::None),
			other => Err(format!("unknown grouping mode `{}`", other)),
		}
	}
}

/// Deterministic ring color for a node id.
pub fn ring_color(id: &str) -> Color {
	let hue = (stable_hash(id) % 360) as f64;
	Color::from_hsl(hue, 0.65, 0.62)
}

/// Build nodes from descriptors. A descriptor is keyed by its id, or by its
/// name when the id is missing. Keyless and duplicate entries are skipped.
pub fn build_nodes(data: &SkillData, scale: &ProficiencyScale) -> Vec<SkillNode> {
	let mut seen = HashSet::new();
	let mut nodes = Vec::with_capacity(data.skills.len());

	for skill in &data.skills {
		let Some(id) = skill.key() else {
			warn!("skill-graph: skipping skill with neither id nor name");
			continue;
		};
		if !seen.insert(id.to_string()) {
			warn!("skill-graph: skipping duplicate skill id `{}`", id);
			continue;
		}

		let proficiency = ProficiencyScale::clamp(skill.proficiency.unwrap_or(1.0)).round();
		let category = skill
			.category
			.as_deref()
			.map(str::trim)
			.filter(|c| !c.is_empty())
			.unwrap_or(DEFAULT_CATEGORY);

		nodes.push(SkillNode {
			id: id.to_string(),
			category: category.to_string(),
			proficiency: proficiency as u8,
			description: skill.description.clone().unwrap_or_default(),
			learned_from: skill.learned_from.clone().unwrap_or_default(),
			ring_color: ring_color(id),
			radius: scale.radius(proficiency),
			relative_area: scale.relative_area(proficiency),
		});
	}

	nodes
}

/// Connect every pair of nodes that share a group under `mode`.
///
/// Groups are visited in order of first appearance so the output is stable.
pub fn build_links(nodes: &[SkillNode], mode: GroupingMode) -> Vec<Link> {
	let key = |node: &SkillNode| -> Option<String> {
		match mode {
			GroupingMode::Category => Some(node.category.clone()),
			GroupingMode::Proficiency => Some(node.proficiency.to_string()),
			GroupingMode::None => None,
		}
	};

	let mut order: Vec<String> = Vec::new();
	let mut groups: HashMap<String, Vec<NodeHandle>> = HashMap::new();
	for (handle, node) in nodes.iter().enumerate() {
		let Some(k) = key(node) else {
			continue;
		};
		groups
			.entry(k.clone())
			.or_insert_with(|| {
				order.push(k);
				Vec::new()
			})
			.push(handle);
	}

	let mut links = Vec::new();
	for k in &order {
		let members = &groups[k];
		for (i, &a) in members.iter().enumerate() {
			for &b in &members[i + 1..] {
				links.push(Link::new(a, b));
			}
		}
	}
	links
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::skill_graph::types::SkillDescriptor;

	fn skill(id: &str, category: &str, proficiency: f64) -> SkillDescriptor {
		SkillDescriptor {
			category: Some(category.to_string()),
			proficiency: Some(proficiency),
			..SkillDescriptor::new(id)
		}
	}

	fn sample() -> Vec<SkillNode> {
		let data = SkillData {
			skills: vec![
				skill("Rust", "Languages", 8.0),
				skill("Python", "Languages", 9.0),
				skill("Go", "Languages", 5.0),
				skill("React", "Web", 5.0),
				skill("CSS", "Web", 4.0),
			],
		};
		build_nodes(&data, &ProficiencyScale::default())
	}

	#[test]
	fn category_grouping_builds_complete_subgraphs() {
		let nodes = sample();
		let links = build_links(&nodes, GroupingMode::Category);
		// K3 for Languages + K2 for Web
		assert_eq!(links.len(), 3 + 1);
		assert!(links.contains(&Link::new(0, 2)));
		assert!(links.contains(&Link::new(3, 4)));
		assert!(links.iter().all(|l| l.source < l.target));
	}

	#[test]
	fn proficiency_grouping_links_equal_levels() {
		let nodes = sample();
		let links = build_links(&nodes, GroupingMode::Proficiency);
		assert_eq!(links, vec![Link::new(2, 3)]);
	}

	#[test]
	fn ungrouped_has_no_links() {
		assert!(build_links(&sample(), GroupingMode::None).is_empty());
	}

	#[test]
	fn nodes_get_defaults_and_skip_duplicates() {
		let data = SkillData {
			skills: vec![
				SkillDescriptor {
					proficiency: Some(42.0),
					..SkillDescriptor::new("Solo")
				},
				skill("Solo", "Again", 3.0),
				skill("  ", "Blank", 3.0),
			],
		};
		let nodes = build_nodes(&data, &ProficiencyScale::default());
		assert_eq!(nodes.len(), 1);
		assert_eq!(nodes[0].category, DEFAULT_CATEGORY);
		assert_eq!(nodes[0].proficiency, 10);
		assert!(nodes[0].description.is_empty());
		assert!(nodes[0].learned_from.is_empty());
	}

	#[test]
	fn name_stands_in_for_a_missing_id() {
		let data = SkillData {
			skills: vec![
				SkillDescriptor {
					id: Some("ts".into()),
					name: Some("TypeScript".into()),
					..SkillDescriptor::default()
				},
				SkillDescriptor {
					name: Some("Elixir".into()),
					..SkillDescriptor::default()
				},
				SkillDescriptor {
					name: Some("ts".into()),
					..SkillDescriptor::default()
				},
				SkillDescriptor::default(),
			],
		};
		let nodes = build_nodes(&data, &ProficiencyScale::default());
		let ids: Vec<_> = nodes.iter().map(|n| n.id.as_str()).collect();
		assert_eq!(ids, ["ts", "Elixir"]);
	}

	#[test]
	fn radius_comes_from_the_shared_scale() {
		let scale = ProficiencyScale::default();
		for node in sample() {
			assert_eq!(node.radius, scale.radius(node.proficiency as f64));
		}
	}

	#[test]
	fn ring_color_is_deterministic() {
		assert_eq!(ring_color("Rust"), ring_color("Rust"));
		assert_eq!(ring_color("Rust").a, 1.0);
	}

	#[test]
	fn grouping_mode_round_trips_through_str() {
		for mode in GroupingMode::ALL {
			assert_eq!(mode.as_str().parse::<GroupingMode>(), Ok(mode));
		}
		assert!("bogus".parse::<GroupingMode>().is_err());
	}
}
