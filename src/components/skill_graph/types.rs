//! Skill descriptors as read from the host page.

use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One skill entry from the content source.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDescriptor {
	/// Unique identifier, also used as the label.
	#[serde(default)]
	pub id: Option<String>,
	/// Display name. Stands in for the id when the id is missing or blank.
	#[serde(default)]
	pub name: Option<String>,
	/// Category name used for category grouping.
	#[serde(default)]
	pub category: Option<String>,
	/// Proficiency on a 1-10 scale. Non-numeric values are treated as missing.
	#[serde(default, deserialize_with = "lenient_number")]
	pub proficiency: Option<f64>,
	/// Free-text description.
	#[serde(default)]
	pub description: Option<String>,
	/// Where the skill was picked up.
	#[serde(default, alias = "acquiredFrom")]
	pub learned_from: Option<String>,
}

impl SkillDescriptor {
	/// A descriptor carrying only an id.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: Some(id.into()),
			..Self::default()
		}
	}

	/// The trimmed id, falling back to the trimmed name. `None` when neither
	/// is usable.
	pub fn key(&self) -> Option<&str> {
		[self.id.as_deref(), self.name.as_deref()]
			.into_iter()
			.flatten()
			.map(str::trim)
			.find(|key| !key.is_empty())
	}
}

/// The complete input document.
#[derive(Clone, Debug, Default)]
pub struct SkillData {
	/// Descriptors in document order, malformed entries already dropped.
	pub skills: Vec<SkillDescriptor>,
}

impl SkillData {
	/// Parse a JSON document that is either a bare array of descriptors or an
	/// object with a `skills` array. Malformed entries are skipped.
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		let root: Value = serde_json::from_str(text)?;
		let entries = match root {
			Value::Array(entries) => entries,
			Value::Object(mut map) => match map.remove("skills") {
				Some(Value::Array(entries)) => entries,
				_ => {
					warn!("skill-graph: data object has no `skills` array");
					Vec::new()
				}
			},
			_ => {
				warn!("skill-graph: data is neither an array nor an object");
				Vec::new()
			}
		};

		let skills = entries
			.into_iter()
			.enumerate()
			.filter_map(|(i, entry)| match serde_json::from_value(entry) {
				Ok(skill) => Some(skill),
				Err(e) => {
					warn!("skill-graph: skipping skill #{}: {}", i, e);
					None
				}
			})
			.collect();

		Ok(Self { skills })
	}
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
	D: Deserializer<'de>,
{
	let value = Option::<Value>::deserialize(deserializer)?;
	Ok(match value {
		Some(Value::Number(n)) => n.as_f64(),
		Some(Value::String(s)) => s.trim().parse().ok(),
		_ => None,
	})
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_bare_array() {
		let data = SkillData::from_json(
			r#"[
				{"id": "Rust", "category": "Languages", "proficiency": 8, "description": "Systems", "learnedFrom": "Side projects"},
				{"id": "React", "category": "Web", "proficiency": 6}
			]"#,
		)
		.unwrap();
		assert_eq!(data.skills.len(), 2);
		assert_eq!(data.skills[0].learned_from.as_deref(), Some("Side projects"));
		assert_eq!(data.skills[1].description, None);
	}

	#[test]
	fn parses_wrapped_object_and_aliases() {
		let data = SkillData::from_json(
			r#"{"skills": [{"name": "PyTorch", "proficiency": "7", "acquiredFrom": "Coursework"}]}"#,
		)
		.unwrap();
		assert_eq!(data.skills[0].id, None);
		assert_eq!(data.skills[0].key(), Some("PyTorch"));
		assert_eq!(data.skills[0].proficiency, Some(7.0));
		assert_eq!(data.skills[0].learned_from.as_deref(), Some("Coursework"));
	}

	#[test]
	fn skips_malformed_entries() {
		let data = SkillData::from_json(
			r#"[{"category": "No id"}, {"id": "Ok", "proficiency": "lots"}, 42, {"id": 7}]"#,
		)
		.unwrap();
		assert_eq!(data.skills.len(), 2);
		assert_eq!(data.skills[0].key(), None);
		assert_eq!(data.skills[1].key(), Some("Ok"));
		assert_eq!(data.skills[1].proficiency, None);
	}

	#[test]
	fn id_and_display_name_together_are_kept() {
		let data = SkillData::from_json(
			r#"[
				{"id": "rust", "name": "Rust", "category": "Languages", "proficiency": 8},
				{"id": "go", "category": "Languages"}
			]"#,
		)
		.unwrap();
		assert_eq!(data.skills.len(), 2);
		assert_eq!(data.skills[0].key(), Some("rust"));
		assert_eq!(data.skills[0].name.as_deref(), Some("Rust"));
		assert_eq!(data.skills[1].key(), Some("go"));
	}

	#[test]
	fn blank_id_falls_back_to_name() {
		let skill = SkillDescriptor {
			id: Some("  ".into()),
			name: Some(" Zig ".into()),
			..SkillDescriptor::default()
		};
		assert_eq!(skill.key(), Some("Zig"));
		assert_eq!(SkillDescriptor::default().key(), None);
	}

	#[test]
	fn unexpected_shapes_yield_empty_data() {
		assert!(SkillData::from_json("\"hello\"").unwrap().skills.is_empty());
		assert!(SkillData::from_json("{}").unwrap().skills.is_empty());
		assert!(SkillData::from_json("not json").is_err());
	}
}
