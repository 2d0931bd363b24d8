use std::fmt;

use serde::{
	Deserialize, Deserializer,
	de::{self, MapAccess, Visitor},
};

use crate::{Error, Result};

/// Mapping key that older mapping files use to route a multi-select property into note tags.
const TAG_KEY: &str = "tag";

/// One Notion database bound to one Anki deck and note type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRule {
	pub deck: String,
	pub model: String,
	/// Notion database id.
	pub source_id: String,
	/// Mapping key -> Notion property name.
	pub property_map: FieldMap,
	/// Mapping key -> Anki field name.
	pub field_map: FieldMap,
	/// Multi-select property whose labels become note tags.
	pub tags_property: Option<String>,
}

/// String-to-string map that keeps document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap(Vec<(String, String)>);
impl FieldMap {
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.get(key).is_some()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(k, _)| k.as_str())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}
impl FromIterator<(String, String)> for FieldMap {
	/// Keys are taken as given; deserialization is what rejects duplicates.
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (String, String)>,
	{
		Self(iter.into_iter().collect())
	}
}
impl<'de> Deserialize<'de> for FieldMap {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		deserializer.deserialize_map(FieldMapVisitor)
	}
}

struct FieldMapVisitor;
impl<'de> Visitor<'de> for FieldMapVisitor {
	type Value = FieldMap;

	fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("an object with string values")
	}

	fn visit_map<A>(self, mut access: A) -> Result<FieldMap, A::Error>
	where
		A: MapAccess<'de>,
	{
		let mut entries: Vec<(String, String)> = Vec::with_capacity(access.size_hint().unwrap_or(0));

		while let Some((key, value)) = access.next_entry::<String, String>()? {
			if entries.iter().any(|(existing, _)| *existing == key) {
				return Err(de::Error::custom(format!("duplicate key `{key}`")));
			}

			entries.push((key, value));
		}

		Ok(FieldMap(entries))
	}
}

#[derive(Debug, Deserialize)]
struct MappingDocument {
	mappings: Vec<RawRule>,
}

/// A rule as written; required keys are checked in [`RawRule::into_rule`].
#[derive(Debug, Deserialize)]
struct RawRule {
	deck: Option<String>,
	model: Option<String>,
	notion_database_id: Option<String>,
	notion_properties: Option<FieldMap>,
	fields: Option<FieldMap>,
	tags_property: Option<String>,
}
impl RawRule {
	fn into_rule(self, index: usize) -> Result<MappingRule> {
		let deck = required(index, "deck", self.deck)?;
		let model = required(index, "model", self.model)?;
		let source_id = required(index, "notion_database_id", self.notion_database_id)?;
		let property_map = required(index, "notion_properties", self.notion_properties)?;
		let field_map = required(index, "fields", self.fields)?;
		let tags_property = self.tags_property.or_else(|| {
			if field_map.contains_key(TAG_KEY) {
				property_map.get(TAG_KEY).map(str::to_string)
			} else {
				None
			}
		});
		let rule = MappingRule { deck, model, source_id, property_map, field_map, tags_property };

		validate_rule(index, &rule)?;

		Ok(rule)
	}
}

/// Parses a mapping document into rules, in document order.
pub fn parse_mappings(document: &str) -> Result<Vec<MappingRule>> {
	let document: MappingDocument =
		serde_json::from_str(document).map_err(|source| Error::ParseMappings { source })?;

	document.mappings.into_iter().enumerate().map(|(index, raw)| raw.into_rule(index)).collect()
}

/// Every `fields` key needs a Notion property to read from.
fn validate_rule(index: usize, rule: &MappingRule) -> Result<()> {
	for key in rule.field_map.keys() {
		if !rule.property_map.contains_key(key) {
			return Err(Error::Validation {
				message: format!(
					"mappings[{index}].fields.{key} has no matching entry in notion_properties."
				),
			});
		}
	}

	Ok(())
}

fn required<T>(index: usize, key: &str, value: Option<T>) -> Result<T> {
	value.ok_or_else(|| Error::Validation {
		message: format!("mappings[{index}] is missing required key {key}."),
	})
}
