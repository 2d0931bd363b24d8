use serde::{Serialize, Serializer, ser::SerializeMap};

use n2a_config::MappingRule;

use crate::{PropertyValue, RawRecord};

/// Anki field name -> text, in mapping order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFields(Vec<(String, String)>);
impl RenderedFields {
	pub fn get(&self, field: &str) -> Option<&str> {
		self.0.iter().find(|(name, _)| name == field).map(|(_, text)| text.as_str())
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.0.iter().map(|(name, text)| (name.as_str(), text.as_str()))
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(|(name, _)| name.as_str())
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn push(&mut self, field: impl Into<String>, text: impl Into<String>) {
		self.0.push((field.into(), text.into()));
	}
}
impl Serialize for RenderedFields {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.0.len()))?;

		for (name, text) in &self.0 {
			map.serialize_entry(name, text)?;
		}

		map.end()
	}
}

/// Renders every field the rule declares. Missing or unsupported properties become empty text.
pub fn project(rule: &MappingRule, record: &RawRecord) -> RenderedFields {
	let mut fields = RenderedFields::default();

	for (key, field) in rule.field_map.iter() {
		let text = rule
			.property_map
			.get(key)
			.and_then(|property| record.get(property))
			.map(render)
			.unwrap_or_default();

		fields.push(field, text);
	}

	fields
}

/// Labels of the rule's tag property, with whitespace replaced since Anki splits tags on it.
pub fn project_tags(rule: &MappingRule, record: &RawRecord) -> Vec<String> {
	let Some(PropertyValue::MultiSelect(labels)) =
		rule.tags_property.as_deref().and_then(|property| record.get(property))
	else {
		return Vec::new();
	};

	labels
		.iter()
		.map(|label| label.split_whitespace().collect::<Vec<_>>().join("_"))
		.filter(|tag| !tag.is_empty())
		.collect()
}

pub fn render(value: &PropertyValue) -> String {
	match value {
		PropertyValue::Title(segments) | PropertyValue::RichText(segments) => segments.concat(),
		PropertyValue::Select(option) | PropertyValue::Status(option) =>
			option.clone().unwrap_or_default(),
		PropertyValue::MultiSelect(labels) => labels.join(", "),
		PropertyValue::Number(number) => number.map(|n| n.to_string()).unwrap_or_default(),
		PropertyValue::UniqueId { prefix, number } => match (prefix, number) {
			(Some(prefix), Some(number)) => format!("{prefix}-{number}"),
			(None, Some(number)) => number.to_string(),
			(_, None) => String::new(),
		},
		PropertyValue::Url(text) | PropertyValue::Email(text) | PropertyValue::PhoneNumber(text) =>
			text.clone().unwrap_or_default(),
		PropertyValue::Checkbox(checked) => checked.to_string(),
		PropertyValue::Unsupported(_) => String::new(),
	}
}
