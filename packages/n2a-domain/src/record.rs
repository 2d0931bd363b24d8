use std::collections::HashMap;

/// One row of a source database, keyed by property name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord {
	pub id: String,
	pub properties: HashMap<String, PropertyValue>,
}
impl RawRecord {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), properties: HashMap::new() }
	}

	pub fn with(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
		self.properties.insert(name.into(), value);

		self
	}

	pub fn get(&self, name: &str) -> Option<&PropertyValue> {
		self.properties.get(name)
	}
}

/// Typed property value as the source reports it.
///
/// Text-like variants hold their segments unjoined; rendering decides how they combine.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
	Title(Vec<String>),
	RichText(Vec<String>),
	Select(Option<String>),
	Status(Option<String>),
	MultiSelect(Vec<String>),
	Number(Option<f64>),
	UniqueId { prefix: Option<String>, number: Option<u64> },
	Url(Option<String>),
	Email(Option<String>),
	PhoneNumber(Option<String>),
	Checkbox(bool),
	/// Any property type without a text rendering; holds the type name.
	Unsupported(String),
}
impl PropertyValue {
	pub fn text(value: impl Into<String>) -> Self {
		Self::RichText(vec![value.into()])
	}
}
