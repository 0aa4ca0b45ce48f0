use std::collections::BTreeSet;

use serde::Serialize;
use serde::Serializer;
use serde::ser::SerializeMap;

use crate::tags::TagSet;

/// Wildcard marker recognized in rule name patterns.
pub const WILDCARD: char = '*';

/// A rule name pattern, resolved once at rule-load time so matching never
/// rescans the pattern string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
	/// Matches only on exact equality with the qualified name.
	Exact(String),
	/// A leading `*` — matches every name.
	CatchAll,
	/// Matches any name starting with the literal prefix before the first
	/// `*`. A marker anywhere past the start degrades to this prefix match;
	/// anything after the marker is dropped rather than treated as glob
	/// syntax.
	Prefix(String),
}

impl NamePattern {
	/// Classify a configured pattern string.
	pub fn parse(pattern: &str) -> Self {
		match pattern.find(WILDCARD) {
			None => Self::Exact(pattern.to_string()),
			Some(0) => Self::CatchAll,
			Some(pos) => Self::Prefix(pattern[..pos].to_string()),
		}
	}

	/// Whether the pattern matches a qualified example name.
	pub fn matches(&self, qualified_name: &str) -> bool {
		match self {
			Self::Exact(name) => qualified_name == name,
			Self::CatchAll => true,
			Self::Prefix(prefix) => qualified_name.starts_with(prefix.as_str()),
		}
	}
}

/// One attribute assignment carried by a filter rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
	pub name: String,
	pub value: String,
}

impl AttributeSpec {
	/// Parse a `name:value` token. A bare `name` implies the value `true`;
	/// a value containing further `:` separators is kept whole.
	pub fn parse(token: &str) -> Self {
		match token.split_once(':') {
			None => Self {
				name: token.to_string(),
				value: "true".to_string(),
			},
			Some((name, value)) => Self {
				name: name.to_string(),
				value: value.to_string(),
			},
		}
	}
}

/// A configured filter rule mapping name patterns to attributes and tags.
/// Immutable once loaded; one rule may match many examples.
#[derive(Debug, Clone, Default)]
pub struct FilterRule {
	pub patterns: Vec<NamePattern>,
	pub attributes: Vec<AttributeSpec>,
	pub tags: BTreeSet<String>,
}

impl FilterRule {
	/// Build a rule from configured pattern, attribute, and tag strings.
	pub fn new<S: AsRef<str>>(
		names: &[S],
		attributes: &[S],
		tags: impl IntoIterator<Item = String>,
	) -> Self {
		Self {
			patterns: names
				.iter()
				.map(|name| NamePattern::parse(name.as_ref()))
				.collect(),
			attributes: attributes
				.iter()
				.map(|token| AttributeSpec::parse(token.as_ref()))
				.collect(),
			// Tag sets are case-normalized everywhere; rule tags are no
			// exception.
			tags: tags.into_iter().map(|tag| tag.to_lowercase()).collect(),
		}
	}

	/// Whether any of the rule's patterns matches the qualified name.
	pub fn matches(&self, qualified_name: &str) -> bool {
		self.patterns
			.iter()
			.any(|pattern| pattern.matches(qualified_name))
	}
}

/// Resolved attributes for one example: an insertion-ordered mapping with
/// unique keys where the first assignment wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedAttributes {
	entries: Vec<(String, String)>,
}

impl ResolvedAttributes {
	pub fn new() -> Self {
		Self::default()
	}

	/// Whether an attribute name has already been set.
	pub fn contains(&self, name: &str) -> bool {
		self.entries.iter().any(|(existing, _)| existing == name)
	}

	/// Set an attribute unless the name is already used. Returns whether the
	/// value was written.
	pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> bool {
		let name = name.into();
		if self.contains(&name) {
			return false;
		}

		self.entries.push((name, value.into()));
		true
	}

	/// The value set for an attribute name, if any.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(existing, _)| existing == name)
			.map(|(_, value)| value.as_str())
	}

	/// Attribute pairs in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(name, value)| (name.as_str(), value.as_str()))
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl Serialize for ResolvedAttributes {
	/// Serialize as a map in insertion order, keeping output byte-stable
	/// regardless of the serializer's own map type.
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		let mut map = serializer.serialize_map(Some(self.entries.len()))?;
		for (name, value) in &self.entries {
			map.serialize_entry(name, value)?;
		}
		map.end()
	}
}

/// Apply every matching rule's tags and attributes for one example.
///
/// Rules are evaluated in declaration order across the *whole* rule list —
/// every matching rule contributes, and attribute collisions resolve
/// first-writer-wins through the used-key check in
/// [`ResolvedAttributes::insert`], never by short-circuiting on the first
/// matching rule. Zero matching rules is not an error; the example simply
/// gains nothing from this stage.
pub fn resolve_meta(
	qualified_name: &str,
	rules: &[FilterRule],
	attributes: &mut ResolvedAttributes,
	tags: &mut TagSet,
) {
	for rule in rules {
		if !rule.matches(qualified_name) {
			continue;
		}

		tags.extend(rule.tags.iter().cloned());
		for attribute in &rule.attributes {
			if attributes.insert(attribute.name.as_str(), attribute.value.as_str()) {
				tracing::trace!(
					name = %attribute.name,
					example = qualified_name,
					"attribute set by filter rule"
				);
			}
		}
	}
}
