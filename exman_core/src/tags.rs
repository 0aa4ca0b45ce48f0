use std::collections::BTreeSet;
use std::sync::OnceLock;

use derive_more::Deref;
use derive_more::DerefMut;
use regex::Regex;

use crate::record::ExampleRecord;
use crate::record::META_TAG_KEY;

/// Common words excluded from the final tag set.
const STOPWORDS: [&str; 3] = ["qt", "the", "and"];

/// Prefixes that mark a tag as structural noise.
const NOISE_PREFIXES: [&str; 2] = ["example", "chapter"];

/// The candidate tag set for one example: lowercased and deduplicated, with
/// lexicographic iteration order. Built up from the three derivation sources,
/// cleaned once, then dropped — no state survives into the next example.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref, DerefMut)]
pub struct TagSet(BTreeSet<String>);

impl TagSet {
	pub fn new() -> Self {
		Self::default()
	}

	/// Consume the set into a sorted list.
	pub fn into_sorted_vec(self) -> Vec<String> {
		self.0.into_iter().collect()
	}
}

impl FromIterator<String> for TagSet {
	fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
		Self(iter.into_iter().map(|tag| tag.to_lowercase()).collect())
	}
}

/// Tags derived from the module identifier, computed once per generation run
/// and seeded into every example's candidate set.
///
/// The identifier is split into capitalized word-runs, with a `3D` or `GL`
/// suffix glued to the preceding run:
///
/// - `QtQuickControls` → `qt`, `quick`, `controls`
/// - `QtOpenGL` → `qt`, `opengl`
/// - `QtQuick3D` → `qt`, `quick3d`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleTags(BTreeSet<String>);

impl ModuleTags {
	/// Tokenize a module identifier into lowercase word tags.
	pub fn derive(module: &str) -> Self {
		let mut tags = BTreeSet::new();
		for capture in module_word_pattern().captures_iter(module) {
			if let Some(word) = capture.get(1) {
				tags.insert(word.as_str().to_lowercase());
			}
		}

		Self(tags)
	}

	/// Add the module tags to an example's candidate set.
	pub fn seed(&self, tags: &mut TagSet) {
		tags.extend(self.0.iter().cloned());
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

fn module_word_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	// The suffixed alternative comes first so `Quick3D` captures as one run;
	// a greedy `[a-z0-9]*` would otherwise swallow the `3` and split off `D`.
	PATTERN.get_or_init(|| {
		Regex::new("([A-Z]+[a-z0-9]*?(?:3D|GL)|[A-Z]+[a-z0-9]*)").expect("pattern is valid")
	})
}

/// Add every space-separated word of the lowercased title as a candidate tag,
/// verbatim. Cleanup happens later, in [`clean_tags`].
pub fn add_title_words(title: &str, tags: &mut TagSet) {
	for word in title.to_lowercase().split(' ') {
		tags.insert(word.to_string());
	}
}

/// Add tags recorded with the multi-valued `tag` meta annotation. Each value
/// is lowercased and split on commas.
pub fn add_meta_tags(record: &ExampleRecord, tags: &mut TagSet) {
	for value in record.meta_values(META_TAG_KEY) {
		for tag in value.to_lowercase().split(',') {
			tags.insert(tag.to_string());
		}
	}
}

/// Clean up a candidate set, excluding invalid and common words.
///
/// Per candidate: a parenthesized tag loses its first and last character and
/// a trailing `:` is stripped; the tag is then discarded when shorter than
/// two characters, starting with a digit or `-`, equal to a stopword, or
/// starting with `example` or `chapter`.
pub fn clean_tags(candidates: TagSet) -> TagSet {
	let mut cleaned = TagSet::new();

	for mut tag in candidates.0 {
		if tag.starts_with('(') {
			tag.remove(0);
			tag.pop();
		}
		if tag.ends_with(':') {
			tag.pop();
		}

		let Some(first) = tag.chars().next() else {
			continue;
		};
		if tag.len() < 2
			|| first.is_ascii_digit()
			|| first == '-'
			|| STOPWORDS.contains(&tag.as_str())
			|| NOISE_PREFIXES.iter().any(|prefix| tag.starts_with(prefix))
		{
			continue;
		}

		cleaned.insert(tag);
	}

	cleaned
}
