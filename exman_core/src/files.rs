use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

/// Extension opened with the highest preference on a base-name match.
const UI_MARKUP_EXT: &str = ".qml";
/// Primary-language source extension.
const SOURCE_EXT: &str = ".cpp";
/// Header extension.
const HEADER_EXT: &str = ".h";

/// Suffixes matched regardless of the base name; the UI-markup entry point
/// takes precedence over the source entry point.
const MAIN_UI_SUFFIX: &str = "main.qml";
const MAIN_SOURCE_SUFFIX: &str = "main.cpp";

/// A file selected for opening when the example is launched. The entry with
/// the numerically lowest priority opens first and is flagged main.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileOpenEntry {
	pub path: String,
	pub priority: u8,
	pub main: bool,
}

/// Lowest priority reserved for the fallback entry points (`main.qml`,
/// `main.cpp`). Any same-base-name match suppresses these.
const FALLBACK_PRIORITY: u8 = 3;

/// Rank an example's candidate files for the open-on-launch list.
///
/// Priorities: `0` base-name match with the UI-markup extension, `1`
/// base-name match with the source extension, `2` base-name match with the
/// header extension, `3` any `main.qml`, `4` any `main.cpp`. Base-name
/// comparison is case-insensitive; files matching no rule are excluded, and
/// the fallback entry points only survive when no base-name match exists.
/// The first file to claim a priority slot keeps it — later equal-priority
/// candidates never overwrite the first. The result is ordered ascending by
/// priority with the lowest surviving entry flagged main.
pub fn prioritize(files: &[String], example_base_name: &str) -> Vec<FileOpenEntry> {
	let mut slots: BTreeMap<u8, &String> = BTreeMap::new();

	for file in files {
		let name = file_name(file).to_lowercase();
		let priority = if base_name(&name).eq_ignore_ascii_case(example_base_name) {
			if name.ends_with(UI_MARKUP_EXT) {
				Some(0)
			} else if name.ends_with(SOURCE_EXT) {
				Some(1)
			} else if name.ends_with(HEADER_EXT) {
				Some(2)
			} else {
				None
			}
		} else if name.ends_with(MAIN_UI_SUFFIX) {
			Some(3)
		} else if name.ends_with(MAIN_SOURCE_SUFFIX) {
			Some(4)
		} else {
			None
		};

		if let Some(priority) = priority {
			slots.entry(priority).or_insert(file);
		}
	}

	if slots.keys().next().copied().unwrap_or(u8::MAX) < FALLBACK_PRIORITY {
		let _ = slots.split_off(&FALLBACK_PRIORITY);
	}

	let main_priority = slots.keys().next().copied();
	slots
		.into_iter()
		.map(|(priority, path)| FileOpenEntry {
			path: path.clone(),
			priority,
			main: Some(priority) == main_priority,
		})
		.collect()
}

/// Final path segment of a file path.
fn file_name(path: &str) -> &str {
	path.rsplit('/').next().unwrap_or(path)
}

/// File name up to the first `.`.
fn base_name(file_name: &str) -> &str {
	file_name.split('.').next().unwrap_or(file_name)
}
