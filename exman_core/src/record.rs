use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::Serialize;

use crate::ExmanError;
use crate::ExmanResult;

/// Meta annotation key carrying author-supplied tags.
pub const META_TAG_KEY: &str = "tag";

/// Meta annotation key overriding the configured install path.
pub const META_INSTALL_PATH_KEY: &str = "installpath";

/// A single example discovered by the external documentation-comment parser.
///
/// Records are read-only input to the engine: missing optional fields degrade
/// to defaults or omitted attributes, never to errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
	/// Qualified example path, e.g. `animation/animatedtiles` or
	/// `demos/samegame`. The leading segment routes the example into a
	/// category; the final segment is the base name used for file
	/// prioritization.
	pub name: String,
	/// Human-readable title, e.g. `Animated Tiles`.
	pub title: String,
	/// Brief description text, when the example documentation provides one.
	#[serde(default)]
	pub brief: Option<String>,
	/// Project file relative to the example's install location.
	#[serde(default)]
	pub project_file: Option<String>,
	/// Thumbnail image file name relative to the documentation root.
	#[serde(default)]
	pub image_file: Option<String>,
	/// Files belonging to the example, in discovery order.
	#[serde(default)]
	pub files: Vec<String>,
	/// Multi-valued documentation annotations keyed by annotation name.
	#[serde(default)]
	pub meta: BTreeMap<String, Vec<String>>,
}

impl ExampleRecord {
	/// All values recorded for a meta annotation key.
	pub fn meta_values(&self, key: &str) -> &[String] {
		self.meta.get(key).map_or(&[], Vec::as_slice)
	}

	/// The install path override from the `installpath` meta annotation, when
	/// present.
	pub fn install_path_override(&self) -> Option<&str> {
		self.meta_values(META_INSTALL_PATH_KEY)
			.first()
			.map(String::as_str)
	}

	/// Final segment of the qualified name.
	pub fn base_name(&self) -> &str {
		self.name.rsplit('/').next().unwrap_or(self.name.as_str())
	}
}

/// Supported records document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordFormat {
	Json,
	Toml,
	Yaml,
}

/// Infer the records format from a file path's extension.
pub fn record_format_for_path(path: &Path) -> ExmanResult<RecordFormat> {
	let ext = path
		.extension()
		.and_then(|e| e.to_str())
		.unwrap_or("")
		.to_ascii_lowercase();
	record_format(&ext)
}

/// Resolve a records format from its name.
pub fn record_format(format: &str) -> ExmanResult<RecordFormat> {
	match format {
		"json" => Ok(RecordFormat::Json),
		"toml" => Ok(RecordFormat::Toml),
		"yaml" | "yml" => Ok(RecordFormat::Yaml),
		other => Err(ExmanError::UnsupportedRecordFormat(other.to_string())),
	}
}

/// The on-disk shape of a records document: a single `examples` list. The
/// same shape parses from JSON objects, TOML `[[examples]]` tables, and YAML
/// mappings.
#[derive(Debug, Default, Deserialize)]
struct RecordsDocument {
	#[serde(default)]
	examples: Vec<ExampleRecord>,
}

/// Parse a records document's content into example records.
///
/// `path_display` is only used in error messages.
pub fn parse_records(
	content: &str,
	format: RecordFormat,
	path_display: &str,
) -> ExmanResult<Vec<ExampleRecord>> {
	let document: RecordsDocument = match format {
		RecordFormat::Json => {
			serde_json::from_str(content).map_err(|e| ExmanError::RecordsFile {
				path: path_display.to_string(),
				reason: e.to_string(),
			})?
		}
		RecordFormat::Toml => toml::from_str(content).map_err(|e| ExmanError::RecordsFile {
			path: path_display.to_string(),
			reason: e.to_string(),
		})?,
		RecordFormat::Yaml => {
			serde_yaml_ng::from_str(content).map_err(|e| ExmanError::RecordsFile {
				path: path_display.to_string(),
				reason: e.to_string(),
			})?
		}
	};

	Ok(document.examples)
}
