use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ExmanError;
use crate::ExmanResult;
use crate::filter::FilterRule;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = ["exman.toml", ".exman.toml", ".config/exman.toml"];

/// Records file used when neither the config nor the command line names one.
pub const DEFAULT_RECORDS_FILE: &str = "examples.json";

/// Configuration loaded from an `exman.toml` file.
///
/// ```toml
/// records = "examples.yaml"
///
/// [project]
/// module = "QtQuick"
/// url_namespace = "org.qt-project.qtquick"
/// virtual_folder = "qtquick"
/// examples_install_path = "quick"
///
/// [output]
/// dir = "manifests"
///
/// [meta]
/// filters = ["highlighted", "module"]
///
/// [meta.highlighted]
/// names = ["QtQuick/Animated Tiles"]
/// attributes = ["isHighlighted"]
///
/// [meta.module]
/// names = ["*"]
/// tags = ["qt"]
/// ```
#[derive(Debug, Deserialize)]
pub struct ExmanConfig {
	/// Records document path, relative to the project root.
	#[serde(default)]
	pub records: Option<PathBuf>,
	/// Project identity and documentation URL layout.
	pub project: ProjectConfig,
	/// Output configuration for the manifest writer.
	#[serde(default)]
	pub output: OutputConfig,
	/// Filter rules applied during attribute resolution.
	#[serde(default)]
	pub meta: MetaConfig,
}

/// Project identity configuration.
///
/// The documentation root URL is assembled as
/// `<url_scheme>://<url_namespace>/<virtual_folder>/`, matching the layout
/// help systems use to address generated pages.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
	/// Module identifier, e.g. `QtQuick`. Also the source of module-derived
	/// tags.
	pub module: String,
	/// URL scheme for documentation pages.
	#[serde(default = "default_url_scheme")]
	pub url_scheme: String,
	/// Help namespace the documentation is published under.
	#[serde(default)]
	pub url_namespace: String,
	/// Virtual folder below the namespace.
	#[serde(default)]
	pub virtual_folder: String,
	/// Default install path prefixed to project files and files-to-open.
	/// Overridable per example with the `installpath` meta annotation.
	#[serde(default)]
	pub examples_install_path: String,
}

fn default_url_scheme() -> String {
	"qthelp".to_string()
}

/// Output configuration for the manifest writer.
#[derive(Debug, Deserialize)]
pub struct OutputConfig {
	/// Directory the manifest documents are written into, relative to the
	/// project root.
	#[serde(default = "default_output_dir")]
	pub dir: PathBuf,
}

impl Default for OutputConfig {
	fn default() -> Self {
		Self {
			dir: default_output_dir(),
		}
	}
}

fn default_output_dir() -> PathBuf {
	PathBuf::from("manifests")
}

/// Filter rule configuration.
///
/// `filters` names the rule ids in declaration order; each id has a matching
/// `[meta.<id>]` table. The order matters: attribute collisions across rules
/// resolve in favor of the earliest-declared rule. Ids named in `filters`
/// without a table contribute an empty rule; tables not named in `filters`
/// are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct MetaConfig {
	/// Rule ids in declaration order.
	#[serde(default)]
	pub filters: Vec<String>,
	/// Rule tables keyed by id.
	#[serde(flatten)]
	pub rules: HashMap<String, RuleConfig>,
}

/// One configured filter rule before pattern resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuleConfig {
	/// Name patterns: exact names, a lone `*`, or `prefix*`.
	#[serde(default)]
	pub names: Vec<String>,
	/// Attribute tokens of the form `name:value` or bare `name`.
	#[serde(default)]
	pub attributes: Vec<String>,
	/// Tags applied to every matching example.
	#[serde(default)]
	pub tags: Vec<String>,
}

impl MetaConfig {
	/// Build the ordered filter rule list, resolving name patterns once at
	/// load time.
	pub fn filter_rules(&self) -> Vec<FilterRule> {
		self.filters
			.iter()
			.map(|id| {
				let rule = self.rules.get(id).cloned().unwrap_or_default();
				FilterRule::new(&rule.names, &rule.attributes, rule.tags)
			})
			.collect()
	}
}

impl ExmanConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> ExmanResult<Option<ExmanConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_file(&config_path).map(Some)
	}

	/// Load the config from an explicit file path.
	pub fn load_file(path: &Path) -> ExmanResult<ExmanConfig> {
		let content = std::fs::read_to_string(path)?;
		Self::parse(&content)
	}

	/// Parse config content.
	pub fn parse(content: &str) -> ExmanResult<ExmanConfig> {
		toml::from_str(content).map_err(|e| ExmanError::ConfigParse(e.to_string()))
	}

	/// Root URL under which the generated documentation pages live, ending
	/// with `/`.
	pub fn doc_root(&self) -> String {
		format!(
			"{}://{}/{}/",
			self.project.url_scheme, self.project.url_namespace, self.project.virtual_folder
		)
	}

	/// The ordered filter rule list from the `[meta]` section.
	pub fn filter_rules(&self) -> Vec<FilterRule> {
		self.meta.filter_rules()
	}

	/// The records document path, relative to the project root.
	pub fn records_path(&self) -> PathBuf {
		self.records
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_RECORDS_FILE))
	}
}
