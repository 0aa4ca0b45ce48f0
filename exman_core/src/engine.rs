use serde::Serialize;

use crate::config::ExmanConfig;
use crate::files::FileOpenEntry;
use crate::files::prioritize;
use crate::filter::FilterRule;
use crate::filter::ResolvedAttributes;
use crate::filter::resolve_meta;
use crate::record::ExampleRecord;
use crate::tags::ModuleTags;
use crate::tags::TagSet;
use crate::tags::add_meta_tags;
use crate::tags::add_title_words;
use crate::tags::clean_tags;

/// Manifest categories, generated in this order.
pub const CATEGORIES: [&str; 2] = ["examples", "demos"];

/// Name prefix that routes an example into the demos category.
const DEMOS_PREFIX: &str = "demos";

/// Attributes every example is expected to carry after resolution. Absence
/// produces an advisory diagnostic, never a failure.
const EXPECTED_ATTRIBUTES: [&str; 2] = ["imageUrl", "projectPath"];

/// Description substituted when an example has no brief text.
pub const DEFAULT_DESCRIPTION: &str = "No description available";

/// Read-only context for one generation run. Computed once from config; the
/// engine never consults config or filesystem state beyond it.
#[derive(Debug, Clone)]
pub struct ManifestContext {
	/// Module identifier, e.g. `QtQuick`.
	pub module: String,
	/// Documentation root URL, ending with `/`.
	pub doc_root: String,
	/// Default install path, normalized to end with `/` when non-empty.
	pub install_path: String,
}

impl ManifestContext {
	/// Build the run context from loaded configuration.
	pub fn from_config(config: &ExmanConfig) -> Self {
		Self {
			module: config.project.module.clone(),
			doc_root: config.doc_root(),
			install_path: normalize_install_path(&config.project.examples_install_path),
		}
	}
}

/// One example descriptor in a manifest document. Immutable after assembly;
/// handed to the external serializer verbatim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
	/// Display name (the example's title).
	pub name: String,
	/// Documentation page URL.
	pub doc_url: String,
	/// Resolved attributes in assignment order, seeded with `name` and
	/// `docUrl`.
	pub attributes: ResolvedAttributes,
	/// Brief description or [`DEFAULT_DESCRIPTION`].
	pub description: String,
	/// Final tag set, sorted lexicographically.
	pub tags: Vec<String>,
	/// Files to open on launch, ascending by priority, install path
	/// prepended.
	pub files_to_open: Vec<FileOpenEntry>,
}

/// A complete manifest document for one category. Only categories with at
/// least one matching example produce a document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestDocument {
	pub module: String,
	pub category: String,
	pub entries: Vec<ManifestEntry>,
}

/// The kind of advisory diagnostic produced during assembly.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub enum DiagnosticKind {
	/// An expected attribute was not set by the record or any filter rule.
	MissingAttribute { attribute: String },
}

/// An advisory diagnostic for one example. These are side-channel
/// notifications for the caller's diagnostics sink, not control flow.
#[derive(Debug, Clone, Serialize)]
pub struct ManifestDiagnostic {
	/// Qualified name of the example the diagnostic is about.
	pub example: String,
	pub kind: DiagnosticKind,
}

impl ManifestDiagnostic {
	/// Human-readable message for this diagnostic.
	pub fn message(&self) -> String {
		match &self.kind {
			DiagnosticKind::MissingAttribute { attribute } => {
				format!("{}: missing attribute {attribute}", self.example)
			}
		}
	}
}

/// Result of one generation run: the category documents plus the advisory
/// diagnostics collected while assembling them.
#[derive(Debug, Default)]
pub struct ManifestOutput {
	pub documents: Vec<ManifestDocument>,
	pub diagnostics: Vec<ManifestDiagnostic>,
}

impl ManifestOutput {
	/// Returns true if any advisory diagnostics were collected.
	pub fn has_warnings(&self) -> bool {
		!self.diagnostics.is_empty()
	}

	/// The document generated for a category, if the category had examples.
	pub fn document(&self, category: &str) -> Option<&ManifestDocument> {
		self.documents
			.iter()
			.find(|document| document.category == category)
	}
}

/// Assemble manifest documents for all categories.
///
/// Deterministic: given the same records, rules, and context, the output is
/// identical across runs — entries follow input order, tags are sorted, and
/// file-priority ties keep the first-seen file. Each example starts from an
/// empty candidate tag set; only the per-run module tags and the rule list
/// are shared, both read-only.
pub fn generate_manifests(
	records: &[ExampleRecord],
	rules: &[FilterRule],
	ctx: &ManifestContext,
) -> ManifestOutput {
	let module_tags = ModuleTags::derive(&ctx.module);
	let mut output = ManifestOutput::default();

	for category in CATEGORIES {
		let demos = category == "demos";
		let matching: Vec<&ExampleRecord> = records
			.iter()
			.filter(|record| is_demo(record) == demos)
			.collect();

		// A category with no matching examples produces no document at all,
		// as opposed to an empty one.
		if matching.is_empty() {
			continue;
		}

		let entries: Vec<ManifestEntry> = matching
			.into_iter()
			.map(|record| assemble_entry(record, rules, ctx, &module_tags, &mut output.diagnostics))
			.collect();

		tracing::debug!(category, entries = entries.len(), "assembled manifest document");
		output.documents.push(ManifestDocument {
			module: ctx.module.clone(),
			category: category.to_string(),
			entries,
		});
	}

	output
}

fn is_demo(record: &ExampleRecord) -> bool {
	record.name.starts_with(DEMOS_PREFIX)
}

fn assemble_entry(
	record: &ExampleRecord,
	rules: &[FilterRule],
	ctx: &ManifestContext,
	module_tags: &ModuleTags,
	diagnostics: &mut Vec<ManifestDiagnostic>,
) -> ManifestEntry {
	let doc_url = format!("{}{}.html", ctx.doc_root, file_base(&record.name));
	let install_path = record
		.install_path_override()
		.map_or_else(|| ctx.install_path.clone(), normalize_install_path);

	// Attributes that are always set for the entry.
	let mut attributes = ResolvedAttributes::new();
	attributes.insert("name", record.title.as_str());
	attributes.insert("docUrl", doc_url.as_str());

	if let Some(project_file) = record.project_file.as_deref().filter(|f| !f.is_empty()) {
		attributes.insert("projectPath", format!("{install_path}{project_file}"));
	}
	if let Some(image_file) = record.image_file.as_deref().filter(|f| !f.is_empty()) {
		attributes.insert("imageUrl", format!("{}{image_file}", ctx.doc_root));
	}

	let qualified_name = format!("{}/{}", ctx.module, record.title);
	let mut tags = TagSet::new();
	resolve_meta(&qualified_name, rules, &mut attributes, &mut tags);

	for attribute in EXPECTED_ATTRIBUTES {
		if !attributes.contains(attribute) {
			diagnostics.push(ManifestDiagnostic {
				example: record.name.clone(),
				kind: DiagnosticKind::MissingAttribute {
					attribute: attribute.to_string(),
				},
			});
		}
	}

	module_tags.seed(&mut tags);
	add_meta_tags(record, &mut tags);
	add_title_words(&record.title, &mut tags);
	let tags = clean_tags(tags);

	let description = record
		.brief
		.clone()
		.filter(|brief| !brief.is_empty())
		.unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

	let files_to_open = prioritize(&record.files, record.base_name())
		.into_iter()
		.map(|entry| FileOpenEntry {
			path: format!("{install_path}{}", entry.path),
			..entry
		})
		.collect();

	ManifestEntry {
		name: record.title.clone(),
		doc_url,
		attributes,
		description,
		tags: tags.into_sorted_vec(),
		files_to_open,
	}
}

/// Documentation file base for an example: the record name lowercased with
/// path separators and spaces collapsed to `-`.
fn file_base(name: &str) -> String {
	name.to_lowercase().replace(['/', ' '], "-")
}

/// Normalize an install path so a non-empty path always ends with `/`.
pub fn normalize_install_path(path: &str) -> String {
	if path.is_empty() || path.ends_with('/') {
		path.to_string()
	} else {
		format!("{path}/")
	}
}
