use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Generate example-catalog manifests for development-environment browsers.",
	long_about = "exman (example manifests) turns example metadata extracted from a \
	              documentation corpus into machine-readable manifest documents consumed by IDE \
	              example browsers.\n\nConfigured filter rules attach attributes and tags to \
	              matching examples; titles, module names, and meta annotations are tokenized \
	              into a cleaned tag set; and each example gets a prioritized list of files to \
	              open on launch.\n\nQuick start:\n  exman generate  Write one manifest document \
	              per category\n  exman check     Verify the documents on disk are up to date\n  \
	              exman list      Print the resolved entries without writing"
)]
pub struct ExmanCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Explicit config file path. When omitted, the config is discovered at
	/// `exman.toml`, `.exman.toml`, or `.config/exman.toml` under the
	/// project root.
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,

	/// Records document path, overriding the `records` entry in the config.
	#[arg(long, global = true)]
	pub records: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Generate manifest documents for all categories.
	///
	/// Resolves every example record through the configured filter rules and
	/// writes one `<category>-manifest.json` document per category that has
	/// examples. Categories without examples produce no document. Advisory
	/// warnings about missing expected attributes are printed to stderr and
	/// never fail the run.
	Generate {
		/// Preview without writing files. Prints which documents would be
		/// written and how many entries each contains.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that the manifest documents on disk are up to date.
	///
	/// Regenerates all documents in memory and compares them byte-for-byte
	/// against the output directory. Exits with a non-zero status code when
	/// a document is missing, stale, or left over from a category that no
	/// longer has examples.
	///
	/// Ideal for CI pipelines. Use `--diff` to see exactly what changed.
	Check {
		/// Show a unified diff for each stale document.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the resolved manifest entries without writing anything.
	///
	/// Prints every entry per category with its tags and main file. Useful
	/// for auditing filter rules and tag cleanup before generating.
	List,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output with colors and formatting.
	Text,
	/// JSON output for programmatic consumption. Each stale entry includes
	/// the category, document path, and staleness reason.
	Json,
}
