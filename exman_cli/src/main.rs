use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use exman_cli::Commands;
use exman_cli::ExmanCli;
use exman_cli::OutputFormat;
use exman_core::AnyError;
use exman_core::CATEGORIES;
use exman_core::ExampleRecord;
use exman_core::ExmanConfig;
use exman_core::ExmanError;
use exman_core::ManifestContext;
use exman_core::ManifestDocument;
use exman_core::ManifestOutput;
use exman_core::generate_manifests;
use exman_core::parse_records;
use exman_core::record_format_for_path;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = ExmanCli::parse();

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	// Respect NO_COLOR, --no-color, and the terminal's own capabilities.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match args.command {
		Some(Commands::Generate { dry_run }) => run_generate(&args, dry_run),
		Some(Commands::Check { diff, format }) => run_check(&args, diff, format),
		Some(Commands::List) => run_list(&args),
		None => {
			eprintln!("No subcommand specified. Run `exman --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<ExmanError>() {
			Ok(exman_err) => {
				let report: miette::Report = (*exman_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &ExmanCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Load config and records, resolving relative paths against the project
/// root.
fn load_inputs(args: &ExmanCli) -> Result<(ExmanConfig, Vec<ExampleRecord>, PathBuf), AnyError> {
	let root = resolve_root(args);

	let config = match &args.config {
		Some(path) => ExmanConfig::load_file(&root.join(path))?,
		None => ExmanConfig::load(&root)?.ok_or(
			"no config file found; create an exman.toml with a [project] section or pass --config",
		)?,
	};

	let records_path = root.join(
		args.records
			.clone()
			.unwrap_or_else(|| config.records_path()),
	);
	let format = record_format_for_path(&records_path)?;
	let content =
		std::fs::read_to_string(&records_path).map_err(|e| ExmanError::RecordsFile {
			path: records_path.display().to_string(),
			reason: e.to_string(),
		})?;
	let records = parse_records(&content, format, &records_path.display().to_string())?;

	Ok((config, records, root))
}

/// Run the engine and print its advisory diagnostics as warnings.
fn generate_and_warn(
	args: &ExmanCli,
) -> Result<(ExmanConfig, ManifestOutput, PathBuf), AnyError> {
	let (config, records, root) = load_inputs(args)?;
	let ctx = ManifestContext::from_config(&config);
	let output = generate_manifests(&records, &config.filter_rules(), &ctx);

	if args.verbose {
		println!(
			"Resolved {} example(s) into {} document(s)",
			records.len(),
			output.documents.len()
		);
	}

	for diagnostic in &output.diagnostics {
		eprintln!(
			"{} {}",
			colored!("warning:", yellow),
			diagnostic.message()
		);
	}

	Ok((config, output, root))
}

fn manifest_path(root: &Path, config: &ExmanConfig, category: &str) -> PathBuf {
	root.join(&config.output.dir)
		.join(format!("{category}-manifest.json"))
}

/// Serialize one manifest document the way it is written to disk.
fn render_document(document: &ManifestDocument) -> Result<String, AnyError> {
	let json =
		serde_json::to_string_pretty(document).map_err(|e| ExmanError::ManifestSerialize {
			category: document.category.clone(),
			reason: e.to_string(),
		})?;
	Ok(format!("{json}\n"))
}

fn run_generate(args: &ExmanCli, dry_run: bool) -> Result<(), AnyError> {
	let (config, output, root) = generate_and_warn(args)?;

	if output.documents.is_empty() {
		println!("No examples found; no manifest documents generated.");
		return Ok(());
	}

	if dry_run {
		println!("Dry run: would write {} document(s):", output.documents.len());
		for document in &output.documents {
			let path = manifest_path(&root, &config, &document.category);
			println!(
				"  {} ({} entry/entries)",
				path.display(),
				document.entries.len()
			);
		}
		return Ok(());
	}

	std::fs::create_dir_all(root.join(&config.output.dir))?;
	for document in &output.documents {
		let path = manifest_path(&root, &config, &document.category);
		std::fs::write(&path, render_document(document)?)?;
		println!(
			"Wrote {} ({} entry/entries)",
			path.display(),
			document.entries.len()
		);
	}

	Ok(())
}

/// The reason a manifest document on disk is considered stale.
struct StaleDocument {
	category: String,
	path: PathBuf,
	reason: &'static str,
	current: Option<String>,
	expected: Option<String>,
}

fn run_check(args: &ExmanCli, show_diff: bool, format: OutputFormat) -> Result<(), AnyError> {
	let (config, output, root) = generate_and_warn(args)?;

	let mut stale: Vec<StaleDocument> = Vec::new();
	for category in CATEGORIES {
		let path = manifest_path(&root, &config, category);
		let on_disk = std::fs::read_to_string(&path).ok();

		match (output.document(category), on_disk) {
			(Some(document), Some(current)) => {
				let expected = render_document(document)?;
				if current != expected {
					stale.push(StaleDocument {
						category: category.to_string(),
						path,
						reason: "out of date",
						current: Some(current),
						expected: Some(expected),
					});
				}
			}
			(Some(_), None) => {
				stale.push(StaleDocument {
					category: category.to_string(),
					path,
					reason: "missing",
					current: None,
					expected: None,
				});
			}
			(None, Some(_)) => {
				// A leftover document for a category that no longer has
				// examples would not be regenerated.
				stale.push(StaleDocument {
					category: category.to_string(),
					path,
					reason: "no examples for category",
					current: None,
					expected: None,
				});
			}
			(None, None) => {}
		}
	}

	if stale.is_empty() {
		match format {
			OutputFormat::Json => println!("{{\"ok\":true,\"stale\":[]}}"),
			OutputFormat::Text => {
				println!("Check passed: all manifest documents are up to date.");
			}
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = stale
				.iter()
				.map(|entry| {
					serde_json::json!({
						"category": entry.category,
						"path": entry.path.display().to_string(),
						"reason": entry.reason,
					})
				})
				.collect();
			let json = serde_json::json!({ "ok": false, "stale": entries });
			println!("{json}");
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			for entry in &stale {
				eprintln!(
					"  {} document {} is {}",
					entry.category,
					entry.path.display(),
					entry.reason
				);
				if show_diff {
					if let (Some(current), Some(expected)) = (&entry.current, &entry.expected) {
						print_diff(current, expected);
					}
				}
			}
			eprintln!();
			eprintln!(
				"{} document(s) are out of date. Run `exman generate` to fix.",
				stale.len()
			);
		}
	}

	process::exit(1)
}

fn run_list(args: &ExmanCli) -> Result<(), AnyError> {
	let (_, output, _) = generate_and_warn(args)?;

	if output.documents.is_empty() {
		println!("No examples found.");
		return Ok(());
	}

	let mut total = 0;
	for document in &output.documents {
		println!("{}", colored!(format!("{}:", document.category), bold));
		for entry in &document.entries {
			let main_file = entry
				.files_to_open
				.iter()
				.find(|file| file.main)
				.map_or("none", |file| file.path.as_str());
			println!(
				"  {} [{}] main: {main_file}",
				entry.name,
				entry.tags.join(",")
			);
		}
		total += document.entries.len();
	}

	println!(
		"\n{} entry/entries in {} document(s)",
		total,
		output.documents.len()
	);

	Ok(())
}

/// Print a unified diff between two strings, colorized.
fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
