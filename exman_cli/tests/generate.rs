mod common;

use exman_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;
use similar_asserts::assert_eq;

#[test]
fn generate_writes_manifest_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Wrote"));

	let examples: Value = serde_json::from_str(&std::fs::read_to_string(
		tmp.path().join("manifests/examples-manifest.json"),
	)?)?;

	assert_eq!(examples["module"], "QtQuick");
	assert_eq!(examples["category"], "examples");

	let entry = &examples["entries"][0];
	assert_eq!(entry["name"], "Animated Tiles");
	assert_eq!(
		entry["docUrl"],
		"qthelp://org.qt-project.qtquick/qtquick/animation-animatedtiles.html"
	);
	assert_eq!(entry["attributes"]["isHighlighted"], "true");
	assert_eq!(
		entry["attributes"]["projectPath"],
		"quick/animatedtiles/CMakeLists.txt"
	);
	assert_eq!(entry["description"], "Animates tiles around the screen.");

	let tags: Vec<&str> = entry["tags"]
		.as_array()
		.unwrap()
		.iter()
		.map(|tag| tag.as_str().unwrap())
		.collect();
	assert_eq!(tags, vec!["animated", "graphics", "quick", "tiles"]);

	let first_file = &entry["filesToOpen"][0];
	assert_eq!(first_file["path"], "quick/animatedtiles.qml");
	assert_eq!(first_file["main"], true);

	let demos: Value = serde_json::from_str(&std::fs::read_to_string(
		tmp.path().join("manifests/demos-manifest.json"),
	)?)?;
	assert_eq!(demos["entries"][0]["name"], "Same Game");

	Ok(())
}

#[test]
fn generate_skips_category_without_examples() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("exman.toml"), common::SAMPLE_CONFIG)?;
	std::fs::write(
		tmp.path().join("examples.json"),
		r#"{"examples": [{"name": "animation/animatedtiles", "title": "Animated Tiles"}]}"#,
	)?;

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("manifests/examples-manifest.json").is_file());
	assert!(!tmp.path().join("manifests/demos-manifest.json").exists());

	Ok(())
}

#[test]
fn generate_dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--dry-run")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run").and(
			predicates::str::contains("examples-manifest.json"),
		));

	assert!(!tmp.path().join("manifests").exists());

	Ok(())
}

#[test]
fn generate_warns_about_missing_attributes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	// The demo record has neither a project file nor an image; the run still
	// succeeds.
	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(
			predicates::str::contains("demos/samegame: missing attribute imageUrl").and(
				predicates::str::contains("demos/samegame: missing attribute projectPath"),
			),
		);

	Ok(())
}

#[test]
fn generate_fails_without_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(2)
		.stderr(predicates::str::contains("no config file found"));

	Ok(())
}

#[test]
fn generate_reads_toml_records() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("exman.toml"), common::SAMPLE_CONFIG)?;
	std::fs::write(
		tmp.path().join("examples.toml"),
		"[[examples]]\nname = \"animation/animatedtiles\"\ntitle = \"Animated Tiles\"\n",
	)?;

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("generate")
		.arg("--records")
		.arg("examples.toml")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	assert!(tmp.path().join("manifests/examples-manifest.json").is_file());

	Ok(())
}
