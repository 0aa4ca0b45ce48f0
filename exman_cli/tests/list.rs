mod common;

use exman_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;

#[test]
fn list_prints_resolved_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(
			predicates::str::contains("examples:")
				.and(predicates::str::contains("demos:"))
				.and(predicates::str::contains("Animated Tiles"))
				.and(predicates::str::contains("main: quick/animatedtiles.qml"))
				.and(predicates::str::contains("Same Game")),
		);

	// Listing never writes documents.
	assert!(!tmp.path().join("manifests").exists());

	Ok(())
}

#[test]
fn list_reports_empty_catalogs() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("exman.toml"), common::SAMPLE_CONFIG)?;
	std::fs::write(tmp.path().join("examples.json"), r#"{"examples": []}"#)?;

	let mut cmd = common::exman_cmd();
	let _ = cmd
		.arg("list")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("No examples found."));

	Ok(())
}
