mod common;

use exman_core::AnyEmptyResult;

#[test]
fn check_passes_after_generate() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut generate = common::exman_cmd();
	let _ = generate
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let mut check = common::exman_cmd();
	let _ = check
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_fails_when_documents_are_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut check = common::exman_cmd();
	let _ = check
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("missing"));

	Ok(())
}

#[test]
fn check_fails_after_manual_edit() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut generate = common::exman_cmd();
	let _ = generate
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let manifest = tmp.path().join("manifests/examples-manifest.json");
	let mut content = std::fs::read_to_string(&manifest)?;
	content.push_str("{}\n");
	std::fs::write(&manifest, content)?;

	let mut check = common::exman_cmd();
	let _ = check
		.arg("check")
		.arg("--diff")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("out of date"));

	Ok(())
}

#[test]
fn check_reports_leftover_documents() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("exman.toml"), common::SAMPLE_CONFIG)?;
	std::fs::write(
		tmp.path().join("examples.json"),
		r#"{"examples": [{"name": "animation/animatedtiles", "title": "Animated Tiles"}]}"#,
	)?;

	let mut generate = common::exman_cmd();
	let _ = generate
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	// A demos document left over from an earlier run would never be
	// regenerated: the category has no examples.
	std::fs::write(
		tmp.path().join("manifests/demos-manifest.json"),
		"{\"entries\": []}\n",
	)?;

	let mut check = common::exman_cmd();
	let _ = check
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("no examples for category"));

	Ok(())
}

#[test]
fn check_json_format_reports_ok() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_project(tmp.path());

	let mut generate = common::exman_cmd();
	let _ = generate
		.arg("generate")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let mut check = common::exman_cmd();
	let _ = check
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("{\"ok\":true,\"stale\":[]}"));

	Ok(())
}
