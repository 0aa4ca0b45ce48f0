use std::path::Path;

use assert_cmd::Command;

pub fn exman_cmd() -> Command {
	let mut cmd = Command::cargo_bin("exman").expect("exman binary builds");
	cmd.env("NO_COLOR", "1");
	cmd
}

pub const SAMPLE_CONFIG: &str = r#"records = "examples.json"

[project]
module = "QtQuick"
url_namespace = "org.qt-project.qtquick"
virtual_folder = "qtquick"
examples_install_path = "quick"

[output]
dir = "manifests"

[meta]
filters = ["highlighted", "module"]

[meta.highlighted]
names = ["QtQuick/Animated Tiles"]
attributes = ["isHighlighted"]

[meta.module]
names = ["*"]
tags = ["graphics"]
"#;

pub const SAMPLE_RECORDS: &str = r#"{
	"examples": [
		{
			"name": "animation/animatedtiles",
			"title": "Animated Tiles",
			"brief": "Animates tiles around the screen.",
			"project_file": "animatedtiles/CMakeLists.txt",
			"image_file": "images/animatedtiles-example.png",
			"files": ["animatedtiles.cpp", "animatedtiles.qml", "main.cpp"]
		},
		{
			"name": "demos/samegame",
			"title": "Same Game",
			"files": ["samegame.qml", "main.cpp"]
		}
	]
}
"#;

/// Write a complete sample project (config plus records) into `root`.
pub fn write_project(root: &Path) {
	std::fs::write(root.join("exman.toml"), SAMPLE_CONFIG).expect("config written");
	std::fs::write(root.join("examples.json"), SAMPLE_RECORDS).expect("records written");
}
