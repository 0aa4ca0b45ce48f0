use std::collections::BTreeMap;

use crate::ExampleRecord;
use crate::FilterRule;
use crate::ManifestContext;

pub fn quick_context() -> ManifestContext {
	ManifestContext {
		module: "QtQuick".to_string(),
		doc_root: "qthelp://org.qt-project.qtquick/qtquick/".to_string(),
		install_path: "quick/".to_string(),
	}
}

pub fn record(name: &str, title: &str, files: &[&str]) -> ExampleRecord {
	ExampleRecord {
		name: name.to_string(),
		title: title.to_string(),
		files: files.iter().map(ToString::to_string).collect(),
		..ExampleRecord::default()
	}
}

pub fn animated_tiles_record() -> ExampleRecord {
	ExampleRecord {
		brief: Some("Animates tiles around the screen.".to_string()),
		project_file: Some("animatedtiles/CMakeLists.txt".to_string()),
		image_file: Some("images/animatedtiles-example.png".to_string()),
		..record(
			"animation/animatedtiles",
			"Animated Tiles",
			&["animatedtiles.cpp", "animatedtiles.qml", "main.cpp"],
		)
	}
}

pub fn samegame_demo_record() -> ExampleRecord {
	record(
		"demos/samegame",
		"Same Game",
		&["samegame.qml", "main.cpp"],
	)
}

pub fn meta_record(name: &str, title: &str, key: &str, values: &[&str]) -> ExampleRecord {
	let mut meta = BTreeMap::new();
	meta.insert(
		key.to_string(),
		values.iter().map(ToString::to_string).collect(),
	);

	ExampleRecord {
		meta,
		..record(name, title, &[])
	}
}

pub fn rule(names: &[&str], attributes: &[&str], tags: &[&str]) -> FilterRule {
	FilterRule::new(
		names,
		attributes,
		tags.iter().map(ToString::to_string),
	)
}

pub fn highlighted_rule() -> FilterRule {
	rule(&["QtQuick/Animated Tiles"], &["isHighlighted"], &[])
}

pub fn catch_all_rule() -> FilterRule {
	rule(&["*"], &["category:quick"], &["graphics"])
}
