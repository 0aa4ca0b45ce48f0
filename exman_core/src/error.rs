use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ExmanError {
	#[error(transparent)]
	#[diagnostic(code(exman::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(exman::config_parse),
		help("check that exman.toml is valid TOML with [project] and [meta] sections")
	)]
	ConfigParse(String),

	#[error("failed to load records file `{path}`: {reason}")]
	#[diagnostic(code(exman::records_file))]
	RecordsFile { path: String, reason: String },

	#[error("unsupported records file format: `{0}`")]
	#[diagnostic(
		code(exman::unsupported_format),
		help("supported formats: json, toml, yaml, yml")
	)]
	UnsupportedRecordFormat(String),

	#[error("failed to serialize manifest document for `{category}`: {reason}")]
	#[diagnostic(code(exman::manifest_serialize))]
	ManifestSerialize { category: String, reason: String },
}

pub type ExmanResult<T> = Result<T, ExmanError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
