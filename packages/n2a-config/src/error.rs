pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to read config file at {path:?}.")]
	ReadConfig { path: std::path::PathBuf, source: std::io::Error },
	#[error("Failed to parse config file at {path:?}.")]
	ParseConfig { path: std::path::PathBuf, source: toml::de::Error },
	#[error("Mapping document is not valid JSON: {source}")]
	ParseMappings { source: serde_json::Error },
	#[error("Environment variable {name} must hold the Notion integration token.")]
	MissingToken { name: String },
	#[error("{message}")]
	Validation { message: String },
}
