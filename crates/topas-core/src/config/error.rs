use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "EXPERIMENT_PARAMETERS.toml does not exist at the expected location '{path}'. \
         Refer to the original file structure.",
        path = path.display()
    )]
    MissingParametersFile { path: PathBuf },

    #[error(
        "EXPERIMENT_GEOMETRY.txt does not exist at the expected location '{path}'. \
         Refer to the original file structure.",
        path = path.display()
    )]
    MissingGeometryFile { path: PathBuf },

    #[error("File I/O error for '{path}': {source}", path = path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parsing error for '{path}': {source}", path = path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for '{field}': {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
}
